use std::fs;

use evently::config::{ConfigError, ConfigLoader};
use tempfile::TempDir;

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .expect("config loads with defaults");

    assert_eq!(config.profile, "local");
    assert_eq!(config.api_base_url, "http://localhost:8000/api");
    assert_eq!(config.page_size, 10);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_format, "json");
    config.base_url().expect("default base url parses");
}

#[test]
fn env_local_overrides_env() {
    let dir = TempDir::new().unwrap();
    write_env_file(
        &dir,
        ".env",
        "EVENTLY_API_BASE_URL=http://one.example/api\nEVENTLY_PAGE_SIZE=5\n",
    );
    write_env_file(&dir, ".env.local", "EVENTLY_PAGE_SIZE=7\n");

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.api_base_url, "http://one.example/api");
    assert_eq!(config.page_size, 7);
}

#[test]
fn profile_specific_file_overrides_base_layers() {
    let dir = TempDir::new().unwrap();
    write_env_file(
        &dir,
        ".env",
        "EVENTLY_PROFILE=staging\nEVENTLY_API_BASE_URL=http://base.example/api\n",
    );
    write_env_file(
        &dir,
        ".env.staging",
        "EVENTLY_API_BASE_URL=http://staging.example/api\n",
    );

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.profile, "staging");
    assert_eq!(config.api_base_url, "http://staging.example/api");
}

#[test]
fn unprefixed_variables_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "PAGE_SIZE=3\nEVENTLY_PAGE_SIZE=4\n");

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.page_size, 4);
}

#[test]
fn unparsable_page_size_falls_back_to_the_default() {
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "EVENTLY_PAGE_SIZE=lots\n");

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.page_size, 10);
}

#[test]
fn zero_page_size_fails_validation() {
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "EVENTLY_PAGE_SIZE=0\n");

    let err = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidPageSize { value: 0 }));
}

#[test]
fn invalid_base_url_fails_validation() {
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "EVENTLY_API_BASE_URL=::not-a-url::\n");

    let err = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
}
