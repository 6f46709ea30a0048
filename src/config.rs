//! Configuration loading for the Evently client.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `EVENTLY_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Application configuration derived from `EVENTLY_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Origin of the backend REST API, including any path prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Items requested per page for list views.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_page_size() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("invalid api base url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("api base url '{value}' must use http or https")]
    UnsupportedScheme { value: String },
    #[error("page size must be between 1 and 100, got {value}")]
    InvalidPageSize { value: u64 },
}

impl AppConfig {
    /// Validate field constraints; called by the loader after merging.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                value: self.api_base_url.clone(),
            });
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConfigError::InvalidPageSize {
                value: self.page_size,
            });
        }
        Ok(())
    }

    /// Parsed form of `api_base_url`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: self.api_base_url.clone(),
            source,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Loads configuration using layered `.env` files and `EVENTLY_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Load `.env`, `.env.local`, `.env.<profile>`, `.env.<profile>.local`
    /// in that order, then overlay process environment variables last so
    /// they win.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("EVENTLY_") {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);
        let api_base_url = layered
            .remove("API_BASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_api_base_url);
        let page_size = layered
            .remove("PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_page_size);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_format);

        let config = AppConfig {
            profile,
            api_base_url,
            page_size,
            log_level,
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var("EVENTLY_PROFILE")
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix("EVENTLY_") {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
