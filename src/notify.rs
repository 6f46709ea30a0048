//! Notification capability.
//!
//! Where the original UI raised toasts through a global channel, the
//! controller and the one-shot actions take an injected [`Notify`] instead,
//! so tests can observe notifications deterministically.

/// Sink for transient user-facing notifications.
pub trait Notify: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Routes notifications through the tracing pipeline.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(%message, "notification");
    }

    fn error(&self, message: &str) {
        tracing::warn!(%message, "notification");
    }
}

/// Prints notifications to stderr for the CLI, keeping stdout clean for
/// rendered views.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("ok: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
