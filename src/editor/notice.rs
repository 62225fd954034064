/// User-visible notices (a toast, a status line, stderr).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Sends notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(notice = %message, "user notice");
    }
}
