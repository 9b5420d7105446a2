/// User-facing success and error messages (toasts, status lines).
///
/// Fire and forget: callers never depend on what the sink does with a message.
pub trait NotificationSink {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Sink that only writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify_success(&self, message: &str) {
        tracing::info!(notification = message, "success");
    }

    fn notify_error(&self, message: &str) {
        tracing::warn!(notification = message, "error");
    }
}
