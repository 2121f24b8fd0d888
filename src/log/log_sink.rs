use crate::log::log_level::LogLevel;

/// Destination for the crate's diagnostic messages.
///
/// Contexts hold an `Arc<dyn LogSink>` and never block on it; implementations
/// are expected to be cheap and non-blocking (drop rather than wait).
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
