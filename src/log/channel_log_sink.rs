use std::sync::mpsc;

use crate::log::{log_level::LogLevel, log_msg::LogMsg, log_sink::LogSink};

/// Cloneable, non-blocking sink that forwards messages over a bounded channel.
///
/// Packet processing must never stall on logging, so when the queue is full
/// the message is dropped. Messages below `min_level` are filtered before any
/// allocation happens.
///
/// # Examples
/// ```ignore
/// let (sink, rx) = ChannelLogSink::bounded(1024, LogLevel::Warn);
/// let ctx = SrtpContext::new(Arc::new(sink), profile, keys)?;
/// // drain `rx` on a logging thread
/// ```
#[derive(Clone)]
pub struct ChannelLogSink {
    tx: mpsc::SyncSender<LogMsg>,
    min_level: LogLevel,
}

impl ChannelLogSink {
    /// Creates a sink with room for `capacity` queued messages and returns the
    /// receiving end alongside it.
    pub fn bounded(capacity: usize, min_level: LogLevel) -> (Self, mpsc::Receiver<LogMsg>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self { tx, min_level }, rx)
    }

    /// Attempts to enqueue a log message without blocking.
    ///
    /// # Errors
    /// - `TrySendError::Full` when the bounded queue is at capacity.
    /// - `TrySendError::Disconnected` when the receiver has been dropped.
    pub fn try_log<S: Into<String>>(
        &self,
        level: LogLevel,
        text: S,
        target: &'static str,
    ) -> Result<(), mpsc::TrySendError<LogMsg>> {
        self.tx.try_send(LogMsg::new(level, text, target))
    }
}

impl LogSink for ChannelLogSink {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str, target: &'static str) {
        if level < self.min_level {
            return;
        }
        let _ = self.try_log(level, msg, target);
    }
}
