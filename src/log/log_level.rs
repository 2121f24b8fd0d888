use std::fmt;

/// Defines the severity levels for log messages.
///
/// Variants are ordered from the most verbose to the most severe, so sinks
/// can filter with a plain comparison (`level >= LogLevel::Warn`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Per-packet details (indexes, rollover counters, tag bytes).
    Trace,
    /// Context construction and other one-off events useful while debugging.
    Debug,
    /// Coarse-grained progress messages.
    Info,
    /// Rejected packets that are expected on a hostile or lossy network (replays).
    Warn,
    /// Packets that failed authentication.
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
