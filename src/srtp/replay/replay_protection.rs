use std::fmt;
use std::str::FromStr;

use crate::srtp::constants::DEFAULT_REPLAY_WINDOW_SIZE;

use super::noop_replay_detector::NoOpReplayDetector;
use super::replay_detector::ReplayDetector;
use super::sliding_window_detector::SlidingWindowDetector;
use super::wrapped_sliding_window_detector::WrappedSlidingWindowDetector;

/// Which replay detector a context creates for each new SSRC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayProtection {
    /// Window over a wrapping counter (the default).
    Wrapped { window_size: usize },
    /// Window over a monotonically increasing counter.
    Bounded { window_size: usize },
    Disabled,
}

impl Default for ReplayProtection {
    fn default() -> Self {
        ReplayProtection::Wrapped {
            window_size: DEFAULT_REPLAY_WINDOW_SIZE,
        }
    }
}

impl ReplayProtection {
    /// Fresh detector for a counter space ending at `max_seq`.
    pub fn build(&self, max_seq: u64) -> Box<dyn ReplayDetector> {
        match *self {
            ReplayProtection::Wrapped { window_size } => {
                Box::new(WrappedSlidingWindowDetector::new(window_size, max_seq))
            }
            ReplayProtection::Bounded { window_size } => {
                Box::new(SlidingWindowDetector::new(window_size, max_seq))
            }
            ReplayProtection::Disabled => Box::new(NoOpReplayDetector),
        }
    }

    /// Same kind with a different window; `Disabled` stays disabled.
    pub fn with_window_size(self, window_size: usize) -> Self {
        match self {
            ReplayProtection::Wrapped { .. } => ReplayProtection::Wrapped { window_size },
            ReplayProtection::Bounded { .. } => ReplayProtection::Bounded { window_size },
            ReplayProtection::Disabled => ReplayProtection::Disabled,
        }
    }

    pub fn window_size(&self) -> Option<usize> {
        match *self {
            ReplayProtection::Wrapped { window_size } | ReplayProtection::Bounded { window_size } => {
                Some(window_size)
            }
            ReplayProtection::Disabled => None,
        }
    }
}

/// Parses the detector kind (`wrapped`, `bounded`, `disabled`) with the
/// default window size.
impl FromStr for ReplayProtection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let window_size = DEFAULT_REPLAY_WINDOW_SIZE;
        match s.trim().to_ascii_lowercase().as_str() {
            "wrapped" => Ok(ReplayProtection::Wrapped { window_size }),
            "bounded" => Ok(ReplayProtection::Bounded { window_size }),
            "disabled" | "none" | "off" => Ok(ReplayProtection::Disabled),
            other => Err(format!("unknown replay protection: {other}")),
        }
    }
}

impl fmt::Display for ReplayProtection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayProtection::Wrapped { window_size } => write!(f, "wrapped({window_size})"),
            ReplayProtection::Bounded { window_size } => write!(f, "bounded({window_size})"),
            ReplayProtection::Disabled => f.write_str("disabled"),
        }
    }
}
