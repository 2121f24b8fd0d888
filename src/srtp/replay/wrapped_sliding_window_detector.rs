use super::fixed_big_int::FixedBigInt;
use super::replay_detector::ReplayDetector;

/// Replay window over a counter that wraps at `max_seq`.
///
/// Distances are taken modulo `max_seq + 1` and folded into
/// `(-max_seq / 2, max_seq / 2]`, so a packet just past the wrap counts as
/// newer than one just before it. The first accepted packet anchors the
/// window; until then nothing is recorded.
#[derive(Debug, Clone)]
pub struct WrappedSlidingWindowDetector {
    accepted: bool,
    seq: u64,
    /// Anchor the pending packet was checked against.
    pending_latest: u64,
    latest_seq: u64,
    max_seq: u64,
    window_size: usize,
    mask: FixedBigInt,
    init: bool,
}

impl WrappedSlidingWindowDetector {
    pub fn new(window_size: usize, max_seq: u64) -> Self {
        Self {
            accepted: false,
            seq: 0,
            pending_latest: 0,
            latest_seq: 0,
            max_seq,
            window_size,
            mask: FixedBigInt::new(window_size),
            init: false,
        }
    }

    /// `latest - seq` folded into the half-open range around zero.
    /// Positive means `seq` is older than `latest`.
    fn distance(&self, latest: u64, seq: u64) -> i128 {
        let modulus = self.max_seq as i128 + 1;
        let half = self.max_seq as i128 / 2;
        let mut diff = (latest as i128 - seq as i128).rem_euclid(modulus);
        if diff > half {
            diff -= modulus;
        }
        diff
    }
}

impl ReplayDetector for WrappedSlidingWindowDetector {
    fn check(&mut self, seq: u64) -> bool {
        self.accepted = false;

        if seq > self.max_seq {
            return false;
        }

        let latest = if self.init {
            self.latest_seq
        } else if seq == 0 {
            self.max_seq
        } else {
            seq - 1
        };

        let diff = self.distance(latest, seq);
        if diff >= self.window_size as i128 {
            return false;
        }
        if diff >= 0 && self.mask.bit(diff as usize) {
            return false;
        }

        self.accepted = true;
        self.seq = seq;
        self.pending_latest = latest;
        true
    }

    fn accept(&mut self) {
        if !self.accepted {
            return;
        }
        self.accepted = false;
        self.init = true;
        self.latest_seq = self.pending_latest;

        let diff = self.distance(self.latest_seq, self.seq);
        if diff < 0 {
            self.mask.lsh(usize::try_from(-diff).unwrap_or(usize::MAX));
            self.latest_seq = self.seq;
        }
        let behind = self.distance(self.latest_seq, self.seq);
        self.mask.set_bit(usize::try_from(behind).unwrap_or(usize::MAX));
    }
}
