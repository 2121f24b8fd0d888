use super::fixed_big_int::FixedBigInt;
use super::replay_detector::ReplayDetector;

/// Replay window over a counter that never wraps (or whose wrap is handled
/// by the caller, e.g. a 48-bit extended index).
///
/// Rejects values above `max_seq`, duplicates, and anything `window_size` or
/// more behind the newest accepted value.
#[derive(Debug, Clone)]
pub struct SlidingWindowDetector {
    accepted: bool,
    seq: u64,
    latest_seq: u64,
    max_seq: u64,
    window_size: usize,
    mask: FixedBigInt,
}

impl SlidingWindowDetector {
    pub fn new(window_size: usize, max_seq: u64) -> Self {
        Self {
            accepted: false,
            seq: 0,
            latest_seq: 0,
            max_seq,
            window_size,
            mask: FixedBigInt::new(window_size),
        }
    }
}

impl ReplayDetector for SlidingWindowDetector {
    fn check(&mut self, seq: u64) -> bool {
        self.accepted = false;

        if seq > self.max_seq {
            return false;
        }

        if seq <= self.latest_seq {
            let behind = self.latest_seq - seq;
            if behind >= self.window_size as u64 {
                return false;
            }
            if self.mask.bit(behind as usize) {
                return false;
            }
        }

        self.accepted = true;
        self.seq = seq;
        true
    }

    fn accept(&mut self) {
        if !self.accepted {
            return;
        }
        self.accepted = false;

        if self.seq > self.latest_seq {
            let ahead = self.seq - self.latest_seq;
            self.mask.lsh(usize::try_from(ahead).unwrap_or(usize::MAX));
            self.latest_seq = self.seq;
        }
        let behind = self.latest_seq - self.seq;
        self.mask.set_bit(behind as usize);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn feed(d: &mut SlidingWindowDetector, seq: u64) -> bool {
        let ok = d.check(seq);
        if ok {
            d.accept();
        }
        ok
    }

    #[test]
    fn accepts_in_order_and_rejects_duplicates() {
        let mut d = SlidingWindowDetector::new(64, 0xFFFF);
        for s in 0..10 {
            assert!(feed(&mut d, s));
        }
        assert!(!feed(&mut d, 5));
        assert!(!feed(&mut d, 9));
        assert!(feed(&mut d, 10));
    }

    #[test]
    fn reorder_inside_window_is_accepted_once() {
        let mut d = SlidingWindowDetector::new(16, 0xFFFF);
        assert!(feed(&mut d, 100));
        assert!(feed(&mut d, 95));
        assert!(!feed(&mut d, 95));
        assert!(feed(&mut d, 85)); // 15 behind, last slot
        assert!(!feed(&mut d, 84)); // 16 behind, outside
    }

    #[test]
    fn rejects_values_above_max() {
        let mut d = SlidingWindowDetector::new(64, 0x7FFF_FFFF);
        assert!(!feed(&mut d, 0x8000_0000));
        assert!(feed(&mut d, 0x7FFF_FFFF));
    }

    #[test]
    fn check_without_accept_leaves_window_untouched() {
        let mut d = SlidingWindowDetector::new(64, 0xFFFF);
        assert!(feed(&mut d, 10));
        assert!(d.check(11)); // authentication failed, never accepted
        assert!(d.check(11));
        d.accept();
        assert!(!d.check(11));
        // a failed check clears the pending value
        assert!(d.check(12));
        assert!(!d.check(11));
        d.accept();
        assert!(d.check(12));
    }

    #[test]
    fn large_jump_clears_history() {
        let mut d = SlidingWindowDetector::new(64, u32::MAX as u64);
        assert!(feed(&mut d, 1));
        assert!(feed(&mut d, 1_000_000));
        assert!(!feed(&mut d, 1));
        assert!(feed(&mut d, 999_990));
    }
}
