use crate::srtp::constants::{MAX_ROC_DISORDER, MAX_SEQUENCE_NUMBER, MAX_SRTCP_INDEX};
use crate::srtp::replay::ReplayDetector;

/// Per-SSRC SRTP state: rollover tracking plus the replay window.
pub(crate) struct SrtpSsrcState {
    pub(crate) ssrc: u32,
    pub(crate) rollover_counter: u32,
    pub(crate) rollover_has_processed: bool,
    pub(crate) last_sequence_number: u16,
    pub(crate) replay_detector: Box<dyn ReplayDetector>,
}

impl SrtpSsrcState {
    pub(crate) fn new(ssrc: u32, replay_detector: Box<dyn ReplayDetector>) -> Self {
        Self {
            ssrc,
            rollover_counter: 0,
            rollover_has_processed: false,
            last_sequence_number: 0,
            replay_detector,
        }
    }

    /// Rollover counter the packet with `sequence_number` belongs to.
    /// Does not touch the state.
    pub(crate) fn next_rollover_count(&self, sequence_number: u16) -> u32 {
        let roc = self.rollover_counter;
        let last = self.last_sequence_number;

        if !self.rollover_has_processed {
            roc
        } else if sequence_number == 0 {
            // exact wrap; only count it once even if 0 shows up again
            if last > MAX_ROC_DISORDER {
                roc.wrapping_add(1)
            } else {
                roc
            }
        } else if last < MAX_ROC_DISORDER
            && sequence_number > MAX_SEQUENCE_NUMBER - MAX_ROC_DISORDER
        {
            // late packet from before the wrap
            roc.wrapping_sub(1)
        } else if sequence_number < MAX_ROC_DISORDER
            && last > MAX_SEQUENCE_NUMBER - MAX_ROC_DISORDER
        {
            // first packet after the wrap
            roc.wrapping_add(1)
        } else {
            roc
        }
    }

    /// Commits a counter previously returned by [`Self::next_rollover_count`].
    pub(crate) fn commit_rollover_count(&mut self, sequence_number: u16, roc: u32) {
        self.rollover_counter = roc;
        self.last_sequence_number = sequence_number;
        self.rollover_has_processed = true;
    }

    pub(crate) fn set_rollover_count(&mut self, roc: u32) {
        self.rollover_counter = roc;
        self.rollover_has_processed = false;
    }
}

/// Per-SSRC SRTCP state: the 31-bit index plus the replay window.
pub(crate) struct SrtcpSsrcState {
    pub(crate) srtcp_index: u32,
    pub(crate) ssrc: u32,
    pub(crate) replay_detector: Box<dyn ReplayDetector>,
}

impl SrtcpSsrcState {
    pub(crate) fn new(ssrc: u32, replay_detector: Box<dyn ReplayDetector>) -> Self {
        Self {
            srtcp_index: 0,
            ssrc,
            replay_detector,
        }
    }

    /// Advances the outbound index, wrapping past 2^31 - 1 to 0.
    pub(crate) fn next_index(&mut self) -> u32 {
        self.srtcp_index = if self.srtcp_index >= MAX_SRTCP_INDEX {
            0
        } else {
            self.srtcp_index + 1
        };
        self.srtcp_index
    }

    pub(crate) fn set_index(&mut self, index: u32) {
        self.srtcp_index = index % (MAX_SRTCP_INDEX + 1);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::srtp::replay::NoOpReplayDetector;

    fn srtp_state() -> SrtpSsrcState {
        SrtpSsrcState::new(1, Box::new(NoOpReplayDetector))
    }

    fn process(state: &mut SrtpSsrcState, seq: u16) -> u32 {
        let roc = state.next_rollover_count(seq);
        state.commit_rollover_count(seq, roc);
        roc
    }

    #[test]
    fn rollover_across_wrap_and_late_packet() {
        let mut s = srtp_state();
        assert_eq!(process(&mut s, 65530), 0);
        assert_eq!(process(&mut s, 0), 1);
        assert_eq!(process(&mut s, 1), 1);
        assert_eq!(process(&mut s, 65533), 0);
        assert_eq!(process(&mut s, 2), 1);
    }

    #[test]
    fn wrap_without_zero_still_increments() {
        let mut s = srtp_state();
        assert_eq!(process(&mut s, 65500), 0);
        assert_eq!(process(&mut s, 3), 1);
    }

    #[test]
    fn repeated_zero_does_not_double_count() {
        let mut s = srtp_state();
        process(&mut s, 65535);
        assert_eq!(process(&mut s, 0), 1);
        assert_eq!(process(&mut s, 0), 1);
    }

    #[test]
    fn candidate_is_not_committed_until_asked() {
        let mut s = srtp_state();
        process(&mut s, 65535);
        assert_eq!(s.next_rollover_count(1), 1);
        assert_eq!(s.rollover_counter, 0);
        assert_eq!(s.last_sequence_number, 65535);
    }

    #[test]
    fn set_rollover_count_restarts_tracking() {
        let mut s = srtp_state();
        process(&mut s, 65535);
        s.set_rollover_count(7);
        // fresh start: no wrap inferred from the stale last sequence number
        assert_eq!(process(&mut s, 2), 7);
    }

    #[test]
    fn srtcp_index_wraps_to_zero() {
        let mut s = SrtcpSsrcState::new(1, Box::new(NoOpReplayDetector));
        assert_eq!(s.next_index(), 1);
        s.set_index(MAX_SRTCP_INDEX);
        assert_eq!(s.next_index(), 0);
        s.set_index(MAX_SRTCP_INDEX + 5);
        assert_eq!(s.srtcp_index, 4);
    }
}
