use super::replay_detector::ReplayDetector;

/// Accepts every packet. Used for outbound contexts and when replay
/// protection is disabled by configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpReplayDetector;

impl ReplayDetector for NoOpReplayDetector {
    fn check(&mut self, _seq: u64) -> bool {
        true
    }

    fn accept(&mut self) {}
}
