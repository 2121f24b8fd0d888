/// Two-phase replay check.
///
/// `check` decides whether `seq` may be processed and remembers it as pending.
/// `accept` commits the pending value once the packet has been authenticated.
/// If the packet fails later on, `accept` must not be called and the window
/// stays exactly as it was before `check`.
pub trait ReplayDetector: Send {
    fn check(&mut self, seq: u64) -> bool;
    fn accept(&mut self);
}
