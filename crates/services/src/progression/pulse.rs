use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// How long the success pulse stays visible.
pub const PULSE_DURATION: Duration = Duration::from_millis(1000);

/// Identifies one `Pulse::trigger` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTicket(u64);

#[derive(Debug, Default)]
struct PulseState {
    active: AtomicBool,
    generation: AtomicU64,
}

/// Transient success indicator that clears itself after [`PULSE_DURATION`].
///
/// Each trigger bumps a generation; only the newest ticket may clear the flag,
/// so a pulse fired while an older one is pending stays up for its full duration.
#[derive(Debug, Clone, Default)]
pub struct Pulse {
    state: Arc<PulseState>,
}

impl Pulse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.active.load(Ordering::Acquire)
    }

    /// Raise the flag and return the ticket that is allowed to lower it.
    #[must_use]
    pub fn trigger(&self) -> PulseTicket {
        let generation = self.state.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.active.store(true, Ordering::Release);
        PulseTicket(generation)
    }

    /// Lower the flag if `ticket` is still the newest. Returns whether it did.
    pub fn settle(&self, ticket: PulseTicket) -> bool {
        if self.state.generation.load(Ordering::Acquire) != ticket.0 {
            return false;
        }
        self.state.active.store(false, Ordering::Release);
        true
    }

    /// Lower the flag now and invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.state.generation.fetch_add(1, Ordering::AcqRel);
        self.state.active.store(false, Ordering::Release);
    }

    /// Wait out [`PULSE_DURATION`], then settle `ticket`.
    pub async fn run(&self, ticket: PulseTicket) -> bool {
        tokio::time::sleep(PULSE_DURATION).await;
        self.settle(ticket)
    }
}
