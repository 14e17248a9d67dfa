mod engine;
mod outcome;
mod pulse;
mod state;

// Public API of the progression subsystem.
pub use crate::error::ProgressionError;
pub use engine::ProgressionEngine;
pub use outcome::CommandOutcome;
pub use pulse::{PULSE_DURATION, Pulse, PulseTicket};
pub use state::ProgressionState;
