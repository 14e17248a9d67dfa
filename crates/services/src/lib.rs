#![forbid(unsafe_code)]

pub mod error;
pub mod progression;

pub use quest_core::Clock;

pub use error::ProgressionError;
pub use progression::{
    CommandOutcome, PULSE_DURATION, ProgressionEngine, ProgressionState, Pulse, PulseTicket,
};
