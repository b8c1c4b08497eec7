//! Error types for the simulation core.

use gillespie_env::EnvError;
use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Reaching equilibrium is not an error; it is reported through
/// [`crate::Selection::Equilibrium`] and [`crate::SimulationOutcome::equilibrium`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A computed propensity is negative or NaN (malformed rate constant or state)
    #[error("Reaction {reaction} has negative propensity {value}")]
    NegativePropensity { reaction: usize, value: f64 },

    /// State lookup before the trajectory start time
    #[error("No recorded state at or before t={time}")]
    EmptyTrajectoryQuery { time: f64 },

    /// A reaction refers to a species index that was never registered
    #[error("Unknown species index {0}")]
    UnknownSpecies(usize),

    /// A species name was registered twice
    #[error("Duplicate species name: {0}")]
    DuplicateSpecies(String),

    /// A state vector does not match the network's species vector
    #[error("State vector has {actual} entries, expected {expected}")]
    StateLengthMismatch { expected: usize, actual: usize },

    /// Start/end times are not finite or out of order
    #[error("Invalid time window [{start}, {end}]")]
    InvalidHorizon { start: f64, end: f64 },

    /// Windowing needs at least two checkpoints
    #[error("Invalid checkpoint count {0} (need at least 2)")]
    InvalidCheckpointCount(usize),

    /// A window index points past the trajectory
    #[error("Window index {index} out of range for trajectory of length {len}")]
    WindowIndexOutOfRange { index: usize, len: usize },

    /// A reaction index outside the network
    #[error("Unknown reaction index {0}")]
    UnknownReaction(usize),

    /// The random source failed
    #[error("Random source error: {0}")]
    Random(#[from] EnvError),
}
