//! Error types for the simulation harness.

use gillespie_core::CoreError;
use thiserror::Error;

/// Errors raised while configuring or running an ensemble.
///
/// A single failing trial is not a `SimError`; it is recorded as a
/// [`crate::TrialFailure`] and the ensemble carries on.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Simulation error: {0}")]
    Core(#[from] CoreError),

    /// The rayon pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::Config(msg.into())
    }
}
