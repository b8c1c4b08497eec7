//! Error types for the randomness abstraction.

use thiserror::Error;

/// Errors that can occur while drawing from a random source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// Exponential rate must be finite and strictly positive
    #[error("Invalid exponential rate: {0}")]
    InvalidRate(f64),

    /// Categorical draw over an empty weight list
    #[error("Categorical draw over empty weights")]
    EmptyWeights,

    /// Weights are negative, NaN, or all zero
    #[error("Invalid categorical weights: {0}")]
    InvalidWeights(String),

    /// A scripted source ran out of values
    #[error("Replay source exhausted after {0} draws")]
    ReplayExhausted(usize),
}

impl EnvError {
    /// Creates an invalid-weights error.
    pub fn weights(msg: impl Into<String>) -> Self {
        Self::InvalidWeights(msg.into())
    }
}
