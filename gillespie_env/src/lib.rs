//! Gillespie Environment Abstraction Layer
//!
//! This crate isolates the only source of non-determinism in a stochastic
//! simulation: the random draws. Engines consume a [`RandomSource`] and never
//! touch an RNG directly, so the same code runs against:
//! - **Seeded** streams (`SeededSource`, ChaCha8) for reproducible runs
//! - **Entropy** streams (`EntropySource`, OS entropy) for exploratory runs
//! - **Replayed** uniforms (`ReplaySource`) for tests that script every draw
//!
//! By deriving all per-trial entropy from a single 64-bit master seed, any
//! trajectory becomes reproducible from its seed number.
//!
//! # Example
//!
//! ```ignore
//! use gillespie_env::{RandomSource, SeededSource};
//!
//! let mut source = SeededSource::new(42);
//! let tau = source.exponential(3.5)?;
//! let reaction = source.categorical(&[1.0, 0.0, 2.5])?;
//! ```

mod source;
mod seeded;
mod entropy_impl;
mod replay;
mod types;
mod error;

pub use source::RandomSource;
pub use seeded::SeededSource;
pub use entropy_impl::EntropySource;
pub use replay::ReplaySource;
pub use types::{derive_stream_seed, StreamSeed};
pub use error::EnvError;
