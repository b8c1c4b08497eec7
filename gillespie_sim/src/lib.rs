//! Gillespie Ensemble Harness
//!
//! This crate repeats a stochastic simulation many times from the same
//! initial state and reduces the runs to comparable, windowed snapshots.
//!
//! # Core Principle: One Stream per Trial
//!
//! Trial `k` draws from its own ChaCha8 stream seeded with
//! `derive_stream_seed(master_seed, k)`. Trials share nothing mutable, so
//! they can run on a rayon pool and still produce exactly the sequential
//! results.
//!
//! # Pipeline
//!
//! ```text
//! SimConfig ──► ScenarioId::build_network ──► template network
//!                                                  │ clone + reset per trial
//!                                                  ▼
//!                     Simulation::run ──► Trajectory ──► window_trajectory
//!                                                              │
//!                     EnsembleReport ◄─────────────────────────┘
//!                           │
//!                           ▼
//!                    EnsembleSummary ──► SimExport (JSON)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use gillespie_sim::{EnsembleRunner, EnsembleSummary, SimConfig};
//!
//! let config = SimConfig {
//!     seed: 7,
//!     trials: 500,
//!     ..Default::default()
//! };
//!
//! let report = EnsembleRunner::new(config)?.run()?;
//! let summary = EnsembleSummary::from_report(&report);
//! ```

mod config;
mod error;
mod exporter;
mod runner;
mod summary;
pub mod scenarios;

pub use config::{SimConfig, WindowSpan};
pub use error::SimError;
pub use exporter::{SimExport, TrajectoryPoint};
pub use runner::{EnsembleReport, EnsembleRunner, TrialFailure, TrialRecord};
pub use summary::{EnsembleSummary, WindowStats};
