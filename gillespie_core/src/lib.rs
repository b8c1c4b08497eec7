//! Gillespie Core - Exact Stochastic Simulation of Reaction Networks
//!
//! This library simulates well-mixed chemical reaction networks one event at
//! a time:
//! 1. **Model**: species counts live in an arena ([`SpeciesRegistry`]);
//!    reactions refer to them by [`SpeciesId`]
//! 2. **Selection**: the Direct Method and the First Reaction Method behind
//!    one [`EventSelector`] trait
//! 3. **Recording**: a [`Trajectory`] of firing times and states, resampled
//!    onto fixed checkpoints by the [`window`] module

mod error;
pub mod network;
pub mod reaction;
pub mod selector;
pub mod simulation;
pub mod species;
pub mod trajectory;
pub mod window;

// Re-export key types for convenience
pub use error::CoreError;
pub use network::{NetworkBuilder, ReactionNetwork, GIBSON_BRUCK_SPECIES};
pub use reaction::{Reaction, ReactionShape, Term};
pub use selector::{DirectMethod, EventSelector, FirstReactionMethod, Method, Selection};
pub use simulation::{Simulation, SimulationOutcome};
pub use species::{Species, SpeciesId, SpeciesRegistry};
pub use trajectory::Trajectory;
pub use window::{checkpoints, resample, window_indices, window_trajectory};
