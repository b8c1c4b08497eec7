//! The simulation loop: select, fire, advance, record.

use crate::network::ReactionNetwork;
use crate::selector::{Method, Selection};
use crate::trajectory::Trajectory;
use crate::CoreError;
use gillespie_env::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Everything that fired, in order
    pub trajectory: Trajectory,

    /// True when the run stopped because no reaction could fire
    pub equilibrium: bool,

    /// Time of the last recorded point (start time if nothing fired)
    pub final_time: f64,

    /// State at `final_time`
    pub final_state: Vec<u64>,

    /// Number of firings
    pub steps: usize,
}

/// Drives an event selector over a reaction network.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulation {
    method: Method,
}

impl Simulation {
    /// Creates a simulation using the given selection method.
    pub fn new(method: Method) -> Self {
        Self { method }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Runs from `t_start` until `t_end` or equilibrium, whichever first.
    ///
    /// Each iteration computes propensities from the pre-firing state,
    /// selects exactly one event, fires it and records `(t, state)`. The last
    /// firing may land past `t_end`; it is recorded and the loop stops.
    /// The time horizon is the only stopping rule besides equilibrium.
    pub fn run(
        &self,
        network: &mut ReactionNetwork,
        source: &mut dyn RandomSource,
        t_start: f64,
        t_end: f64,
    ) -> Result<SimulationOutcome, CoreError> {
        if !t_start.is_finite() || !t_end.is_finite() || t_end < t_start {
            return Err(CoreError::InvalidHorizon {
                start: t_start,
                end: t_end,
            });
        }

        let mut selector = self.method.selector();
        let mut trajectory = Trajectory::new(network.species_names(), t_start, network.state());
        let mut propensities = Vec::with_capacity(network.reaction_count());
        let mut current_time = t_start;
        let mut equilibrium = false;

        while current_time < t_end {
            network.propensities_into(&mut propensities)?;

            match selector.select(&propensities, source)? {
                Selection::Fire { reaction, tau } => {
                    if !network.fire(reaction)? {
                        warn!(
                            "Selected reaction {} could not fire at t={:.6}",
                            reaction, current_time
                        );
                    }
                    current_time += tau;
                    trace!("t={:.6} fired reaction {}", current_time, reaction);
                    trajectory.push(current_time, network.state());
                }
                Selection::Equilibrium => {
                    equilibrium = true;
                    break;
                }
            }
        }

        let final_time = trajectory.end_time();
        let final_state = trajectory.end_state().to_vec();
        let steps = trajectory.len();

        debug!(
            "{} finished: steps={} t={:.6} equilibrium={}",
            selector.name(),
            steps,
            final_time,
            equilibrium
        );

        Ok(SimulationOutcome {
            trajectory,
            equilibrium,
            final_time,
            final_state,
            steps,
        })
    }
}
