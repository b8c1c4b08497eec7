//! Ensemble runner - repeats the simulate-then-window pipeline.

use crate::config::{SimConfig, WindowSpan};
use crate::scenarios::ScenarioId;
use crate::SimError;

use gillespie_core::{
    window_trajectory, CoreError, Method, ReactionNetwork, Simulation, SimulationOutcome,
};
use gillespie_env::{derive_stream_seed, SeededSource};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of one successful trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Trial index
    pub trial: usize,

    /// Seed of this trial's random stream
    pub seed: u64,

    /// Whether the run stopped at equilibrium
    pub equilibrium: bool,

    /// Time of the last recorded firing
    pub final_time: f64,

    /// Number of firings
    pub steps: usize,

    /// Upper bound of the windowed interval
    pub window_end: f64,

    /// One state per window interval
    pub windows: Vec<Vec<u64>>,
}

/// A trial aborted by a malformed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialFailure {
    pub trial: usize,
    pub seed: u64,
    pub reason: String,
}

/// Everything an ensemble run produced, ordered by trial index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleReport {
    pub scenario: ScenarioId,
    pub method: Method,

    /// Species names, in state-vector order
    pub species: Vec<String>,

    pub trials: Vec<TrialRecord>,
    pub failures: Vec<TrialFailure>,
}

impl EnsembleReport {
    /// Total trials attempted.
    pub fn attempted(&self) -> usize {
        self.trials.len() + self.failures.len()
    }

    /// True when no trial succeeded.
    pub fn all_failed(&self) -> bool {
        self.trials.is_empty() && !self.failures.is_empty()
    }

    /// Successful trials that stopped at equilibrium.
    pub fn equilibrium_count(&self) -> usize {
        self.trials.iter().filter(|t| t.equilibrium).count()
    }
}

/// Runs independent trials of one scenario.
pub struct EnsembleRunner {
    config: SimConfig,

    /// Network in its initial state; cloned per trial
    template: ReactionNetwork,
}

impl EnsembleRunner {
    /// Creates a runner after validating the configuration.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let template = config
            .scenario
            .build_network(&config.initial_counts, &config.rate_constants)?;
        Ok(Self { config, template })
    }

    /// Sets the worker thread count (`None` = sequential).
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn network(&self) -> &ReactionNetwork {
        &self.template
    }

    /// Seed of trial `trial`'s random stream.
    pub fn trial_seed(&self, trial: usize) -> u64 {
        derive_stream_seed(self.config.seed, trial as u64).value()
    }

    /// Runs a single trial without windowing.
    pub fn simulate(&self, trial: usize) -> Result<SimulationOutcome, SimError> {
        Ok(self.simulate_with_seed(self.trial_seed(trial))?)
    }

    /// Runs every trial and collects the report.
    ///
    /// Results are identical whether trials run sequentially or on the
    /// thread pool.
    pub fn run(&self) -> Result<EnsembleReport, SimError> {
        info!(
            "Running {} trials of {} ({}, seed={})",
            self.config.trials, self.config.scenario, self.config.method, self.config.seed
        );

        let outcomes: Vec<Result<TrialRecord, TrialFailure>> = match self.config.threads {
            Some(n) => ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| SimError::ThreadPool(e.to_string()))?
                .install(|| {
                    (0..self.config.trials)
                        .into_par_iter()
                        .map(|trial| self.run_trial(trial))
                        .collect::<Vec<_>>()
                }),
            None => (0..self.config.trials)
                .map(|trial| self.run_trial(trial))
                .collect(),
        };

        let mut trials = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(record) => trials.push(record),
                Err(failure) => failures.push(failure),
            }
        }

        info!(
            "Ensemble finished: {} succeeded, {} failed",
            trials.len(),
            failures.len()
        );

        Ok(EnsembleReport {
            scenario: self.config.scenario,
            method: self.config.method,
            species: self.template.species_names(),
            trials,
            failures,
        })
    }

    /// One trial; errors are turned into a [`TrialFailure`].
    fn run_trial(&self, trial: usize) -> Result<TrialRecord, TrialFailure> {
        let seed = self.trial_seed(trial);
        self.windowed_trial(trial, seed).map_err(|e| {
            warn!("Trial {} (seed={}) failed: {}", trial, seed, e);
            TrialFailure {
                trial,
                seed,
                reason: e.to_string(),
            }
        })
    }

    fn windowed_trial(&self, trial: usize, seed: u64) -> Result<TrialRecord, CoreError> {
        let outcome = self.simulate_with_seed(seed)?;

        let window_end = match self.config.window_span {
            WindowSpan::Terminal => outcome.final_time,
            WindowSpan::Horizon => self.config.t_end,
        };
        let windows = window_trajectory(
            &outcome.trajectory,
            self.config.t_start,
            window_end,
            self.config.checkpoints,
        )?;

        debug!(
            "Trial {} done: steps={} t={:.4} equilibrium={}",
            trial, outcome.steps, outcome.final_time, outcome.equilibrium
        );

        Ok(TrialRecord {
            trial,
            seed,
            equilibrium: outcome.equilibrium,
            final_time: outcome.final_time,
            steps: outcome.steps,
            window_end,
            windows,
        })
    }

    fn simulate_with_seed(&self, seed: u64) -> Result<SimulationOutcome, CoreError> {
        let mut network = self.template.clone();
        network.reset(&self.config.initial_counts)?;
        let mut source = SeededSource::new(seed);

        Simulation::new(self.config.method).run(
            &mut network,
            &mut source,
            self.config.t_start,
            self.config.t_end,
        )
    }
}
