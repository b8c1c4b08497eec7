//! Append-only record of a simulation run.

use crate::CoreError;
use serde::{Deserialize, Serialize};

/// A continuous-time trajectory.
///
/// `initial_state` is the state at `start_time`; `times[i]` / `states[i]` is
/// the state right after the i-th firing. Times are non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Species names, in state-vector order
    pub species: Vec<String>,

    /// Simulation start time
    pub start_time: f64,

    /// State before any firing
    pub initial_state: Vec<u64>,

    /// Firing times
    pub times: Vec<f64>,

    /// State after each firing
    pub states: Vec<Vec<u64>>,
}

impl Trajectory {
    /// Creates an empty trajectory starting from `initial_state`.
    pub fn new(species: Vec<String>, start_time: f64, initial_state: Vec<u64>) -> Self {
        Self {
            species,
            start_time,
            initial_state,
            times: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Appends one recorded point.
    pub fn push(&mut self, time: f64, state: Vec<u64>) {
        self.times.push(time);
        self.states.push(state);
    }

    /// Number of recorded firings (the initial state is not counted).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    pub fn last_state(&self) -> Option<&[u64]> {
        self.states.last().map(Vec::as_slice)
    }

    /// Time of the last point, or the start time if nothing fired.
    pub fn end_time(&self) -> f64 {
        self.last_time().unwrap_or(self.start_time)
    }

    /// State of the last point, or the initial state if nothing fired.
    pub fn end_state(&self) -> &[u64] {
        self.last_state().unwrap_or(&self.initial_state)
    }

    /// Iterates over `(time, state)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, &[u64])> {
        self.times
            .iter()
            .copied()
            .zip(self.states.iter().map(Vec::as_slice))
    }

    /// State active at `time` (step function, last value held).
    ///
    /// Linear scan: the initial state holds from `start_time` until the first
    /// firing, then the state of the last point with `times[i] <= time`. At or
    /// past the final point the final state holds. Only a time before
    /// `start_time` (or NaN) is an [`CoreError::EmptyTrajectoryQuery`].
    pub fn state_at(&self, time: f64) -> Result<&[u64], CoreError> {
        if time.is_nan() || time < self.start_time {
            return Err(CoreError::EmptyTrajectoryQuery { time });
        }

        let mut active = self.initial_state.as_slice();
        for (t, state) in self.points() {
            if t <= time {
                active = state;
            } else {
                break;
            }
        }
        Ok(active)
    }

    /// One-line description of the state active at `time`.
    pub fn describe_at(&self, time: f64) -> Result<String, CoreError> {
        let state = self.state_at(time)?;
        let pairs: Vec<String> = self
            .species
            .iter()
            .zip(state)
            .map(|(name, count)| format!("{}={}", name, count))
            .collect();
        Ok(format!("t={:.4}: {}", time, pairs.join(" ")))
    }
}
