//! Cross-trial statistics of an ensemble.

use crate::runner::EnsembleReport;
use serde::{Deserialize, Serialize};

/// Per-species mean and variance at one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub mean: Vec<f64>,

    /// Population variance (divides by the trial count)
    pub variance: Vec<f64>,
}

/// Statistics over the successful trials of an [`EnsembleReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub species: Vec<String>,

    /// Successful trials
    pub trials: usize,

    /// Failed trials
    pub failures: usize,

    /// One entry per window interval
    pub windows: Vec<WindowStats>,

    /// Share of successful trials that reached equilibrium
    pub equilibrium_fraction: f64,

    /// Mean final time of the trials that reached equilibrium
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_equilibrium_time: Option<f64>,

    /// Mean number of firings per trial
    pub mean_steps: f64,
}

impl EnsembleSummary {
    pub fn from_report(report: &EnsembleReport) -> Self {
        let n = report.trials.len();
        let species = report.species.len();
        let window_count = report.trials.first().map_or(0, |t| t.windows.len());

        let mut windows = Vec::with_capacity(window_count);
        for w in 0..window_count {
            let mut mean = vec![0.0; species];
            let mut variance = vec![0.0; species];
            for s in 0..species {
                let values: Vec<f64> = report
                    .trials
                    .iter()
                    .map(|t| t.windows[w][s] as f64)
                    .collect();
                let (m, v) = mean_variance(&values);
                mean[s] = m;
                variance[s] = v;
            }
            windows.push(WindowStats { mean, variance });
        }

        let equilibrium_times: Vec<f64> = report
            .trials
            .iter()
            .filter(|t| t.equilibrium)
            .map(|t| t.final_time)
            .collect();
        let steps: Vec<f64> = report.trials.iter().map(|t| t.steps as f64).collect();

        Self {
            species: report.species.clone(),
            trials: n,
            failures: report.failures.len(),
            windows,
            equilibrium_fraction: if n == 0 {
                0.0
            } else {
                equilibrium_times.len() as f64 / n as f64
            },
            mean_equilibrium_time: if equilibrium_times.is_empty() {
                None
            } else {
                Some(mean_variance(&equilibrium_times).0)
            },
            mean_steps: mean_variance(&steps).0,
        }
    }

    /// Mean counts at the last window.
    pub fn final_means(&self) -> Option<&[f64]> {
        self.windows.last().map(|w| w.mean.as_slice())
    }
}

/// Mean and population variance; `(0, 0)` for no values.
fn mean_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{TrialFailure, TrialRecord};
    use crate::scenarios::ScenarioId;
    use gillespie_core::Method;

    fn record(trial: usize, equilibrium: bool, final_time: f64, windows: Vec<Vec<u64>>) -> TrialRecord {
        TrialRecord {
            trial,
            seed: trial as u64,
            equilibrium,
            final_time,
            steps: 2,
            window_end: final_time,
            windows,
        }
    }

    #[test]
    fn test_summary_statistics() {
        let report = EnsembleReport {
            scenario: ScenarioId::Decomposition,
            method: Method::Direct,
            species: vec!["X".into(), "Y".into()],
            trials: vec![
                record(0, true, 1.0, vec![vec![4, 0], vec![2, 2]]),
                record(1, false, 5.0, vec![vec![4, 0], vec![0, 4]]),
                record(3, true, 3.0, vec![vec![4, 0], vec![1, 3]]),
            ],
            failures: vec![TrialFailure {
                trial: 2,
                seed: 2,
                reason: "bad".into(),
            }],
        };

        let summary = EnsembleSummary::from_report(&report);
        assert_eq!(summary.trials, 3);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.windows.len(), 2);

        assert_eq!(summary.windows[0].mean, vec![4.0, 0.0]);
        assert_eq!(summary.windows[0].variance, vec![0.0, 0.0]);
        assert_eq!(summary.final_means().unwrap(), &[1.0, 3.0]);
        assert!((summary.windows[1].variance[0] - 2.0 / 3.0).abs() < 1e-12);

        assert!((summary.equilibrium_fraction - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.mean_equilibrium_time, Some(2.0));
        assert_eq!(summary.mean_steps, 2.0);
    }

    #[test]
    fn test_empty_report() {
        let report = EnsembleReport {
            scenario: ScenarioId::GibsonBruck,
            method: Method::FirstReaction,
            species: vec!["A".into()],
            trials: vec![],
            failures: vec![],
        };

        let summary = EnsembleSummary::from_report(&report);
        assert!(summary.windows.is_empty());
        assert_eq!(summary.equilibrium_fraction, 0.0);
        assert_eq!(summary.mean_equilibrium_time, None);
        assert!(summary.final_means().is_none());
    }
}
