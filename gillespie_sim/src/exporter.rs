//! JSON exporter for offline analysis.
//!
//! Exports one trajectory plus the ensemble summary as JSON.

use crate::summary::EnsembleSummary;
use crate::SimError;
use gillespie_core::SimulationOutcome;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One recorded point of the exported trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Simulation time
    pub time: f64,

    /// Counts in species order
    pub counts: Vec<u64>,
}

/// Complete simulation export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimExport {
    /// Scenario name
    pub scenario: String,

    /// Selection method name
    pub method: String,

    /// Seed of the exported trajectory
    pub seed: u64,

    pub species: Vec<String>,

    /// Initial state followed by one point per firing
    pub points: Vec<TrajectoryPoint>,

    /// Whether the exported run reached equilibrium
    pub equilibrium: bool,

    pub final_time: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<EnsembleSummary>,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(scenario: &str, method: &str, seed: u64, species: Vec<String>) -> Self {
        Self {
            scenario: scenario.to_string(),
            method: method.to_string(),
            seed,
            species,
            points: Vec::new(),
            equilibrium: false,
            final_time: 0.0,
            summary: None,
        }
    }

    /// Adds a point.
    pub fn add_point(&mut self, time: f64, counts: Vec<u64>) {
        self.final_time = time;
        self.points.push(TrajectoryPoint { time, counts });
    }

    /// Adds the initial state and every firing of `outcome`.
    pub fn add_outcome(&mut self, outcome: &SimulationOutcome) {
        let trajectory = &outcome.trajectory;
        self.add_point(trajectory.start_time, trajectory.initial_state.clone());
        for (time, state) in trajectory.points() {
            self.add_point(time, state.to_vec());
        }
        self.equilibrium = outcome.equilibrium;
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, summary: Option<EnsembleSummary>) {
        self.summary = summary;
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gillespie_core::{Method, ReactionNetwork, Simulation};
    use gillespie_env::SeededSource;

    #[test]
    fn test_export_outcome() {
        let mut net = ReactionNetwork::gibson_bruck([6, 14, 8, 12, 9, 3, 5], [1.0; 5]).unwrap();
        let mut source = SeededSource::new(5);
        let outcome = Simulation::new(Method::Direct)
            .run(&mut net, &mut source, 0.0, 0.05)
            .unwrap();

        let mut export = SimExport::new("gibson_bruck", "direct", 5, net.species_names());
        export.add_outcome(&outcome);
        export.finalize(None);

        assert_eq!(export.points.len(), outcome.steps + 1);
        assert_eq!(export.points[0].counts, vec![6, 14, 8, 12, 9, 3, 5]);
        assert_eq!(export.final_time, outcome.final_time);

        let json = serde_json::to_string(&export).unwrap();
        assert!(!json.contains("summary"));
        let parsed: SimExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, export);
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join(format!("gillespie_export_{}.json", std::process::id()));
        let mut export = SimExport::new("dormant", "first_reaction", 1, vec!["A".into()]);
        export.add_point(0.0, vec![3]);

        export.write_to_file(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.contains("\"scenario\": \"dormant\""));
    }
}
