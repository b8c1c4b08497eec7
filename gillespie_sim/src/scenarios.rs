//! Reaction-network scenarios.

use crate::SimError;
use gillespie_core::{ReactionNetwork, Reaction};
use serde::{Deserialize, Serialize};

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    /// The Gibson-Bruck reference network, species A..G
    GibsonBruck,

    /// E -> F + G alone
    Decomposition,

    /// D + E -> E + F alone
    Catalysis,

    /// Reference network with every rate constant forced to zero
    Dormant,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::GibsonBruck,
            ScenarioId::Decomposition,
            ScenarioId::Catalysis,
            ScenarioId::Dormant,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::GibsonBruck => "gibson_bruck",
            ScenarioId::Decomposition => "decomposition",
            ScenarioId::Catalysis => "catalysis",
            ScenarioId::Dormant => "dormant",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::GibsonBruck => "7 species, 5 reactions: A+B->C, B+C->D, D+E->E+F, F->D+G, E+G->A",
            ScenarioId::Decomposition => "E -> F + G, equilibrium once E is exhausted",
            ScenarioId::Catalysis => "D + E -> E + F, catalyst E is preserved",
            ScenarioId::Dormant => "Reference network with all rates zero, immediate equilibrium",
        }
    }

    /// Species names in species-vector order.
    pub fn species(&self) -> &'static [&'static str] {
        match self {
            ScenarioId::GibsonBruck | ScenarioId::Dormant => &gillespie_core::GIBSON_BRUCK_SPECIES,
            ScenarioId::Decomposition => &["E", "F", "G"],
            ScenarioId::Catalysis => &["D", "E", "F"],
        }
    }

    /// Expected length of the initial count vector.
    pub fn species_count(&self) -> usize {
        self.species().len()
    }

    /// Expected length of the rate constant vector.
    pub fn reaction_count(&self) -> usize {
        match self {
            ScenarioId::GibsonBruck | ScenarioId::Dormant => 5,
            ScenarioId::Decomposition | ScenarioId::Catalysis => 1,
        }
    }

    /// Initial counts taken from the reference scenario.
    pub fn default_counts(&self) -> Vec<u64> {
        match self {
            ScenarioId::GibsonBruck | ScenarioId::Dormant => vec![6, 14, 8, 12, 9, 3, 5],
            ScenarioId::Decomposition => vec![9, 3, 5],
            ScenarioId::Catalysis => vec![12, 9, 3],
        }
    }

    /// Builds the network for this scenario.
    ///
    /// `counts` follow [`ScenarioId::species`] order; `rates` follow
    /// reaction order.
    pub fn build_network(&self, counts: &[u64], rates: &[f64]) -> Result<ReactionNetwork, SimError> {
        if counts.len() != self.species_count() {
            return Err(SimError::config(format!(
                "{} expects {} initial counts, got {}",
                self.name(),
                self.species_count(),
                counts.len()
            )));
        }
        if rates.len() != self.reaction_count() {
            return Err(SimError::config(format!(
                "{} expects {} rate constants, got {}",
                self.name(),
                self.reaction_count(),
                rates.len()
            )));
        }

        let network = match self {
            ScenarioId::GibsonBruck => {
                ReactionNetwork::gibson_bruck(reference_counts(counts)?, reference_rates(rates)?)?
            }
            ScenarioId::Dormant => ReactionNetwork::gibson_bruck(reference_counts(counts)?, [0.0; 5])?,
            ScenarioId::Decomposition => {
                let mut builder = ReactionNetwork::builder();
                let e = builder.species("E", counts[0])?;
                let f = builder.species("F", counts[1])?;
                let g = builder.species("G", counts[2])?;
                builder.reaction(Reaction::decomposition(e, f, g, rates[0]));
                builder.build()?
            }
            ScenarioId::Catalysis => {
                let mut builder = ReactionNetwork::builder();
                let d = builder.species("D", counts[0])?;
                let e = builder.species("E", counts[1])?;
                let f = builder.species("F", counts[2])?;
                builder.reaction(Reaction::catalyzed(d, e, f, rates[0]));
                builder.build()?
            }
        };
        Ok(network)
    }
}

fn reference_counts(counts: &[u64]) -> Result<[u64; 7], SimError> {
    counts
        .try_into()
        .map_err(|_| SimError::config("reference network needs 7 counts"))
}

fn reference_rates(rates: &[f64]) -> Result<[f64; 5], SimError> {
    rates
        .try_into()
        .map_err(|_| SimError::config("reference network needs 5 rate constants"))
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gibson_bruck" | "gibsonbruck" | "reference" => Ok(ScenarioId::GibsonBruck),
            "decomposition" => Ok(ScenarioId::Decomposition),
            "catalysis" | "catalyzed" => Ok(ScenarioId::Catalysis),
            "dormant" | "zero_rates" => Ok(ScenarioId::Dormant),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_networks_match_declared_topology() {
        for scenario in ScenarioId::all() {
            let rates = vec![1.0; scenario.reaction_count()];
            let net = scenario
                .build_network(&scenario.default_counts(), &rates)
                .unwrap();

            assert_eq!(net.reaction_count(), scenario.reaction_count());
            assert_eq!(net.species_names(), scenario.species().to_vec());
            assert_eq!(net.state(), scenario.default_counts());
        }
    }

    #[test]
    fn test_dormant_ignores_rates() {
        let net = ScenarioId::Dormant
            .build_network(&ScenarioId::Dormant.default_counts(), &[3.0; 5])
            .unwrap();
        assert!(net.is_equilibrium().unwrap());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = ScenarioId::Decomposition
            .build_network(&[1, 2], &[1.0])
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));

        let err = ScenarioId::GibsonBruck
            .build_network(&ScenarioId::GibsonBruck.default_counts(), &[1.0; 4])
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_parse_round_trip() {
        for scenario in ScenarioId::all() {
            assert_eq!(scenario.to_string().parse::<ScenarioId>().unwrap(), scenario);
        }
        assert_eq!("reference".parse::<ScenarioId>().unwrap(), ScenarioId::GibsonBruck);
        assert!("chaos_storm".parse::<ScenarioId>().is_err());
    }
}
