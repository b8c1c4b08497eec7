//! Reaction network: a species arena plus an ordered list of reactions.

use crate::reaction::Reaction;
use crate::species::{SpeciesId, SpeciesRegistry};
use crate::CoreError;
use serde::{Deserialize, Serialize};

/// Species names of the reference network, in species-vector order.
pub const GIBSON_BRUCK_SPECIES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

/// Builds a [`ReactionNetwork`], validating species references.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    registry: SpeciesRegistry,
    reactions: Vec<Reaction>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a species and returns its ID.
    pub fn species(&mut self, name: &str, count: u64) -> Result<SpeciesId, CoreError> {
        self.registry.register(name, count)
    }

    /// Appends a reaction. Reaction indices follow insertion order.
    pub fn reaction(&mut self, reaction: Reaction) -> &mut Self {
        self.reactions.push(reaction);
        self
    }

    /// Validates every species reference and returns the network.
    pub fn build(self) -> Result<ReactionNetwork, CoreError> {
        for reaction in &self.reactions {
            for id in reaction.species() {
                if !self.registry.contains(id) {
                    return Err(CoreError::UnknownSpecies(id.index()));
                }
            }
        }

        let species_order = derive_species_order(&self.registry, &self.reactions)?;

        Ok(ReactionNetwork {
            registry: self.registry,
            reactions: self.reactions,
            species_order,
        })
    }
}

/// Distinct species referenced by the reactions, sorted by name.
///
/// Products count as references, so a species that is only ever produced
/// still has a slot in the state vector.
fn derive_species_order(
    registry: &SpeciesRegistry,
    reactions: &[Reaction],
) -> Result<Vec<SpeciesId>, CoreError> {
    let mut ids: Vec<SpeciesId> = Vec::new();
    for reaction in reactions {
        for id in reaction.species() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    let mut named = ids
        .into_iter()
        .map(|id| -> Result<(String, SpeciesId), CoreError> {
            Ok((registry.name(id)?.to_string(), id))
        })
        .collect::<Result<Vec<(String, SpeciesId)>, CoreError>>()?;
    named.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(named.into_iter().map(|(_, id)| id).collect())
}

/// A well-mixed reaction network.
///
/// Built once; afterwards only species counts change, through
/// [`ReactionNetwork::fire`] and [`ReactionNetwork::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionNetwork {
    registry: SpeciesRegistry,
    reactions: Vec<Reaction>,
    species_order: Vec<SpeciesId>,
}

impl ReactionNetwork {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    /// The reference network from Gibson & Bruck (2000):
    ///
    /// ```text
    /// 1. A + B -> C        k1
    /// 2. B + C -> D        k2
    /// 3. D + E -> E + F    k3
    /// 4. F     -> D + G    k4
    /// 5. E + G -> A        k5
    /// ```
    pub fn gibson_bruck(counts: [u64; 7], rates: [f64; 5]) -> Result<Self, CoreError> {
        let mut builder = NetworkBuilder::new();
        let mut ids = [SpeciesId(0); 7];
        for (slot, (name, count)) in GIBSON_BRUCK_SPECIES.iter().zip(counts).enumerate() {
            ids[slot] = builder.species(name, count)?;
        }
        let [a, b, c, d, e, f, g] = ids;

        builder
            .reaction(Reaction::combination(a, b, c, rates[0]))
            .reaction(Reaction::combination(b, c, d, rates[1]))
            .reaction(Reaction::catalyzed(d, e, f, rates[2]))
            .reaction(Reaction::decomposition(f, d, g, rates[3]))
            .reaction(Reaction::combination(e, g, a, rates[4]));

        builder.build()
    }

    pub fn registry(&self) -> &SpeciesRegistry {
        &self.registry
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Species IDs in species-vector order (sorted by name).
    pub fn species_order(&self) -> &[SpeciesId] {
        &self.species_order
    }

    /// Species names in species-vector order.
    pub fn species_names(&self) -> Vec<String> {
        self.species_order
            .iter()
            .filter_map(|&id| self.registry.name(id).ok().map(str::to_string))
            .collect()
    }

    /// Current counts in species-vector order.
    pub fn state(&self) -> Vec<u64> {
        self.species_order
            .iter()
            .filter_map(|&id| self.registry.count(id).ok())
            .collect()
    }

    /// Restores counts in species-vector order.
    pub fn reset(&mut self, counts: &[u64]) -> Result<(), CoreError> {
        if counts.len() != self.species_order.len() {
            return Err(CoreError::StateLengthMismatch {
                expected: self.species_order.len(),
                actual: counts.len(),
            });
        }
        for (&id, &count) in self.species_order.iter().zip(counts) {
            self.registry.set_count(id, count)?;
        }
        Ok(())
    }

    /// Propensities of all reactions, in reaction order.
    pub fn propensities(&self) -> Result<Vec<f64>, CoreError> {
        let mut out = Vec::with_capacity(self.reactions.len());
        self.propensities_into(&mut out)?;
        Ok(out)
    }

    /// Fills `out` with the propensities of all reactions.
    ///
    /// Fails fast on the first negative propensity.
    pub fn propensities_into(&self, out: &mut Vec<f64>) -> Result<(), CoreError> {
        out.clear();
        for (idx, reaction) in self.reactions.iter().enumerate() {
            out.push(reaction.checked_propensity(idx, &self.registry)?);
        }
        Ok(())
    }

    /// True exactly when no reaction can fire.
    pub fn is_equilibrium(&self) -> Result<bool, CoreError> {
        Ok(self.propensities()?.iter().all(|&a| a == 0.0))
    }

    /// Fires reaction `index` once. Returns `false` if its guard blocked it.
    pub fn fire(&mut self, index: usize) -> Result<bool, CoreError> {
        let reaction = self
            .reactions
            .get(index)
            .ok_or(CoreError::UnknownReaction(index))?;
        reaction.apply(&mut self.registry)
    }

    /// Equation labels in reaction order.
    pub fn labels(&self) -> Result<Vec<String>, CoreError> {
        self.reactions
            .iter()
            .map(|r| r.label(&self.registry))
            .collect()
    }
}
