//! Reactions: stoichiometric shape + rate constant.
//!
//! Each reaction computes its own mass-action propensity
//!
//! ```text
//! a = k * Π count_i ^ coef_i      (over reactants, catalysts included)
//! ```
//!
//! and applies its stoichiometric change to the [`SpeciesRegistry`].

use crate::species::{SpeciesId, SpeciesRegistry};
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One side of a reaction: a species and its stoichiometric coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub species: SpeciesId,
    pub coefficient: u32,
}

impl Term {
    pub fn new(species: SpeciesId, coefficient: u32) -> Self {
        Self {
            species,
            coefficient,
        }
    }

    /// A term with coefficient 1.
    pub fn unit(species: SpeciesId) -> Self {
        Self::new(species, 1)
    }
}

/// Stoichiometric shape of a reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ReactionShape {
    /// `X + Y -> Z`
    Combination {
        first: SpeciesId,
        second: SpeciesId,
        product: SpeciesId,
    },

    /// `A + E -> D + E` (E is consumed and regenerated)
    CatalyzedConversion {
        substrate: SpeciesId,
        catalyst: SpeciesId,
        product: SpeciesId,
    },

    /// `E -> F + G`
    Decomposition {
        source: SpeciesId,
        first: SpeciesId,
        second: SpeciesId,
    },

    /// General mass-action reaction with explicit coefficients.
    MassAction {
        reactants: Vec<Term>,
        products: Vec<Term>,
    },
}

/// A reaction with an immutable rate constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub shape: ReactionShape,
    pub rate_constant: f64,
}

impl Reaction {
    /// Creates a reaction from a shape and a rate constant.
    pub fn new(shape: ReactionShape, rate_constant: f64) -> Self {
        Self {
            shape,
            rate_constant,
        }
    }

    /// `first + second -> product`
    pub fn combination(
        first: SpeciesId,
        second: SpeciesId,
        product: SpeciesId,
        rate_constant: f64,
    ) -> Self {
        Self::new(
            ReactionShape::Combination {
                first,
                second,
                product,
            },
            rate_constant,
        )
    }

    /// `substrate + catalyst -> product + catalyst`
    pub fn catalyzed(
        substrate: SpeciesId,
        catalyst: SpeciesId,
        product: SpeciesId,
        rate_constant: f64,
    ) -> Self {
        Self::new(
            ReactionShape::CatalyzedConversion {
                substrate,
                catalyst,
                product,
            },
            rate_constant,
        )
    }

    /// `source -> first + second`
    pub fn decomposition(
        source: SpeciesId,
        first: SpeciesId,
        second: SpeciesId,
        rate_constant: f64,
    ) -> Self {
        Self::new(
            ReactionShape::Decomposition {
                source,
                first,
                second,
            },
            rate_constant,
        )
    }

    /// General mass-action reaction from `(species, coefficient)` pairs.
    pub fn mass_action(
        reactants: &[(SpeciesId, u32)],
        products: &[(SpeciesId, u32)],
        rate_constant: f64,
    ) -> Self {
        let to_terms = |side: &[(SpeciesId, u32)]| -> Vec<Term> {
            side.iter()
                .map(|&(species, coefficient)| Term::new(species, coefficient))
                .collect()
        };
        Self::new(
            ReactionShape::MassAction {
                reactants: to_terms(reactants),
                products: to_terms(products),
            },
            rate_constant,
        )
    }

    /// Reactant terms (a catalyst is listed as a reactant).
    pub fn reactants(&self) -> Vec<Term> {
        match &self.shape {
            ReactionShape::Combination { first, second, .. } => {
                vec![Term::unit(*first), Term::unit(*second)]
            }
            ReactionShape::CatalyzedConversion {
                substrate, catalyst, ..
            } => vec![Term::unit(*substrate), Term::unit(*catalyst)],
            ReactionShape::Decomposition { source, .. } => vec![Term::unit(*source)],
            ReactionShape::MassAction { reactants, .. } => reactants.clone(),
        }
    }

    /// Product terms (a catalyst is listed as a product as well).
    pub fn products(&self) -> Vec<Term> {
        match &self.shape {
            ReactionShape::Combination { product, .. } => vec![Term::unit(*product)],
            ReactionShape::CatalyzedConversion {
                catalyst, product, ..
            } => vec![Term::unit(*catalyst), Term::unit(*product)],
            ReactionShape::Decomposition { first, second, .. } => {
                vec![Term::unit(*first), Term::unit(*second)]
            }
            ReactionShape::MassAction { products, .. } => products.clone(),
        }
    }

    /// Every species this reaction touches, reactants first, without repeats.
    pub fn species(&self) -> Vec<SpeciesId> {
        let mut ids: Vec<SpeciesId> = Vec::new();
        for term in self.reactants().into_iter().chain(self.products()) {
            if !ids.contains(&term.species) {
                ids.push(term.species);
            }
        }
        ids
    }

    /// Raw propensity `k * Π count^coef` from the current registry state.
    ///
    /// No sign check is done here; see [`Reaction::checked_propensity`].
    pub fn propensity(&self, registry: &SpeciesRegistry) -> Result<f64, CoreError> {
        let mut propensity = self.rate_constant;
        for term in self.reactants() {
            let count = registry.count(term.species)? as f64;
            propensity *= count.powi(term.coefficient as i32);
        }
        Ok(propensity)
    }

    /// Propensity that must be a non-negative number.
    ///
    /// `reaction` is the index used in the error report.
    pub fn checked_propensity(
        &self,
        reaction: usize,
        registry: &SpeciesRegistry,
    ) -> Result<f64, CoreError> {
        let value = self.propensity(registry)?;
        if value.is_nan() || value < 0.0 {
            return Err(CoreError::NegativePropensity { reaction, value });
        }
        Ok(value)
    }

    /// Net change per species when this reaction fires once.
    pub fn net_change(&self) -> BTreeMap<SpeciesId, i64> {
        let mut change: BTreeMap<SpeciesId, i64> = BTreeMap::new();
        for term in self.reactants() {
            *change.entry(term.species).or_insert(0) -= term.coefficient as i64;
        }
        for term in self.products() {
            *change.entry(term.species).or_insert(0) += term.coefficient as i64;
        }
        change
    }

    /// Coefficient by species name, reactants and products merged.
    pub fn stoichiometry(
        &self,
        registry: &SpeciesRegistry,
    ) -> Result<BTreeMap<String, u32>, CoreError> {
        let mut coefficients = BTreeMap::new();
        for term in self.reactants().into_iter().chain(self.products()) {
            coefficients.insert(registry.name(term.species)?.to_string(), term.coefficient);
        }
        Ok(coefficients)
    }

    /// Fires the reaction once.
    ///
    /// Every reactant must be present in at least its coefficient, otherwise
    /// nothing changes and `false` is returned. A product count that would
    /// overflow also leaves every count untouched. The catalyst count is left
    /// as it was.
    pub fn apply(&self, registry: &mut SpeciesRegistry) -> Result<bool, CoreError> {
        let mut required: BTreeMap<SpeciesId, u64> = BTreeMap::new();
        for term in self.reactants() {
            *required.entry(term.species).or_insert(0) += term.coefficient as u64;
        }
        for (&species, &needed) in &required {
            if registry.count(species)? < needed {
                return Ok(false);
            }
        }

        let mut updates = Vec::new();
        for (species, delta) in self.net_change() {
            match registry.count(species)?.checked_add_signed(delta) {
                Some(updated) => updates.push((species, updated)),
                None => return Ok(false),
            }
        }
        for (species, updated) in updates {
            registry.set_count(species, updated)?;
        }
        Ok(true)
    }

    /// Human-readable equation, e.g. `A + B -> C`.
    pub fn label(&self, registry: &SpeciesRegistry) -> Result<String, CoreError> {
        let side = |terms: Vec<Term>| -> Result<String, CoreError> {
            let parts = terms
                .iter()
                .map(|t| -> Result<String, CoreError> {
                    let name = registry.name(t.species)?;
                    Ok(if t.coefficient == 1 {
                        name.to_string()
                    } else {
                        format!("{} {}", t.coefficient, name)
                    })
                })
                .collect::<Result<Vec<_>, CoreError>>()?;
            Ok(if parts.is_empty() {
                "0".to_string()
            } else {
                parts.join(" + ")
            })
        };
        Ok(format!("{} -> {}", side(self.reactants())?, side(self.products())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn registry(counts: &[(&str, u64)]) -> (SpeciesRegistry, Vec<SpeciesId>) {
        let mut registry = SpeciesRegistry::new();
        let ids = counts
            .iter()
            .map(|(name, count)| registry.register(name, *count).unwrap())
            .collect();
        (registry, ids)
    }

    #[test]
    fn test_combination_propensity_and_apply() {
        let (mut reg, ids) = registry(&[("A", 6), ("B", 14), ("C", 8)]);
        let rx = Reaction::combination(ids[0], ids[1], ids[2], 0.5);

        assert_relative_eq!(rx.propensity(&reg).unwrap(), 0.5 * 6.0 * 14.0);

        assert!(rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[0]).unwrap(), 5);
        assert_eq!(reg.count(ids[1]).unwrap(), 13);
        assert_eq!(reg.count(ids[2]).unwrap(), 9);
    }

    #[test]
    fn test_catalyzed_conversion_keeps_catalyst() {
        let (mut reg, ids) = registry(&[("D", 12), ("E", 9), ("F", 3)]);
        let rx = Reaction::catalyzed(ids[0], ids[1], ids[2], 2.0);

        assert_relative_eq!(rx.propensity(&reg).unwrap(), 2.0 * 12.0 * 9.0);

        assert!(rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[0]).unwrap(), 11);
        assert_eq!(reg.count(ids[1]).unwrap(), 9);
        assert_eq!(reg.count(ids[2]).unwrap(), 4);
        assert_eq!(rx.net_change().get(&ids[1]), Some(&0));
    }

    #[test]
    fn test_decomposition() {
        let (mut reg, ids) = registry(&[("F", 1), ("D", 0), ("G", 0)]);
        let rx = Reaction::decomposition(ids[0], ids[1], ids[2], 1.0);

        assert!(rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[0]).unwrap(), 0);
        assert_eq!(reg.count(ids[1]).unwrap(), 1);
        assert_eq!(reg.count(ids[2]).unwrap(), 1);

        // Source exhausted: zero propensity, guarded no-op
        assert_eq!(rx.propensity(&reg).unwrap(), 0.0);
        assert!(!rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[1]).unwrap(), 1);
    }

    #[test]
    fn test_product_overflow_leaves_counts_untouched() {
        let (mut reg, ids) = registry(&[("F", 4), ("D", u64::MAX), ("G", 7)]);
        let rx = Reaction::decomposition(ids[0], ids[1], ids[2], 1.0);

        assert!(!rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[0]).unwrap(), 4);
        assert_eq!(reg.count(ids[1]).unwrap(), u64::MAX);
        assert_eq!(reg.count(ids[2]).unwrap(), 7);
    }

    #[test]
    fn test_guard_requires_every_reactant() {
        let (mut reg, ids) = registry(&[("E", 0), ("G", 5), ("A", 0)]);
        let rx = Reaction::combination(ids[0], ids[1], ids[2], 1.0);

        assert_eq!(rx.propensity(&reg).unwrap(), 0.0);
        assert!(!rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[1]).unwrap(), 5);
    }

    #[test]
    fn test_mass_action_coefficients() {
        let (mut reg, ids) = registry(&[("X", 3), ("Y", 1)]);
        // 2X -> Y with propensity k * X^2
        let rx = Reaction::mass_action(&[(ids[0], 2)], &[(ids[1], 1)], 0.1);

        assert_relative_eq!(rx.propensity(&reg).unwrap(), 0.1 * 9.0);
        assert!(rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[0]).unwrap(), 1);
        assert_eq!(reg.count(ids[1]).unwrap(), 2);

        // Only one X left: not enough for 2X
        assert!(!rx.apply(&mut reg).unwrap());
        assert_eq!(reg.count(ids[0]).unwrap(), 1);
    }

    #[test]
    fn test_negative_rate_reported() {
        let (reg, ids) = registry(&[("A", 2), ("B", 3), ("C", 0)]);
        let rx = Reaction::combination(ids[0], ids[1], ids[2], -1.0);

        assert_eq!(
            rx.checked_propensity(4, &reg),
            Err(CoreError::NegativePropensity {
                reaction: 4,
                value: -6.0
            })
        );
    }

    #[test]
    fn test_unknown_species_reported() {
        let (mut reg, ids) = registry(&[("A", 2)]);
        let rx = Reaction::decomposition(ids[0], SpeciesId(7), SpeciesId(8), 1.0);

        assert_eq!(rx.apply(&mut reg), Err(CoreError::UnknownSpecies(7)));
        assert_eq!(reg.count(ids[0]).unwrap(), 2);
    }

    #[test]
    fn test_label_and_stoichiometry() {
        let (reg, ids) = registry(&[("D", 1), ("E", 1), ("F", 1)]);
        let rx = Reaction::catalyzed(ids[0], ids[1], ids[2], 1.0);

        assert_eq!(rx.label(&reg).unwrap(), "D + E -> E + F");

        let stoich = rx.stoichiometry(&reg).unwrap();
        assert_eq!(stoich.len(), 3);
        assert_eq!(stoich["E"], 1);

        let dimer = Reaction::mass_action(&[(ids[0], 2)], &[], 1.0);
        assert_eq!(dimer.label(&reg).unwrap(), "2 D -> 0");
    }
}
