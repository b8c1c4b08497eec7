//! Species registry: an indexed arena of molecular counters.
//!
//! Reactions never hold a species directly. They hold a [`SpeciesId`] into
//! the registry, so a firing that changes a count is immediately visible to
//! every other reaction that references the same species.

use crate::CoreError;
use serde::{Deserialize, Serialize};

/// Index of a species inside a [`SpeciesRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesId(pub usize);

impl SpeciesId {
    /// Returns the raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named molecular counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// Species name (unique within a registry)
    pub name: String,

    /// Current molecular count
    pub count: u64,
}

impl Species {
    /// Creates a new species with an initial count.
    pub fn new(name: &str, count: u64) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }
}

/// Arena of species, addressed by [`SpeciesId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRegistry {
    species: Vec<Species>,
}

impl SpeciesRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a species and returns its ID.
    pub fn register(&mut self, name: &str, count: u64) -> Result<SpeciesId, CoreError> {
        if self.id(name).is_some() {
            return Err(CoreError::DuplicateSpecies(name.to_string()));
        }
        let id = SpeciesId(self.species.len());
        self.species.push(Species::new(name, count));
        Ok(id)
    }

    /// Looks up a species ID by name.
    pub fn id(&self, name: &str) -> Option<SpeciesId> {
        self.species
            .iter()
            .position(|s| s.name == name)
            .map(SpeciesId)
    }

    /// Returns true if `id` refers to a registered species.
    pub fn contains(&self, id: SpeciesId) -> bool {
        id.0 < self.species.len()
    }

    pub fn get(&self, id: SpeciesId) -> Result<&Species, CoreError> {
        self.species.get(id.0).ok_or(CoreError::UnknownSpecies(id.0))
    }

    pub fn name(&self, id: SpeciesId) -> Result<&str, CoreError> {
        self.get(id).map(|s| s.name.as_str())
    }

    pub fn count(&self, id: SpeciesId) -> Result<u64, CoreError> {
        self.get(id).map(|s| s.count)
    }

    pub fn set_count(&mut self, id: SpeciesId, count: u64) -> Result<(), CoreError> {
        let species = self
            .species
            .get_mut(id.0)
            .ok_or(CoreError::UnknownSpecies(id.0))?;
        species.count = count;
        Ok(())
    }

    /// Increments a count by `n`.
    pub fn add(&mut self, id: SpeciesId, n: u64) -> Result<(), CoreError> {
        let count = self.count(id)?;
        self.set_count(id, count.saturating_add(n))
    }

    /// Decrements a count by `n`. Returns `false`, leaving the count
    /// untouched, when fewer than `n` molecules are present.
    pub fn remove(&mut self, id: SpeciesId, n: u64) -> Result<bool, CoreError> {
        let count = self.count(id)?;
        match count.checked_sub(n) {
            Some(updated) => {
                self.set_count(id, updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of registered species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Iterates over `(id, species)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &Species)> {
        self.species
            .iter()
            .enumerate()
            .map(|(idx, s)| (SpeciesId(idx), s))
    }

    /// Species names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.species.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SpeciesRegistry::new();
        let a = registry.register("A", 6).unwrap();
        let b = registry.register("B", 14).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.id("B"), Some(b));
        assert_eq!(registry.count(a).unwrap(), 6);
        assert_eq!(registry.name(b).unwrap(), "B");
        assert_eq!(registry.id("Z"), None);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = SpeciesRegistry::new();
        registry.register("A", 1).unwrap();
        assert_eq!(
            registry.register("A", 2),
            Err(CoreError::DuplicateSpecies("A".to_string()))
        );
    }

    #[test]
    fn test_unknown_species() {
        let registry = SpeciesRegistry::new();
        assert_eq!(registry.count(SpeciesId(3)), Err(CoreError::UnknownSpecies(3)));
    }

    #[test]
    fn test_add_and_remove() {
        let mut registry = SpeciesRegistry::new();
        let a = registry.register("A", 2).unwrap();

        registry.add(a, 3).unwrap();
        assert_eq!(registry.count(a).unwrap(), 5);
        assert!(registry.remove(a, 5).unwrap());
        assert!(!registry.remove(a, 1).unwrap());
        assert_eq!(registry.count(a).unwrap(), 0);
        assert_eq!(registry.add(SpeciesId(9), 1), Err(CoreError::UnknownSpecies(9)));
    }

}
