//! Non-reproducible random source backed by OS entropy.

use crate::{EnvError, RandomSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source seeded from OS entropy.
///
/// Used for exploratory runs where reproducibility is not wanted.
/// Reports a seed of 0 since there is nothing to replay.
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    /// Creates a new EntropySource.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn uniform(&mut self) -> Result<f64, EnvError> {
        Ok(self.rng.gen::<f64>())
    }

    fn seed(&self) -> u64 {
        // Not seeded
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_source_seed() {
        let source = EntropySource::new();
        assert_eq!(source.seed(), 0);
    }

    #[test]
    fn test_entropy_source_draws() {
        let mut source = EntropySource::new();
        let u = source.uniform().unwrap();
        assert!((0.0..1.0).contains(&u));
        assert!(source.exponential(1.0).unwrap() >= 0.0);
    }
}
