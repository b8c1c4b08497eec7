//! Core random source trait consumed by the simulation engines.

use crate::EnvError;

/// The central interface for randomness.
///
/// Engines only ever ask for three things: a uniform draw, an exponential
/// holding time, and a categorical choice. The latter two have default
/// implementations built on [`RandomSource::uniform`], so a scripted source
/// only needs to supply uniforms.
///
/// # Implementations
///
/// - **Seeded**: `SeededSource` - ChaCha8 stream from a 64-bit seed
/// - **Entropy**: `EntropySource` - OS entropy, not reproducible
/// - **Replay**: `ReplaySource` - a fixed list of uniforms
pub trait RandomSource {
    /// Returns a uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> Result<f64, EnvError>;

    /// Draws a holding time from `Exponential(rate)` (mean `1 / rate`).
    ///
    /// The default uses the inverse CDF `ln(1 / (1 - U)) / rate`, which is
    /// finite for every `U` in `[0, 1)`.
    fn exponential(&mut self, rate: f64) -> Result<f64, EnvError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EnvError::InvalidRate(rate));
        }
        let u = self.uniform()?;
        Ok((1.0 / (1.0 - u)).ln() / rate)
    }

    /// Draws an index with probability proportional to its weight.
    ///
    /// Weights are normalized to a probability distribution and sampled by
    /// scanning the cumulative distribution with a single uniform draw.
    /// A zero-weight index is never returned.
    fn categorical(&mut self, weights: &[f64]) -> Result<usize, EnvError> {
        if weights.is_empty() {
            return Err(EnvError::EmptyWeights);
        }

        let mut total = 0.0;
        for (idx, &w) in weights.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(EnvError::weights(format!(
                    "weight {} at index {} is not a finite non-negative number",
                    w, idx
                )));
            }
            total += w;
        }
        if total <= 0.0 {
            return Err(EnvError::weights("all weights are zero"));
        }

        let u = self.uniform()?;
        let mut cumulative = 0.0;
        let mut last_positive = 0;
        for (idx, &w) in weights.iter().enumerate() {
            if w == 0.0 {
                continue;
            }
            last_positive = idx;
            cumulative += w / total;
            if u < cumulative {
                return Ok(idx);
            }
        }

        // Round-off left the cumulative sum just under 1.0
        Ok(last_positive)
    }

    /// Returns the master seed (0 when the source is not seeded).
    fn seed(&self) -> u64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn uniform(&mut self) -> Result<f64, EnvError> {
        (**self).uniform()
    }

    fn exponential(&mut self, rate: f64) -> Result<f64, EnvError> {
        (**self).exponential(rate)
    }

    fn categorical(&mut self, weights: &[f64]) -> Result<usize, EnvError> {
        (**self).categorical(weights)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReplaySource;

    #[test]
    fn test_categorical_follows_cumulative_distribution() {
        // p = [0.25, 0.0, 0.75]
        let weights = [1.0, 0.0, 3.0];

        let mut low = ReplaySource::new(vec![0.1]);
        assert_eq!(low.categorical(&weights).unwrap(), 0);

        let mut boundary = ReplaySource::new(vec![0.25]);
        assert_eq!(boundary.categorical(&weights).unwrap(), 2);

        let mut high = ReplaySource::new(vec![0.99]);
        assert_eq!(high.categorical(&weights).unwrap(), 2);
    }

    #[test]
    fn test_categorical_skips_leading_zero_weight() {
        let mut source = ReplaySource::new(vec![0.0]);
        assert_eq!(source.categorical(&[0.0, 0.0, 5.0]).unwrap(), 2);
    }

    #[test]
    fn test_categorical_rejects_bad_weights() {
        let mut source = ReplaySource::new(vec![0.5]);

        assert_eq!(source.categorical(&[]), Err(EnvError::EmptyWeights));
        assert!(matches!(
            source.categorical(&[0.0, 0.0]),
            Err(EnvError::InvalidWeights(_))
        ));
        assert!(matches!(
            source.categorical(&[1.0, -2.0]),
            Err(EnvError::InvalidWeights(_))
        ));
        assert!(matches!(
            source.categorical(&[f64::NAN]),
            Err(EnvError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_exponential_inverse_cdf() {
        let mut source = ReplaySource::new(vec![0.0, 0.5]);

        // U = 0 gives a zero holding time, not infinity
        assert_eq!(source.exponential(2.0).unwrap(), 0.0);

        let tau = source.exponential(2.0).unwrap();
        assert!((tau - 2.0_f64.ln() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_rejects_bad_rate() {
        let mut source = ReplaySource::new(vec![0.5]);
        assert_eq!(source.exponential(0.0), Err(EnvError::InvalidRate(0.0)));
        assert!(source.exponential(-1.0).is_err());
        assert!(source.exponential(f64::INFINITY).is_err());
    }
}
