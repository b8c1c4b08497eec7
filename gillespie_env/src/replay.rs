//! Scripted random source for tests.

use crate::{EnvError, RandomSource};

/// Replays a fixed list of uniform draws in order.
///
/// Every exponential and categorical draw consumes exactly one uniform,
/// so a test can script which reaction fires and when.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// Creates a source that yields `values` in order.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Number of draws left.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn uniform(&mut self) -> Result<f64, EnvError> {
        let value = self
            .values
            .get(self.cursor)
            .copied()
            .ok_or(EnvError::ReplayExhausted(self.cursor))?;
        self.cursor += 1;
        Ok(value)
    }

    fn seed(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_in_order_then_exhausted() {
        let mut source = ReplaySource::new(vec![0.1, 0.9]);

        assert_eq!(source.uniform().unwrap(), 0.1);
        assert_eq!(source.uniform().unwrap(), 0.9);
        assert_eq!(source.consumed(), 2);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.uniform(), Err(EnvError::ReplayExhausted(2)));
    }
}
