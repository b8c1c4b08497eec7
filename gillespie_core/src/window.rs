//! Windowing: resample a continuous-time trajectory onto fixed checkpoints.
//!
//! `[t_start, t_end]` is split into `n - 1` equal half-open intervals
//! `[low, high)`. For each interval we keep the index of the first recorded
//! firing inside it; the snapshot for that checkpoint is the state just
//! before that firing (last value held, no interpolation).
//!
//! An interval with no firing carries the previous interval's index
//! forward (index 0, the initial state, for a leading empty interval).

use crate::trajectory::Trajectory;
use crate::CoreError;

/// `n` evenly spaced points from `t_start` to `t_end` inclusive.
pub fn checkpoints(t_start: f64, t_end: f64, n: usize) -> Result<Vec<f64>, CoreError> {
    validate(t_start, t_end, n)?;

    let step = (t_end - t_start) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n).map(|i| t_start + step * i as f64).collect();
    // Pin the last point so round-off cannot move it
    points[n - 1] = t_end;
    Ok(points)
}

/// Index of the first firing in each of the `n - 1` intervals.
pub fn window_indices(
    t_start: f64,
    t_end: f64,
    times: &[f64],
    n: usize,
) -> Result<Vec<usize>, CoreError> {
    let grid = checkpoints(t_start, t_end, n)?;

    let mut indices = Vec::with_capacity(n - 1);
    let mut previous = 0;
    for bounds in grid.windows(2) {
        let (low, high) = (bounds[0], bounds[1]);
        let index = times
            .iter()
            .position(|&t| t >= low && t < high)
            .unwrap_or(previous);
        indices.push(index);
        previous = index;
    }
    Ok(indices)
}

/// Maps window indices to snapshots.
///
/// Index 0 is the initial state; index `i > 0` is `states[i - 1]`, the state
/// in effect just before firing `i`.
pub fn resample(trajectory: &Trajectory, indices: &[usize]) -> Result<Vec<Vec<u64>>, CoreError> {
    indices
        .iter()
        .map(|&index| match index {
            0 => Ok(trajectory.initial_state.clone()),
            i => trajectory
                .states
                .get(i - 1)
                .cloned()
                .ok_or(CoreError::WindowIndexOutOfRange {
                    index,
                    len: trajectory.len(),
                }),
        })
        .collect()
}

/// [`window_indices`] followed by [`resample`].
pub fn window_trajectory(
    trajectory: &Trajectory,
    t_start: f64,
    t_end: f64,
    n: usize,
) -> Result<Vec<Vec<u64>>, CoreError> {
    let indices = window_indices(t_start, t_end, &trajectory.times, n)?;
    resample(trajectory, &indices)
}

fn validate(t_start: f64, t_end: f64, n: usize) -> Result<(), CoreError> {
    if n < 2 {
        return Err(CoreError::InvalidCheckpointCount(n));
    }
    if !t_start.is_finite() || !t_end.is_finite() || t_end < t_start {
        return Err(CoreError::InvalidHorizon {
            start: t_start,
            end: t_end,
        });
    }
    Ok(())
}
