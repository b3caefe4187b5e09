use crate::error::{Result, TraceError};

/// Returns the indices of the `count` samples of `xs` closest to `target`,
/// ordered by increasing distance `|x - target|`.
///
/// The selection keeps a bounded buffer sorted by distance and inserts each
/// scanned sample in front of the first entry it is not farther than. A sample
/// scanned later therefore goes ahead of an earlier one at the same distance.
/// `xs` does not need to be sorted.
///
/// # Errors
///
/// `InvalidNeighborCount` if `count` is zero or larger than `xs.len()`.
pub fn near_points(xs: &[f64], target: f64, count: usize) -> Result<Vec<usize>> {
    if count == 0 || xs.len() < count {
        return Err(TraceError::InvalidNeighborCount {
            count,
            samples: xs.len(),
        });
    }

    let mut indices: Vec<usize> = Vec::with_capacity(count + 1);
    let mut residuals: Vec<f64> = Vec::with_capacity(count + 1);

    for (i, &x) in xs.iter().enumerate() {
        let residual = (x - target).abs();
        let slot = residuals
            .iter()
            .position(|&r| residual <= r)
            .unwrap_or(residuals.len());
        if slot < count {
            residuals.insert(slot, residual);
            indices.insert(slot, i);
            residuals.truncate(count);
            indices.truncate(count);
        }
    }

    Ok(indices)
}
