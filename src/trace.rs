use std::ops::RangeInclusive;
use std::path::Path;

use log::trace;
use nalgebra::DVector;

use crate::error::{Result, TraceError};
use crate::nearest;
use crate::polynomial::{self, Polynomial};
use crate::reader::TraceReader;

/// Anything that exposes an x range to cut a trace with.
///
/// Only the two bounds are read; the window is never modified.
pub trait TimeWindow {
    /// Inclusive lower bound
    fn start_time(&self) -> f64;
    /// Inclusive upper bound
    fn end_time(&self) -> f64;
}

impl TimeWindow for RangeInclusive<f64> {
    fn start_time(&self) -> f64 {
        *self.start()
    }

    fn end_time(&self) -> f64 {
        *self.end()
    }
}

impl TimeWindow for (f64, f64) {
    fn start_time(&self) -> f64 {
        self.0
    }

    fn end_time(&self) -> f64 {
        self.1
    }
}

/// An immutable sampled function `y = f(x)`.
///
/// The samples are owned by the trace and never change after construction;
/// every transformation returns a new `Trace`. The x values are not required
/// to be sorted: every lookup scans the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Trace {
    /// Creates a trace from paired x and y values.
    ///
    /// # Errors
    ///
    /// * `ShapeMismatch` if the lengths differ
    /// * `EmptyTrace` if there are no samples
    ///
    /// # Example
    ///
    /// ```rust
    /// use seistrace::Trace;
    ///
    /// let trace = Trace::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]).expect("Same lengths");
    /// assert_eq!(trace.len(), 3);
    /// ```
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(TraceError::ShapeMismatch { x_len: x.len(), y_len: y.len() });
        }
        if x.is_empty() {
            return Err(TraceError::EmptyTrace);
        }
        Ok(Self { x, y })
    }

    /// Creates a trace by copying borrowed slices.
    pub fn from_slices(x: &[f64], y: &[f64]) -> Result<Self> {
        Self::new(x.to_vec(), y.to_vec())
    }

    /// Reads a trace from a whitespace separated text file, x in the first
    /// column and y in the second.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        TraceReader::new().read_path(path)
    }

    /// Reads a trace from a whitespace separated text file with the given
    /// 0-based columns for x and y.
    pub fn from_path_with_columns<P: AsRef<Path>>(
        path: P,
        x_column: usize,
        y_column: usize,
    ) -> Result<Self> {
        TraceReader::new().with_columns(x_column, y_column).read_path(path)
    }

    /// Number of samples (always at least one)
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// x value of sample `i`. Panics if `i` is out of bounds.
    pub fn x_at(&self, i: usize) -> f64 {
        self.x[i]
    }

    /// y value of sample `i`. Panics if `i` is out of bounds.
    pub fn y_at(&self, i: usize) -> f64 {
        self.y[i]
    }

    /// Borrowed x values in storage order
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Borrowed y values in storage order
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Owned copy of x
    pub fn to_x_vec(&self) -> Vec<f64> {
        self.x.clone()
    }

    /// Owned copy of y
    pub fn to_y_vec(&self) -> Vec<f64> {
        self.y.clone()
    }

    /// Copy of x as an nalgebra vector
    pub fn x_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.x)
    }

    /// Copy of y as an nalgebra vector
    pub fn y_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.y)
    }

    /// Iterates over `(x, y)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    fn index_of_max(&self) -> usize {
        let mut best = 0;
        for (i, &v) in self.y.iter().enumerate().skip(1) {
            if v > self.y[best] {
                best = i;
            }
        }
        best
    }

    fn index_of_min(&self) -> usize {
        let mut best = 0;
        for (i, &v) in self.y.iter().enumerate().skip(1) {
            if v < self.y[best] {
                best = i;
            }
        }
        best
    }

    /// Largest y; the first one if it occurs several times.
    pub fn max_value(&self) -> f64 {
        self.y[self.index_of_max()]
    }

    /// Smallest y; the first one if it occurs several times.
    pub fn min_value(&self) -> f64 {
        self.y[self.index_of_min()]
    }

    /// x at which the largest y occurs
    pub fn x_for_max_value(&self) -> f64 {
        self.x[self.index_of_max()]
    }

    /// x at which the smallest y occurs
    pub fn x_for_min_value(&self) -> f64 {
        self.x[self.index_of_min()]
    }

    /// Indices of the `count` samples nearest to `target`, closest first.
    ///
    /// See [`nearest::near_points`] for the tie rule.
    pub fn near_points(&self, count: usize, target: f64) -> Result<Vec<usize>> {
        nearest::near_points(&self.x, target, count)
    }

    /// Index of the sample whose x is closest to `target`
    pub fn nearest_x_index(&self, target: f64) -> usize {
        let mut best = 0;
        let mut best_residual = f64::INFINITY;
        for (i, &x) in self.x.iter().enumerate() {
            let residual = (x - target).abs();
            // `<=` keeps the same tie rule as `near_points`
            if residual <= best_residual {
                best = i;
                best_residual = residual;
            }
        }
        best
    }

    /// The x value closest to `target`
    pub fn nearest_x(&self, target: f64) -> f64 {
        self.x[self.nearest_x_index(target)]
    }

    /// Interpolates `f(c)` with a degree `degree` polynomial through the
    /// `degree + 1` samples nearest to `c`.
    ///
    /// Degree 0 returns the y of the nearest sample.
    ///
    /// # Errors
    ///
    /// * `InvalidDegree` if the trace has fewer than `degree + 1` samples
    /// * `SingularSystem` if the selected samples share an x value
    pub fn to_value(&self, degree: usize, c: f64) -> Result<f64> {
        if degree >= self.len() {
            return Err(TraceError::InvalidDegree { degree, samples: self.len() });
        }

        let indices = self.near_points(degree + 1, c)?;
        if degree == 0 {
            return Ok(self.y[indices[0]]);
        }
        trace!("interpolating at {} through samples {:?}", c, indices);

        let xs: Vec<f64> = indices.iter().map(|&i| self.x[i]).collect();
        let ys: Vec<f64> = indices.iter().map(|&i| self.y[i]).collect();
        polynomial::interpolate_exact(&xs, &ys, c)
    }

    /// Least squares polynomial of degree `degree` over all samples.
    ///
    /// # Errors
    ///
    /// * `InvalidDegree` if `degree >= len()`
    /// * `SingularSystem` if there are too few distinct x values
    pub fn to_polynomial(&self, degree: usize) -> Result<Polynomial> {
        polynomial::fit_least_squares(&self.x, &self.y, degree)
    }

    fn is_peak(&self, i: usize) -> bool {
        0.0 < (self.y[i + 1] - self.y[i]) * (self.y[i - 1] - self.y[i])
    }

    fn interior(&self) -> std::ops::Range<usize> {
        1..self.len().saturating_sub(1)
    }

    /// Indices `i` with `0 < (y[i] - y[i-1]) * (y[i] - y[i+1])`.
    ///
    /// The first and last samples are never peaks.
    pub fn index_of_peaks(&self) -> Vec<usize> {
        self.interior().filter(|&i| self.is_peak(i)).collect()
    }

    /// Peaks that are local minima (`y[i] < y[i-1]`)
    pub fn index_of_downward_convex(&self) -> Vec<usize> {
        self.interior()
            .filter(|&i| self.y[i] < self.y[i - 1] && self.is_peak(i))
            .collect()
    }

    /// Peaks that are local maxima (`y[i-1] < y[i]`)
    pub fn index_of_upward_convex(&self) -> Vec<usize> {
        self.interior()
            .filter(|&i| self.y[i - 1] < self.y[i] && self.is_peak(i))
            .collect()
    }

    /// f(x) -> f(x - shift): every x is moved by `shift`.
    ///
    /// To map x = (3, 4, 5) onto (0, 1, 2) the shift is -3.
    pub fn shift_x(&self, shift: f64) -> Trace {
        Trace {
            x: self.x.iter().map(|x| x + shift).collect(),
            y: self.y.clone(),
        }
    }

    /// Multiplies every y by `factor`.
    pub fn multiply(&self, factor: f64) -> Trace {
        Trace {
            x: self.x.clone(),
            y: self.y.iter().map(|y| y * factor).collect(),
        }
    }

    /// Adds the y values of `other` sample by sample.
    ///
    /// # Errors
    ///
    /// `AxisMismatch` unless both x sequences are element-wise identical.
    pub fn add(&self, other: &Trace) -> Result<Trace> {
        if self.x != other.x {
            return Err(TraceError::AxisMismatch);
        }
        Ok(Trace {
            x: self.x.clone(),
            y: self.y.iter().zip(other.y.iter()).map(|(a, b)| a + b).collect(),
        })
    }

    /// Samples with `start <= x <= end`, in storage order.
    ///
    /// # Errors
    ///
    /// `EmptyWindow` if no sample lies in the range.
    pub fn cut_window(&self, start: f64, end: f64) -> Result<Trace> {
        let (x, y): (Vec<f64>, Vec<f64>) = self
            .iter()
            .filter(|&(x, _)| start <= x && x <= end)
            .unzip();
        if x.is_empty() {
            return Err(TraceError::EmptyWindow { start, end });
        }
        Ok(Trace { x, y })
    }

    /// Cuts the trace with the bounds of a [`TimeWindow`].
    pub fn cut_time_window<W: TimeWindow + ?Sized>(&self, window: &W) -> Result<Trace> {
        self.cut_window(window.start_time(), window.end_time())
    }

    /// Mean of y
    pub fn mean(&self) -> f64 {
        self.y.iter().sum::<f64>() / self.len() as f64
    }

    /// Population variance of y: 1/n Σ(y - mean)²
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.y.iter().map(|y| (y - mean) * (y - mean)).sum::<f64>() / self.len() as f64
    }

    /// Square root of [`Trace::variance`]
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn zigzag() -> Trace {
        Trace::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 2.0, 1.0, 3.0, 0.0]).unwrap()
    }

    #[test]
    fn test_shape_mismatch() {
        let result = Trace::new(vec![0.0, 1.0], vec![0.0]);
        assert!(matches!(result, Err(TraceError::ShapeMismatch { x_len: 2, y_len: 1 })));
    }

    #[test]
    fn test_empty_trace() {
        assert!(matches!(Trace::new(vec![], vec![]), Err(TraceError::EmptyTrace)));
    }

    #[test]
    fn test_accessors_round_trip() {
        let x = vec![0.5, 1.5, -2.0];
        let y = vec![3.0, 4.0, 5.0];
        let trace = Trace::from_slices(&x, &y).unwrap();
        for i in 0..x.len() {
            assert_eq!(trace.x_at(i), x[i]);
            assert_eq!(trace.y_at(i), y[i]);
        }
        assert_eq!(trace.x_vector().as_slice(), x.as_slice());
        assert_eq!(trace.y_vector().as_slice(), y.as_slice());
    }

    #[test]
    fn test_extremes() {
        let trace = Trace::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 5.0, -2.0, 5.0]).unwrap();
        assert_eq!(trace.max_value(), 5.0);
        assert_eq!(trace.x_for_max_value(), 1.0);
        assert_eq!(trace.min_value(), -2.0);
        assert_eq!(trace.x_for_min_value(), 2.0);
    }

    #[test]
    fn test_peaks() {
        let trace = zigzag();
        assert_eq!(trace.index_of_peaks(), vec![1, 2, 3]);
        assert_eq!(trace.index_of_downward_convex(), vec![2]);
        assert_eq!(trace.index_of_upward_convex(), vec![1, 3]);
    }

    #[test]
    fn test_flat_neighbours_are_not_peaks() {
        let trace = Trace::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 2.0, 1.0]).unwrap();
        assert!(trace.index_of_peaks().is_empty());
    }

    #[test]
    fn test_peaks_on_short_traces() {
        let single = Trace::new(vec![0.0], vec![1.0]).unwrap();
        assert!(single.index_of_peaks().is_empty());
        let pair = Trace::new(vec![0.0, 1.0], vec![1.0, 0.0]).unwrap();
        assert!(pair.index_of_upward_convex().is_empty());
    }

    #[test]
    fn test_nearest() {
        let trace = zigzag();
        assert_eq!(trace.nearest_x_index(2.4), 2);
        assert_eq!(trace.nearest_x(3.6), 4.0);
        // Tie between x = 1 and x = 2 goes to the later sample
        assert_eq!(trace.nearest_x_index(1.5), 2);
        assert_eq!(trace.near_points(1, 1.5).unwrap(), vec![2]);
    }

    #[test]
    fn test_degree_zero_value_is_nearest_y() {
        let trace = zigzag();
        for c in [-1.0, 0.4, 1.2, 2.9, 10.0] {
            let i = trace.nearest_x_index(c);
            assert_eq!(trace.to_value(0, c).unwrap(), trace.y_at(i));
        }
    }

    #[test]
    fn test_linear_interpolation() {
        let trace = Trace::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 30.0]).unwrap();
        assert_abs_diff_eq!(trace.to_value(1, 0.25).unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(trace.to_value(1, 1.75).unwrap(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_value_invalid_degree() {
        let trace = zigzag();
        assert!(matches!(
            trace.to_value(5, 1.0),
            Err(TraceError::InvalidDegree { degree: 5, samples: 5 })
        ));
        assert!(trace.to_value(4, 1.0).is_ok());
    }

    #[test]
    fn test_to_value_huge_degree_is_rejected() {
        let trace = Trace::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert!(matches!(
            trace.to_value(usize::MAX, 0.5),
            Err(TraceError::InvalidDegree { degree: usize::MAX, samples: 2 })
        ));
    }

    #[test]
    fn test_to_polynomial_too_few_distinct_x() {
        let trace = Trace::new(vec![0.1, 0.1, 0.1, 0.3], vec![1.0, 1.0, 1.0, 2.0]).unwrap();
        assert!(matches!(trace.to_polynomial(2), Err(TraceError::SingularSystem(_))));
        assert!(trace.to_polynomial(1).is_ok());
    }

    #[test]
    fn test_to_polynomial_invalid_degree() {
        let trace = zigzag();
        assert!(matches!(
            trace.to_polynomial(5),
            Err(TraceError::InvalidDegree { degree: 5, samples: 5 })
        ));
    }

    #[test]
    fn test_transformations_leave_original_untouched() {
        let trace = zigzag();
        let x_before = trace.to_x_vec();
        let y_before = trace.to_y_vec();

        let shifted = trace.shift_x(-1.0);
        let scaled = trace.multiply(3.0);
        let doubled = trace.add(&trace).unwrap();
        let cut = trace.cut_window(1.0, 3.0).unwrap();

        assert_eq!(shifted.x(), &[-1.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(shifted.y(), y_before.as_slice());
        assert_eq!(scaled.y(), &[0.0, 6.0, 3.0, 9.0, 0.0]);
        assert_eq!(doubled.y(), &[0.0, 4.0, 2.0, 6.0, 0.0]);
        assert_eq!(cut.x(), &[1.0, 2.0, 3.0]);

        assert_eq!(trace.x(), x_before.as_slice());
        assert_eq!(trace.y(), y_before.as_slice());
    }

    #[test]
    fn test_add_requires_identical_axis() {
        let a = Trace::new(vec![0.0, 1.0], vec![1.0, 1.0]).unwrap();
        let b = Trace::new(vec![0.0, 1.0 + 1e-15], vec![1.0, 1.0]).unwrap();
        assert!(matches!(a.add(&b), Err(TraceError::AxisMismatch)));

        let c = Trace::new(vec![0.0, 1.0, 2.0], vec![1.0, 1.0, 1.0]).unwrap();
        assert!(matches!(a.add(&c), Err(TraceError::AxisMismatch)));
    }

    #[test]
    fn test_cut_window_bounds() {
        let trace = zigzag();
        let cut = trace.cut_window(1.0, 1.0).unwrap();
        assert_eq!(cut.x(), &[1.0]);
        assert_eq!(cut.y(), &[2.0]);

        match trace.cut_window(1.1, 1.9) {
            Err(TraceError::EmptyWindow { start, end }) => {
                assert_eq!(start, 1.1);
                assert_eq!(end, 1.9);
            }
            other => panic!("expected EmptyWindow, got {:?}", other),
        }
    }

    #[test]
    fn test_cut_time_window() {
        let trace = zigzag();
        let by_range = trace.cut_time_window(&(2.0..=4.0)).unwrap();
        let by_tuple = trace.cut_time_window(&(2.0, 4.0)).unwrap();
        assert_eq!(by_range, by_tuple);
        assert_eq!(by_range.y(), &[1.0, 3.0, 0.0]);
    }

    #[test]
    fn test_cut_window_unsorted_keeps_order() {
        let trace = Trace::new(vec![3.0, 0.0, 2.0, 5.0], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let cut = trace.cut_window(1.0, 4.0).unwrap();
        assert_eq!(cut.x(), &[3.0, 2.0]);
        assert_eq!(cut.y(), &[1.0, 3.0]);
    }

    #[test]
    fn test_statistics() {
        let y = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
        let trace = Trace::new(x, y).unwrap();
        assert_abs_diff_eq!(trace.mean(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trace.variance(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trace.standard_deviation(), 2.0, epsilon = 1e-12);
    }
}
