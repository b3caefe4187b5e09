//! Brute-force correlation search between two equally sampled signals.
//!
//! Both searches slide the shorter signal over every valid offset of the
//! longer one and keep the offset with the highest normalized dot product.
//! Windows in this domain are short, so no FFT is involved.

use log::debug;

use crate::error::{Result, TraceError};
use crate::trace::Trace;

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(p, q)| p * q).sum()
}

fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Finds by how many samples `compare` must be shifted against `base` for the
/// best correlation.
///
/// The shorter of the two is slid along the longer one. The result is the
/// start index of the best matching segment, positive when `base` is the
/// longer sequence and negated when `compare` is. Sequences of equal length
/// are not searched and give 0, as does a search in which no offset has a
/// positive correlation.
///
/// # Example
///
/// ```rust
/// use seistrace::find_best_shift;
///
/// let base = [0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0];
/// let compare = [1.0, 2.0, 3.0];
/// assert_eq!(find_best_shift(&base, &compare), 1);
/// assert_eq!(find_best_shift(&compare, &base), -1);
/// ```
pub fn find_best_shift(base: &[f64], compare: &[f64]) -> isize {
    if base.len() == compare.len() {
        return 0;
    }
    let (shorter, longer) = if base.len() < compare.len() {
        (base, compare)
    } else {
        (compare, base)
    };

    let gap = longer.len() - shorter.len();
    let shorter_norm = norm(shorter);
    let mut best_shift = 0usize;
    let mut best_correlation = 0.0;

    for shift in 0..=gap {
        let part = &longer[shift..shift + shorter.len()];
        let correlation = dot(part, shorter) / norm(part) / shorter_norm;
        if best_correlation < correlation {
            best_correlation = correlation;
            best_shift = shift;
        }
    }
    debug!(
        "best shift {} of {} with correlation {}",
        best_shift, gap, best_correlation
    );

    let best_shift = best_shift as isize;
    if compare.len() < base.len() {
        best_shift
    } else {
        -best_shift
    }
}

impl Trace {
    /// Finds the x shift that best aligns `other` with this trace.
    ///
    /// Both traces are assumed to share the same sampling interval. `other`
    /// is slid along the samples of `self`; at each offset `i` the correlation
    /// is `Σ y[i + j]·other.y[j] / (‖y[i..i + m]‖·‖other.y‖)`. The returned
    /// value is `x[i] - other.x[0]` for the first offset with the highest
    /// correlation.
    ///
    /// # Errors
    ///
    /// `InvalidComparison` unless `other` is strictly shorter than `self`.
    pub fn find_best_shift(&self, other: &Trace) -> Result<f64> {
        let len = self.len();
        let other_len = other.len();
        if other_len >= len {
            return Err(TraceError::InvalidComparison { len, other_len });
        }

        let gap = len - other_len;
        let other_norm = norm(other.y());
        let mut best_correlation = f64::NEG_INFINITY;
        let mut shift = 0.0;

        for i in 0..=gap {
            let segment = &self.y()[i..i + other_len];
            let correlation = dot(segment, other.y()) / (norm(segment) * other_norm);
            if best_correlation < correlation {
                best_correlation = correlation;
                shift = self.x_at(i) - other.x_at(0);
            }
        }
        debug!("best x shift {} with correlation {}", shift, best_correlation);

        Ok(shift)
    }
}
