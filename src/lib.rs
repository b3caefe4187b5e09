//! # seistrace
//!
//! Immutable sampled functions `y = f(x)` for seismic waveform work.
//!
//! A [`Trace`] owns its samples and never changes after construction; shifting,
//! scaling, adding and windowing all return new traces, so a trace can be
//! shared between threads freely.
//!
//! ## Features
//!
//! - Local interpolation through the nearest `n + 1` samples
//! - Global least squares polynomial fits
//! - Peak and convexity detection
//! - Cross-correlation search for the best alignment of two signals
//! - Loading from whitespace separated text (with comment lines) and CSV
//!
//! ## Example
//!
//! ```rust
//! use seistrace::Trace;
//!
//! let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|x| 1.0 + 2.0 * x).collect();
//! let trace = Trace::new(x, y).expect("Same lengths");
//!
//! let line = trace.to_polynomial(1).expect("Enough samples");
//! assert!((line.coefficients()[1] - 2.0).abs() < 1e-9);
//! assert!((trace.to_value(1, 2.5).unwrap() - 6.0).abs() < 1e-9);
//! ```

mod alignment;
mod csv_utils;
mod error;
mod nearest;
mod polynomial;
mod reader;
mod trace;

pub use alignment::find_best_shift;
pub use csv_utils::{read_csv_trace, write_csv_trace};
pub use error::{Result, TraceError};
pub use nearest::near_points;
pub use polynomial::{fit_least_squares, interpolate_exact, Polynomial};
pub use reader::{TraceReader, DEFAULT_COMMENT_MARKERS};
pub use trace::{TimeWindow, Trace};

/// Loads a trace from a whitespace separated text file with x and y in the
/// first two columns.
///
/// This is a convenience for `Trace::from_path`.
///
/// # Example
///
/// ```rust,no_run
/// let trace = seistrace::load("record.txt").expect("Readable file");
/// println!("{} samples, peak at x = {}", trace.len(), trace.x_for_max_value());
/// ```
pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Trace> {
    Trace::from_path(path)
}
