use nalgebra::{DMatrix, DVector};
use crate::error::{Result, TraceError};

/// A polynomial `c[0] + c[1]·x + ... + c[n]·x^n` stored low-to-high degree.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from coefficients ordered from the constant term up.
    ///
    /// An empty coefficient list is the zero polynomial.
    pub fn new(coefficients: Vec<f64>) -> Self {
        let coefficients = if coefficients.is_empty() { vec![0.0] } else { coefficients };
        Self { coefficients }
    }

    /// Coefficient `i` multiplies `x^i`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Number of coefficients minus one.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluates the polynomial at `x` (Horner's scheme).
    pub fn value(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Returns the first derivative as a new polynomial.
    pub fn derivative(&self) -> Polynomial {
        if self.coefficients.len() == 1 {
            return Polynomial::new(vec![0.0]);
        }
        Polynomial::new(
            self.coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, &c)| c * i as f64)
                .collect(),
        )
    }
}

/// Builds the Vandermonde matrix `M[row][col] = xs[row]^col` with `columns` columns.
fn vandermonde(xs: &[f64], columns: usize) -> DMatrix<f64> {
    let mut matrix = DMatrix::<f64>::zeros(xs.len(), columns);
    for (i, &x) in xs.iter().enumerate() {
        for j in 0..columns {
            matrix[(i, j)] = x.powi(j as i32);
        }
    }
    matrix
}

/// Number of distinct values in `xs`.
fn distinct_count(xs: &[f64]) -> usize {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted.len()
}

/// Solves the square system `a · c = b` by LU decomposition.
fn solve(a: DMatrix<f64>, b: DVector<f64>, what: &str) -> Result<Vec<f64>> {
    a.lu()
        .solve(&b)
        .map(|c| c.iter().copied().collect())
        .ok_or_else(|| TraceError::SingularSystem(format!("Failed to solve {}", what)))
}

/// Least squares fit of a degree `degree` polynomial through all `(xs, ys)`.
///
/// Forms the normal equations `AᵗA·c = Aᵗy` with `A[row][col] = xs[row]^col`
/// and solves them by LU decomposition.
///
/// # Errors
///
/// * `ShapeMismatch` if `xs` and `ys` differ in length
/// * `InvalidDegree` if `degree >= xs.len()`
/// * `SingularSystem` if the normal matrix cannot be inverted
///   (fewer distinct x values than coefficients)
pub fn fit_least_squares(xs: &[f64], ys: &[f64], degree: usize) -> Result<Polynomial> {
    if xs.len() != ys.len() {
        return Err(TraceError::ShapeMismatch { x_len: xs.len(), y_len: ys.len() });
    }
    if degree >= xs.len() {
        return Err(TraceError::InvalidDegree { degree, samples: xs.len() });
    }
    let distinct = distinct_count(xs);
    if distinct <= degree {
        return Err(TraceError::SingularSystem(format!(
            "degree {} needs {} distinct x values, found {}",
            degree,
            degree + 1,
            distinct
        )));
    }

    let a = vandermonde(xs, degree + 1);
    let at = a.transpose();
    let ata = &at * &a;
    let aty = &at * DVector::from_column_slice(ys);

    let coefficients = solve(ata, aty, "least squares normal equations")?;
    Ok(Polynomial::new(coefficients))
}

/// Evaluates at `at` the unique polynomial of degree `xs.len() - 1` passing
/// exactly through every `(xs[i], ys[i])`.
///
/// The coefficients come from a direct Vandermonde solve, which is adequate for
/// the handful of nodes used by local interpolation.
pub fn interpolate_exact(xs: &[f64], ys: &[f64], at: f64) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(TraceError::ShapeMismatch { x_len: xs.len(), y_len: ys.len() });
    }
    if xs.is_empty() {
        return Err(TraceError::EmptyTrace);
    }
    if distinct_count(xs) < xs.len() {
        return Err(TraceError::SingularSystem("interpolation nodes share an x value".to_string()));
    }

    let matrix = vandermonde(xs, xs.len());
    let coefficients = solve(matrix, DVector::from_column_slice(ys), "interpolation system")?;
    Ok(Polynomial::new(coefficients).value(at))
}
