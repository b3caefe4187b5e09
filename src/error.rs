use thiserror::Error;

/// Error types for trace construction, loading and analysis
#[derive(Debug, Error)]
pub enum TraceError {
    /// The x and y sequences have different lengths
    #[error("Shape mismatch: x has {x_len} elements but y has {y_len}")]
    ShapeMismatch { x_len: usize, y_len: usize },

    /// A trace needs at least one sample
    #[error("A trace needs at least one sample")]
    EmptyTrace,

    /// A line of a text source could not be turned into an (x, y) sample
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Polynomial degree is not supported by the number of samples
    #[error("Invalid degree: {degree}. The trace has only {samples} samples")]
    InvalidDegree { degree: usize, samples: usize },

    /// Neighbour count must be in [1, samples]
    #[error("Invalid neighbour count: {count}. Must be between 1 and {samples}")]
    InvalidNeighborCount { count: usize, samples: usize },

    /// Alignment needs a strictly shorter trace to slide along this one
    #[error("Invalid comparison: trace of length {other_len} must be shorter than {len}")]
    InvalidComparison { len: usize, other_len: usize },

    /// Arithmetic between traces whose x sequences differ
    #[error("Traces have different x axes")]
    AxisMismatch,

    /// No sample falls in the requested x range
    #[error("No data in [{start}, {end}]")]
    EmptyWindow { start: f64, end: f64 },

    /// The dense linear system could not be solved (e.g., repeated x values)
    #[error("Singular system: {0}")]
    SingularSystem(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for trace operations
pub type Result<T> = std::result::Result<T, TraceError>;
