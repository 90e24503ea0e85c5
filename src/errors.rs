//! Error types for metric validation, partitioning and embedding.
//!
//! All fatal conditions abort the current call and are surfaced as
//! [`EmbeddingError`]. Degenerate clusters are not errors: they are reported
//! through `log::warn!` and handled by the documented fallback.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbeddingError>;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmbeddingError {
    /// A point index outside `[0, n)`.
    #[error("point index {point} is out of range for a metric of {n} points")]
    PointOutOfRange { point: usize, n: usize },

    #[error("radius must be positive and finite (got {radius})")]
    InvalidRadius { radius: f64 },

    /// The radius sampler only accepts clamped (hat) growth rates.
    #[error("growth rate must be at least 2 (got {xi})")]
    InvalidGrowthRate { xi: f64 },

    #[error("target dimension must be at least 1 (got {dimensions})")]
    InvalidDimension { dimensions: usize },

    #[error("norm parameter p must be positive and finite (got {p})")]
    InvalidNorm { p: f64 },

    #[error("gamma must be finite and greater than 1 (got {gamma})")]
    InvalidGamma { gamma: f64 },

    #[error("partition diameter must be positive and finite (got {delta})")]
    InvalidDelta { delta: f64 },

    #[error("scale factor must be positive and finite (got {factor})")]
    InvalidScale { factor: f64 },

    #[error("distance matrix contains no points")]
    EmptyMetric,

    #[error("row {row} has {len} entries but the matrix has {n} rows")]
    NotSquare { row: usize, len: usize, n: usize },

    #[error("distance ({i}, {j}) is negative: {value}")]
    NegativeDistance { i: usize, j: usize, value: f64 },

    #[error("diagonal entry {i} must be zero (got {value})")]
    NonZeroDiagonal { i: usize, value: f64 },

    #[error("distance matrix is not symmetric at ({i}, {j})")]
    Asymmetric { i: usize, j: usize },

    #[error("distance ({i}, {j}) is not finite")]
    NonFinite { i: usize, j: usize },

    #[error("expected {expected} columns but the embedding has {got}")]
    ShapeMismatch { expected: usize, got: usize },
}
