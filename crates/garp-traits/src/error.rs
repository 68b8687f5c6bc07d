//! Error types for the garp engine.
//!
//! Only instrument-level failures travel through [`Result`]. The non-fatal
//! conditions (short history, degenerate denominators, enrichment gaps) are
//! represented as absent values in the computed series; the matching variants
//! exist so that callers can log and audit them with a uniform message.

use thiserror::Error;

/// The main error type for garp operations.
#[derive(Debug, Error)]
pub enum GarpError {
    /// Fewer periods than a computation needs (e.g. fewer than 4 quarters at a
    /// TTM anchor). Non-fatal: the computation is skipped.
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// No usable EPS-equivalent field in either statement frequency.
    /// Fatal for the instrument.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// A ratio denominator was zero or absent. Non-fatal: the ratio is undefined.
    #[error("Degenerate denominator: {0}")]
    DegenerateDenominator(String),

    /// Neither enrichment strategy produced data for an official report date.
    /// Non-fatal: the record is tagged `Missing`.
    #[error("Record enrichment gap: {0}")]
    RecordEnrichmentGap(String),

    /// Error due to invalid or malformed input data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error while reading inputs or writing exports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GarpError {
    /// Whether this error aborts the pipeline for the whole instrument.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::InsufficientHistory(_)
                | Self::DegenerateDenominator(_)
                | Self::RecordEnrichmentGap(_)
        )
    }
}

/// A specialized Result type for garp operations.
pub type Result<T> = std::result::Result<T, GarpError>;
