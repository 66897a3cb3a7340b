//! Error types for jobscope-core
//!
//! Parsing and metrics never fail; only threshold configuration can be rejected.

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while validating analytics thresholds
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A rate or fraction fell outside `0.0..=1.0`
    #[error("{name} must be between 0 and 1 (got {value})")]
    RateOutOfRange { name: &'static str, value: f64 },

    /// A value that must be strictly positive was not
    #[error("{name} must be greater than 0")]
    NotPositive { name: &'static str },

    /// Bucket boundaries are not increasing
    #[error("size buckets must increase (small < {small}, medium < {medium})")]
    BucketOrder { small: u64, medium: u64 },
}
