//! Error types for the VeriGrade analytics core.
//!
//! The engines are pure computations, so the taxonomy is small: invalid
//! caller input, inconsistent configuration, and serialization at the CLI
//! boundary. Degenerate arithmetic (zero denominators) is never an error;
//! each calculation substitutes a documented sentinel instead.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for VeriGrade operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the VeriGrade analytics core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════════════
    // Snapshot Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A currency field that must be non-negative carried a negative amount
    #[error("Negative amount for {name}: {value}")]
    NegativeAmount {
        /// Field name
        name: &'static str,
        /// Offending amount
        value: Decimal,
    },

    /// A metric field carried NaN or infinity
    #[error("Non-finite value for {name}")]
    NonFiniteMetric {
        /// Field name
        name: &'static str,
    },

    /// A ratio field fell outside its documented range
    #[error("Ratio {name} out of range [{min}, {max}]: {value}")]
    RatioOutOfRange {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Invalid input parameter
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Configuration Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Category weights must sum to exactly 1.0
    #[error("Score weights sum to {sum}, expected 1.0")]
    InvalidWeights {
        /// Actual sum of the configured weights
        sum: f64,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Serialization Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns the error code for external systems
    pub fn code(&self) -> u32 {
        match self {
            // Snapshot errors: 1xxx
            Error::NegativeAmount { .. } => 1001,
            Error::NonFiniteMetric { .. } => 1002,
            Error::RatioOutOfRange { .. } => 1003,
            Error::InvalidParameter { .. } => 1004,

            // Configuration errors: 2xxx
            Error::InvalidWeights { .. } => 2001,

            // Serialization errors: 7xxx
            Error::Serialization(_) => 7001,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
