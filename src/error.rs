// src/error.rs
use thiserror::Error;

/// Error types for the fast-lookback library
#[derive(Debug, Clone, Error)]
pub enum LookbackError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid contract or simulation configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// The path simulation could not produce a requested value
    #[error("Simulation failed in {operation}: {reason}")]
    Simulation { operation: String, reason: String },

    /// Numerical instability in an estimate or a path walk
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

/// Result type alias for fast-lookback operations
pub type LookbackResult<T> = Result<T, LookbackError>;

impl LookbackError {
    pub(crate) fn simulation(operation: &str, reason: impl Into<String>) -> Self {
        LookbackError::Simulation {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(field: &str, reason: impl Into<String>) -> Self {
        LookbackError::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validation utilities
pub mod validation {
    use super::{LookbackError, LookbackResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> LookbackResult<()> {
        if !(value > 0.0) || !value.is_finite() {
            Err(LookbackError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> LookbackResult<()> {
        if !(value >= 0.0) {
            Err(LookbackError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> LookbackResult<()> {
        if !value.is_finite() {
            Err(LookbackError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> LookbackResult<()> {
        if paths == 0 {
            Err(LookbackError::configuration("paths", "must be greater than 0"))
        } else if paths > 100_000_000 {
            Err(LookbackError::configuration(
                "paths",
                "exceeds maximum allowed (100 million)",
            ))
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> LookbackResult<()> {
        if steps == 0 {
            Err(LookbackError::configuration("steps", "must be greater than 0"))
        } else if steps > 100_000 {
            Err(LookbackError::configuration(
                "steps",
                "exceeds maximum allowed (100,000)",
            ))
        } else {
            Ok(())
        }
    }
}
