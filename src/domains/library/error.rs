//! Calculation error types.

use thiserror::Error;

/// Inputs a calculation cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A divisor or rate that must be strictly positive was not.
    #[error("{name} must be greater than zero, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// A value outside the range the calculation supports.
    #[error("{0}")]
    OutOfRange(String),
}

impl CalcError {
    /// Create a new "out of range" error.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }
}

/// Oldest age the age-based calculations model.
pub const MAX_AGE: i64 = 120;

/// Reject ages outside `0..=MAX_AGE`.
pub fn age(name: &'static str, value: i64) -> Result<i64, CalcError> {
    if (0..=MAX_AGE).contains(&value) {
        Ok(value)
    } else {
        Err(CalcError::out_of_range(format!(
            "{name} must be between 0 and {MAX_AGE}, got {value}"
        )))
    }
}

/// Reject zero, negative and non-finite values.
pub fn positive(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::NonPositive { name, value })
    }
}
