//! Validation failures raised by the calculation engine.

use thiserror::Error;

/// Why a calculation was rejected. Each variant names the offending field
/// using the caller's field name (`monthlyInvestment`, `loanAmount`,
/// `annualRate`, `years`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// The inputs were individually valid but the result is not representable.
    #[error("{field} is too large to produce a finite result")]
    Overflow { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NonFinite { field }
            | ValidationError::NotPositive { field }
            | ValidationError::Negative { field }
            | ValidationError::Overflow { field } => field,
        }
    }
}

/// Checks a value that must be finite and strictly positive.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(value)
}

/// Checks a value that must be finite and zero or more.
pub(crate) fn require_non_negative(
    field: &'static str,
    value: f64,
) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    // -0.0 passes the check above; normalise it so outputs never show "-0"
    Ok(value.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_checks() {
        assert_eq!(require_positive("years", 5.0), Ok(5.0));
        assert_eq!(
            require_positive("years", 0.0),
            Err(ValidationError::NotPositive { field: "years" })
        );
        assert_eq!(
            require_positive("years", -1.0),
            Err(ValidationError::NotPositive { field: "years" })
        );
        assert_eq!(
            require_positive("years", f64::NAN),
            Err(ValidationError::NonFinite { field: "years" })
        );
        assert_eq!(
            require_positive("years", f64::INFINITY),
            Err(ValidationError::NonFinite { field: "years" })
        );
    }

    #[test]
    fn test_non_negative_checks() {
        assert_eq!(require_non_negative("annualRate", 0.0), Ok(0.0));
        assert!(require_non_negative("annualRate", -0.0).unwrap().is_sign_positive());
        assert_eq!(
            require_non_negative("annualRate", -0.5),
            Err(ValidationError::Negative {
                field: "annualRate"
            })
        );
    }

    #[test]
    fn test_message_names_field() {
        let err = ValidationError::NotANumber {
            field: "loanAmount",
            value: "abc".to_string(),
        };
        assert_eq!(err.field(), "loanAmount");
        assert_eq!(err.to_string(), "loanAmount must be a number, got \"abc\"");
    }
}
