//! # Errors
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ──► CoreError ──► ClientError ──► Notice ──► operator │
//! │  (bad field)         (this crate)  (till-client)   (serialized)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations never fail: removing or adjusting an item that is not in
//! the cart is a silent no-op, so there is no "line not found" error here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Failures raised by the pure domain layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A monetary amount could not be decoded.
    ///
    /// Raised for non-numeric text such as `"abc"` and for values beyond
    /// the i64 cent range. Extra fractional digits are rounded, not rejected.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A field that failed checking.
///
/// Used to vet collaborator responses and bill requests before they touch
/// cart or cache state.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing, empty or whitespace-only.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must be at least {min}, got {actual}")]
    BelowMinimum { field: String, min: i64, actual: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Duplicate value (e.g., two catalog items sharing an id).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_message() {
        let err = CoreError::InvalidAmount {
            input: "abc".to_string(),
            reason: "expected a decimal number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount 'abc': expected a decimal number"
        );
    }

    #[test]
    fn test_field_messages() {
        let err = ValidationError::Duplicate {
            field: "item id".to_string(),
            value: "7".to_string(),
        };
        assert_eq!(err.to_string(), "item id '7' appears more than once");

        let err = ValidationError::BelowMinimum {
            field: "quantity".to_string(),
            min: 1,
            actual: 0,
        };
        assert_eq!(err.to_string(), "quantity must be at least 1, got 0");
    }

    #[test]
    fn test_field_error_lifts_into_core_error() {
        let lifted = CoreError::from(ValidationError::Negative {
            field: "price".to_string(),
        });
        assert!(matches!(lifted, CoreError::Validation(_)));
        assert_eq!(lifted.to_string(), "Validation error: price must not be negative");
    }
}
