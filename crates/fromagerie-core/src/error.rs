//! # Error Types
//!
//! Domain-specific error types for fromagerie-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  fromagerie-core errors (this file)                                 │
//! │  ├── CoreError        - Access denials and rule violations          │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  fromagerie-db errors (separate crate)                              │
//! │  ├── DbError          - Database operation failures                 │
//! │  └── ServiceError     - Catalog use-case failures (wraps both)      │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ServiceError → HTTP layer      │
//! │        (PermissionDenied maps to 403, NotFound to 404, etc.)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (role, action, field)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::access::Action;
use crate::types::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent access rule violations or rejected input.
/// They should be caught and translated to user-friendly responses.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The actor is not allowed to perform the requested action.
    ///
    /// ## When This Occurs
    /// - Unauthenticated request attempts any mutation or a batch read
    /// - A sales manager touches a batch they do not own
    /// - A product manager tries to delete a product
    ///
    /// The request layer translates this into an HTTP 403; it is never
    /// retried or swallowed.
    #[error("Permission denied: {} may not {action}", role_label(.role))]
    PermissionDenied {
        /// Role of the actor, or None for unauthenticated requests.
        role: Option<Role>,
        action: Action,
    },

    /// Validation error (wraps ValidationError).
    ///
    /// Covers the explicit quantity check: a non-positive or oversized
    /// quantity is rejected deterministically before any pricing runs.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn role_label(role: &Option<Role>) -> &'static str {
    match role {
        Some(r) => r.as_str(),
        None => "an unauthenticated user",
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_messages() {
        let err = CoreError::PermissionDenied {
            role: Some(Role::SalesManager),
            action: Action::DeleteProduct,
        };
        assert_eq!(
            err.to_string(),
            "Permission denied: sales_manager may not delete product"
        );

        let err = CoreError::PermissionDenied {
            role: None,
            action: Action::ReadBatch,
        };
        assert_eq!(
            err.to_string(),
            "Permission denied: an unauthenticated user may not read batch"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
