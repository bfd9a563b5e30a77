//! # Error Types
//!
//! Domain-specific error types for mps-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mps-core errors (this file)                                           │
//! │  ├── CoreError        - Quote rule violations                          │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  mps-submit errors (separate crate)                                    │
//! │  ├── SubmitError      - Delivery / config failures                     │
//! │  └── RosterError      - Client code lookup failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SubmitError → UI message          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, score, pack name)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a short user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quote rule violations.
///
/// All variants are recoverable: the user corrects the form and recomputes.
/// None of them leaves a partial Quote behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A required client field (name, email, sector) is empty.
    ///
    /// ## When This Occurs
    /// First validation step of `compute_quote`, before any figure is derived.
    #[error("Please complete client information ({field} is required).")]
    IncompleteClientInfo { field: String },

    /// Every device quantity is zero.
    #[error("Please select at least one device.")]
    NoDevicesSelected,

    /// Compliance score is below the submission threshold.
    ///
    /// ## User Workflow
    /// ```text
    /// Quote computed (score: 75)
    ///      │
    ///      ▼
    /// submit pressed
    ///      │
    ///      ▼
    /// ComplianceFailed { score: 75, threshold: 100 }  ── no network call
    ///      │
    ///      ▼
    /// UI shows: "Compliance failed. Score 75 < 100."
    /// ```
    #[error("Compliance failed. Score {score} < {threshold}.")]
    ComplianceFailed { score: u32, threshold: u32 },

    /// Managed-service pack name is not in the catalog.
    #[error("Unknown service pack: {0}")]
    UnknownPack(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for field-level checks before quote rules run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Duplicate value (e.g., duplicate catalog model).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
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
    fn test_error_messages() {
        let err = CoreError::ComplianceFailed {
            score: 75,
            threshold: 100,
        };
        assert_eq!(err.to_string(), "Compliance failed. Score 75 < 100.");

        assert_eq!(
            CoreError::NoDevicesSelected.to_string(),
            "Please select at least one device."
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sector".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
