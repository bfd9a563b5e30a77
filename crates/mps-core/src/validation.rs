//! # Validation Module
//!
//! Input validation for quote requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form coercion (form.rs)                                      │
//! │  ├── Numeric fields NEVER fail: junk or negative input becomes 0       │
//! │  └── Pack name must exist in the catalog                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Client name / email / sector must be non-empty                    │
//! │  └── Runs first in compute_quote, fail fast                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Quote rules (quote.rs)                                       │
//! │  └── At least one device selected                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::input::ClientInfo;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a text field is present after trimming.
///
/// ## Example
/// ```rust
/// use mps_core::validation::validate_required;
///
/// assert!(validate_required("name", "Acme Ltd").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the client block of a quote request.
///
/// ## Rules
/// - `name`, `email`, `sector` are required, checked in that order
/// - `phone` is optional
///
/// The first missing field is reported as `IncompleteClientInfo`.
pub fn validate_client_info(client: &ClientInfo) -> CoreResult<()> {
    let fields = [
        ("name", client.name.as_str()),
        ("email", client.email.as_str()),
        ("sector", client.sector.as_str()),
    ];

    for (field, value) in fields {
        if let Err(ValidationError::Required { field }) = validate_required(field, value) {
            return Err(CoreError::IncompleteClientInfo { field });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str, email: &str, sector: &str) -> ClientInfo {
        ClientInfo {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            sector: sector.to_string(),
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("email", "a@b.ie").is_ok());
        assert_eq!(
            validate_required("email", ""),
            Err(ValidationError::Required {
                field: "email".to_string()
            })
        );
    }

    #[test]
    fn test_complete_client_passes() {
        assert!(validate_client_info(&client("Acme", "ops@acme.ie", "Education")).is_ok());
    }

    #[test]
    fn test_phone_is_optional() {
        let mut c = client("Acme", "ops@acme.ie", "Retail");
        c.phone = Some(String::new());
        assert!(validate_client_info(&c).is_ok());
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let err = validate_client_info(&client("", "", "")).unwrap_err();
        assert_eq!(
            err,
            CoreError::IncompleteClientInfo {
                field: "name".to_string()
            }
        );

        let err = validate_client_info(&client("Acme", " ", "")).unwrap_err();
        assert_eq!(
            err,
            CoreError::IncompleteClientInfo {
                field: "email".to_string()
            }
        );

        let err = validate_client_info(&client("Acme", "ops@acme.ie", "")).unwrap_err();
        assert_eq!(
            err,
            CoreError::IncompleteClientInfo {
                field: "sector".to_string()
            }
        );
    }
}
