//! # Submit Error Types
//!
//! Error types for roster lookups and quote delivery.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Submit Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Endpoint            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connectivity   │  │  Rejected               │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  InvalidResponse        │ │
//! │  │  ConfigLoad/Save│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Quote       │  │   Submitter     │  │      Roster             │ │
//! │  │                 │  │                 │  │   (RosterError)         │ │
//! │  │  ComplianceFail │  │  AlreadyInFlight│  │  CodeRequired, NotFound │ │
//! │  │  InvalidQuote   │  │  Store          │  │  Connectivity, Document │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant has a short `user_message()` for the quote form; the
//! `Display` text carries the detail for logs.

use mps_core::CoreError;
use thiserror::Error;

/// Result type alias for submit operations.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Result type alias for roster lookups.
pub type RosterResult<T> = Result<T, RosterError>;

// =============================================================================
// Submit Error
// =============================================================================

/// Failures of a quote submission.
///
/// None of these touch the Quote; the caller can retry with the same value.
#[derive(Debug, Error)]
pub enum SubmitError {
    // =========================================================================
    // Quote Errors
    // =========================================================================
    /// Compliance score below the threshold. Raised before any network call.
    #[error("Compliance failed. Score {score} < {threshold}.")]
    ComplianceFailed { score: u32, threshold: u32 },

    /// Any other quote rule violation.
    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or no response arrived.
    #[error("Connection failed: {0}")]
    Connectivity(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    // =========================================================================
    // Endpoint Errors
    // =========================================================================
    /// Endpoint answered but refused the submission.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// Endpoint answered with something that is not a delivery result.
    #[error("Invalid response from endpoint: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Submitter Errors
    // =========================================================================
    /// A submission is already outstanding on this submitter.
    #[error("A submission is already in progress")]
    AlreadyInFlight,

    /// Summary could not be written to the session store.
    #[error("Summary store error: {0}")]
    Store(String),

    /// Payload or summary could not be serialized.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid submit configuration.
    #[error("Invalid submit configuration: {0}")]
    InvalidConfig(String),

    /// Invalid roster or endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for SubmitError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ComplianceFailed { score, threshold } => {
                SubmitError::ComplianceFailed { score, threshold }
            }
            other => SubmitError::InvalidQuote(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SubmitError::Timeout
        } else if err.is_decode() {
            SubmitError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            SubmitError::InvalidConfig(err.to_string())
        } else {
            SubmitError::Connectivity(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::SerializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for SubmitError {
    fn from(err: url::ParseError) -> Self {
        SubmitError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SubmitError {
    fn from(err: std::io::Error) -> Self {
        SubmitError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SubmitError {
    fn from(err: toml::de::Error) -> Self {
        SubmitError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SubmitError {
    fn from(err: toml::ser::Error) -> Self {
        SubmitError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SubmitError {
    /// Returns true if sending the same quote again may succeed.
    ///
    /// ## Retryable Errors
    /// - Connection failures, including non-JSON error pages
    /// - Timeouts
    /// - Endpoint rejections and unreadable replies
    ///
    /// ## Non-Retryable Errors
    /// - Compliance failures (the quote itself must change)
    /// - A submission already in flight
    /// - Store failures (the quote was already delivered)
    /// - Configuration errors
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmitError::Connectivity(_)
                | SubmitError::Timeout
                | SubmitError::Rejected(_)
                | SubmitError::InvalidResponse(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SubmitError::InvalidConfig(_)
                | SubmitError::InvalidUrl(_)
                | SubmitError::ConfigLoadFailed(_)
                | SubmitError::ConfigSaveFailed(_)
        )
    }

    /// Short message for the quote form.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::ComplianceFailed { .. } => self.to_string(),
            SubmitError::InvalidQuote(msg) => msg.clone(),
            SubmitError::Connectivity(_) | SubmitError::Timeout => {
                "Failed to send. Check network connection.".to_string()
            }
            SubmitError::Rejected(_) => "Quote was not accepted. Please try again.".to_string(),
            SubmitError::InvalidResponse(_) => {
                "Unexpected reply from the quote service.".to_string()
            }
            SubmitError::AlreadyInFlight => "Quote is already being sent.".to_string(),
            SubmitError::Store(_) => "Quote sent, but the summary could not be saved.".to_string(),
            SubmitError::SerializationFailed(_) => "Quote could not be prepared.".to_string(),
            SubmitError::InvalidConfig(_)
            | SubmitError::InvalidUrl(_)
            | SubmitError::ConfigLoadFailed(_)
            | SubmitError::ConfigSaveFailed(_) => {
                "Quote delivery is not configured correctly.".to_string()
            }
        }
    }
}

// =============================================================================
// Roster Error
// =============================================================================

/// Failures of a client code lookup.
///
/// Connectivity and document problems are always distinct from `NotFound`:
/// an unreachable roster never reads as "invalid code".
#[derive(Debug, Error)]
pub enum RosterError {
    /// Code was blank.
    #[error("Client code is required")]
    CodeRequired,

    /// Roster loaded but no client has this code.
    #[error("Client code not found: {0}")]
    NotFound(String),

    /// Roster could not be fetched.
    #[error("Roster unavailable: {0}")]
    Connectivity(String),

    /// Roster was fetched but is not a valid client list.
    #[error("Invalid roster document: {0}")]
    InvalidDocument(String),
}

impl From<reqwest::Error> for RosterError {
    fn from(err: reqwest::Error) -> Self {
        RosterError::Connectivity(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::InvalidDocument(err.to_string())
    }
}

impl RosterError {
    /// Returns true if the lookup may succeed when repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RosterError::Connectivity(_))
    }

    /// Short message for the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            RosterError::CodeRequired => "Please enter client code",
            RosterError::NotFound(_) => "Invalid client code",
            RosterError::Connectivity(_) => "Network error. Check connection.",
            RosterError::InvalidDocument(_) => "Client list is unavailable. Try again later.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(SubmitError::Connectivity("network error".into()).is_retryable());
        assert!(SubmitError::Timeout.is_retryable());

        assert!(SubmitError::Rejected("spam".into()).is_retryable());
        assert!(SubmitError::InvalidResponse("not json".into()).is_retryable());
        assert!(!SubmitError::ComplianceFailed { score: 50, threshold: 100 }.is_retryable());
        assert!(!SubmitError::Store("poisoned".into()).is_retryable());
        assert!(!SubmitError::AlreadyInFlight.is_retryable());
        assert!(!SubmitError::InvalidConfig("bad config".into()).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(SubmitError::InvalidUrl("ftp://x".into()).is_config_error());
        assert!(SubmitError::ConfigLoadFailed("missing".into()).is_config_error());
        assert!(!SubmitError::Timeout.is_config_error());
    }

    #[test]
    fn test_compliance_error_converts() {
        let err: SubmitError = CoreError::ComplianceFailed {
            score: 75,
            threshold: 100,
        }
        .into();
        assert!(matches!(
            err,
            SubmitError::ComplianceFailed {
                score: 75,
                threshold: 100
            }
        ));
        assert_eq!(err.user_message(), "Compliance failed. Score 75 < 100.");

        let err: SubmitError = CoreError::NoDevicesSelected.into();
        assert_eq!(err.user_message(), "Please select at least one device.");
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = [
            SubmitError::Connectivity("dns".into()),
            SubmitError::Rejected("spam".into()),
            SubmitError::InvalidResponse("html".into()),
            SubmitError::AlreadyInFlight,
            SubmitError::Store("poisoned".into()),
            SubmitError::InvalidConfig("x".into()),
        ];
        let messages: std::collections::HashSet<_> =
            errors.iter().map(SubmitError::user_message).collect();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_roster_errors() {
        assert!(RosterError::Connectivity("HTTP 503".into()).is_retryable());
        assert!(!RosterError::NotFound("X1".into()).is_retryable());
        assert_ne!(
            RosterError::NotFound("X1".into()).user_message(),
            RosterError::Connectivity("timeout".into()).user_message()
        );
    }
}
