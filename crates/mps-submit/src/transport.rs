//! # Quote Transport
//!
//! Sends a [`SubmissionPayload`] to the form endpoint and interprets the
//! reply.
//!
//! ## Endpoint Contract
//! ```text
//! POST {endpoint_url}            Content-Type: application/json
//! body: { "_replyto", "_to", "name", "sector", "phone", "subject", "message" }
//!
//! reply                                    result
//! ─────────────────────────────────────    ─────────────────────────────
//! { "ok": true, ... }                      Ok(DeliveryReceipt)
//! { "ok": false, "error": "..." }          Rejected(error)
//! { "error": "..." }  (any status)         Rejected(error)
//! non-JSON, 2xx                            InvalidResponse
//! non-JSON, non-2xx (error page)          Connectivity("HTTP {status}")
//! no reply / connection refused            Connectivity
//! no reply within timeout                  Timeout
//! ```
//!
//! Every failure here is retryable with the same quote.

use async_trait::async_trait;
use mps_core::SubmissionPayload;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::SubmitConfig;
use crate::error::{SubmitError, SubmitResult};

/// Rejection text used when the endpoint refuses without saying why.
pub const DEFAULT_REJECTION: &str = "Submission failed";

// =============================================================================
// Delivery Types
// =============================================================================

/// Proof that the endpoint accepted a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status of the reply.
    pub status: u16,

    /// Follow-up URL, when the endpoint provides one.
    pub next: Option<String>,
}

/// Reply body of the form endpoint.
#[derive(Debug, Deserialize)]
struct EndpointReply {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    next: Option<String>,
}

// =============================================================================
// Transport Port
// =============================================================================

/// Delivers quotes. Implementations impose their own timeout.
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    async fn deliver(&self, payload: &SubmissionPayload) -> SubmitResult<DeliveryReceipt>;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// JSON POST to a form endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint`.
    pub fn new(endpoint: Url, timeout: Duration) -> SubmitResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpTransport { client, endpoint })
    }

    /// Creates a transport from the `[delivery]` settings.
    pub fn from_config(config: &SubmitConfig) -> SubmitResult<Self> {
        Self::new(config.endpoint_url()?, config.delivery_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteTransport for HttpTransport {
    async fn deliver(&self, payload: &SubmissionPayload) -> SubmitResult<DeliveryReceipt> {
        debug!(endpoint = %self.endpoint, subject = %payload.subject, "Posting quote");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        interpret_reply(status.as_u16(), status.is_success(), &body)
    }
}

/// Maps an endpoint reply to a delivery result.
fn interpret_reply(status: u16, success: bool, body: &str) -> SubmitResult<DeliveryReceipt> {
    let reply: EndpointReply = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(e) if success => {
            warn!(status, error = %e, "Endpoint reply is not JSON");
            return Err(SubmitError::InvalidResponse(e.to_string()));
        }
        Err(_) => {
            warn!(status, "Endpoint returned an error page");
            return Err(SubmitError::Connectivity(format!("HTTP {}", status)));
        }
    };

    if reply.ok {
        return Ok(DeliveryReceipt {
            status,
            next: reply.next,
        });
    }

    let reason = reply.error.unwrap_or_else(|| DEFAULT_REJECTION.to_string());
    warn!(status, reason = %reason, "Endpoint rejected submission");
    Err(SubmitError::Rejected(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_reply() {
        let receipt = interpret_reply(200, true, r#"{"ok":true,"next":"/thanks"}"#).unwrap();
        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.next.as_deref(), Some("/thanks"));
    }

    #[test]
    fn test_rejected_with_reason() {
        let err = interpret_reply(422, false, r#"{"error":"Invalid email"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(ref r) if r == "Invalid email"));
    }

    #[test]
    fn test_ok_false_without_reason() {
        let err = interpret_reply(200, true, r#"{"ok":false}"#).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(ref r) if r == DEFAULT_REJECTION));
    }

    #[test]
    fn test_non_json_bodies() {
        assert!(matches!(
            interpret_reply(200, true, "<html>thanks</html>"),
            Err(SubmitError::InvalidResponse(_))
        ));
        let err = interpret_reply(502, false, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SubmitError::Connectivity(ref r) if r == "HTTP 502"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_rejection_is_retryable() {
        let err = interpret_reply(200, true, r#"{"ok":false,"error":"x"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(ref r) if r == "x"));
        assert!(err.is_retryable());
    }
}
