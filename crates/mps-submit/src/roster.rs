//! # Client Roster
//!
//! Checks a client code against the published client list before the quote
//! form is unlocked.
//!
//! ## Roster Document
//! ```json
//! { "clients": [ { "code": "ACME01", "name": "Acme Ltd" }, ... ] }
//! ```
//! Only `code` is required; any other per-client fields are kept as-is.
//!
//! ## Lookup Outcomes
//! ```text
//! code ──trim──► ""          ──► CodeRequired      (no request made)
//!          │
//!          ▼
//!     GET roster ──► network / non-2xx ──► Connectivity
//!          │
//!          ▼
//!     parse JSON ──► not { clients: [...] } ──► InvalidDocument
//!          │
//!          ▼
//!     find code ──► none ──► NotFound
//!          │
//!          ▼
//!     RosterClient
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SubmitConfig;
use crate::error::{RosterError, RosterResult, SubmitError, SubmitResult};

// =============================================================================
// Roster Types
// =============================================================================

/// One entry of the client list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterClient {
    pub code: String,

    /// Every other field of the entry.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl RosterClient {
    /// A string detail such as `name`, if present.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(|v| v.as_str())
    }
}

/// The published client list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterDocument {
    pub clients: Vec<RosterClient>,
}

impl RosterDocument {
    /// Parses a roster document.
    pub fn from_json(json: &str) -> RosterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Finds the client with exactly this code.
    pub fn find(&self, code: &str) -> Option<&RosterClient> {
        self.clients.iter().find(|c| c.code == code)
    }
}

// =============================================================================
// Roster Port
// =============================================================================

/// Source of truth for client codes.
#[async_trait]
pub trait ClientRoster: Send + Sync {
    /// Verifies a client code.
    ///
    /// The code is trimmed first; a blank code never reaches the roster.
    async fn verify(&self, code: &str) -> RosterResult<RosterClient>;
}

// =============================================================================
// HTTP Roster
// =============================================================================

/// Roster fetched over HTTP on every lookup.
#[derive(Debug, Clone)]
pub struct HttpRoster {
    client: reqwest::Client,
    url: Url,
}

impl HttpRoster {
    /// Creates a roster reader for `url`.
    pub fn new(url: Url, timeout: Duration) -> RosterResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpRoster { client, url })
    }

    /// Creates a roster reader from the `[roster]` settings.
    pub fn from_config(config: &SubmitConfig) -> SubmitResult<Self> {
        let url = config.roster_url()?;
        Self::new(url, config.roster_timeout())
            .map_err(|e| SubmitError::InvalidConfig(e.to_string()))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Downloads and parses the client list.
    pub async fn fetch(&self) -> RosterResult<RosterDocument> {
        debug!(url = %self.url, "Fetching client roster");

        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RosterError::Connectivity(format!("HTTP {}", status.as_u16())));
        }

        let body = response.text().await?;
        RosterDocument::from_json(&body)
    }
}

#[async_trait]
impl ClientRoster for HttpRoster {
    async fn verify(&self, code: &str) -> RosterResult<RosterClient> {
        let code = code.trim();
        if code.is_empty() {
            return Err(RosterError::CodeRequired);
        }

        let roster = self.fetch().await.map_err(|e| {
            warn!(error = %e, "Roster lookup failed");
            e
        })?;

        match roster.find(code) {
            Some(client) => {
                info!(code = %code, "Client code verified");
                Ok(client.clone())
            }
            None => {
                info!(code = %code, "Client code not in roster");
                Err(RosterError::NotFound(code.to_string()))
            }
        }
    }
}
