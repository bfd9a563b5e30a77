//! # Submit Configuration
//!
//! Where the client roster lives, where quotes are delivered, and who
//! receives them.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MPS_ROSTER_URL=https://example.com/clients.json                    │
//! │     MPS_ENDPOINT_URL=https://example.com/quotes                        │
//! │     MPS_RECIPIENT=quotes@example.com                                   │
//! │     MPS_TIMEOUT_SECS=15                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/mps-quote/submit.toml (Linux)                            │
//! │     ~/Library/Application Support/com.mps.quote/submit.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost URLs, placeholder recipient                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # submit.toml
//! [roster]
//! url = "https://example.com/clients.json"
//! timeout_secs = 10
//!
//! [delivery]
//! endpoint_url = "https://example.com/quotes"
//! recipient = "quotes@example.com"
//! timeout_secs = 15
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SubmitError, SubmitResult};

// =============================================================================
// Roster Settings
// =============================================================================

/// Where client codes are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSettings {
    /// URL of the JSON client list.
    #[serde(default = "default_roster_url")]
    pub url: String,

    /// Request timeout (seconds).
    #[serde(default = "default_roster_timeout")]
    pub timeout_secs: u64,
}

fn default_roster_url() -> String {
    "http://localhost:8080/clients.json".to_string()
}

fn default_roster_timeout() -> u64 {
    10
}

impl Default for RosterSettings {
    fn default() -> Self {
        RosterSettings {
            url: default_roster_url(),
            timeout_secs: default_roster_timeout(),
        }
    }
}

// =============================================================================
// Delivery Settings
// =============================================================================

/// Where and to whom quotes are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// Form endpoint that accepts the JSON payload.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Address placed in the payload's `_to` field.
    #[serde(default = "default_recipient")]
    pub recipient: String,

    /// Request timeout (seconds).
    #[serde(default = "default_delivery_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint_url() -> String {
    "http://localhost:8080/quotes".to_string()
}

fn default_recipient() -> String {
    "quotes@example.com".to_string()
}

fn default_delivery_timeout() -> u64 {
    15
}

impl Default for DeliverySettings {
    fn default() -> Self {
        DeliverySettings {
            endpoint_url: default_endpoint_url(),
            recipient: default_recipient(),
            timeout_secs: default_delivery_timeout(),
        }
    }
}

// =============================================================================
// Main Submit Configuration
// =============================================================================

/// Complete submit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Client roster settings.
    #[serde(default)]
    pub roster: RosterSettings,

    /// Quote delivery settings.
    #[serde(default)]
    pub delivery: DeliverySettings,
}

impl SubmitConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (submit.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SubmitResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading submit config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load submit config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SubmitResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SubmitError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SubmitError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SubmitError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Submit config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SubmitResult<()> {
        validate_http_url("roster.url", &self.roster.url)?;
        validate_http_url("delivery.endpoint_url", &self.delivery.endpoint_url)?;

        let recipient = self.delivery.recipient.trim();
        if recipient.is_empty() || !recipient.contains('@') {
            return Err(SubmitError::InvalidConfig(format!(
                "delivery.recipient must be an email address, got: '{}'",
                self.delivery.recipient
            )));
        }

        if self.roster.timeout_secs == 0 || self.delivery.timeout_secs == 0 {
            return Err(SubmitError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the environment in `load`).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("MPS_ROSTER_URL") {
            debug!(url = %url, "Overriding roster URL from environment");
            self.roster.url = url;
        }

        if let Some(url) = var("MPS_ENDPOINT_URL") {
            debug!(url = %url, "Overriding endpoint URL from environment");
            self.delivery.endpoint_url = url;
        }

        if let Some(recipient) = var("MPS_RECIPIENT") {
            self.delivery.recipient = recipient;
        }

        if let Some(timeout) = var("MPS_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => {
                    self.roster.timeout_secs = secs;
                    self.delivery.timeout_secs = secs;
                }
                Err(_) => warn!(timeout = %timeout, "Ignoring non-numeric MPS_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "mps", "quote")
            .map(|dirs| dirs.config_dir().join("submit.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed roster URL.
    pub fn roster_url(&self) -> SubmitResult<Url> {
        Ok(Url::parse(&self.roster.url)?)
    }

    /// Parsed delivery endpoint.
    pub fn endpoint_url(&self) -> SubmitResult<Url> {
        Ok(Url::parse(&self.delivery.endpoint_url)?)
    }

    /// Recipient address, trimmed.
    pub fn recipient(&self) -> &str {
        self.delivery.recipient.trim()
    }

    pub fn roster_timeout(&self) -> Duration {
        Duration::from_secs(self.roster.timeout_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery.timeout_secs)
    }
}

fn validate_http_url(field: &str, raw: &str) -> SubmitResult<()> {
    let url = Url::parse(raw).map_err(|e| SubmitError::InvalidUrl(format!("{}: {}", field, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SubmitError::InvalidUrl(format!(
            "{} must start with http:// or https://, got: {}",
            field, raw
        )));
    }
    Ok(())
}
