//! # mps-submit: Adapters for MPS Quote
//!
//! Everything around the quote calculator that touches the outside world:
//! the client roster, quote delivery, and the session summary handed to the
//! preview stage.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Submission Architecture                          │
//! │                                                                         │
//! │  login ──► ClientRoster::verify(code)                                  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  quote form ──► mps_core::compute_quote ──► Quote                      │
//! │                                               │                         │
//! │  ┌────────────────────────────────────────────▼─────────────────────┐  │
//! │  │                  QuoteSubmitter (single-flight)                  │  │
//! │  │                                                                  │  │
//! │  │   compliance gate ──► QuoteTransport ──► SummaryStore            │  │
//! │  │                       (HttpTransport)    (SessionStore)          │  │
//! │  └──────────────────────────────────────────────┬───────────────────┘  │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                                     preview stage: store.take()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Roster URL, delivery endpoint, recipient (TOML + env)
//! - [`error`] - Submit and roster error types
//! - [`roster`] - `ClientRoster` port and HTTP implementation
//! - [`transport`] - `QuoteTransport` port and HTTP implementation
//! - [`store`] - `SummaryStore` port and in-memory session store
//! - [`submitter`] - Single-flight quote submission
//! - [`telemetry`] - Tracing subscriber setup for binaries
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mps_core::{ClientInfo, CreditConfig, Selection, ServiceConfig, compute_quote};
//! use mps_submit::{HttpTransport, QuoteSubmitter, SessionStore, SubmitConfig, SummaryStore};
//!
//! # async fn example() -> Result<(), mps_submit::SubmitError> {
//! let config = SubmitConfig::load_or_default(None);
//! let store = SessionStore::new();
//! let submitter = QuoteSubmitter::new(
//!     HttpTransport::from_config(&config)?,
//!     store.clone(),
//!     config.recipient(),
//! );
//!
//! let client = ClientInfo {
//!     name: "Acme Ltd".into(),
//!     email: "ops@acme.ie".into(),
//!     phone: None,
//!     sector: "Education".into(),
//! };
//! let selection = Selection::new().with("Ricoh IM 7000", 1);
//! let quote = compute_quote(&client, &selection, &ServiceConfig::Disabled, &CreditConfig::default())?;
//!
//! submitter.submit(&quote).await?;
//! let summary = store.take()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod roster;
pub mod store;
pub mod submitter;
pub mod telemetry;
pub mod transport;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::SubmitConfig;
pub use error::{RosterError, RosterResult, SubmitError, SubmitResult};
pub use roster::{ClientRoster, HttpRoster, RosterClient, RosterDocument};
pub use store::{SessionStore, SummaryStore};
pub use submitter::{QuoteSubmitter, Submission};
pub use telemetry::init_tracing;
pub use transport::{DeliveryReceipt, HttpTransport, QuoteTransport};
