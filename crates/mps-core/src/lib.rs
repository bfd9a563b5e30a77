//! # mps-core: Pure Quoting Logic for MPS Quote
//!
//! This crate is the **heart** of MPS Quote. It turns a device selection,
//! a managed-print-services choice and print volumes into a 60-month lease
//! quote, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MPS Quote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Quote Form (UI)                              │   │
//! │  │   Client fields ──► Device picker ──► MPS / credit ──► Result  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteForm / QuoteRequest               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mps-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │   quote   │  │  format   │  │   │
//! │  │   │  Device   │  │   Money   │  │   Quote   │  │  Display  │  │   │
//! │  │   │  Packs    │  │ PrintRate │  │  compute  │  │  Message  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Quote                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 mps-submit (Adapters)                           │   │
//! │  │        roster lookup, quote delivery, session summary           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Devices, service packs, per-page rate tables
//! - [`money`] - Money in cents, sub-cent print rates, VAT
//! - [`input`] - Client, selection, service and credit inputs
//! - [`form`] - Permissive coercion of raw form text
//! - [`quote`] - The calculator and the compliance gate
//! - [`format`] - Result panel strings and the submission message
//! - [`submission`] - Delivery payload and summary record
//! - [`error`] - Domain error types
//! - [`validation`] - Client field checks
//!
//! ## Example Usage
//!
//! ```rust
//! use mps_core::{compute_quote, ClientInfo, CreditConfig, Money, Selection, ServiceConfig, ServicePack};
//!
//! let client = ClientInfo {
//!     name: "Acme Ltd".into(),
//!     email: "ops@acme.ie".into(),
//!     phone: None,
//!     sector: "Education".into(),
//! };
//! let selection = Selection::new().with("Ricoh IM 370", 2);
//! let service = ServiceConfig::pack(ServicePack::Plus);
//!
//! let quote = compute_quote(&client, &selection, &service, &CreditConfig::default()).unwrap();
//!
//! // 2 machines × €35 Plus pack
//! assert_eq!(quote.mps.monthly, Money::from_major(70));
//! // 2 × IM 370 scores 50: below the threshold
//! assert!(!quote.is_compliant());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod form;
pub mod format;
pub mod input;
pub mod money;
pub mod quote;
pub mod submission;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mps_core::Quote` instead of
// `use mps_core::quote::Quote`

pub use catalog::{Device, ServicePack};
pub use error::{CoreError, CoreResult, ValidationError};
pub use form::QuoteForm;
pub use format::QuoteDisplay;
pub use input::{ClientInfo, CreditConfig, QuoteRequest, Selection, ServiceConfig};
pub use money::{Money, PrintRate, VatRate};
pub use quote::{compute_quote, ComplianceVerdict, Quote};
pub use submission::{QuoteSummary, SubmissionPayload};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lease term in months.
///
/// ## Business Reason
/// Every device and MPS charge is quoted over a five-year lease, billed
/// monthly. Revenue and included print credit both refer to this term.
pub const CONTRACT_TERM_MONTHS: i64 = 60;

/// Years the excess-print projection covers.
///
/// ## Business Reason
/// Excess volumes are entered per year and projected over five years. This
/// is kept apart from `CONTRACT_TERM_MONTHS` so either can change alone.
pub const EXCESS_TERM_YEARS: i64 = 5;

/// Minimum compliance score for a quote to be submitted.
///
/// ## Business Reason
/// A deal must include enough qualifying hardware (e.g. one A3 device, or
/// four A4 mono units) to be accepted for fulfilment.
pub const COMPLIANCE_THRESHOLD: u32 = 100;

/// Mono pages included over the term when the form leaves it blank.
pub const DEFAULT_INCLUDED_MONO: u64 = 120_000;

/// Colour pages included over the term when the form leaves it blank.
pub const DEFAULT_INCLUDED_COLOUR: u64 = 30_000;

/// Irish standard VAT rate (23%), used for the incl. VAT monthly figure.
pub const VAT_RATE: VatRate = VatRate::from_bps(2300);

/// Maximum quantity of a single model in a selection.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10) and
/// keeps every derived total well inside integer range.
pub const MAX_DEVICE_QUANTITY: u32 = 999;

/// Maximum page volume accepted from the form for any credit field.
pub const MAX_PAGE_VOLUME: u64 = 1_000_000_000;
