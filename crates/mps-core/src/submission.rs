//! # Submission Records
//!
//! The two records a submission produces:
//!
//! ```text
//! ┌──────────────┐   SubmissionPayload   ┌──────────────────────┐
//! │    Quote     │ ────────────────────► │  delivery endpoint   │
//! │  (computed)  │                       └──────────┬───────────┘
//! └──────┬───────┘                                  │ ok
//!        │            QuoteSummary                  ▼
//!        └─────────────────────────────────► session store ──► preview
//! ```
//!
//! Field names of both records are fixed by their consumers and must not
//! change.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog;
use crate::format::{submission_message, submission_subject};
use crate::quote::{ComplianceVerdict, Quote};

/// Date format of the summary record (dd/mm/yyyy).
pub const SUMMARY_DATE_FORMAT: &str = "%d/%m/%Y";

// =============================================================================
// Submission Payload
// =============================================================================

/// JSON body posted to the delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionPayload {
    /// Client email; replies go to the client.
    #[serde(rename = "_replyto")]
    pub reply_to: String,

    /// Recipient address for the quote.
    #[serde(rename = "_to")]
    pub to: String,

    pub name: String,
    pub sector: String,
    /// Empty when the client gave no phone.
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl SubmissionPayload {
    /// Builds the payload for a quote.
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::{compute_quote, ClientInfo, CreditConfig, Selection, ServiceConfig};
    /// use mps_core::submission::SubmissionPayload;
    ///
    /// let client = ClientInfo {
    ///     name: "Acme".into(),
    ///     email: "ops@acme.ie".into(),
    ///     phone: None,
    ///     sector: "Retail".into(),
    /// };
    /// let sel = Selection::new().with("Ricoh IM 7000", 1);
    /// let quote = compute_quote(&client, &sel, &ServiceConfig::Disabled, &CreditConfig::default()).unwrap();
    ///
    /// let payload = SubmissionPayload::from_quote(&quote, "quotes@example.com");
    /// let json = serde_json::to_value(&payload).unwrap();
    /// assert_eq!(json["_replyto"], "ops@acme.ie");
    /// assert_eq!(json["subject"], "[QUOTE] Acme");
    /// ```
    pub fn from_quote(quote: &Quote, recipient: &str) -> Self {
        let client = &quote.client;
        SubmissionPayload {
            reply_to: client.email.clone(),
            to: recipient.to_string(),
            name: client.name.clone(),
            sector: client.sector.clone(),
            phone: client.phone_or_empty().to_string(),
            subject: submission_subject(quote),
            message: submission_message(quote),
        }
    }
}

// =============================================================================
// Quote Summary
// =============================================================================

/// Reduced record of a submitted quote, read by the preview stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteSummary {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_sector: String,

    /// Every catalog model with its quantity, zeros included, in catalog
    /// order.
    #[ts(type = "Record<string, number>")]
    pub quantities: IndexMap<String, u32>,

    /// Monthly total ex VAT in euros.
    pub total_monthly_ex_vat: f64,

    #[ts(type = "number")]
    pub mono_credit: u64,
    #[ts(type = "number")]
    pub colour_credit: u64,

    pub compliance: ComplianceVerdict,

    /// Submission date, dd/mm/yyyy.
    pub date: String,
}

impl QuoteSummary {
    /// Builds the summary of a quote submitted on `date`.
    pub fn from_quote(quote: &Quote, date: NaiveDate) -> Self {
        let client = &quote.client;
        let quantities = catalog::devices()
            .iter()
            .map(|d| (d.model.to_string(), quote.selection.quantity(d.model)))
            .collect();

        QuoteSummary {
            client_name: client.name.clone(),
            client_email: client.email.clone(),
            client_phone: client.phone_or_empty().to_string(),
            client_sector: client.sector.clone(),
            quantities,
            total_monthly_ex_vat: quote.total_monthly_ex_vat.to_major_f64(),
            mono_credit: quote.credit.included_mono,
            colour_credit: quote.credit.included_colour,
            compliance: quote.verdict(),
            date: date.format(SUMMARY_DATE_FORMAT).to_string(),
        }
    }

    /// Parses the stored date back into a calendar date.
    pub fn submitted_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, SUMMARY_DATE_FORMAT).ok()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
