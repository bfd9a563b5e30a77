//! # Quote Submitter
//!
//! Sends a computed quote and records its summary.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       QuoteSubmitter::submit                            │
//! │                                                                         │
//! │  1. Compliance gate        score < 100 ──► ComplianceFailed            │
//! │     (no network)                                                        │
//! │           │                                                             │
//! │  2. Single-flight guard    busy ──► AlreadyInFlight                    │
//! │           │                                                             │
//! │  3. Build payload          SubmissionPayload::from_quote               │
//! │           │                                                             │
//! │  4. Deliver                error ──► Connectivity / Timeout /          │
//! │           │                          Rejected / InvalidResponse        │
//! │           │                          (nothing stored)                  │
//! │  5. Persist summary        QuoteSummary stamped with the date          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │     Ok(Submission)                                                      │
//! │                                                                         │
//! │  The guard is released on every path out of steps 3-5.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use mps_core::{Quote, QuoteSummary, SubmissionPayload};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::error::{SubmitError, SubmitResult};
use crate::store::SummaryStore;
use crate::transport::{DeliveryReceipt, QuoteTransport};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Summary that was stored for the preview stage.
    pub summary: QuoteSummary,
    pub receipt: DeliveryReceipt,
}

// =============================================================================
// In-Flight Guard
// =============================================================================

/// Holds the submitter's busy flag until dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// Submitter
// =============================================================================

/// Submits quotes through a transport, one at a time.
///
/// Share it behind an `Arc` when several tasks may submit.
pub struct QuoteSubmitter<T, S> {
    transport: T,
    store: S,
    recipient: String,
    in_flight: AtomicBool,
}

impl<T: QuoteTransport, S: SummaryStore> QuoteSubmitter<T, S> {
    /// Creates a submitter delivering to `recipient`.
    pub fn new(transport: T, store: S, recipient: impl Into<String>) -> Self {
        QuoteSubmitter {
            transport,
            store,
            recipient: recipient.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submits a quote, stamping the summary with today's local date.
    pub async fn submit(&self, quote: &Quote) -> SubmitResult<Submission> {
        self.submit_on(quote, Local::now().date_naive()).await
    }

    /// Submits a quote, stamping the summary with `date`.
    pub async fn submit_on(&self, quote: &Quote, date: NaiveDate) -> SubmitResult<Submission> {
        if let Err(e) = quote.ensure_submittable() {
            warn!(client = %quote.client.name, score = quote.total_score, "Submission blocked by compliance gate");
            return Err(e.into());
        }

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            warn!(client = %quote.client.name, "Submission already in flight");
            SubmitError::AlreadyInFlight
        })?;

        let payload = SubmissionPayload::from_quote(quote, &self.recipient);
        info!(
            client = %quote.client.name,
            devices = quote.total_devices,
            score = quote.total_score,
            monthly = %quote.total_monthly_ex_vat,
            "Submitting quote"
        );

        let receipt = match self.transport.deliver(&payload).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(client = %quote.client.name, error = %e, retryable = e.is_retryable(), "Quote delivery failed");
                return Err(e);
            }
        };

        let summary = QuoteSummary::from_quote(quote, date);
        self.store.save(&summary)?;

        info!(client = %quote.client.name, status = receipt.status, date = %summary.date, "Quote submitted");
        Ok(Submission { summary, receipt })
    }

    /// Returns true while a submission is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}
