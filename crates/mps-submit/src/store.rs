//! # Summary Store
//!
//! Hands the [`QuoteSummary`] of the last successful submission to the
//! preview stage.
//!
//! The summary lives for one session only: a new submission replaces it and
//! the preview stage may `take` it.

use mps_core::QuoteSummary;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::error::{SubmitError, SubmitResult};

/// Session key the summary is stored under.
pub const SUMMARY_KEY: &str = "quoteData";

/// Holds at most one summary.
pub trait SummaryStore: Send + Sync {
    /// Replaces the stored summary.
    fn save(&self, summary: &QuoteSummary) -> SubmitResult<()>;

    /// Reads the stored summary without removing it.
    fn load(&self) -> SubmitResult<Option<QuoteSummary>>;

    /// Reads and removes the stored summary.
    fn take(&self) -> SubmitResult<Option<QuoteSummary>>;

    /// Removes the stored summary.
    fn clear(&self) -> SubmitResult<()>;
}

// =============================================================================
// Session Store
// =============================================================================

/// In-memory session storage holding the summary as its JSON record.
///
/// Clones share the same slot, so the submitter and the preview stage can
/// each hold one.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON record, as the preview stage would read it.
    pub fn raw(&self) -> SubmitResult<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> SubmitResult<MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|e| SubmitError::Store(format!("{} slot poisoned: {}", SUMMARY_KEY, e)))
    }
}

fn decode(raw: Option<String>) -> SubmitResult<Option<QuoteSummary>> {
    raw.map(|json| QuoteSummary::from_json(&json))
        .transpose()
        .map_err(|e| SubmitError::Store(e.to_string()))
}

impl SummaryStore for SessionStore {
    fn save(&self, summary: &QuoteSummary) -> SubmitResult<()> {
        let json = summary.to_json()?;
        *self.lock()? = Some(json);
        debug!(key = SUMMARY_KEY, client = %summary.client_name, "Summary stored");
        Ok(())
    }

    fn load(&self) -> SubmitResult<Option<QuoteSummary>> {
        decode(self.lock()?.clone())
    }

    fn take(&self) -> SubmitResult<Option<QuoteSummary>> {
        decode(self.lock()?.take())
    }

    fn clear(&self) -> SubmitResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mps_core::{compute_quote, ClientInfo, CreditConfig, Selection, ServiceConfig};

    fn summary(name: &str) -> QuoteSummary {
        let client = ClientInfo {
            name: name.to_string(),
            email: "ops@acme.ie".to_string(),
            phone: None,
            sector: "Retail".to_string(),
        };
        let sel = Selection::new().with("Ricoh IM 7000", 1);
        let quote =
            compute_quote(&client, &sel, &ServiceConfig::Disabled, &CreditConfig::default()).unwrap();
        QuoteSummary::from_quote(&quote, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
    }

    #[test]
    fn test_empty_store() {
        let store = SessionStore::new();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.take().unwrap(), None);
    }

    #[test]
    fn test_save_replaces() {
        let store = SessionStore::new();
        store.save(&summary("First")).unwrap();
        store.save(&summary("Second")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().client_name, "Second");
    }

    #[test]
    fn test_take_consumes() {
        let store = SessionStore::new();
        store.save(&summary("Acme")).unwrap();

        let taken = store.take().unwrap().unwrap();
        assert_eq!(taken.date, "31/01/2024");
        assert_eq!(store.take().unwrap(), None);
    }

    #[test]
    fn test_clones_share_slot() {
        let store = SessionStore::new();
        let preview = store.clone();
        store.save(&summary("Acme")).unwrap();

        let raw = preview.raw().unwrap().unwrap();
        assert!(raw.contains("\"clientName\":\"Acme\""));

        preview.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
