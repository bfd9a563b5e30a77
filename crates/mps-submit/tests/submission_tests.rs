use async_trait::async_trait;
use chrono::NaiveDate;
use httpmock::prelude::*;
use mps_core::{
    compute_quote, ClientInfo, CreditConfig, Quote, Selection, ServiceConfig, SubmissionPayload,
};
use mps_submit::{
    DeliveryReceipt, HttpTransport, QuoteSubmitter, QuoteTransport, SessionStore, SubmitConfig,
    SubmitError, SubmitResult, SummaryStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

const RECIPIENT: &str = "quotes@example.com";

fn client() -> ClientInfo {
    ClientInfo {
        name: "Acme Ltd".to_string(),
        email: "ops@acme.ie".to_string(),
        phone: Some("087 123 4567".to_string()),
        sector: "Education".to_string(),
    }
}

fn quote_with(selection: Selection) -> Quote {
    compute_quote(
        &client(),
        &selection,
        &ServiceConfig::Disabled,
        &CreditConfig::default(),
    )
    .unwrap()
}

fn compliant_quote() -> Quote {
    quote_with(Selection::new().with("Ricoh IM 7000", 1))
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

fn http_submitter(url: &str, timeout: Duration) -> QuoteSubmitter<HttpTransport, SessionStore> {
    let transport = HttpTransport::new(url.parse().unwrap(), timeout).unwrap();
    QuoteSubmitter::new(transport, SessionStore::new(), RECIPIENT)
}

// =============================================================================
// HTTP delivery
// =============================================================================

#[tokio::test]
async fn test_successful_submission_stores_summary() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/quotes")
                .body_contains("\"_replyto\":\"ops@acme.ie\"")
                .body_contains("\"_to\":\"quotes@example.com\"")
                .body_contains("[QUOTE] Acme Ltd");
            then.status(200)
                .json_body(serde_json::json!({ "ok": true, "next": "/thanks" }));
        })
        .await;

    let submitter = http_submitter(&server.url("/quotes"), Duration::from_secs(5));
    let submission = submitter.submit_on(&compliant_quote(), date()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(submission.receipt.status, 200);
    assert_eq!(submission.receipt.next.as_deref(), Some("/thanks"));
    assert_eq!(submission.summary.date, "07/03/2024");
    assert_eq!(submission.summary.compliance.as_str(), "PASS");

    let stored = submitter.store().load().unwrap().unwrap();
    assert_eq!(stored, submission.summary);
    assert!(!submitter.is_in_flight());
}

#[tokio::test]
async fn test_compliance_failure_makes_no_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/quotes");
            then.status(200).json_body(serde_json::json!({ "ok": true }));
        })
        .await;

    let submitter = http_submitter(&server.url("/quotes"), Duration::from_secs(5));
    let quote = quote_with(Selection::new().with("Ricoh IM C320F", 1));

    let err = submitter.submit_on(&quote, date()).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::ComplianceFailed {
            score: 50,
            threshold: 100
        }
    ));
    mock.assert_hits_async(0).await;
    assert_eq!(submitter.store().load().unwrap(), None);
}

#[tokio::test]
async fn test_endpoint_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/quotes");
            then.status(200)
                .json_body(serde_json::json!({ "ok": false, "error": "Form not found" }));
        })
        .await;

    let submitter = http_submitter(&server.url("/quotes"), Duration::from_secs(5));
    let err = submitter
        .submit_on(&compliant_quote(), date())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Rejected(ref reason) if reason == "Form not found"));
    assert!(err.is_retryable());
    assert_eq!(submitter.store().load().unwrap(), None);
}

#[tokio::test]
async fn test_server_error_without_json() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/quotes");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let submitter = http_submitter(&server.url("/quotes"), Duration::from_secs(5));
    let err = submitter
        .submit_on(&compliant_quote(), date())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Connectivity(ref reason) if reason == "HTTP 503"));
    assert!(err.is_retryable());
    assert_eq!(submitter.store().load().unwrap(), None);
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/quotes");
            then.status(200)
                .delay(Duration::from_millis(800))
                .json_body(serde_json::json!({ "ok": true }));
        })
        .await;

    let submitter = http_submitter(&server.url("/quotes"), Duration::from_millis(100));
    let err = submitter
        .submit_on(&compliant_quote(), date())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Timeout));
    assert!(err.is_retryable());
    assert!(!submitter.is_in_flight());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connectivity_error() {
    let submitter = http_submitter("http://127.0.0.1:9/quotes", Duration::from_secs(2));
    let err = submitter
        .submit_on(&compliant_quote(), date())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Connectivity(_)));
    assert_eq!(err.user_message(), "Failed to send. Check network connection.");
}

#[tokio::test]
async fn test_retry_with_same_quote_after_failure() {
    let server = MockServer::start_async().await;
    let mut failing = server
        .mock_async(|when, then| {
            when.method(POST).path("/quotes");
            then.status(500).body("boom");
        })
        .await;

    let submitter = http_submitter(&server.url("/quotes"), Duration::from_secs(5));
    let quote = compliant_quote();
    let before = quote.clone();

    assert!(submitter.submit_on(&quote, date()).await.is_err());
    assert_eq!(quote, before);

    failing.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/quotes");
            then.status(200).json_body(serde_json::json!({ "ok": true }));
        })
        .await;

    let submission = submitter.submit_on(&quote, date()).await.unwrap();
    assert_eq!(submission.summary.client_name, "Acme Ltd");
}

#[tokio::test]
async fn test_transport_from_config() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/f/quotes")
                .body_contains("\"_to\":\"sales@example.com\"");
            then.status(200).json_body(serde_json::json!({ "ok": true }));
        })
        .await;

    let mut config = SubmitConfig::default();
    config.delivery.endpoint_url = server.url("/f/quotes");
    config.delivery.recipient = "sales@example.com".to_string();
    config.validate().unwrap();

    let transport = HttpTransport::from_config(&config).unwrap();
    let submitter = QuoteSubmitter::new(transport, SessionStore::new(), config.recipient());
    submitter.submit(&compliant_quote()).await.unwrap();

    mock.assert_async().await;
}

// =============================================================================
// Single flight
// =============================================================================

/// Transport that blocks until released.
struct GatedTransport {
    entered: Arc<Notify>,
    release: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl QuoteTransport for GatedTransport {
    async fn deliver(&self, _payload: &SubmissionPayload) -> SubmitResult<DeliveryReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(DeliveryReceipt {
            status: 200,
            next: None,
        })
    }
}

#[tokio::test]
async fn test_second_submit_is_refused_while_in_flight() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let transport = GatedTransport {
        entered: entered.clone(),
        release: release.clone(),
        calls: calls.clone(),
    };
    let submitter = Arc::new(QuoteSubmitter::new(transport, SessionStore::new(), RECIPIENT));
    let quote = compliant_quote();

    let first = {
        let submitter = submitter.clone();
        let quote = quote.clone();
        tokio::spawn(async move { submitter.submit_on(&quote, date()).await })
    };

    entered.notified().await;
    assert!(submitter.is_in_flight());

    let second = submitter.submit_on(&quote, date()).await;
    assert!(matches!(second, Err(SubmitError::AlreadyInFlight)));

    release.notify_one();
    let first = first.await.unwrap();
    assert!(first.is_ok());
    assert!(!submitter.is_in_flight());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Free again once the first submission finished.
    release.notify_one();
    assert!(submitter.submit_on(&quote, date()).await.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Store failures
// =============================================================================

struct BrokenStore;

impl SummaryStore for BrokenStore {
    fn save(&self, _summary: &mps_core::QuoteSummary) -> SubmitResult<()> {
        Err(SubmitError::Store("disk full".to_string()))
    }

    fn load(&self) -> SubmitResult<Option<mps_core::QuoteSummary>> {
        Ok(None)
    }

    fn take(&self) -> SubmitResult<Option<mps_core::QuoteSummary>> {
        Ok(None)
    }

    fn clear(&self) -> SubmitResult<()> {
        Ok(())
    }
}

struct AcceptAll;

#[async_trait]
impl QuoteTransport for AcceptAll {
    async fn deliver(&self, _payload: &SubmissionPayload) -> SubmitResult<DeliveryReceipt> {
        Ok(DeliveryReceipt {
            status: 200,
            next: None,
        })
    }
}

#[tokio::test]
async fn test_store_failure_releases_guard() {
    let submitter = QuoteSubmitter::new(AcceptAll, BrokenStore, RECIPIENT);

    let err = submitter
        .submit_on(&compliant_quote(), date())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Store(_)));
    assert!(!submitter.is_in_flight());
}
