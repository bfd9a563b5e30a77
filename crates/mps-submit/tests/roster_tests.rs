use httpmock::prelude::*;
use mps_submit::{ClientRoster, HttpRoster, RosterError, SubmitConfig};
use std::time::Duration;

fn roster_body() -> serde_json::Value {
    serde_json::json!({
        "clients": [
            { "code": "ACME01", "name": "Acme Ltd" },
            { "code": "BETA02", "name": "Beta School", "region": "Cork" }
        ]
    })
}

fn roster_for(server: &MockServer) -> HttpRoster {
    HttpRoster::new(
        server.url("/clients.json").parse().unwrap(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_known_code_is_verified() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/clients.json");
            then.status(200).json_body(roster_body());
        })
        .await;

    let client = roster_for(&server).verify("BETA02").await.unwrap();

    mock.assert_async().await;
    assert_eq!(client.code, "BETA02");
    assert_eq!(client.detail("name"), Some("Beta School"));
    assert_eq!(client.detail("region"), Some("Cork"));
}

#[tokio::test]
async fn test_code_is_trimmed_before_lookup() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/clients.json");
            then.status(200).json_body(roster_body());
        })
        .await;

    let client = roster_for(&server).verify("  ACME01 \n").await.unwrap();
    assert_eq!(client.code, "ACME01");
}

#[tokio::test]
async fn test_lookup_is_case_sensitive() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/clients.json");
            then.status(200).json_body(roster_body());
        })
        .await;

    let err = roster_for(&server).verify("acme01").await.unwrap_err();
    assert!(matches!(err, RosterError::NotFound(ref code) if code == "acme01"));
    assert_eq!(err.user_message(), "Invalid client code");
}

#[tokio::test]
async fn test_blank_code_never_fetches() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/clients.json");
            then.status(200).json_body(roster_body());
        })
        .await;

    let err = roster_for(&server).verify("   ").await.unwrap_err();

    assert!(matches!(err, RosterError::CodeRequired));
    assert_eq!(err.user_message(), "Please enter client code");
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_server_error_is_connectivity() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/clients.json");
            then.status(503);
        })
        .await;

    let err = roster_for(&server).verify("ACME01").await.unwrap_err();

    assert!(matches!(err, RosterError::Connectivity(ref m) if m == "HTTP 503"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_document() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/clients.json");
            then.status(200).body("{\"customers\": []}");
        })
        .await;

    let err = roster_for(&server).verify("ACME01").await.unwrap_err();

    assert!(matches!(err, RosterError::InvalidDocument(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_roster_from_config() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/roster/clients.json");
            then.status(200).json_body(roster_body());
        })
        .await;

    let mut config = SubmitConfig::default();
    config.roster.url = server.url("/roster/clients.json");

    let roster = HttpRoster::from_config(&config).unwrap();
    assert!(roster.verify("ACME01").await.is_ok());
    mock.assert_async().await;
}
