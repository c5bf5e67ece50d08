//! Contract Test: Delete & Exists
//!
//! Constraints verified:
//! - Delete issues exactly one call keyed by zone and identifier
//! - Delete failures keep the cause text
//! - Exists reflects remote deletion (drift)

mod common;

use common::*;
use rrset_core::error::Error;
use rrset_core::Reconciler;

#[tokio::test]
async fn delete_issues_one_call_keyed_by_zone_and_id() {
    let api = MockRecordApi::new();
    api.seed("example.com.", "www.example.com.", "A", 300, &["192.0.2.1"]);

    Reconciler::new(&api)
        .delete("example.com.", "www.example.com.:::A")
        .await
        .unwrap();

    assert_eq!(api.delete_calls(), 1);
    assert_eq!(
        api.deleted(),
        vec![("example.com.".to_string(), "www.example.com.:::A".to_string())]
    );
    assert_eq!(api.total_calls(), 1);
}

#[tokio::test]
async fn delete_failure_keeps_cause_text() {
    let api = MockRecordApi::new();
    api.fail_with("422 Unprocessable Entity: RRset www.example.com. IN A: unknown zone");

    let err = Reconciler::new(&api)
        .delete("example.com.", "www.example.com.:::A")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { .. }));
    assert_eq!(
        err.to_string(),
        "Error deleting PowerDNS Record: HTTP error: 422 Unprocessable Entity: RRset www.example.com. IN A: unknown zone"
    );
    assert_eq!(api.delete_calls(), 1);
}

#[tokio::test]
async fn exists_tracks_remote_state() {
    let api = MockRecordApi::new();
    let reconciler = Reconciler::new(&api);

    api.seed("example.com.", "www.example.com.", "A", 300, &["192.0.2.1"]);
    assert!(reconciler.exists("example.com.", "www.example.com.", "A").await.unwrap());

    reconciler
        .delete("example.com.", &mock_id("www.example.com.", "A"))
        .await
        .unwrap();
    assert!(!reconciler.exists("example.com.", "www.example.com.", "A").await.unwrap());
    assert_eq!(api.exists_calls(), 2);
}

#[tokio::test]
async fn exists_failure_is_wrapped() {
    let api = MockRecordApi::new();
    api.fail_with("timed out");

    let err = Reconciler::new(&api)
        .exists("example.com.", "www.example.com.", "A")
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Error checking PowerDNS Record: "));
}
