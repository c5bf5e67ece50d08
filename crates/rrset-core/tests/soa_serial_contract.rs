//! Contract Test: SOA Serial Preservation
//!
//! Constraints verified:
//! - Without a live SOA record the declared serial is written verbatim
//! - With a live SOA record its serial wins over the declared one
//! - A malformed live serial aborts the write
//! - Exactly one record is written, fields in RFC order

mod common;

use common::*;
use rrset_core::error::Error;
use rrset_core::reconciler::SoaInput;
use rrset_core::{Reconciler, SoaFields};

fn input(serial: u32) -> SoaInput {
    SoaInput {
        zone: "example.com.".to_string(),
        name: "example.com.".to_string(),
        ttl: 3600,
        fields: soa_fields(serial),
    }
}

fn written_serial(api: &MockRecordApi) -> u32 {
    let replaced = api.replaced();
    let (_, set) = replaced.last().expect("a record set was written");
    SoaFields::from_content(&set.records[0].content)
        .unwrap()
        .serial
}

#[tokio::test]
async fn declared_serial_used_when_no_soa_exists() {
    let api = MockRecordApi::new();

    let created = Reconciler::new(&api)
        .create_soa(&input(2024010101))
        .await
        .unwrap();

    assert_eq!(written_serial(&api), 2024010101);
    assert_eq!(created.read.soa().unwrap().serial, 2024010101);
}

#[tokio::test]
async fn live_serial_wins_over_declared_serial() {
    for declared in [1, 2024010105, 2024010200] {
        let api = MockRecordApi::new();
        api.seed_soa("example.com.", "example.com.", 3600, &soa_fields(2024010105));

        let created = Reconciler::new(&api)
            .create_soa(&input(declared))
            .await
            .unwrap();

        assert_eq!(written_serial(&api), 2024010105, "declared {}", declared);
        assert_eq!(created.read.soa().unwrap().serial, 2024010105);
    }
}

#[tokio::test]
async fn lookup_happens_before_the_write() {
    let api = MockRecordApi::new();

    Reconciler::new(&api).create_soa(&input(1)).await.unwrap();

    assert_eq!(api.list_in_rrset_calls(), 1);
    assert_eq!(api.replace_calls(), 1);
    assert_eq!(api.list_by_id_calls(), 1, "one read-back");
}

#[tokio::test]
async fn malformed_live_serial_aborts_the_write() {
    let api = MockRecordApi::new();
    api.seed(
        "example.com.",
        "example.com.",
        "SOA",
        3600,
        &["ns1.example.com. hostmaster.example.com. tomorrow 1 1 1 1"],
    );

    let err = Reconciler::new(&api).create_soa(&input(1)).await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
    assert!(err.to_string().contains("old serial"));
    assert_eq!(api.replace_calls(), 0);
}

#[tokio::test]
async fn lookup_failure_is_wrapped() {
    let api = MockRecordApi::new();
    api.fail_with("401 Unauthorized");

    let err = Reconciler::new(&api).create_soa(&input(1)).await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.starts_with("Failed to fetch old SOA record: "));
    assert!(msg.contains("401 Unauthorized"));
    assert_eq!(api.replace_calls(), 0);
}

#[tokio::test]
async fn exactly_one_record_in_rfc_field_order() {
    let api = MockRecordApi::new();

    Reconciler::new(&api).create_soa(&input(5)).await.unwrap();

    let replaced = api.replaced();
    let (_, set) = &replaced[0];
    assert_eq!(set.record_type, "SOA");
    assert_eq!(set.records.len(), 1);
    assert_eq!(
        set.records[0].content,
        "ns1.example.com. hostmaster.example.com. 5 10800 3600 604800 3600"
    );
    assert!(!set.records[0].set_ptr);
    assert_eq!(set.records[0].ttl, 3600);
}
