//! Test doubles and common utilities for reconciler contract tests
//!
//! This module provides an in-memory `RecordApi` that counts calls and can
//! be told to fail, without any HTTP.

#![allow(dead_code)]

use rrset_core::error::{Error, Result};
use rrset_core::{Record, RecordApi, RecordSet, SoaFields};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Identifier format used by the mock, mirroring the PowerDNS client
pub fn mock_id(name: &str, record_type: &str) -> String {
    format!("{}:::{}", name, record_type)
}

#[derive(Default)]
struct Counters {
    list_in_rrset: AtomicUsize,
    list_by_id: AtomicUsize,
    replace: AtomicUsize,
    delete: AtomicUsize,
    exists: AtomicUsize,
}

/// An in-memory RecordApi that tracks calls
///
/// Record sets are keyed by (zone, id) where the id is `name:::type`.
#[derive(Default)]
pub struct MockRecordApi {
    counters: Arc<Counters>,
    /// Stored records per (zone, id)
    sets: Arc<Mutex<HashMap<(String, String), Vec<Record>>>>,
    /// Every record set passed to replace_record_set, in call order
    replaced: Arc<Mutex<Vec<(String, RecordSet)>>>,
    /// Every (zone, id) passed to delete_record_set_by_id, in call order
    deleted: Arc<Mutex<Vec<(String, String)>>>,
    /// When set, every call fails with this message after being counted
    failure: Arc<Mutex<Option<String>>>,
    /// When true, writes are acknowledged but not stored
    drop_writes: bool,
}

impl MockRecordApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose writes succeed but never become visible to reads
    pub fn dropping_writes() -> Self {
        Self {
            drop_writes: true,
            ..Self::default()
        }
    }

    /// Make every following call fail with an HTTP error carrying `message`
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Pre-populate a record set
    pub fn seed(&self, zone: &str, name: &str, record_type: &str, ttl: u32, contents: &[&str]) {
        let records = contents
            .iter()
            .map(|content| Record {
                name: name.to_string(),
                record_type: record_type.to_string(),
                ttl,
                content: content.to_string(),
                set_ptr: false,
                disabled: false,
            })
            .collect();

        self.sets
            .lock()
            .unwrap()
            .insert((zone.to_string(), mock_id(name, record_type)), records);
    }

    /// Pre-populate an SOA record
    pub fn seed_soa(&self, zone: &str, name: &str, ttl: u32, fields: &SoaFields) {
        self.seed(zone, name, "SOA", ttl, &[fields.to_content().as_str()]);
    }

    pub fn list_in_rrset_calls(&self) -> usize {
        self.counters.list_in_rrset.load(Ordering::SeqCst)
    }

    pub fn list_by_id_calls(&self) -> usize {
        self.counters.list_by_id.load(Ordering::SeqCst)
    }

    pub fn replace_calls(&self) -> usize {
        self.counters.replace.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.counters.delete.load(Ordering::SeqCst)
    }

    pub fn exists_calls(&self) -> usize {
        self.counters.exists.load(Ordering::SeqCst)
    }

    /// Total number of API calls of any kind
    pub fn total_calls(&self) -> usize {
        self.list_in_rrset_calls()
            + self.list_by_id_calls()
            + self.replace_calls()
            + self.delete_calls()
            + self.exists_calls()
    }

    /// Record sets passed to replace_record_set
    pub fn replaced(&self) -> Vec<(String, RecordSet)> {
        self.replaced.lock().unwrap().clone()
    }

    /// (zone, id) pairs passed to delete_record_set_by_id
    pub fn deleted(&self) -> Vec<(String, String)> {
        self.deleted.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(Error::http(message.clone())),
            None => Ok(()),
        }
    }

    fn records(&self, zone: &str, id: &str) -> Vec<Record> {
        self.sets
            .lock()
            .unwrap()
            .get(&(zone.to_string(), id.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl RecordApi for MockRecordApi {
    async fn list_records_in_rrset(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
    ) -> Result<Vec<Record>> {
        self.counters.list_in_rrset.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.records(zone, &mock_id(name, record_type)))
    }

    async fn list_records_by_id(&self, zone: &str, id: &str) -> Result<Vec<Record>> {
        self.counters.list_by_id.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.records(zone, id))
    }

    async fn replace_record_set(&self, zone: &str, record_set: &RecordSet) -> Result<String> {
        self.counters.replace.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        self.replaced
            .lock()
            .unwrap()
            .push((zone.to_string(), record_set.clone()));

        let id = mock_id(&record_set.name, &record_set.record_type);
        if !self.drop_writes {
            self.sets
                .lock()
                .unwrap()
                .insert((zone.to_string(), id.clone()), record_set.records.clone());
        }
        Ok(id)
    }

    async fn delete_record_set_by_id(&self, zone: &str, id: &str) -> Result<()> {
        self.counters.delete.fetch_add(1, Ordering::SeqCst);
        self.deleted
            .lock()
            .unwrap()
            .push((zone.to_string(), id.to_string()));
        self.check_failure()?;

        self.sets
            .lock()
            .unwrap()
            .remove(&(zone.to_string(), id.to_string()));
        Ok(())
    }

    async fn record_exists(&self, zone: &str, name: &str, record_type: &str) -> Result<bool> {
        self.counters.exists.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(!self.records(zone, &mock_id(name, record_type)).is_empty())
    }

    fn api_name(&self) -> &'static str {
        "mock"
    }
}

/// SOA fields used across tests
pub fn soa_fields(serial: u32) -> SoaFields {
    SoaFields {
        mname: "ns1.example.com.".to_string(),
        rname: "hostmaster.example.com.".to_string(),
        serial,
        refresh: 10800,
        retry: 3600,
        expire: 604800,
        minimum: 3600,
    }
}

/// Formatted log output collected by [`capture_warnings`]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Record WARN and above on the current thread until the guard is dropped
///
/// `#[tokio::test]` runs on a current-thread runtime, so events emitted
/// across `.await` points land in the same buffer.
pub fn capture_warnings() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
