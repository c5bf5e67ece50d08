//! Record and record-set values
//!
//! These are built fresh per operation from declared input or from an API
//! response. Durable state lives on the DNS server and in the host's state
//! store, never here.

use serde::{Deserialize, Serialize};

/// Record type name of the Start-of-Authority record
pub const SOA_TYPE: &str = "SOA";

/// A single resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owner name
    pub name: String,
    /// Record type (A, AAAA, CNAME, SOA, ...)
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Type-specific content, opaque to this crate except for SOA
    pub content: String,
    /// Ask the server to maintain the matching PTR record (A/AAAA only)
    #[serde(default)]
    pub set_ptr: bool,
    /// Whether the server reports the record as disabled
    #[serde(default)]
    pub disabled: bool,
}

/// All records sharing a name and type within a zone
///
/// The TTL is uniform across the set: [`RecordSet::push_content`] stamps the
/// set's name, type and TTL on every record it adds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Owner name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live in seconds, shared by every record
    pub ttl: u32,
    /// Records in insertion order, without duplicate contents
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new(name: impl Into<String>, record_type: impl Into<String>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
            records: Vec::new(),
        }
    }

    /// Add one record with the given content
    ///
    /// Returns `false` and leaves the set untouched when a record with the
    /// same content is already present.
    pub fn push_content(&mut self, content: impl Into<String>, set_ptr: bool) -> bool {
        let content = content.into();
        if self.records.iter().any(|r| r.content == content) {
            return false;
        }

        self.records.push(Record {
            name: self.name.clone(),
            record_type: self.record_type.clone(),
            ttl: self.ttl,
            content,
            set_ptr,
            disabled: false,
        });
        true
    }

    /// Contents of every record, in insertion order
    pub fn contents(&self) -> Vec<String> {
        self.records.iter().map(|r| r.content.clone()).collect()
    }
}
