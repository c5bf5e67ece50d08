//! PowerDNS API v1 JSON bodies

use rrset_core::{Record, RecordSet};
use serde::{Deserialize, Serialize};

/// `changetype` of a zone PATCH that replaces an RRset
pub(crate) const CHANGE_REPLACE: &str = "REPLACE";

/// `changetype` of a zone PATCH that deletes an RRset
pub(crate) const CHANGE_DELETE: &str = "DELETE";

/// Zone returned by `GET /zones/<zone>`
///
/// Servers before API v1 stabilised returned flat `records` instead of
/// `rrsets`; both are accepted.
#[derive(Debug, Deserialize)]
pub(crate) struct ZoneInfo {
    #[serde(default)]
    pub rrsets: Vec<WireRRSet>,
    #[serde(default)]
    pub records: Option<Vec<LegacyRecord>>,
}

impl ZoneInfo {
    /// Flatten into records carrying their set's name, type and TTL
    pub fn into_records(self) -> Vec<Record> {
        if let Some(records) = self.records {
            return records.into_iter().map(LegacyRecord::into_record).collect();
        }

        self.rrsets
            .into_iter()
            .flat_map(|rrset| {
                let WireRRSet {
                    name,
                    record_type,
                    ttl,
                    records,
                    ..
                } = rrset;
                let ttl = ttl.unwrap_or_default();

                records.into_iter().map(move |r| Record {
                    name: name.clone(),
                    record_type: record_type.clone(),
                    ttl,
                    content: r.content,
                    set_ptr: r.set_ptr,
                    disabled: r.disabled,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireRRSet {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<String>,
    #[serde(default)]
    pub records: Vec<WireRecord>,
}

impl WireRRSet {
    /// RRset replacing the remote set with exactly `record_set`
    pub fn replace(record_set: &RecordSet) -> Self {
        Self {
            name: record_set.name.clone(),
            record_type: record_set.record_type.clone(),
            ttl: Some(record_set.ttl),
            changetype: Some(CHANGE_REPLACE.to_string()),
            records: record_set
                .records
                .iter()
                .map(|r| WireRecord {
                    content: r.content.clone(),
                    disabled: r.disabled,
                    set_ptr: r.set_ptr,
                })
                .collect(),
        }
    }

    /// RRset deleting the remote set `name`/`record_type`
    pub fn delete(name: &str, record_type: &str) -> Self {
        Self {
            name: name.to_string(),
            record_type: record_type.to_string(),
            ttl: None,
            changetype: Some(CHANGE_DELETE.to_string()),
            records: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireRecord {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(rename = "set-ptr", default)]
    pub set_ptr: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyRecord {
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    content: String,
    #[serde(default)]
    ttl: u32,
    #[serde(default)]
    disabled: bool,
}

impl LegacyRecord {
    fn into_record(self) -> Record {
        Record {
            name: self.name,
            record_type: self.record_type,
            ttl: self.ttl,
            content: self.content,
            set_ptr: false,
            disabled: self.disabled,
        }
    }
}

/// Body of `PATCH /zones/<zone>`
#[derive(Debug, Serialize)]
pub(crate) struct ZonePatch {
    pub rrsets: Vec<WireRRSet>,
}

/// Error body returned by the API on 4xx/5xx
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
}
