//! Import identifier parsing
//!
//! Imports receive a single string that must be a JSON object carrying the
//! zone and the record-set identifier, e.g.
//! `{"zone": "example.com.", "id": "www.example.com.:::A"}`.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Zone and record-set identifier supplied to an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    /// Zone holding the record set
    pub zone: String,
    /// Record-set identifier as returned by the API client
    pub id: String,
}

impl ImportId {
    /// Parse the JSON-encoded import string
    pub fn parse(raw: &str) -> Result<Self> {
        let mut data: HashMap<String, String> = serde_json::from_str(raw).map_err(|e| {
            Error::invalid_input(format!(
                "import id must be a JSON object like {{\"zone\": \"...\", \"id\": \"...\"}}: {}",
                e
            ))
        })?;

        let zone = data
            .remove("zone")
            .ok_or_else(|| Error::invalid_input("missing zone name in input data"))?;
        let id = data
            .remove("id")
            .ok_or_else(|| Error::invalid_input("missing record id in input data"))?;

        Ok(Self { zone, id })
    }
}
