//! SOA content codec
//!
//! An SOA record's content is seven whitespace-delimited fields in RFC 1035
//! order: `mname rname serial refresh retry expire minimum`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fields in SOA content
const SOA_FIELD_COUNT: usize = 7;

/// Position of the serial within SOA content
const SERIAL_INDEX: usize = 2;

/// Structured SOA fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaFields {
    /// Primary name server
    pub mname: String,
    /// Mailbox of the responsible party, in domain-name form
    pub rname: String,
    /// Zone serial number
    pub serial: u32,
    /// Secondary refresh interval
    pub refresh: u32,
    /// Secondary retry interval
    pub retry: u32,
    /// Upper limit before a secondary stops answering
    pub expire: u32,
    /// Negative caching TTL
    pub minimum: u32,
}

impl SoaFields {
    /// Encode into a single content string
    pub fn to_content(&self) -> String {
        self.to_string()
    }

    /// Decode from a content string
    pub fn from_content(content: &str) -> Result<Self> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() < SOA_FIELD_COUNT {
            return Err(Error::parse(format!(
                "SOA record content has {} field(s), expected {}: '{}'",
                fields.len(),
                SOA_FIELD_COUNT,
                content
            )));
        }

        Ok(Self {
            mname: fields[0].to_string(),
            rname: fields[1].to_string(),
            serial: parse_field("serial", fields[2])?,
            refresh: parse_field("refresh", fields[3])?,
            retry: parse_field("retry", fields[4])?,
            expire: parse_field("expire", fields[5])?,
            minimum: parse_field("minimum", fields[6])?,
        })
    }
}

impl fmt::Display for SoaFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum
        )
    }
}

impl FromStr for SoaFields {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_content(s)
    }
}

/// Extract only the serial from SOA content
///
/// Used when adopting the live serial before a write; the other fields of the
/// existing record are irrelevant there.
pub fn serial_from_content(content: &str) -> Result<u32> {
    let token = content
        .split_whitespace()
        .nth(SERIAL_INDEX)
        .ok_or_else(|| {
            Error::parse(format!(
                "Failed to parse old serial value in SOA record: no serial in '{}'",
                content
            ))
        })?;

    token.parse().map_err(|e| {
        Error::parse(format!(
            "Failed to parse old serial value in SOA record: '{}': {}",
            token, e
        ))
    })
}

fn parse_field(field: &str, token: &str) -> Result<u32> {
    token.parse().map_err(|e| {
        Error::parse(format!(
            "Failed to parse {} value in SOA record: '{}': {}",
            field, token, e
        ))
    })
}
