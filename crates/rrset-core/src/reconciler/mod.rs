//! Record-set reconciler
//!
//! The Reconciler maps declared record sets onto [`RecordApi`] calls:
//! - Creating generic record sets (full replace of the remote set)
//! - Creating SOA records, adopting the live serial when one exists
//! - Reading a record set back into explicit output structs
//! - Deleting, existence checks and imports
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   input struct    ┌──────────────┐   API call   ┌─────────────┐
//! │   Resource   │──────────────────▶│  Reconciler  │─────────────▶│  RecordApi  │
//! │  (adapter)   │◀──────────────────│              │◀─────────────│             │
//! └──────────────┘   output struct   └──────────────┘   records    └─────────────┘
//! ```
//!
//! Every operation is a short sequential chain of awaited calls. Nothing is
//! retried and nothing is cached between operations.

mod import;

pub use import::ImportId;

use crate::error::{Error, Result};
use crate::model::{RecordSet, SOA_TYPE};
use crate::soa::{self, SoaFields};
use crate::traits::RecordApi;
use tracing::{debug, error, info, warn};

/// Declared input for a generic record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSetInput {
    /// Zone holding the record set
    pub zone: String,
    /// Owner name
    pub name: String,
    /// Record type
    pub record_type: String,
    /// Time-to-live shared by every record
    pub ttl: u32,
    /// Content values; duplicates collapse, first occurrence wins
    pub records: Vec<String>,
    /// Ask the server to maintain PTR records for A/AAAA values
    pub set_ptr: bool,
}

/// Declared input for an SOA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaInput {
    /// Zone holding the SOA record
    pub zone: String,
    /// Owner name, usually the zone apex
    pub name: String,
    /// Time-to-live of the SOA record
    pub ttl: u32,
    /// Declared SOA fields; the serial may be overridden by the live value
    pub fields: SoaFields,
}

/// Values read back from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// Contents of a generic record set, in server order
    Values(Vec<String>),
    /// Decoded SOA fields
    Soa(SoaFields),
}

/// Result of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutput {
    /// TTL of the first record; `None` when no record was returned
    pub ttl: Option<u32>,
    /// Record contents
    pub data: RecordData,
}

impl ReadOutput {
    /// Content values, or `None` for SOA data
    pub fn values(&self) -> Option<&[String]> {
        match &self.data {
            RecordData::Values(values) => Some(values),
            RecordData::Soa(_) => None,
        }
    }

    /// SOA fields, or `None` for generic data
    pub fn soa(&self) -> Option<&SoaFields> {
        match &self.data {
            RecordData::Soa(fields) => Some(fields),
            RecordData::Values(_) => None,
        }
    }
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutput {
    /// Identifier returned by the API client
    pub id: String,
    /// State read back after the write
    pub read: ReadOutput,
}

/// Result of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutput {
    /// Zone from the import string
    pub zone: String,
    /// Identifier from the import string
    pub id: String,
    /// Owner name of the first record
    pub name: String,
    /// Record type of the first record
    pub record_type: String,
    /// TTL of the first record
    pub ttl: u32,
    /// Contents of every record, in server order
    pub records: Vec<String>,
}

/// Shared create/read/delete/exists/import operations
///
/// The reconciler borrows an API client for the duration of the operations
/// and holds no other state.
pub struct Reconciler<'a> {
    api: &'a dyn RecordApi,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over an API client
    pub fn new(api: &'a dyn RecordApi) -> Self {
        Self { api }
    }

    /// Create (replace) a generic record set
    ///
    /// Fails with [`Error::InvalidInput`] before any API call when `records`
    /// is empty. Blank values are accepted with a warning.
    pub async fn create_record(&self, input: &RecordSetInput) -> Result<CreateOutput> {
        if input.records.is_empty() {
            return Err(Error::invalid_input("'records' must not be empty"));
        }

        if input.records.iter().any(|r| r.trim().is_empty()) {
            warn!("One or more values in 'records' contain empty '' value(s)");
        }

        let mut record_set = RecordSet::new(&input.name, &input.record_type, input.ttl);
        for content in &input.records {
            if !record_set.push_content(content, input.set_ptr) {
                debug!("Dropping duplicate value in 'records': {}", content);
            }
        }

        self.write_and_read(&input.zone, &record_set).await
    }

    /// Create (replace) the SOA record of a name
    ///
    /// This is a read-before-write: the live SOA record, if any, supplies the
    /// serial so a lagging declared serial never rolls the zone back.
    pub async fn create_soa(&self, input: &SoaInput) -> Result<CreateOutput> {
        let serial = match self.live_soa_serial(&input.zone, &input.name).await? {
            Some(live) => {
                if live != input.fields.serial {
                    info!(
                        "Keeping live SOA serial {} instead of declared {}",
                        live, input.fields.serial
                    );
                }
                live
            }
            None => input.fields.serial,
        };
        debug!("Set serial number to {}", serial);

        let fields = SoaFields {
            serial,
            ..input.fields.clone()
        };

        let mut record_set = RecordSet::new(&input.name, SOA_TYPE, input.ttl);
        record_set.push_content(fields.to_content(), false);

        self.write_and_read(&input.zone, &record_set).await
    }

    /// Serial of the existing SOA record at (zone, name), if there is one
    pub async fn live_soa_serial(&self, zone: &str, name: &str) -> Result<Option<u32>> {
        debug!("Searching existing SOA record at {} => {}", zone, name);

        let records = self
            .api
            .list_records_in_rrset(zone, name, SOA_TYPE)
            .await
            .map_err(|e| Error::api("Failed to fetch old SOA record", e))?;
        debug!("Found {} existing SOA record(s)", records.len());

        match records.first() {
            Some(record) => soa::serial_from_content(&record.content).map(Some),
            None => Ok(None),
        }
    }

    async fn write_and_read(&self, zone: &str, record_set: &RecordSet) -> Result<CreateOutput> {
        debug!("Creating PowerDNS Record: {:?}", record_set);

        let id = self
            .api
            .replace_record_set(zone, record_set)
            .await
            .map_err(|e| Error::api("Failed to create PowerDNS Record", e))?;
        info!("Created PowerDNS Record with ID: {}", id);

        match self.read(zone, &id, &record_set.record_type).await {
            Ok(read) => Ok(CreateOutput { id, read }),
            Err(e) => {
                error!("PowerDNS Record {} was written but could not be read back: {}", id, e);
                Err(e)
            }
        }
    }

    /// Read the record set behind `id`
    ///
    /// `record_type` is the declared type and selects SOA decoding. For any
    /// other type an empty record set is not an error: the output carries no
    /// TTL and no values. Imports are stricter, see [`Reconciler::import`].
    pub async fn read(&self, zone: &str, id: &str, record_type: &str) -> Result<ReadOutput> {
        debug!("Reading PowerDNS Record: {}", id);

        let records = self
            .api
            .list_records_by_id(zone, id)
            .await
            .map_err(|e| Error::api("Couldn't fetch PowerDNS Record", e))?;

        let ttl = records.first().map(|r| r.ttl);

        if record_type.eq_ignore_ascii_case(SOA_TYPE) {
            let first = records
                .first()
                .ok_or_else(|| Error::not_found(format!("no SOA record behind id {}", id)))?;
            let fields = SoaFields::from_content(&first.content)?;
            debug!("Parsed PowerDNS SOA Record contents: {}", fields);

            return Ok(ReadOutput {
                ttl,
                data: RecordData::Soa(fields),
            });
        }

        Ok(ReadOutput {
            ttl,
            data: RecordData::Values(records.into_iter().map(|r| r.content).collect()),
        })
    }

    /// Delete the record set behind `id`
    pub async fn delete(&self, zone: &str, id: &str) -> Result<()> {
        info!("Deleting PowerDNS Record: {}", id);

        self.api
            .delete_record_set_by_id(zone, id)
            .await
            .map_err(|e| Error::api("Error deleting PowerDNS Record", e))
    }

    /// Check whether the record set still exists on the server
    pub async fn exists(&self, zone: &str, name: &str, record_type: &str) -> Result<bool> {
        info!("Checking existence of PowerDNS Record: {}, {}", name, record_type);

        self.api
            .record_exists(zone, name, record_type)
            .await
            .map_err(|e| Error::api("Error checking PowerDNS Record", e))
    }

    /// Import an existing record set from a JSON `{"zone", "id"}` string
    ///
    /// The import string is validated before any API call. A record set
    /// without records cannot be imported.
    pub async fn import(&self, raw: &str) -> Result<ImportOutput> {
        let ImportId { zone, id } = ImportId::parse(raw)?;

        info!("Importing PowerDNS Record {} in Zone: {}", id, zone);

        let records = self
            .api
            .list_records_by_id(&zone, &id)
            .await
            .map_err(|e| Error::api("couldn't fetch PowerDNS Record", e))?;

        let first = records
            .first()
            .ok_or_else(|| Error::not_found("rrset has no records to import"))?;

        Ok(ImportOutput {
            name: first.name.clone(),
            record_type: first.record_type.clone(),
            ttl: first.ttl,
            records: records.iter().map(|r| r.content.clone()).collect(),
            zone,
            id,
        })
    }
}
