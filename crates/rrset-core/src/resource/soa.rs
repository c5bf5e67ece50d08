//! SOA record resource (`powerdns_record_soa`)

use super::schema::{FieldKind, FieldSchema, Schema, record_set_fields};
use super::{Resource, validate_common};
use crate::error::{Error, Result};
use crate::model::SOA_TYPE;
use crate::reconciler::{ReadOutput, Reconciler, SoaInput};
use crate::soa::SoaFields;
use crate::traits::RecordApi;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Declared configuration of an SOA record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaConfig {
    /// Zone holding the SOA record
    pub zone: String,
    /// Owner name, usually "@" or the zone apex
    pub name: String,
    /// Record type; must be "SOA"
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// SOA fields (mname, rname, serial, refresh, retry, expire, minimum)
    #[serde(flatten)]
    pub fields: SoaFields,
}

impl SoaConfig {
    /// Validate the configuration and build reconciler input
    pub fn validate(&self) -> Result<SoaInput> {
        let record_type = validate_common(&self.zone, &self.name, &self.record_type)?;
        if record_type != SOA_TYPE {
            return Err(Error::invalid_input(format!(
                "'type' must be SOA for an SOA record, got '{}'",
                self.record_type
            )));
        }
        if self.fields.mname.trim().is_empty() {
            return Err(Error::invalid_input("'mname' must not be empty"));
        }
        if self.fields.rname.trim().is_empty() {
            return Err(Error::invalid_input("'rname' must not be empty"));
        }

        Ok(SoaInput {
            zone: self.zone.clone(),
            name: self.name.clone(),
            ttl: self.ttl,
            fields: self.fields.clone(),
        })
    }
}

/// Recorded state of an SOA record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaState {
    /// Identifier returned by the API client
    pub id: String,
    /// Zone holding the SOA record
    pub zone: String,
    /// Owner name
    pub name: String,
    /// Always "SOA"
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// SOA fields as last read from the server
    #[serde(flatten)]
    pub fields: SoaFields,
}

/// The `powerdns_record_soa` resource
#[derive(Debug, Clone, Copy, Default)]
pub struct SoaRecordResource;

#[async_trait]
impl Resource for SoaRecordResource {
    type Config = SoaConfig;
    type State = SoaState;

    fn type_name(&self) -> &'static str {
        "powerdns_record_soa"
    }

    fn schema(&self) -> Schema {
        let mut fields = record_set_fields();
        fields.extend([
            FieldSchema::required("mname", FieldKind::String),
            FieldSchema::required("rname", FieldKind::String),
            FieldSchema::required("serial", FieldKind::Int).describe(
                "Used only when no SOA record exists yet; a live serial is always kept.",
            ),
            FieldSchema::required("refresh", FieldKind::Int),
            FieldSchema::required("retry", FieldKind::Int),
            FieldSchema::required("expire", FieldKind::Int),
            FieldSchema::required("minimum", FieldKind::Int),
        ]);

        Schema {
            resource: self.type_name(),
            fields,
        }
    }

    async fn create(&self, api: &dyn RecordApi, config: &SoaConfig) -> Result<SoaState> {
        let input = config.validate()?;
        let created = Reconciler::new(api).create_soa(&input).await?;

        let state = SoaState {
            id: created.id,
            zone: input.zone,
            name: input.name,
            record_type: SOA_TYPE.to_string(),
            ttl: input.ttl,
            fields: input.fields,
        };
        Ok(apply_read(state, created.read))
    }

    async fn read(&self, api: &dyn RecordApi, state: &SoaState) -> Result<SoaState> {
        let read = Reconciler::new(api)
            .read(&state.zone, &state.id, SOA_TYPE)
            .await?;
        Ok(apply_read(state.clone(), read))
    }

    async fn delete(&self, api: &dyn RecordApi, state: &SoaState) -> Result<()> {
        Reconciler::new(api).delete(&state.zone, &state.id).await
    }

    async fn exists(&self, api: &dyn RecordApi, state: &SoaState) -> Result<bool> {
        Reconciler::new(api)
            .exists(&state.zone, &state.name, SOA_TYPE)
            .await
    }

    async fn import(&self, api: &dyn RecordApi, raw: &str) -> Result<SoaState> {
        let imported = Reconciler::new(api).import(raw).await?;

        if !imported.record_type.eq_ignore_ascii_case(SOA_TYPE) {
            return Err(Error::invalid_input(format!(
                "record set {} is of type {}, not SOA",
                imported.id, imported.record_type
            )));
        }

        // Import guarantees at least one record.
        let fields = match imported.records.first() {
            Some(content) => SoaFields::from_content(content)?,
            None => return Err(Error::not_found("rrset has no records to import")),
        };

        Ok(SoaState {
            id: imported.id,
            zone: imported.zone,
            name: imported.name,
            record_type: SOA_TYPE.to_string(),
            ttl: imported.ttl,
            fields,
        })
    }
}

fn apply_read(mut state: SoaState, read: ReadOutput) -> SoaState {
    if let Some(ttl) = read.ttl {
        state.ttl = ttl;
    }
    if let Some(fields) = read.soa() {
        state.fields = fields.clone();
    }
    state
}
