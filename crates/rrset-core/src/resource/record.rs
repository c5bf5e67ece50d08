//! Generic record resource (`powerdns_record`)

use super::schema::{FieldKind, FieldSchema, Schema, record_set_fields};
use super::{Resource, validate_common};
use crate::error::{Error, Result};
use crate::reconciler::{ReadOutput, Reconciler, RecordSetInput};
use crate::traits::RecordApi;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Declared configuration of a generic record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Zone holding the record set
    pub zone: String,
    /// Owner name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Content values
    pub records: Vec<String>,
    /// For A and AAAA records, also create the matching PTR record
    #[serde(default)]
    pub set_ptr: bool,
}

impl RecordConfig {
    /// Validate the configuration and build reconciler input
    pub fn validate(&self) -> Result<RecordSetInput> {
        let record_type = validate_common(&self.zone, &self.name, &self.record_type)?;
        if self.records.is_empty() {
            return Err(Error::invalid_input("'records' must not be empty"));
        }

        Ok(RecordSetInput {
            zone: self.zone.clone(),
            name: self.name.clone(),
            record_type,
            ttl: self.ttl,
            records: self.records.clone(),
            set_ptr: self.set_ptr,
        })
    }
}

/// Recorded state of a generic record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordState {
    /// Identifier returned by the API client
    pub id: String,
    /// Zone holding the record set
    pub zone: String,
    /// Owner name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Content values as last read from the server
    pub records: Vec<String>,
    /// PTR side effect requested at creation
    #[serde(default)]
    pub set_ptr: bool,
}

/// The `powerdns_record` resource
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordResource;

#[async_trait]
impl Resource for RecordResource {
    type Config = RecordConfig;
    type State = RecordState;

    fn type_name(&self) -> &'static str {
        "powerdns_record"
    }

    fn schema(&self) -> Schema {
        let mut fields = record_set_fields();
        fields.push(FieldSchema::required("records", FieldKind::StringSet));
        fields.push(
            FieldSchema::optional("set_ptr", FieldKind::Bool, serde_json::Value::Bool(false))
                .describe("For A and AAAA records, if true, create corresponding PTR."),
        );

        Schema {
            resource: self.type_name(),
            fields,
        }
    }

    async fn create(&self, api: &dyn RecordApi, config: &RecordConfig) -> Result<RecordState> {
        let input = config.validate()?;
        let created = Reconciler::new(api).create_record(&input).await?;

        let state = RecordState {
            id: created.id,
            zone: input.zone,
            name: input.name,
            record_type: input.record_type,
            ttl: input.ttl,
            records: Vec::new(),
            set_ptr: input.set_ptr,
        };
        Ok(apply_read(state, created.read))
    }

    async fn read(&self, api: &dyn RecordApi, state: &RecordState) -> Result<RecordState> {
        let read = Reconciler::new(api)
            .read(&state.zone, &state.id, &state.record_type)
            .await?;
        Ok(apply_read(state.clone(), read))
    }

    async fn delete(&self, api: &dyn RecordApi, state: &RecordState) -> Result<()> {
        Reconciler::new(api).delete(&state.zone, &state.id).await
    }

    async fn exists(&self, api: &dyn RecordApi, state: &RecordState) -> Result<bool> {
        Reconciler::new(api)
            .exists(&state.zone, &state.name, &state.record_type)
            .await
    }

    async fn import(&self, api: &dyn RecordApi, raw: &str) -> Result<RecordState> {
        let imported = Reconciler::new(api).import(raw).await?;

        Ok(RecordState {
            id: imported.id,
            zone: imported.zone,
            name: imported.name,
            record_type: imported.record_type,
            ttl: imported.ttl,
            records: imported.records,
            set_ptr: false,
        })
    }
}

// An empty read leaves the TTL as it was and empties the values.
fn apply_read(mut state: RecordState, read: ReadOutput) -> RecordState {
    if let Some(ttl) = read.ttl {
        state.ttl = ttl;
    }
    if let Some(values) = read.values() {
        state.records = values.to_vec();
    }
    state
}
