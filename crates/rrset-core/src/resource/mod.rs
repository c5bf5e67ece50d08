// # Declarative Resources
//
// Host-facing adapters over the [`Reconciler`](crate::reconciler::Reconciler).
//
// A host (the `rrsetctl` binary, or any embedding application that keeps a
// state store) hands a resource a strongly typed declared configuration and
// gets back an explicit state struct. The resource validates configuration
// at the boundary and performs all field assignment; the reconciler below it
// only sees input and output structs.
//
// ## Resources
//
// - [`RecordResource`] (`powerdns_record`): generic record set
// - [`SoaRecordResource`] (`powerdns_record_soa`): one SOA record per name
//
// ## Usage
//
// ```rust,ignore
// use rrset_core::resource::{RecordConfig, RecordResource, Resource};
//
// let config: RecordConfig = serde_json::from_str(declared)?;
// let state = RecordResource.create(&api, &config).await?;
// println!("{}", serde_json::to_string_pretty(&state)?);
// ```

mod record;
mod schema;
mod soa;

pub use record::{RecordConfig, RecordResource, RecordState};
pub use schema::{FieldKind, FieldSchema, Schema};
pub use soa::{SoaConfig, SoaRecordResource, SoaState};

use crate::error::{Error, Result};
use crate::traits::RecordApi;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A declarative resource type
///
/// All fields are immutable, so there is no update operation: a changed
/// configuration is applied by `delete` followed by `create`.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Declared configuration
    type Config: DeserializeOwned + Send + Sync;

    /// State recorded by the host after a successful operation
    type State: Serialize + DeserializeOwned + Send + Sync;

    /// Resource type name
    fn type_name(&self) -> &'static str;

    /// Field schema of this resource type
    fn schema(&self) -> Schema;

    /// Create the remote record set and return the resulting state
    async fn create(&self, api: &dyn RecordApi, config: &Self::Config) -> Result<Self::State>;

    /// Refresh a stored state from the server
    async fn read(&self, api: &dyn RecordApi, state: &Self::State) -> Result<Self::State>;

    /// Delete the remote record set
    async fn delete(&self, api: &dyn RecordApi, state: &Self::State) -> Result<()>;

    /// Check whether the remote record set still exists
    async fn exists(&self, api: &dyn RecordApi, state: &Self::State) -> Result<bool>;

    /// Build a state from a JSON `{"zone", "id"}` import string
    async fn import(&self, api: &dyn RecordApi, raw: &str) -> Result<Self::State>;
}

/// Check the fields every record resource shares and normalize the type
pub(crate) fn validate_common(zone: &str, name: &str, record_type: &str) -> Result<String> {
    if zone.trim().is_empty() {
        return Err(Error::invalid_input("'zone' must not be empty"));
    }
    if name.trim().is_empty() {
        return Err(Error::invalid_input("'name' must not be empty"));
    }
    if record_type.trim().is_empty() {
        return Err(Error::invalid_input("'type' must not be empty"));
    }
    Ok(record_type.trim().to_ascii_uppercase())
}
