// # Record API Trait
//
// Defines the interface to a DNS server's HTTP management API.
//
// ## Implementations
//
// - PowerDNS: `rrset-provider-powerdns` crate
// - Tests: in-memory doubles under `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use rrset_core::{RecordApi, RecordSet};
//
// async fn replace(api: &dyn RecordApi) -> rrset_core::Result<()> {
//     let mut set = RecordSet::new("www.example.com.", "A", 300);
//     set.push_content("192.0.2.1", false);
//
//     let id = api.replace_record_set("example.com.", &set).await?;
//     let records = api.list_records_by_id("example.com.", &id).await?;
//     assert_eq!(records.len(), 1);
//     Ok(())
// }
// ```

use crate::error::Result;
use crate::model::{Record, RecordSet};
use async_trait::async_trait;

/// Trait for DNS management API clients
///
/// The reconciler drives every operation through this trait and never talks
/// HTTP itself.
///
/// # Contract
///
/// - One logical API operation per call; no retries or backoff inside
///   implementations (a failure is returned to the caller and is terminal
///   for that operation attempt)
/// - No caching beyond a single call
/// - `replace_record_set` has full-replace semantics: the remote record set
///   becomes exactly the submitted set
/// - The identifier returned by `replace_record_set` must resolve to the same
///   record set through `list_records_by_id` and `delete_record_set_by_id`
///   for as long as that set exists
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// List the records of one record set, identified by owner name and type
    ///
    /// An absent record set yields an empty vector, not an error.
    async fn list_records_in_rrset(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
    ) -> Result<Vec<Record>>;

    /// List the records of the record set behind an identifier
    async fn list_records_by_id(&self, zone: &str, id: &str) -> Result<Vec<Record>>;

    /// Replace a record set and return its identifier
    async fn replace_record_set(&self, zone: &str, record_set: &RecordSet) -> Result<String>;

    /// Delete the record set behind an identifier
    async fn delete_record_set_by_id(&self, zone: &str, id: &str) -> Result<()>;

    /// Check whether a record set has any records
    async fn record_exists(&self, zone: &str, name: &str, record_type: &str) -> Result<bool>;

    /// Get the API name (for logging/debugging)
    fn api_name(&self) -> &'static str;
}
