// # rrset-core
//
// Core library for declarative PowerDNS record-set resources.
//
// ## Architecture Overview
//
// This library maps declared DNS record sets onto a DNS server's HTTP
// management API:
// - **RecordApi**: Trait for reading and writing record sets on the server
// - **Reconciler**: Create/read/delete/exists/import over a `RecordApi`
// - **Resource**: Host-facing adapters with typed configuration and state
// - **SoaFields**: Codec for the seven-field SOA content string
//
// ## Design Principles
//
// 1. **Explicit state**: Operations take input structs and return output
//    structs; nothing mutates host-owned state
// 2. **Validated at the boundary**: Declared configuration is typed and
//    checked before any API call
// 3. **Full replace**: A record set is written as a whole, never merged
// 4. **No hidden retries**: A failed API call ends the operation

pub mod config;
pub mod error;
pub mod model;
pub mod reconciler;
pub mod resource;
pub mod soa;
pub mod traits;

// Re-export core types for convenience
pub use config::ApiConfig;
pub use error::{Error, Result};
pub use model::{Record, RecordSet, SOA_TYPE};
pub use reconciler::{Reconciler, RecordSetInput, SoaInput};
pub use resource::{RecordResource, Resource, SoaRecordResource};
pub use soa::SoaFields;
pub use traits::RecordApi;
