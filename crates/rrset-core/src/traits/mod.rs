//! Core traits for the record-set resources
//!
//! This module defines the abstract interfaces that API clients must follow.
//!
//! - [`RecordApi`]: Read and write record sets on the DNS server

pub mod record_api;

pub use record_api::RecordApi;
