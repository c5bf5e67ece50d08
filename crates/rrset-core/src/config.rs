//! Configuration types for the record-set resources
//!
//! This module defines the connection settings for the DNS management API.
//! Per-resource declared input lives with each resource in [`crate::resource`].

use serde::{Deserialize, Serialize};

/// PowerDNS API connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API server (e.g. "http://127.0.0.1:8081")
    pub server_url: String,

    /// Value sent in the `X-API-Key` header
    pub api_key: String,

    /// Server id in `/api/v1/servers/<id>`
    #[serde(default = "default_server_id")]
    pub server_id: String,

    /// HTTP timeout for each API request (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Accept invalid TLS certificates (self-signed lab servers)
    #[serde(default)]
    pub insecure_https: bool,
}

impl ApiConfig {
    /// Create a configuration with defaults for the optional settings
    pub fn new(server_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_key: api_key.into(),
            server_id: default_server_id(),
            timeout_secs: default_timeout_secs(),
            insecure_https: false,
        }
    }

    /// Set the server id
    pub fn with_server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = server_id.into();
        self
    }

    /// Set the HTTP timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Accept or reject invalid TLS certificates
    pub fn with_insecure_https(mut self, insecure_https: bool) -> Self {
        self.insecure_https = insecure_https;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.server_url.is_empty() {
            return Err(crate::Error::config("PowerDNS server URL cannot be empty"));
        }
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(crate::Error::config(format!(
                "PowerDNS server URL must use HTTP or HTTPS scheme. Got: {}",
                self.server_url
            )));
        }
        if self.api_key.is_empty() {
            return Err(crate::Error::config("PowerDNS API key cannot be empty"));
        }
        if self.server_id.is_empty() {
            return Err(crate::Error::config("PowerDNS server id cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }
        Ok(())
    }
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("server_url", &self.server_url)
            .field("api_key", &"<REDACTED>")
            .field("server_id", &self.server_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("insecure_https", &self.insecure_https)
            .finish()
    }
}

fn default_server_id() -> String {
    "localhost".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
