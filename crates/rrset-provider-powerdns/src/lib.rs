// # PowerDNS Record API
//
// This crate implements `RecordApi` over the PowerDNS Authoritative HTTP API.
//
// ## Behaviour
//
// - One logical API operation per call; no retry, backoff or caching
// - HTTP timeout from configuration (30 seconds by default)
// - Specific errors for HTTP status codes (401/403, 404, 422, 429, 5xx)
// - Record-set identifiers are `<name>:::<type>`, stable for as long as the
//   record set exists
//
// ## Security Requirements
//
// - API key NEVER appears in logs or `Debug` output
// - Client construction fails if the key is empty
//
// ## API Reference
//
// - PowerDNS API v1: https://doc.powerdns.com/authoritative/http-api/
// - Zone with RRsets: GET `/api/v1/servers/:server_id/zones/:zone_id`
// - Replace / delete RRset: PATCH `/api/v1/servers/:server_id/zones/:zone_id`

mod wire;

use async_trait::async_trait;
use reqwest::StatusCode;
use rrset_core::{ApiConfig, Error, Record, RecordApi, RecordSet, Result};
use std::time::Duration;
use wire::{ApiErrorBody, WireRRSet, ZoneInfo, ZonePatch};

/// Separator between name and type in a record-set identifier
pub const ID_SEPARATOR: &str = ":::";

/// Provider name used in errors
const PROVIDER: &str = "powerdns";

/// Build the identifier of a record set
pub fn record_set_id(name: &str, record_type: &str) -> String {
    format!("{}{}{}", name, ID_SEPARATOR, record_type)
}

/// Split a record-set identifier into name and type
pub fn parse_record_set_id(id: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
    match parts.as_slice() {
        [name, record_type] if !name.is_empty() && !record_type.is_empty() => {
            Ok((name.to_string(), record_type.to_string()))
        }
        _ => Err(Error::invalid_input(format!(
            "Error parsing record ID: {} (expected <name>{}<type>)",
            id, ID_SEPARATOR
        ))),
    }
}

/// PowerDNS HTTP API client
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API key.
pub struct PowerDnsClient {
    /// Value of the `X-API-Key` header
    /// ⚠️ NEVER log this value
    api_key: String,

    /// `<server_url>/api/v1/servers/<server_id>`
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for PowerDnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerDnsClient")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PowerDnsClient {
    /// Create a new client
    ///
    /// The configuration is validated first; an empty API key or a URL
    /// without an HTTP(S) scheme is a configuration error.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure_https)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        if config.insecure_https {
            tracing::warn!("TLS certificate verification is disabled for the PowerDNS API");
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: format!(
                "{}/api/v1/servers/{}",
                config.server_url.trim_end_matches('/'),
                config.server_id
            ),
            client,
        })
    }

    fn zone_url(&self, zone: &str) -> String {
        format!("{}/zones/{}", self.base_url, zone)
    }

    /// List every record in a zone
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /api/v1/servers/localhost/zones/example.com.
    /// X-API-Key: <key>
    /// ```
    pub async fn list_records(&self, zone: &str) -> Result<Vec<Record>> {
        tracing::debug!("Listing records of zone {}", zone);

        let response = self
            .client
            .get(self.zone_url(zone))
            .header("X-API-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(status_error(status, &body, &format!("Zone lookup of {}", zone)));
        }

        let zone_info: ZoneInfo = response
            .json()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to parse response: {}", e)))?;

        Ok(zone_info.into_records())
    }

    /// Apply one RRset change to a zone
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH /api/v1/servers/localhost/zones/example.com.
    /// X-API-Key: <key>
    /// {
    ///   "rrsets": [{"name": ..., "type": ..., "changetype": "REPLACE" | "DELETE", ...}]
    /// }
    /// ```
    async fn patch_zone(&self, zone: &str, rrset: WireRRSet, what: &str) -> Result<()> {
        tracing::debug!(
            "PATCH zone {}: {} {} {:?}",
            zone,
            rrset.name,
            rrset.record_type,
            rrset.changetype
        );

        let response = self
            .client
            .patch(self.zone_url(zone))
            .header("X-API-Key", &self.api_key)
            .json(&ZonePatch {
                rrsets: vec![rrset],
            })
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        // PowerDNS answers 204 No Content; any 2xx is accepted.
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(status_error(status, &body, what));
        }

        Ok(())
    }
}

/// Map a non-success response to a specific error
fn status_error(status: StatusCode, body: &str, what: &str) -> Error {
    // PowerDNS reports the reason as {"error": "..."}
    let reason = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string());

    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "Invalid API key or insufficient permissions. Status: {}",
            status
        )),
        404 => Error::not_found(format!("{} failed: {} - {}", what, status, reason)),
        422 => Error::invalid_input(format!("{} rejected by server: {}", what, reason)),
        429 => Error::rate_limited(format!("Please retry later. Status: {}", status)),
        500..=599 => Error::provider(
            PROVIDER,
            format!("Server error (transient): {} - {}", status, reason),
        ),
        _ => Error::provider(PROVIDER, format!("{} failed: {} - {}", what, status, reason)),
    }
}

#[async_trait]
impl RecordApi for PowerDnsClient {
    async fn list_records_in_rrset(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
    ) -> Result<Vec<Record>> {
        let records = self.list_records(zone).await?;

        Ok(records
            .into_iter()
            .filter(|r| {
                r.name.eq_ignore_ascii_case(name) && r.record_type.eq_ignore_ascii_case(record_type)
            })
            .collect())
    }

    async fn list_records_by_id(&self, zone: &str, id: &str) -> Result<Vec<Record>> {
        let (name, record_type) = parse_record_set_id(id)?;
        self.list_records_in_rrset(zone, &name, &record_type).await
    }

    async fn replace_record_set(&self, zone: &str, record_set: &RecordSet) -> Result<String> {
        let id = record_set_id(&record_set.name, &record_set.record_type);

        self.patch_zone(
            zone,
            WireRRSet::replace(record_set),
            &format!("Replacing record set {}", id),
        )
        .await?;

        Ok(id)
    }

    async fn delete_record_set_by_id(&self, zone: &str, id: &str) -> Result<()> {
        let (name, record_type) = parse_record_set_id(id)?;

        self.patch_zone(
            zone,
            WireRRSet::delete(&name, &record_type),
            &format!("Deleting record set {}", id),
        )
        .await
    }

    async fn record_exists(&self, zone: &str, name: &str, record_type: &str) -> Result<bool> {
        let records = self.list_records_in_rrset(zone, name, record_type).await?;
        Ok(!records.is_empty())
    }

    fn api_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_set_id_round_trip() {
        let id = record_set_id("www.example.com.", "AAAA");
        assert_eq!(id, "www.example.com.:::AAAA");
        assert_eq!(
            parse_record_set_id(&id).unwrap(),
            ("www.example.com.".to_string(), "AAAA".to_string())
        );
    }

    #[test]
    fn test_parse_record_set_id_rejects_malformed() {
        for id in ["www.example.com.", "a:::b:::c", ":::A", "www.example.com.:::"] {
            let err = parse_record_set_id(id).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{}", id);
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = ApiConfig::new("http://127.0.0.1:8081", "");
        assert!(PowerDnsClient::new(&config).is_err());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = ApiConfig::new("http://127.0.0.1:8081/", "key").with_server_id("ns0");
        let client = PowerDnsClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8081/api/v1/servers/ns0");
        assert_eq!(
            client.zone_url("example.com."),
            "http://127.0.0.1:8081/api/v1/servers/ns0/zones/example.com."
        );
    }

    #[test]
    fn test_api_key_not_exposed_in_debug() {
        let config = ApiConfig::new("http://127.0.0.1:8081", "secret_key_12345");
        let client = PowerDnsClient::new(&config).unwrap();

        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("PowerDnsClient"));
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error": "RRset www.example.com. IN A: Conflicts with pre-existing RRset"}"#;

        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "", "x"),
            Error::Authentication(_)
        ));
        assert!(status_error(StatusCode::NOT_FOUND, "", "x").is_not_found());
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "", "x"),
            Error::RateLimited(_)
        ));

        let err = status_error(StatusCode::UNPROCESSABLE_ENTITY, body, "Replacing record set");
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("Conflicts with pre-existing RRset"));

        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down", "x");
        assert!(matches!(err, Error::Provider { .. }));
        assert!(err.to_string().contains("upstream down"));
    }
}
