//! AcoustID HTTP client
//!
//! Handles communication with the AcoustID web service.
//! See: https://acoustid.org/webservice
//!
//! ## API Quirks & Best Practices
//!
//! ### URL Encoding Issue with Meta Parameter
//! The AcoustID API uses `+` as a separator in the `meta` parameter (e.g.,
//! `recordings+releasegroups`). Standard URL encoding converts `+` to `%2B`,
//! but the API does NOT recognize `%2B` as a separator. When `%2B` is sent,
//! the API returns results WITHOUT the requested metadata fields.
//!
//! **Solution**: Build the URL manually, preserving the literal `+` character.
//! Do NOT use reqwest's `.query()` method for the meta parameter.
//!
//! ### Meta Facets
//! All four facets - recordings, releasegroups, releases, tracks - are
//! mandatory for this client. Omitting any facet silently drops that subtree
//! from the response, which starves the field resolver and the cover search.
//!
//! ### Response Compression
//! The API supports gzip-compressed responses. reqwest automatically handles
//! decompression when the `gzip` feature is enabled.

use super::dto;
use crate::resolve::domain::{AudioFingerprint, ResolveError};

/// AcoustID API client
pub struct AcoustIdClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl AcoustIdClient {
    /// Create a new client with the given API key
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses (reduces bandwidth)
    /// - Send User-Agent header identifying the application
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true) // Accept gzip-compressed responses
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            http_client,
            base_url: "https://api.acoustid.org/v2/lookup".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Look up a fingerprint and return the raw match tree.
    ///
    /// The caller decides what to do with the tree (field resolution, cover
    /// candidate derivation); no interpretation happens here.
    pub async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<dto::LookupResponse, ResolveError> {
        let url = self.lookup_url(fingerprint)?;

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResolveError::LookupFailed(e.to_string()))?;

        if !response.status().is_success() {
            // Try to get the response body for more details
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::LookupFailed(format!(
                "HTTP {}: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown"),
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::LookupFailed(e.to_string()))?;

        dto::parse_lookup(&body)
    }

    /// Build the lookup URL for a fingerprint.
    ///
    /// Fails with [`ResolveError::InvalidFingerprint`] before any network
    /// call when the upstream extractor handed us unusable input.
    ///
    /// CRITICAL: The + characters in `meta` must NOT be URL-encoded (%2B) or
    /// the API won't return metadata. We manually build the URL to preserve
    /// literal + characters.
    fn lookup_url(&self, fingerprint: &AudioFingerprint) -> Result<String, ResolveError> {
        if fingerprint.fingerprint.trim().is_empty() {
            return Err(ResolveError::InvalidFingerprint(
                "empty fingerprint string".to_string(),
            ));
        }
        if fingerprint.duration_secs == 0 {
            return Err(ResolveError::InvalidFingerprint(
                "zero duration".to_string(),
            ));
        }

        Ok(format!(
            "{}?meta=recordings+releasegroups+releases+tracks&format=json&client={}&duration={}&fingerprint={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            fingerprint.duration_secs,
            urlencoding::encode(&fingerprint.fingerprint)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(fingerprint: &str, duration_secs: u32) -> AudioFingerprint {
        AudioFingerprint {
            fingerprint: fingerprint.to_string(),
            duration_secs,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = AcoustIdClient::new("test-key");
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, "https://api.acoustid.org/v2/lookup");
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = AcoustIdClient::with_base_url("key", "http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_lookup_url_keeps_literal_plus_in_meta() {
        let client = AcoustIdClient::new("key");
        let url = client.lookup_url(&fp("AQADtNIyRUkkZUqS", 181)).unwrap();

        assert!(url.contains("meta=recordings+releasegroups+releases+tracks"));
        assert!(!url.contains("%2B"));
        assert!(url.contains("format=json"));
        assert!(url.contains("duration=181"));
        assert!(url.contains("fingerprint=AQADtNIyRUkkZUqS"));
    }

    #[test]
    fn test_lookup_url_encodes_key_and_fingerprint() {
        let client = AcoustIdClient::new("key with spaces");
        let url = client.lookup_url(&fp("finger print", 60)).unwrap();

        assert!(url.contains("client=key%20with%20spaces"));
        assert!(url.contains("fingerprint=finger%20print"));
    }

    #[test]
    fn test_empty_fingerprint_is_invalid() {
        let client = AcoustIdClient::new("key");
        assert!(matches!(
            client.lookup_url(&fp("", 181)),
            Err(ResolveError::InvalidFingerprint(_))
        ));
        assert!(matches!(
            client.lookup_url(&fp("   ", 181)),
            Err(ResolveError::InvalidFingerprint(_))
        ));
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        let client = AcoustIdClient::new("key");
        assert!(matches!(
            client.lookup_url(&fp("AQAD", 0)),
            Err(ResolveError::InvalidFingerprint(_))
        ));
    }
}
