//! Cover Art Archive HTTP client
//!
//! Fetches album artwork from the Cover Art Archive.
//! No API key required, but please respect their rate limits.
//!
//! API: https://coverartarchive.org

use crate::resolve::domain::ResolveError;

/// Desired cover art size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    /// 250px thumbnail
    Small,
    /// 500px thumbnail (default)
    #[default]
    Medium,
    /// 1200px thumbnail
    Large,
    /// Original full-size image
    Original,
}

impl CoverSize {
    /// Parse a config value; unknown strings get the default size.
    pub fn parse(value: &str) -> CoverSize {
        match value.to_ascii_lowercase().as_str() {
            "small" | "250" => CoverSize::Small,
            "medium" | "500" => CoverSize::Medium,
            "large" | "1200" => CoverSize::Large,
            "original" => CoverSize::Original,
            _ => CoverSize::default(),
        }
    }

    /// URL path suffix for the archive's redirect endpoints
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "-250",
            CoverSize::Medium => "-500",
            CoverSize::Large => "-1200",
            CoverSize::Original => "",
        }
    }
}

/// Downloaded cover art
#[derive(Debug, Clone)]
pub struct CoverArt {
    /// Image data (JPEG or PNG)
    pub data: Vec<u8>,
    /// MIME type (image/jpeg or image/png)
    pub mime_type: String,
    /// Source URL
    pub url: String,
}

/// Cover Art Archive client
pub struct CoverArtClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoverArtClient {
    /// Create a new client
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: "https://coverartarchive.org".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Get the front cover for a MusicBrainz release group
    pub async fn release_group_front(
        &self,
        release_group_id: &str,
        size: CoverSize,
    ) -> Result<CoverArt, ResolveError> {
        let url = self.front_url("release-group", release_group_id, size);
        self.download_image(&url).await
    }

    /// Get the front cover for a MusicBrainz release
    pub async fn release_front(
        &self,
        release_id: &str,
        size: CoverSize,
    ) -> Result<CoverArt, ResolveError> {
        let url = self.front_url("release", release_id, size);
        self.download_image(&url).await
    }

    /// Build the convenient redirect-endpoint URL for a front cover
    fn front_url(&self, entity: &str, id: &str, size: CoverSize) -> String {
        format!("{}/{}/{}/front{}", self.base_url, entity, id, size.suffix())
    }

    /// Download an image from a URL
    ///
    /// Any non-2xx status means "this candidate has no cover" and maps to
    /// [`ResolveError::CoverUnavailable`]; transport failures map to
    /// [`ResolveError::LookupFailed`]. Neither is fatal for the search.
    async fn download_image(&self, url: &str) -> Result<CoverArt, ResolveError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ResolveError::LookupFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResolveError::CoverUnavailable);
        }

        // Get content type
        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| ResolveError::LookupFailed(e.to_string()))?
            .to_vec();

        Ok(CoverArt {
            data,
            mime_type,
            url: url.to_string(),
        })
    }
}

impl Default for CoverArtClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CoverArtClient::new();
        assert_eq!(client.base_url, "https://coverartarchive.org");
    }

    #[test]
    fn test_cover_size_default() {
        let size = CoverSize::default();
        assert_eq!(size, CoverSize::Medium);
    }

    #[test]
    fn test_cover_size_parse() {
        assert_eq!(CoverSize::parse("small"), CoverSize::Small);
        assert_eq!(CoverSize::parse("500"), CoverSize::Medium);
        assert_eq!(CoverSize::parse("Large"), CoverSize::Large);
        assert_eq!(CoverSize::parse("original"), CoverSize::Original);
        assert_eq!(CoverSize::parse("banana"), CoverSize::Medium);
    }

    #[test]
    fn test_front_urls() {
        let client = CoverArtClient::with_base_url("http://localhost:9999");

        assert_eq!(
            client.front_url("release-group", "rg-1", CoverSize::Medium),
            "http://localhost:9999/release-group/rg-1/front-500"
        );
        assert_eq!(
            client.front_url("release", "rel-1", CoverSize::Original),
            "http://localhost:9999/release/rel-1/front"
        );
    }
}
