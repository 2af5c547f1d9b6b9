//! AcoustID API Data Transfer Objects
//!
//! These types match EXACTLY what the AcoustID API returns with
//! `meta=recordings+releasegroups+releases+tracks`.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the acoustid module - project them through
//! the field resolver instead.
//!
//! API Reference: https://acoustid.org/webservice#lookup
//!
//! A response may be legitimately sparse at any level (a release with no
//! mediums, an artist with no name). Any field that is absent, null, or of
//! unexpected shape deserializes to absent rather than failing the parse;
//! only a structurally malformed payload (not JSON, or not the top-level
//! status/results object) is rejected.
//!
//! Example response:
//! ```json
//! {
//!   "status": "ok",
//!   "results": [{
//!     "id": "9ff43b6a-4f16-427c-93c2-92307ca505e0",
//!     "score": 1.0,
//!     "recordings": [{
//!       "id": "cd2e7c47-16f5-46c6-a37c-a1eb7bf599ff",
//!       "title": "Lower Your Eyelids to Die With the Sun",
//!       "duration": 639,
//!       "artists": [{"id": "6d7b7cd4-...", "name": "M83"}],
//!       "releasegroups": [{
//!         "id": "ddaa2d4d-...",
//!         "type": "Album",
//!         "title": "Before the Dawn Heals Us",
//!         "releases": [{
//!           "id": "b3b7e934-...",
//!           "country": "US",
//!           "releaseevents": [{"date": {"year": 2005}}],
//!           "mediums": [{"tracks": [{"position": 15}]}]
//!         }]
//!       }]
//!     }]
//!   }]
//! }
//! ```

use serde::{Deserialize, Deserializer};

use crate::resolve::domain::ResolveError;

/// Status token the API uses for a trustworthy payload.
pub const STATUS_OK: &str = "ok";

/// Top-level AcoustID lookup response
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    /// Must equal [`STATUS_OK`] for `results` to be trusted
    pub status: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub results: Vec<Match>,
    /// Error info if status != "ok"
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

/// A single fingerprint match result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Match {
    /// AcoustID identifier
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    /// Match confidence (0.0 to 1.0)
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f32>,
    /// Associated MusicBrainz recordings (if meta=recordings requested)
    #[serde(default, deserialize_with = "lenient_seq")]
    pub recordings: Vec<Recording>,
}

/// MusicBrainz recording info returned by AcoustID
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Recording {
    /// MusicBrainz recording ID
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    /// Track title
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Duration in seconds (API returns float, e.g. 353.0)
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<f64>,
    /// The recording's own credited artists - highest precedence
    #[serde(default, deserialize_with = "lenient_seq")]
    pub artists: Vec<Artist>,
    /// Release groups (album groupings) this recording appears on
    #[serde(default, rename = "releasegroups", deserialize_with = "lenient_seq")]
    pub release_groups: Vec<ReleaseGroup>,
}

/// Release group info from AcoustID (when meta=releasegroups requested)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseGroup {
    /// MusicBrainz release group ID
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    /// Album title
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Primary type (Album, Single, EP, etc.)
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub group_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub artists: Vec<Artist>,
    /// Specific published editions of this group (if meta=releases requested)
    #[serde(default, deserialize_with = "lenient_seq")]
    pub releases: Vec<Release>,
}

/// Release (one published edition) info from AcoustID
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    /// MusicBrainz release ID
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    /// Album title
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Release country code
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<ReleaseDate>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub artists: Vec<Artist>,
    #[serde(default, rename = "releaseevents", deserialize_with = "lenient_seq")]
    pub release_events: Vec<ReleaseEvent>,
    #[serde(default, rename = "track_count", deserialize_with = "lenient")]
    pub track_count: Option<u32>,
    #[serde(default, rename = "medium_count", deserialize_with = "lenient")]
    pub medium_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub mediums: Vec<Medium>,
}

/// Country/date pair for one regional release event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<ReleaseDate>,
}

/// Partial date; only `year` is consumed by the resolver
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDate {
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub day: Option<u32>,
}

/// Medium (disc/side) within a release
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Medium {
    #[serde(default, rename = "track_count", deserialize_with = "lenient")]
    pub track_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub position: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tracks: Vec<Track>,
}

/// Track slot within a medium
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub position: Option<u32>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub artists: Vec<Artist>,
}

/// Artist credit from any level of the tree
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artist {
    /// MusicBrainz artist ID
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    /// Display name; may be absent even when the credit entity is present
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Parse a raw response body into the match tree.
///
/// Invalid JSON, or a payload without the top-level status/results object
/// shape, is a [`ResolveError::MalformedResponse`]. Sparseness below the top
/// level never fails the parse.
pub fn parse_lookup(body: &str) -> Result<LookupResponse, ResolveError> {
    serde_json::from_str(body).map_err(|e| ResolveError::MalformedResponse(e.to_string()))
}

/// Deserialize a field tolerantly: null or an unexpected shape becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a sequence tolerantly: a non-array becomes empty, and
/// elements of unexpected shape are dropped rather than failing the parse.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
