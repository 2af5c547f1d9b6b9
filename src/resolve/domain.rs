//! Internal domain models for metadata resolution.
//!
//! These types are OUR types - they don't change when external APIs change.
//! The wire-format DTOs live in `acoustid::dto` and are only ever projected
//! into these via the field resolver.

/// Flat metadata record produced by one resolution run.
///
/// Every field is a possibly-empty string: "unresolved" is the empty string,
/// never an absent key, so the tag-writer contract stays fixed-shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub year: String,
    pub country: String,
    pub track_number: String,
    pub track_total: String,
}

/// Audio fingerprint for a track
#[derive(Debug, Clone)]
pub struct AudioFingerprint {
    /// The fingerprint string (Chromaprint format)
    pub fingerprint: String,
    /// Duration of the audio in seconds, rounded (required by AcoustID)
    pub duration_secs: u32,
}

/// Errors that can occur during a resolution run.
///
/// `CoverUnavailable` is the odd one out: it is never surfaced from a run
/// (the cover search returns `Option` and exhaustion is a normal `None`) -
/// the archive client uses it as the per-candidate "no cover here" signal,
/// which the search swallows.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("Fingerprint extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Invalid fingerprint input: {0}")]
    InvalidFingerprint(String),

    #[error("Lookup request failed: {0}")]
    LookupFailed(String),

    #[error("Malformed lookup response: {0}")]
    MalformedResponse(String),

    #[error("No usable match in lookup response")]
    NoUsableMatch,

    #[error("No candidate yielded a cover image")]
    CoverUnavailable,
}

impl ResolvedMetadata {
    /// True when no field resolved to anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.artist.is_empty()
            && self.album.is_empty()
            && self.album_artist.is_empty()
            && self.year.is_empty()
            && self.country.is_empty()
            && self.track_number.is_empty()
            && self.track_total.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metadata_is_empty() {
        let meta = ResolvedMetadata::default();
        assert!(meta.is_empty());
        assert_eq!(meta.title, "");
    }

    #[test]
    fn test_partial_metadata_is_not_empty() {
        let meta = ResolvedMetadata {
            country: "US".to_string(),
            ..Default::default()
        };
        assert!(!meta.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = ResolveError::LookupFailed("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = ResolveError::NoUsableMatch;
        assert!(err.to_string().contains("No usable match"));
    }
}
