//! Resolution service - orchestrates one metadata resolution run.
//!
//! The high-level pipeline for resolving a file:
//! 1. Extract the audio fingerprint (via fpcalc)
//! 2. Look up the fingerprint on AcoustID
//! 3. Resolve flat metadata fields from the match tree
//! 4. Search the Cover Art Archive for a front cover
//!
//! Steps 3 and 4 both depend only on step 2's parsed tree and have no data
//! dependency on each other, so they are joined concurrently. Failures in
//! steps 1-3 are terminal for the run; a missing cover never is. Nothing
//! here retries - a retry is a fresh call to [`ResolverService::resolve_file`].

use std::path::Path;

use crate::resolve::{
    acoustid::{self, AcoustIdClient},
    coverart::{self, CoverArt, CoverArtClient, CoverSize},
    domain::{ResolveError, ResolvedMetadata},
    fingerprint,
};

/// Configuration for the resolution service
pub struct ResolverConfig {
    /// AcoustID API key (get one at https://acoustid.org/new-application)
    pub acoustid_api_key: String,
    /// Preferred cover art size
    pub cover_size: CoverSize,
    /// Skip the cover search entirely (metadata only)
    pub skip_cover: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            acoustid_api_key: String::new(),
            cover_size: CoverSize::Medium,
            skip_cover: false,
        }
    }
}

/// Outcome of one resolution run.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The flat metadata record; fields unresolved by the tree are empty.
    pub metadata: ResolvedMetadata,
    /// Front cover, if any candidate yielded one.
    pub cover: Option<CoverArt>,
}

/// Service for resolving track metadata from an audio file
pub struct ResolverService {
    config: ResolverConfig,
    acoustid: AcoustIdClient,
    coverart: CoverArtClient,
}

impl ResolverService {
    /// Create a new resolution service with the given config
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            acoustid: AcoustIdClient::new(&config.acoustid_api_key),
            coverart: CoverArtClient::new(),
            config,
        }
    }

    /// Check if fingerprinting is available (fpcalc installed)
    pub fn is_fingerprinting_available(&self) -> bool {
        fingerprint::is_fpcalc_available()
    }

    /// Get fpcalc version for diagnostics
    pub fn fingerprint_version(&self) -> Option<String> {
        fingerprint::get_fpcalc_version()
    }

    /// Run one full resolution for the given audio file.
    pub async fn resolve_file(&self, path: &Path) -> Result<Resolution, ResolveError> {
        // Step 1: Extract fingerprint
        let fp = fingerprint::extract(path)?;

        // Step 2: Look up on AcoustID
        let response = self.acoustid.lookup(&fp).await?;

        // Steps 3 + 4: field resolution and cover search share the parsed
        // tree and have no mutual ordering requirement.
        let (metadata, cover) = tokio::join!(
            async { acoustid::resolve(&response) },
            async {
                if self.config.skip_cover {
                    None
                } else {
                    coverart::find_cover(&self.coverart, &response, self.config.cover_size).await
                }
            },
        );

        Ok(Resolution {
            metadata: metadata?,
            cover,
        })
    }
}
