//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.

use async_trait::async_trait;

use super::acoustid::dto;
use super::coverart::{CoverArt, CoverSize};
use super::domain::{AudioFingerprint, ResolveError};

/// Trait for AcoustID fingerprint lookup.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait AcoustIdApi: Send + Sync {
    /// Look up a fingerprint and return the raw match tree.
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<dto::LookupResponse, ResolveError>;
}

/// Trait for Cover Art Archive fetches.
///
/// One method per candidate entity kind the search can try.
#[async_trait]
pub trait CoverArtApi: Send + Sync {
    /// Get the front cover for a release group.
    async fn release_group_front(
        &self,
        release_group_id: &str,
        size: CoverSize,
    ) -> Result<CoverArt, ResolveError>;

    /// Get the front cover for a release.
    async fn release_front(
        &self,
        release_id: &str,
        size: CoverSize,
    ) -> Result<CoverArt, ResolveError>;
}

// Implement traits for real clients

#[async_trait]
impl AcoustIdApi for super::acoustid::AcoustIdClient {
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<dto::LookupResponse, ResolveError> {
        self.lookup(fingerprint).await
    }
}

#[async_trait]
impl CoverArtApi for super::coverart::CoverArtClient {
    async fn release_group_front(
        &self,
        release_group_id: &str,
        size: CoverSize,
    ) -> Result<CoverArt, ResolveError> {
        self.release_group_front(release_group_id, size).await
    }

    async fn release_front(
        &self,
        release_id: &str,
        size: CoverSize,
    ) -> Result<CoverArt, ResolveError> {
        self.release_front(release_id, size).await
    }
}

/// Mock clients for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Mock Cover Art client with per-candidate outcomes and an attempt log.
    ///
    /// Candidates listed in `available` succeed with bytes derived from
    /// their id; everything else reports [`ResolveError::CoverUnavailable`].
    /// Every fetch is recorded as `"release-group:<id>"` or `"release:<id>"`
    /// in call order, so tests can assert exactly how the search walked the
    /// tiers.
    pub struct MockCoverArt {
        /// Candidate ids that have a cover
        pub available: HashSet<String>,
        /// Fetches in call order
        pub attempts: Mutex<Vec<String>>,
    }

    impl MockCoverArt {
        /// Create a mock where the given candidate ids have covers.
        pub fn with_available<I, S>(ids: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                available: ids.into_iter().map(Into::into).collect(),
                attempts: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock with no covers at all.
        pub fn empty_archive() -> Self {
            Self::with_available(Vec::<String>::new())
        }

        /// Bytes the mock serves for a given candidate id.
        pub fn bytes_for(id: &str) -> Vec<u8> {
            format!("img-{id}").into_bytes()
        }

        /// Snapshot of the attempt log.
        pub fn logged_attempts(&self) -> Vec<String> {
            self.attempts.lock().unwrap().clone()
        }

        fn fetch(&self, entity: &str, id: &str) -> Result<CoverArt, ResolveError> {
            self.attempts.lock().unwrap().push(format!("{entity}:{id}"));

            if self.available.contains(id) {
                Ok(CoverArt {
                    data: Self::bytes_for(id),
                    mime_type: "image/jpeg".to_string(),
                    url: format!("https://coverart.example.com/{entity}/{id}"),
                })
            } else {
                Err(ResolveError::CoverUnavailable)
            }
        }
    }

    #[async_trait]
    impl CoverArtApi for MockCoverArt {
        async fn release_group_front(
            &self,
            release_group_id: &str,
            _size: CoverSize,
        ) -> Result<CoverArt, ResolveError> {
            self.fetch("release-group", release_group_id)
        }

        async fn release_front(
            &self,
            release_id: &str,
            _size: CoverSize,
        ) -> Result<CoverArt, ResolveError> {
            self.fetch("release", release_id)
        }
    }

    /// Mock AcoustID client that returns a predefined tree or error.
    pub struct MockAcoustId {
        /// Response to return from lookup
        pub response: Option<dto::LookupResponse>,
        /// Error to return (takes precedence over response)
        pub error: Option<ResolveError>,
    }

    impl MockAcoustId {
        /// Create a mock that returns the given tree.
        pub fn with_response(response: dto::LookupResponse) -> Self {
            Self {
                response: Some(response),
                error: None,
            }
        }

        /// Create a mock that returns an error.
        pub fn with_error(error: ResolveError) -> Self {
            Self {
                response: None,
                error: Some(error),
            }
        }
    }

    #[async_trait]
    impl AcoustIdApi for MockAcoustId {
        async fn lookup(
            &self,
            _fingerprint: &AudioFingerprint,
        ) -> Result<dto::LookupResponse, ResolveError> {
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            self.response
                .clone()
                .ok_or(ResolveError::NoUsableMatch)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_coverart_logs_attempts() {
            let mock = MockCoverArt::with_available(["rel-good"]);

            let miss = mock.release_group_front("rg-1", CoverSize::Medium).await;
            assert!(matches!(miss, Err(ResolveError::CoverUnavailable)));

            let hit = mock.release_front("rel-good", CoverSize::Medium).await.unwrap();
            assert_eq!(hit.data, MockCoverArt::bytes_for("rel-good"));

            assert_eq!(
                mock.logged_attempts(),
                vec!["release-group:rg-1", "release:rel-good"]
            );
        }

        #[tokio::test]
        async fn test_mock_acoustid_error() {
            let mock = MockAcoustId::with_error(ResolveError::LookupFailed("timeout".into()));
            let fp = AudioFingerprint {
                fingerprint: "test".to_string(),
                duration_secs: 180,
            };
            let result = mock.lookup(&fp).await;
            assert!(matches!(result, Err(ResolveError::LookupFailed(_))));
        }
    }
}
