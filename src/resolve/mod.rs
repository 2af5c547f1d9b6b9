//! Metadata resolution module - identifies a track by acoustic fingerprint
//! and collapses the lookup service's match tree into one flat record.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`acoustid/dto.rs`) - Exact wire shapes of the match tree
//! - **Field resolver** (`acoustid/resolver.rs`) - Pure precedence walk over the tree
//! - **Clients** - HTTP clients for AcoustID and the Cover Art Archive
//! - **Cover search** (`coverart/search.rs`) - Two-tier randomized candidate search
//! - **Fingerprint** - Audio fingerprint extraction via fpcalc
//! - **Service** - High-level orchestration of one resolution run
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. The resolver and search are testable without network
//!
//! # Usage
//!
//! ```ignore
//! use songid::resolve::{ResolverService, ResolverConfig};
//!
//! let config = ResolverConfig {
//!     acoustid_api_key: "your-api-key".to_string(),
//!     ..Default::default()
//! };
//! let service = ResolverService::new(config);
//!
//! let result = service.resolve_file(Path::new("song.mp3")).await?;
//! println!("Title: {}, Artist: {}", result.metadata.title, result.metadata.artist);
//! ```

pub mod acoustid;
pub mod coverart;
pub mod domain;
pub mod fingerprint;
pub mod service;
pub mod traits;

pub use coverart::{CoverArt, CoverArtClient, CoverSize};
pub use domain::{AudioFingerprint, ResolveError, ResolvedMetadata};
pub use service::{Resolution, ResolverConfig, ResolverService};
