//! Cover Art Archive integration
//!
//! Fetches album artwork from coverartarchive.org using MusicBrainz
//! release-group and release IDs. No API key required.

mod client;
pub mod search;

pub use client::{CoverArt, CoverArtClient, CoverSize};
pub use search::find_cover;
