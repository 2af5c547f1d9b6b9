//! Field resolution over the AcoustID match tree.
//!
//! Collapses the hierarchical match result (recordings -> release groups ->
//! releases -> mediums -> tracks -> artists) into one flat
//! [`ResolvedMetadata`] record using fixed per-field precedence.
//!
//! Only the first match and, within it, the first recording are considered;
//! no ranking or merging across matches. Below that one recording, traversal
//! fans out across ALL release groups and ALL releases, flattened into
//! order-preserving pools per level. "First" always means first in the pooled
//! flattening in server order, never re-sorted.
//!
//! Each field is an independent pure function over those pools, returning the
//! first non-absent VALUE (an entity whose sub-field is null is skipped, it
//! does not stop the chain). Everything here is deterministic and free of IO.

use super::dto;
use crate::resolve::domain::{ResolveError, ResolvedMetadata};

/// Resolve one lookup response into a flat metadata record.
///
/// Fails with [`ResolveError::NoUsableMatch`] when the status is not the
/// success token, or when there is no first-match/first-recording to resolve
/// against. A usable but sparse recording resolves to empty strings.
pub fn resolve(response: &dto::LookupResponse) -> Result<ResolvedMetadata, ResolveError> {
    if response.status != dto::STATUS_OK {
        return Err(ResolveError::NoUsableMatch);
    }

    let recording = response
        .results
        .first()
        .and_then(|m| m.recordings.first())
        .ok_or(ResolveError::NoUsableMatch)?;

    Ok(resolve_recording(recording))
}

/// Resolve every field of one recording's subtree.
pub(crate) fn resolve_recording(recording: &dto::Recording) -> ResolvedMetadata {
    ResolvedMetadata {
        title: title(recording).unwrap_or_default().to_string(),
        artist: artist(recording).unwrap_or_default().to_string(),
        album: album(recording).unwrap_or_default().to_string(),
        album_artist: album_artist(recording).unwrap_or_default().to_string(),
        year: year(recording).map(|y| y.to_string()).unwrap_or_default(),
        country: country(recording).unwrap_or_default().to_string(),
        track_number: track_number(recording)
            .map(|n| n.to_string())
            .unwrap_or_default(),
        track_total: track_total(recording)
            .map(|n| n.to_string())
            .unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Pooled traversals. Each pool preserves server order: release groups in
// their original order, then within each group its children in original
// order, and so on down the tree.
// ---------------------------------------------------------------------------

fn releases(recording: &dto::Recording) -> impl Iterator<Item = &dto::Release> {
    recording
        .release_groups
        .iter()
        .flat_map(|group| group.releases.iter())
}

fn group_artists(recording: &dto::Recording) -> impl Iterator<Item = &dto::Artist> {
    recording
        .release_groups
        .iter()
        .flat_map(|group| group.artists.iter())
}

fn release_artists(recording: &dto::Recording) -> impl Iterator<Item = &dto::Artist> {
    releases(recording).flat_map(|release| release.artists.iter())
}

fn release_events(recording: &dto::Recording) -> impl Iterator<Item = &dto::ReleaseEvent> {
    releases(recording).flat_map(|release| release.release_events.iter())
}

fn tracks(recording: &dto::Recording) -> impl Iterator<Item = &dto::Track> {
    releases(recording)
        .flat_map(|release| release.mediums.iter())
        .flat_map(|medium| medium.tracks.iter())
}

fn track_artists(recording: &dto::Recording) -> impl Iterator<Item = &dto::Artist> {
    tracks(recording).flat_map(|track| track.artists.iter())
}

/// First artist with a non-absent display name; nameless credits are skipped.
fn first_name<'a>(artists: impl Iterator<Item = &'a dto::Artist>) -> Option<&'a str> {
    artists.filter_map(|artist| artist.name.as_deref()).next()
}

// ---------------------------------------------------------------------------
// Per-field precedence chains. Highest rank first; the first non-absent
// value wins; all-absent resolves to None (empty string in the record).
// ---------------------------------------------------------------------------

fn title(recording: &dto::Recording) -> Option<&str> {
    tracks(recording)
        .filter_map(|track| track.title.as_deref())
        .next()
        .or(recording.title.as_deref())
}

fn artist(recording: &dto::Recording) -> Option<&str> {
    first_name(recording.artists.iter())
        .or_else(|| first_name(group_artists(recording)))
        .or_else(|| first_name(release_artists(recording)))
        .or_else(|| first_name(track_artists(recording)))
}

fn album(recording: &dto::Recording) -> Option<&str> {
    recording
        .release_groups
        .iter()
        .filter_map(|group| group.title.as_deref())
        .next()
        .or_else(|| {
            releases(recording)
                .filter_map(|release| release.title.as_deref())
                .next()
        })
}

fn album_artist(recording: &dto::Recording) -> Option<&str> {
    first_name(release_artists(recording))
}

fn year(recording: &dto::Recording) -> Option<i32> {
    release_events(recording)
        .filter_map(|event| event.date.as_ref())
        .filter_map(|date| date.year)
        .next()
}

fn country(recording: &dto::Recording) -> Option<&str> {
    releases(recording)
        .filter_map(|release| release.country.as_deref())
        .next()
}

fn track_number(recording: &dto::Recording) -> Option<u32> {
    tracks(recording).filter_map(|track| track.position).next()
}

fn track_total(recording: &dto::Recording) -> Option<u32> {
    releases(recording)
        .filter_map(|release| release.track_count)
        .next()
}
