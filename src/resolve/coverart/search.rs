//! Two-tier cover candidate search.
//!
//! Derives candidate entities from the match tree and tries them until one
//! yields an image. Tier 1 is every release group under the first recording;
//! tier 2 is every release under those release groups, attempted only once
//! tier 1 is fully exhausted.
//!
//! Within a tier, candidates are visited in randomized order: the archive's
//! coverage is uneven and unpredictable, no candidate is a-priori better
//! than another, and a random permutation spreads load across the archive
//! over repeated runs. Fetches are strictly sequential - the first success
//! must win, and fetching past a winner would only waste bandwidth.
//!
//! Exhausting both tiers is a normal outcome ("no cover"), not an error.

use rand::seq::SliceRandom;

use crate::resolve::acoustid::dto;
use crate::resolve::coverart::{CoverArt, CoverSize};
use crate::resolve::traits::CoverArtApi;

/// Search both candidate tiers for a front cover.
///
/// Returns the first successfully fetched image, or `None` when every
/// candidate across both tiers fails. Per-candidate failures are logged at
/// debug level and skipped.
pub async fn find_cover<C>(
    client: &C,
    response: &dto::LookupResponse,
    size: CoverSize,
) -> Option<CoverArt>
where
    C: CoverArtApi + ?Sized,
{
    let recording = response.results.first()?.recordings.first()?;

    // Tier 1: release groups, pooled and shuffled
    let mut groups: Vec<&str> = recording
        .release_groups
        .iter()
        .filter_map(|group| group.id.as_deref())
        .collect();
    groups.shuffle(&mut rand::rng());

    for id in groups {
        match client.release_group_front(id, size).await {
            Ok(art) => return Some(art),
            Err(e) => {
                tracing::debug!(target: "resolve::coverart", id, "No release-group cover: {}", e);
            }
        }
    }

    // Tier 2: releases under every release group, pooled and shuffled
    let mut releases: Vec<&str> = recording
        .release_groups
        .iter()
        .flat_map(|group| group.releases.iter())
        .filter_map(|release| release.id.as_deref())
        .collect();
    releases.shuffle(&mut rand::rng());

    for id in releases {
        match client.release_front(id, size).await {
            Ok(art) => return Some(art),
            Err(e) => {
                tracing::debug!(target: "resolve::coverart", id, "No release cover: {}", e);
            }
        }
    }

    None
}
