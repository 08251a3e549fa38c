//! Trait definition and types for release indexers.
//!
//! This module defines the [`Indexer`] trait that every search backend
//! (Newznab, Torznab, etc.) implements, along with the [`ReleaseInfo`] record
//! an indexer returns for each candidate release.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::SearchCriteria;

// ---------------------------------------------------------------------------
// Release records
// ---------------------------------------------------------------------------

/// A single unranked release returned by an indexer.
///
/// The search core never interprets these; it only merges them and hands them
/// to a [`DecisionMaker`](crate::decision::DecisionMaker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Indexer-unique identifier for this release.
    pub guid: String,
    /// Release name as published.
    pub title: String,
    /// Payload size in bytes (0 when the indexer does not report it).
    pub size: u64,
    /// Where the NZB or torrent can be fetched from.
    pub download_url: String,
    /// Details page, if the indexer exposes one.
    pub info_url: Option<String>,
    /// Name of the indexer that returned this release.
    pub indexer: String,
    /// When the release was published.
    pub publish_date: Option<DateTime<Utc>>,
    /// Newznab category ids.
    pub categories: Vec<u32>,
}

// ---------------------------------------------------------------------------
// Indexer trait
// ---------------------------------------------------------------------------

/// Async trait that all release indexers must implement.
///
/// `fetch` may be called concurrently from several searches at once, each with
/// its own criteria. Implementations enforce their own request timeouts; a
/// call that never completes stalls the search that issued it.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Unique, human-readable name (e.g. `"nzbgeek"`).
    fn name(&self) -> &str;

    /// Search for releases matching `criteria`.
    ///
    /// Results are returned in the order the indexer delivered them.
    async fn fetch(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<ReleaseInfo>>;
}
