//! Types for the indexer seam.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Query parameters for an indexer search.
///
/// Constructed per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term supplied by the caller.
    pub term: String,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}

/// One normalized torrent listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Release title from the listing.
    pub title: String,
    /// Description; the listing carries nothing beyond the title.
    pub description: String,
    /// Absolute link to the release detail page.
    pub details_url: String,
    /// Unique identifier (equals the detail link).
    pub guid: String,
    /// Publish time, resolved to the local time zone.
    pub publish_date: DateTime<Local>,
    /// Magnet URI from the listing.
    pub magnet_uri: String,
    /// Content hash embedded in the magnet URI.
    pub info_hash: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Seeder count.
    pub seeders: u32,
    /// Peer count (leechers + seeders).
    pub peers: u32,
    /// Minimum share ratio policy hint, constant per site.
    pub minimum_ratio: f64,
    /// Minimum seed time policy hint in seconds, constant per site.
    pub minimum_seed_time_secs: u64,
}

/// A result row that failed to map, with the reason it was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based index of the row within the results table.
    pub row: usize,
    /// Why the row was skipped.
    pub reason: String,
}

/// Result of one search: parsed records plus per-row skip diagnostics.
///
/// An empty record list with no skips is a valid "no results" response,
/// distinct from a fetch or setup failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub records: Vec<ReleaseRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
}
