//! Torrent site indexer abstraction.
//!
//! This module provides an `Indexer` trait for site adapters that turn a
//! free-text query into normalized [`ReleaseRecord`]s, plus the Pirate Bay
//! adapter implementing it.

pub mod piratebay;
mod types;

pub use piratebay::PirateBay;
pub use types::*;

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;

/// Errors surfaced at the indexer seam.
///
/// Row-scoped failures never appear here; they are recovered into the
/// [`SearchOutcome`] skip report.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// The probed page did not carry the expected listing marker. Fatal
    /// to configuration and verification; not retried.
    #[error("Site unreachable or template changed at {0}")]
    SiteUnreachableOrChanged(String),

    /// Transport-level failure. Propagated as-is; retry policy belongs
    /// to the caller.
    #[error("Fetch failed: {0}")]
    FetchFailed(#[from] reqwest::Error),

    /// The candidate or saved base URL does not parse.
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Trait for torrent site adapters.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &str;

    /// Human-readable site name.
    fn display_name(&self) -> &str;

    /// One-line description of the site.
    fn description(&self) -> &str;

    /// Re-run the site probe against the configured base URL.
    async fn verify_connection(&self) -> Result<(), IndexerError>;

    /// Execute a search and return the normalized outcome.
    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, IndexerError>;

    /// Fetch the raw payload behind a download link.
    async fn download(&self, link: &Url) -> Result<Vec<u8>, IndexerError>;
}
