//! Testing utilities and mock implementations.
//!
//! Provides a mock implementation of the [`Indexer`](crate::indexer::Indexer)
//! trait so downstream consumers can test against the seam without a
//! live site.

mod mock_indexer;

pub use mock_indexer::MockIndexer;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::Local;

    use crate::indexer::piratebay::{MINIMUM_RATIO, MINIMUM_SEED_TIME_SECS};
    use crate::indexer::ReleaseRecord;

    /// Create a release record with reasonable defaults.
    pub fn release_record(title: &str, info_hash: &str) -> ReleaseRecord {
        let details_url = format!(
            "https://thepiratebay.se/torrent/4100001/{}",
            title.replace(' ', ".")
        );
        ReleaseRecord {
            title: title.to_string(),
            description: title.to_string(),
            guid: details_url.clone(),
            details_url,
            publish_date: Local::now(),
            magnet_uri: format!("magnet:?xt=urn:btih:{}&dn=x", info_hash),
            info_hash: info_hash.to_string(),
            size_bytes: 1024 * 1024 * 700,
            seeders: 50,
            peers: 60,
            minimum_ratio: MINIMUM_RATIO,
            minimum_seed_time_secs: MINIMUM_SEED_TIME_SECS,
        }
    }
}
