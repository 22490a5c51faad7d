pub mod config;
pub mod indexer;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SiteConfig,
};
pub use indexer::{
    Indexer, IndexerError, PirateBay, ReleaseRecord, SearchOutcome, SearchQuery, SkippedRow,
};
