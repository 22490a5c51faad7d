use serde::{Deserialize, Serialize};

use crate::indexer::piratebay::DEFAULT_SITE_LINK;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
}

/// Indexer site configuration.
///
/// The persisted shape is a single field: the base URL resolved at
/// configuration time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_SITE_LINK.to_string()
}
