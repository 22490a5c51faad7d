//! Pirate Bay site adapter.
//!
//! One probe-and-cookie session setup at configuration time, then one
//! fetch plus extraction pass per query. The listing template is not
//! contractually stable: setup verifies a page marker, and a row that
//! no longer matches the expected shape is skipped, not fatal.

mod extract;
mod magnet;
mod publish_time;
mod schema;
mod size;

pub use extract::{extract_releases, RowParseError};
pub use magnet::{extract_info_hash, MalformedMagnetUri};
pub use publish_time::{resolve_publish_time, PublishTimeError, SITE_UTC_OFFSET_HOURS};
pub use schema::{column_index, ColumnRole, RESULT_COLUMNS};
pub use size::{parse_size_cell, size_to_bytes, SizeParseError};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, Url};
use tracing::debug;

use super::{Indexer, IndexerError, SearchOutcome, SearchQuery};
use crate::config::SiteConfig;

/// Default site link, also the default persisted base URL.
pub const DEFAULT_SITE_LINK: &str = "https://thepiratebay.se/";

/// Seeding policy hints, constant for this site.
pub const MINIMUM_RATIO: f64 = 1.0;
pub const MINIMUM_SEED_TIME_SECS: u64 = 172_800;

const BROWSE_PATH: &str = "browse/200";
const SWITCH_VIEW_PATH: &str = "switchview.php?view=s";
const SEARCH_CATEGORY: u32 = 205;
const SEARCH_ORDER: u32 = 99;

/// Literal substring proving a fetched page is the expected listing
/// template.
const LISTING_MARKER: &str = r#"<table id="searchResult">"#;

const USER_AGENT: &str = concat!("baywatch/", env!("CARGO_PKG_VERSION"));

/// Per-configuration session state: resolved base URL plus cookie jar.
///
/// The base URL is immutable once built; the cookie jar accumulates
/// across requests. At most one in-flight query per session; callers
/// needing concurrency take one session each.
pub struct SiteSession {
    base_url: Url,
    client: Client,
}

impl SiteSession {
    fn new(base_url: &str) -> Result<Self, IndexerError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, IndexerError> {
        self.base_url
            .join(path)
            .map_err(|e| IndexerError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    async fn fetch_text(&self, url: Url) -> Result<String, IndexerError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Normalize a candidate base URL so sub-paths resolve under it.
fn normalize_base_url(raw: &str) -> Result<Url, IndexerError> {
    let mut url = Url::parse(raw).map_err(|e| IndexerError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Check a fetched browse page against the listing marker.
fn looks_like_listing(body: &str) -> bool {
    body.contains(LISTING_MARKER)
}

async fn probe_listing(session: &SiteSession) -> Result<(), IndexerError> {
    let url = session.resolve(BROWSE_PATH)?;
    let body = session.fetch_text(url.clone()).await?;
    if !looks_like_listing(&body) {
        return Err(IndexerError::SiteUnreachableOrChanged(url.to_string()));
    }
    Ok(())
}

/// Switch the session to the single-table display mode.
///
/// The cookie set by this response lands in the session jar and rides
/// along on every later request.
async fn switch_single_view(session: &SiteSession) -> Result<(), IndexerError> {
    let referer = session.resolve(BROWSE_PATH)?;
    session
        .client
        .get(session.resolve(SWITCH_VIEW_PATH)?)
        .header(header::REFERER, referer.as_str())
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// The Pirate Bay site adapter.
pub struct PirateBay {
    session: SiteSession,
}

impl PirateBay {
    /// Probe a candidate base URL and establish a configured session.
    ///
    /// Fails with [`IndexerError::SiteUnreachableOrChanged`] when the
    /// browse page lacks the listing marker; the view-switch request is
    /// never issued in that case.
    pub async fn configure(candidate_url: &str) -> Result<Self, IndexerError> {
        let session = SiteSession::new(candidate_url)?;
        probe_listing(&session).await?;
        switch_single_view(&session).await?;
        Ok(Self { session })
    }

    /// Rebuild the adapter from a previously persisted configuration.
    ///
    /// Skips the probe; cookie state starts fresh.
    pub fn from_saved(config: &SiteConfig) -> Result<Self, IndexerError> {
        Ok(Self {
            session: SiteSession::new(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        self.session.base_url()
    }

    /// Build the search URL for a caller-supplied term.
    fn build_search_url(&self, term: &str) -> Result<Url, IndexerError> {
        let path = format!(
            "s/?q=\"{}\"&category={}&page=0&orderby={}",
            urlencoding::encode(term),
            SEARCH_CATEGORY,
            SEARCH_ORDER
        );
        self.session.resolve(&path)
    }
}

#[async_trait]
impl Indexer for PirateBay {
    fn name(&self) -> &str {
        "piratebay"
    }

    fn display_name(&self) -> &str {
        "The Pirate Bay"
    }

    fn description(&self) -> &str {
        "The world's largest bittorrent indexer"
    }

    async fn verify_connection(&self) -> Result<(), IndexerError> {
        probe_listing(&self.session).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, IndexerError> {
        let url = self.build_search_url(&query.term)?;
        debug!(url = %url, "searching listing");
        let body = self.session.fetch_text(url).await?;
        Ok(extract_releases(&body, self.session.base_url(), Utc::now()))
    }

    async fn download(&self, _link: &Url) -> Result<Vec<u8>, IndexerError> {
        Err(IndexerError::NotImplemented("download"))
    }
}
