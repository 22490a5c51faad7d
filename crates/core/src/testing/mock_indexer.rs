//! Mock indexer for testing.

use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::indexer::{Indexer, IndexerError, ReleaseRecord, SearchOutcome, SearchQuery};

/// Mock implementation of the [`Indexer`] trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable search outcome
/// - Record queries for assertions
/// - Fail the next call with a configured error
#[derive(Debug, Default)]
pub struct MockIndexer {
    /// Outcome returned by `search`.
    outcome: Arc<RwLock<SearchOutcome>>,
    /// Recorded search queries.
    queries: Arc<RwLock<Vec<SearchQuery>>>,
    /// If set, the next `search` or `verify_connection` fails with this.
    next_error: Arc<RwLock<Option<IndexerError>>>,
}

impl MockIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the outcome returned by subsequent searches.
    pub async fn set_outcome(&self, outcome: SearchOutcome) {
        *self.outcome.write().await = outcome;
    }

    /// Configure records with an empty skip report.
    pub async fn set_records(&self, records: Vec<ReleaseRecord>) {
        self.set_outcome(SearchOutcome {
            records,
            skipped_rows: vec![],
        })
        .await;
    }

    /// Make the next call fail with the given error.
    pub async fn fail_next(&self, error: IndexerError) {
        *self.next_error.write().await = Some(error);
    }

    /// Queries recorded so far.
    pub async fn recorded_queries(&self) -> Vec<SearchQuery> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl Indexer for MockIndexer {
    fn name(&self) -> &str {
        "mock"
    }

    fn display_name(&self) -> &str {
        "Mock Indexer"
    }

    fn description(&self) -> &str {
        "Configurable in-memory indexer"
    }

    async fn verify_connection(&self) -> Result<(), IndexerError> {
        match self.next_error.write().await.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, IndexerError> {
        self.queries.write().await.push(query.clone());
        if let Some(e) = self.next_error.write().await.take() {
            return Err(e);
        }
        Ok(self.outcome.read().await.clone())
    }

    async fn download(&self, _link: &Url) -> Result<Vec<u8>, IndexerError> {
        Err(IndexerError::NotImplemented("download"))
    }
}
