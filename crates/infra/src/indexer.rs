//! Batch (re)indexing: store → projection → search index.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use thiserror::Error;

use storefront_core::ProductId;

use crate::config::SearchConfig;
use crate::projections::{ProductDocument, project};
use crate::read_model::{ProductStore, StoreError};

/// Failure reported by a search index client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("search index rejected batch: {0}")]
pub struct SinkError(pub String);

/// Receiver of projected documents (a search engine's bulk API).
pub trait SearchIndexSink: Send + Sync {
    /// Index (create or replace) `documents` in `index`, keyed by document id.
    fn bulk_index(&self, index: &str, documents: &[ProductDocument]) -> Result<(), SinkError>;
}

impl<S> SearchIndexSink for Arc<S>
where
    S: SearchIndexSink + ?Sized,
{
    fn bulk_index(&self, index: &str, documents: &[ProductDocument]) -> Result<(), SinkError> {
        (**self).bulk_index(index, documents)
    }
}

/// In-memory index for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySearchIndex {
    inner: RwLock<HashMap<(String, ProductId), ProductDocument>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: &str, id: ProductId) -> Option<ProductDocument> {
        let map = self.inner.read().ok()?;
        map.get(&(index.to_string(), id)).cloned()
    }

    /// Documents of `index`, ordered by id.
    pub fn documents(&self, index: &str) -> Vec<ProductDocument> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut docs: Vec<ProductDocument> = map
            .iter()
            .filter_map(|((i, _), doc)| if i == index { Some(doc.clone()) } else { None })
            .collect();
        docs.sort_by_key(|d| d.id);
        docs
    }

    pub fn len(&self, index: &str) -> usize {
        match self.inner.read() {
            Ok(map) => map.keys().filter(|(i, _)| i == index).count(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self, index: &str) -> bool {
        self.len(index) == 0
    }
}

impl SearchIndexSink for InMemorySearchIndex {
    fn bulk_index(&self, index: &str, documents: &[ProductDocument]) -> Result<(), SinkError> {
        let mut map = self
            .inner
            .write()
            .map_err(|e| SinkError(e.to_string()))?;
        for doc in documents {
            map.insert((index.to_string(), doc.id), doc.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("reindex chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Outcome of a reindex run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReindexReport {
    /// Distinct ids asked for.
    pub requested: usize,
    pub indexed: usize,
    /// Ids with no product record (skipped, not an error).
    pub missing: usize,
    pub batches: usize,
}

/// Fetches products in chunks, projects them and pushes each chunk to the index.
#[derive(Debug)]
pub struct Reindexer<S, K> {
    store: S,
    sink: K,
    index_name: String,
    chunk_size: usize,
}

impl<S, K> Reindexer<S, K>
where
    S: ProductStore,
    K: SearchIndexSink,
{
    pub fn new(store: S, sink: K, config: &SearchConfig) -> Self {
        Self {
            store,
            sink,
            index_name: config.index_name.clone(),
            chunk_size: config.reindex_chunk_size,
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Index the given products. Duplicate ids are indexed once.
    pub fn reindex(&self, ids: &[ProductId]) -> Result<ReindexReport, IndexError> {
        if self.chunk_size == 0 {
            return Err(IndexError::InvalidChunkSize);
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<ProductId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let mut report = ReindexReport {
            requested: unique.len(),
            ..ReindexReport::default()
        };

        for chunk in unique.chunks(self.chunk_size) {
            let aggregates = self.store.find_by_ids(chunk)?;
            report.missing += chunk.len() - aggregates.len();
            if aggregates.is_empty() {
                continue;
            }

            let documents: Vec<ProductDocument> = aggregates.iter().map(project).collect();
            self.sink.bulk_index(&self.index_name, &documents)?;

            report.indexed += documents.len();
            report.batches += 1;
            tracing::debug!(
                index = %self.index_name,
                batch = report.batches,
                size = documents.len(),
                "indexed product batch"
            );
        }

        tracing::info!(
            index = %self.index_name,
            requested = report.requested,
            indexed = report.indexed,
            missing = report.missing,
            batches = report.batches,
            "product reindex finished"
        );
        Ok(report)
    }

    /// Index every product in the store.
    pub fn reindex_all(&self) -> Result<ReindexReport, IndexError> {
        let ids = self.store.list_ids()?;
        self.reindex(&ids)
    }
}
