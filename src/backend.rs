//! Seams to the external collaborators of an analysis.
//!
//! - [`SearchBackend`] returns term-vector payloads and the corpus size.
//! - [`DatasetProvider`] enumerates the documents of a dataset.
//!
//! [`StaticBackend`] and [`StaticDatasets`] serve fixed content from memory
//! or JSON files; the command-line tool and the tests use them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::document::{Dataset, DocumentId};
use crate::error::{FreqscopeError, Result};

/// A full-text index able to return term vectors.
pub trait SearchBackend {
    /// Fetch the term-vector payload covering `doc_ids`.
    ///
    /// Timeouts and connection failures are reported as
    /// [`FreqscopeError::BackendUnavailable`].
    fn fetch_term_vectors(&self, doc_ids: &[DocumentId]) -> Result<Value>;

    /// Number of documents in the whole corpus.
    fn corpus_size(&self) -> Result<u64>;
}

/// Source of user-curated datasets.
pub trait DatasetProvider {
    /// The documents of `dataset_id`, in their stable order.
    fn dataset(&self, dataset_id: &str) -> Result<Dataset>;
}

/// Backend answering every request with the same payload.
#[derive(Clone, Debug, Default)]
pub struct StaticBackend {
    payload: Value,
    corpus_size: u64,
}

impl StaticBackend {
    /// Create a backend serving `payload` for a corpus of `corpus_size`
    /// documents.
    pub fn new(payload: Value, corpus_size: u64) -> Self {
        StaticBackend {
            payload,
            corpus_size,
        }
    }

    /// Load the payload from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P, corpus_size: u64) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(StaticBackend::new(serde_json::from_str(&content)?, corpus_size))
    }
}

impl SearchBackend for StaticBackend {
    fn fetch_term_vectors(&self, _doc_ids: &[DocumentId]) -> Result<Value> {
        Ok(self.payload.clone())
    }

    fn corpus_size(&self) -> Result<u64> {
        Ok(self.corpus_size)
    }
}

/// Datasets held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticDatasets {
    datasets: HashMap<String, Dataset>,
}

impl StaticDatasets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset under `dataset_id`.
    pub fn insert<S: Into<String>>(&mut self, dataset_id: S, dataset: Dataset) {
        self.datasets.insert(dataset_id.into(), dataset);
    }

    /// Load one dataset from a JSON file of ids or `{id, title}` objects.
    pub fn load_file<S: Into<String>, P: AsRef<Path>>(&mut self, dataset_id: S, path: P) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let dataset: Dataset = serde_json::from_str(&content)?;
        self.insert(dataset_id, dataset);
        Ok(())
    }
}

impl DatasetProvider for StaticDatasets {
    fn dataset(&self, dataset_id: &str) -> Result<Dataset> {
        self.datasets
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| FreqscopeError::other(format!("dataset '{dataset_id}' not found")))
    }
}
