//! Strategy selection and the analysis entry point.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::backend::SearchBackend;
use crate::config::{AnalysisConfig, AnalysisParams, Stemming};
use crate::document::{Dataset, DocumentRef};
use crate::error::{FreqscopeError, Result};
use crate::frequency::progress::Progress;
use crate::frequency::result::AnalysisResult;
use crate::frequency::{fast, general};
use crate::term_vector::TermVectorDecoder;

/// The two ways of computing an [`AnalysisResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStrategy {
    /// Fold precomputed term frequencies.
    Fast,
    /// Rebuild token order from positions and segment.
    General,
}

impl AnalysisStrategy {
    /// Choose the strategy for a configuration.
    ///
    /// The fast path serves exactly the configurations with one block per
    /// unit of analysis, unigrams and no stemming.
    pub fn select(config: &AnalysisConfig) -> Self {
        let single_block = config.num_blocks() == 1
            || (config.num_blocks() == 0 && config.block_size() == 0);

        if single_block && config.ngram_size() == 1 && config.stemming() == Stemming::None {
            AnalysisStrategy::Fast
        } else {
            AnalysisStrategy::General
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisStrategy::Fast => "fast",
            AnalysisStrategy::General => "general",
        }
    }
}

impl fmt::Display for AnalysisStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs frequency analyses against a search backend.
///
/// One analyzer may run many analyses in sequence; each call owns its whole
/// working set and nothing survives between calls.
pub struct FrequencyAnalyzer<'a> {
    backend: &'a dyn SearchBackend,
    decoder: TermVectorDecoder,
}

impl fmt::Debug for FrequencyAnalyzer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyAnalyzer")
            .field("backend", &"<backend>")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl<'a> FrequencyAnalyzer<'a> {
    /// Create an analyzer reading term vectors from `backend`.
    pub fn new(backend: &'a dyn SearchBackend) -> Self {
        FrequencyAnalyzer {
            backend,
            decoder: TermVectorDecoder::new(),
        }
    }

    /// Use a specific decoder, e.g. one bound to a field.
    pub fn with_decoder(mut self, decoder: TermVectorDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Validate raw parameters and run the analysis.
    ///
    /// Invalid parameters are rejected before the backend is contacted.
    pub fn analyze_params(
        &self,
        dataset: &Dataset,
        params: AnalysisParams,
        progress: Option<&mut dyn FnMut(u8)>,
    ) -> Result<AnalysisResult> {
        let config = AnalysisConfig::from_params(params)?;
        self.analyze(dataset, &config, progress)
    }

    /// Run the analysis of `dataset` under `config`.
    ///
    /// `progress`, when given, receives a non-decreasing sequence of
    /// percentages ending with exactly one 100 on success.
    pub fn analyze(
        &self,
        dataset: &Dataset,
        config: &AnalysisConfig,
        progress: Option<&mut dyn FnMut(u8)>,
    ) -> Result<AnalysisResult> {
        let mut progress = Progress::new(progress);
        let strategy = AnalysisStrategy::select(config);
        info!(
            "analyzing {} documents with the {} strategy",
            dataset.len(),
            strategy
        );
        debug!("configuration: {config:?}");

        let documents = self.load_term_vectors(dataset, config)?;
        let num_corpus_documents = self.backend.corpus_size().map_err(backend_failure)?;

        let mut result = match strategy {
            AnalysisStrategy::Fast => fast::analyze(&documents, config, &mut progress),
            AnalysisStrategy::General => general::analyze(&documents, config, &mut progress)?,
        };
        result.num_corpus_documents = num_corpus_documents;

        progress.finish();
        info!(
            "analysis complete: {} blocks, {} of {} types retained",
            result.blocks.len(),
            result.word_list.len(),
            result.num_dataset_types
        );
        Ok(result)
    }

    /// Fetch and decode the term vectors of every document, in dataset
    /// order.
    ///
    /// A document missing from the backend's answer contributes an empty
    /// term vector.
    pub fn load_term_vectors(
        &self,
        dataset: &Dataset,
        config: &AnalysisConfig,
    ) -> Result<Vec<DocumentRef>> {
        let mut documents = Vec::with_capacity(dataset.len());

        for batch in dataset.documents().chunks(config.fetch_batch_size()) {
            let ids: Vec<String> = batch.iter().map(|doc| doc.id.clone()).collect();
            let payload = self
                .backend
                .fetch_term_vectors(&ids)
                .map_err(backend_failure)?;

            for doc in batch {
                let tv = self.decoder.decode(&payload, &doc.id);
                if tv.is_empty() {
                    warn!("no term vector for document '{}'; it contributes nothing", doc.id);
                }
                documents.push(doc.clone().with_term_vector(tv));
            }
        }

        Ok(documents)
    }
}

/// Any failure while talking to the backend is reported as an outage.
fn backend_failure(err: FreqscopeError) -> FreqscopeError {
    match err {
        FreqscopeError::BackendUnavailable(_) => err,
        other => FreqscopeError::backend_unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LastBlock;

    fn select(builder: crate::config::AnalysisConfigBuilder) -> AnalysisStrategy {
        AnalysisStrategy::select(&builder.build().unwrap())
    }

    #[test]
    fn test_fast_path_selection() {
        assert_eq!(select(AnalysisConfig::builder()), AnalysisStrategy::Fast);
        assert_eq!(select(AnalysisConfig::builder().num_blocks(1)), AnalysisStrategy::Fast);
        assert_eq!(
            select(AnalysisConfig::builder().num_blocks(1).split_across(false)),
            AnalysisStrategy::Fast
        );
        assert_eq!(
            select(AnalysisConfig::builder().num_words(50).exclusion_list(["the"])),
            AnalysisStrategy::Fast
        );
    }

    #[test]
    fn test_general_path_selection() {
        assert_eq!(select(AnalysisConfig::builder().num_blocks(2)), AnalysisStrategy::General);
        assert_eq!(select(AnalysisConfig::builder().block_size(100)), AnalysisStrategy::General);
        assert_eq!(
            select(AnalysisConfig::builder().block_size(100).last_block(LastBlock::TruncateAll)),
            AnalysisStrategy::General
        );
        assert_eq!(select(AnalysisConfig::builder().ngram_size(2)), AnalysisStrategy::General);
        assert_eq!(
            select(AnalysisConfig::builder().stemming(Stemming::Lemma)),
            AnalysisStrategy::General
        );
    }

    #[test]
    fn test_backend_failure_mapping() {
        let err = backend_failure(FreqscopeError::other("socket closed"));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("socket closed"));

        let err = backend_failure(FreqscopeError::timeout("30s"));
        assert!(matches!(err, FreqscopeError::BackendUnavailable(_)));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(AnalysisStrategy::Fast.to_string(), "fast");
        assert_eq!(AnalysisStrategy::General.name(), "general");
    }
}
