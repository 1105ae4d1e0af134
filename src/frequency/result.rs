//! Output of a frequency analysis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tfidf;

/// Unit → count map. Zero counts are never stored.
pub type Counts = BTreeMap<String, u64>;

/// A named contiguous segment of an analysed stream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    /// Counts of retained units in this block.
    pub counts: Counts,
}

/// Size of a block before vocabulary filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStats {
    pub name: String,
    /// Distinct units in the block.
    pub type_count: usize,
    /// Units in the block.
    pub token_count: u64,
}

/// Result of one analysis. Built once and never modified afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub blocks: Vec<Block>,

    /// Parallel to `blocks`.
    pub block_stats: Vec<BlockStats>,

    /// Retained units, most frequent first.
    pub word_list: Vec<String>,

    pub tf_in_dataset: Counts,

    /// Number of dataset documents containing each unit.
    pub df_in_dataset: Counts,

    /// Number of corpus documents containing each unit. Only known for
    /// single, unstemmed words.
    pub df_in_corpus: Counts,

    pub num_dataset_tokens: u64,

    pub num_dataset_types: usize,

    /// Size of the whole corpus as reported by the backend.
    pub num_corpus_documents: u64,
}

impl AnalysisResult {
    /// Dataset tf-idf of `unit` against the corpus, when both the corpus
    /// size and the unit's corpus document frequency are known.
    pub fn tf_idf(&self, unit: &str) -> Option<f64> {
        if self.num_corpus_documents == 0 {
            return None;
        }
        let tf = *self.tf_in_dataset.get(unit)?;
        let df = *self.df_in_corpus.get(unit)?;
        Some(tfidf::tf_idf(tf, df, self.num_corpus_documents))
    }

    /// Keep only `retained` units in the frequency maps.
    pub(crate) fn restrict_to_word_list(&mut self) {
        let retained: ahash::AHashSet<&str> =
            self.word_list.iter().map(String::as_str).collect();

        for map in [
            &mut self.tf_in_dataset,
            &mut self.df_in_dataset,
            &mut self.df_in_corpus,
        ] {
            map.retain(|unit, _| retained.contains(unit.as_str()));
        }
    }
}
