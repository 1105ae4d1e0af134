//! Fast path: statistics folded straight from term vectors.
//!
//! Valid only when each unit of analysis (the dataset, or each document) is
//! one block of unstemmed unigrams, so the backend's per-document term
//! frequencies already are the block counts.

use ahash::AHashSet;
use log::debug;

use crate::config::AnalysisConfig;
use crate::document::DocumentRef;
use crate::frequency::culler::{WordListCuller, rank_by_frequency};
use crate::frequency::progress::Progress;
use crate::frequency::result::{AnalysisResult, Block, BlockStats, Counts};
use crate::frequency::segmenter::block_name;
use crate::term_vector::{TermVector, token_count};

/// Share of the progress range spent folding term vectors.
const FOLD_DONE: u8 = 90;

/// Run the fast path over documents whose term vectors are attached.
pub fn analyze(
    documents: &[DocumentRef],
    config: &AnalysisConfig,
    progress: &mut Progress<'_>,
) -> AnalysisResult {
    let mut tf_in_dataset = Counts::new();
    let mut df_in_dataset = Counts::new();
    let mut df_in_corpus = Counts::new();

    for (i, doc) in documents.iter().enumerate() {
        for (term, stats) in doc.terms().iter().filter(|(_, stats)| stats.tf > 0) {
            *tf_in_dataset.entry(term.clone()).or_insert(0) += stats.tf;
            *df_in_dataset.entry(term.clone()).or_insert(0) += 1;
            if stats.df > 0 && !df_in_corpus.contains_key(term) {
                df_in_corpus.insert(term.clone(), stats.df);
            }
        }
        progress.report_phase(0, FOLD_DONE, i + 1, documents.len());
    }

    let num_dataset_types = tf_in_dataset.len();
    let num_dataset_tokens: u64 = tf_in_dataset.values().sum();

    let culler = WordListCuller::new(config);
    let word_list = culler.cull(&rank_by_frequency(&tf_in_dataset));
    let retained: AHashSet<&str> = word_list.iter().map(String::as_str).collect();
    debug!(
        "fast path: {} types, {} tokens, {} retained",
        num_dataset_types,
        num_dataset_tokens,
        word_list.len()
    );

    let (blocks, block_stats) = if config.split_across() {
        let name = block_name(1, 1, None);
        let block = Block {
            name: name.clone(),
            counts: filter_counts(&tf_in_dataset, &retained),
        };
        let stats = BlockStats {
            name,
            type_count: num_dataset_types,
            token_count: num_dataset_tokens,
        };
        (vec![block], vec![stats])
    } else {
        documents
            .iter()
            .filter(|doc| token_count(doc.terms()) > 0)
            .map(|doc| document_block(doc, &retained))
            .unzip()
    };

    let mut result = AnalysisResult {
        blocks,
        block_stats,
        word_list,
        tf_in_dataset,
        df_in_dataset,
        df_in_corpus,
        num_dataset_tokens,
        num_dataset_types,
        num_corpus_documents: 0,
    };
    result.restrict_to_word_list();
    result
}

fn document_block(doc: &DocumentRef, retained: &AHashSet<&str>) -> (Block, BlockStats) {
    let tv: &TermVector = doc.terms();
    let name = block_name(1, 1, Some(doc.label()));

    let counts = tv
        .iter()
        .filter(|(term, stats)| stats.tf > 0 && retained.contains(term.as_str()))
        .map(|(term, stats)| (term.clone(), stats.tf))
        .collect();

    (
        Block {
            name: name.clone(),
            counts,
        },
        BlockStats {
            name,
            type_count: tv.values().filter(|stats| stats.tf > 0).count(),
            token_count: token_count(tv),
        },
    )
}

fn filter_counts(counts: &Counts, retained: &AHashSet<&str>) -> Counts {
    counts
        .iter()
        .filter(|(unit, count)| **count > 0 && retained.contains(unit.as_str()))
        .map(|(unit, count)| (unit.clone(), *count))
        .collect()
}
