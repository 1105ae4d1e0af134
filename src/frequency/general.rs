//! General path: token order rebuilt from positions.
//!
//! Each document's term vector is turned back into its token sequence by
//! sorting `(position, term)` pairs. Tokens are normalised, windowed into
//! n-grams when requested, and cut into blocks by the
//! [`Segmenter`](crate::frequency::segmenter::Segmenter). Dataset statistics
//! are then summed from the blocks, the vocabulary is culled and every block
//! is filtered down to the retained units.

use std::collections::BTreeSet;

use ahash::AHashSet;
use log::debug;

use crate::analysis::stem::{self, Stemmer};
use crate::config::{AnalysisConfig, Stemming};
use crate::document::DocumentRef;
use crate::error::{FreqscopeError, Result};
use crate::frequency::culler::{WordListCuller, rank_by_frequency};
use crate::frequency::progress::Progress;
use crate::frequency::result::{AnalysisResult, Block, BlockStats, Counts};
use crate::frequency::segmenter::{BlockPlan, Segmenter, name_blocks, segment};

// Progress checkpoints, in percent.
const SEGMENTATION_DONE: u8 = 80;
const CONVERSION_DONE: u8 = 85;
const AGGREGATION_DONE: u8 = 90;
const CULLING_DONE: u8 = 93;
const FILTERING_DONE: u8 = 97;

/// Run the general path over documents whose term vectors are attached.
pub fn analyze(
    documents: &[DocumentRef],
    config: &AnalysisConfig,
    progress: &mut Progress<'_>,
) -> Result<AnalysisResult> {
    let stemmer = stem::for_mode(config.stemming());

    let streams = documents
        .iter()
        .map(|doc| unit_stream(doc, config, stemmer.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let (named, consumed) = if config.split_across() {
        segment_across(&streams, config, progress)
    } else {
        segment_per_document(documents, &streams, config, progress)
    };
    progress.report(SEGMENTATION_DONE);

    let (mut blocks, block_stats): (Vec<Block>, Vec<BlockStats>) = named.into_iter().unzip();
    progress.report(CONVERSION_DONE);

    let mut tf_in_dataset = Counts::new();
    for block in &blocks {
        for (unit, count) in &block.counts {
            *tf_in_dataset.entry(unit.clone()).or_insert(0) += count;
        }
    }
    let df_in_dataset = document_frequencies(&streams, &consumed);
    let df_in_corpus = if config.ngram_size() == 1 && config.stemming() == Stemming::None {
        corpus_frequencies(documents)
    } else {
        Counts::new()
    };
    progress.report(AGGREGATION_DONE);

    let num_dataset_types = tf_in_dataset.len();
    let num_dataset_tokens: u64 = tf_in_dataset.values().sum();

    let culler = WordListCuller::normalized(config, stemmer.as_ref());
    let word_list = culler.cull(&rank_by_frequency(&tf_in_dataset));
    progress.report(CULLING_DONE);

    let retained: AHashSet<&str> = word_list.iter().map(String::as_str).collect();
    for block in &mut blocks {
        block.counts.retain(|unit, _| retained.contains(unit.as_str()));
    }
    progress.report(FILTERING_DONE);

    debug!(
        "general path: {} blocks, {} types, {} tokens, {} retained",
        blocks.len(),
        num_dataset_types,
        num_dataset_tokens,
        word_list.len()
    );

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
    Ok(result)
}

/// Rebuild the ordered token sequence of a document.
///
/// Fails when a term occurs but its positions were not returned, since
/// order cannot be recovered without them.
pub fn rebuild_tokens(doc: &DocumentRef) -> Result<Vec<&str>> {
    let tv = doc.terms();
    let mut placed: Vec<(usize, &str)> = Vec::new();

    for (term, stats) in tv {
        if stats.tf > 0 && !stats.has_positions() {
            return Err(FreqscopeError::decode(format!(
                "term vector of document '{}' has no position data for '{}'",
                doc.id, term
            )));
        }
        placed.extend(stats.positions.iter().map(|&position| (position, term.as_str())));
    }

    placed.sort_unstable();
    Ok(placed.into_iter().map(|(_, term)| term).collect())
}

/// Sliding windows of `n` consecutive tokens joined by `separator`.
pub fn ngrams(tokens: Vec<String>, n: usize, separator: &str) -> Vec<String> {
    if n <= 1 {
        return tokens;
    }
    tokens.windows(n).map(|window| window.join(separator)).collect()
}

fn unit_stream(
    doc: &DocumentRef,
    config: &AnalysisConfig,
    stemmer: &dyn Stemmer,
) -> Result<Vec<String>> {
    let tokens = rebuild_tokens(doc)?
        .into_iter()
        .map(|token| stemmer.stem(token))
        .collect();
    Ok(ngrams(tokens, config.ngram_size(), config.ngram_separator()))
}

/// Blocks cut from the streams, and how many leading units of each stream
/// entered a block.
type Segmented = (Vec<(Block, BlockStats)>, Vec<usize>);

fn segment_across(
    streams: &[Vec<String>],
    config: &AnalysisConfig,
    progress: &mut Progress<'_>,
) -> Segmented {
    let total: usize = streams.iter().map(Vec::len).sum();
    let plan = BlockPlan::derive(total, config);
    debug!("segmenting {total} units across the dataset with {plan:?}");

    let mut segmenter = Segmenter::new(plan);
    let mut closed = Vec::new();

    'streams: for (i, stream) in streams.iter().enumerate() {
        for unit in stream {
            if segmenter.is_exhausted() {
                break 'streams;
            }
            closed.extend(segmenter.append(unit, true));
        }
        progress.report_phase(0, SEGMENTATION_DONE, i + 1, streams.len());
    }
    closed.extend(segmenter.finish());

    // Truncation only ever drops a suffix of the concatenated streams.
    let mut remaining: usize = closed.iter().map(|block| block.token_count as usize).sum();
    let consumed = streams
        .iter()
        .map(|stream| {
            let taken = remaining.min(stream.len());
            remaining -= taken;
            taken
        })
        .collect();

    (name_blocks(closed, None), consumed)
}

fn segment_per_document(
    documents: &[DocumentRef],
    streams: &[Vec<String>],
    config: &AnalysisConfig,
    progress: &mut Progress<'_>,
) -> Segmented {
    let mut named = Vec::new();
    let mut consumed: Vec<usize> = Vec::with_capacity(streams.len());

    for (i, (doc, stream)) in documents.iter().zip(streams).enumerate() {
        let plan = BlockPlan::derive(stream.len(), config);
        let closed = segment(stream, plan, |_| true);
        consumed.push(closed.iter().map(|block| block.token_count as usize).sum());
        named.extend(name_blocks(closed, Some(doc.label())));
        progress.report_phase(0, SEGMENTATION_DONE, i + 1, streams.len());
    }

    (named, consumed)
}

/// Number of documents contributing each unit to some block. Only the first
/// `consumed[i]` units of stream `i` entered a block.
fn document_frequencies(streams: &[Vec<String>], consumed: &[usize]) -> Counts {
    let mut df = Counts::new();
    for (stream, &taken) in streams.iter().zip(consumed) {
        let distinct: BTreeSet<&str> = stream[..taken].iter().map(String::as_str).collect();
        for unit in distinct {
            *df.entry(unit.to_string()).or_insert(0) += 1;
        }
    }
    df
}

/// Corpus document frequency of each term, from the first document that
/// reports a non-zero value.
fn corpus_frequencies(documents: &[DocumentRef]) -> Counts {
    let mut df = Counts::new();
    for doc in documents {
        for (term, stats) in doc.terms() {
            if stats.df > 0 && !df.contains_key(term) {
                df.insert(term.clone(), stats.df);
            }
        }
    }
    df
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LastBlock;
    use crate::term_vector::{TermStats, TermVector};

    /// Build a document whose term vector encodes `text` word by word.
    fn doc(id: &str, text: &str) -> DocumentRef {
        let mut tv = TermVector::new();
        for (position, word) in text.split_whitespace().enumerate() {
            let stats = tv
                .entry(word.to_string())
                .or_insert_with(|| TermStats::new(0, 50));
            stats.tf += 1;
            stats.positions.push(position);
        }
        DocumentRef::new(id).with_term_vector(tv)
    }

    #[test]
    fn test_rebuild_tokens_orders_by_position() {
        let d = doc("a", "the fever broke and the fever returned");
        assert_eq!(
            rebuild_tokens(&d).unwrap(),
            vec!["the", "fever", "broke", "and", "the", "fever", "returned"]
        );
    }

    #[test]
    fn test_rebuild_tokens_requires_positions() {
        let mut tv = TermVector::new();
        tv.insert("fever".to_string(), TermStats::new(2, 10));
        let d = DocumentRef::new("a").with_term_vector(tv);

        match rebuild_tokens(&d) {
            Err(FreqscopeError::Decode(msg)) => assert!(msg.contains("'a'")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_ngrams() {
        let tokens: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ngrams(tokens.clone(), 1, " ").len(), 4);
        assert_eq!(ngrams(tokens.clone(), 3, " "), vec!["a b c", "b c d"]);
        assert_eq!(ngrams(tokens.clone(), 2, "_"), vec!["a_b", "b_c", "c_d"]);
        assert!(ngrams(tokens, 5, " ").is_empty());
    }

    #[test]
    fn test_blocks_across_dataset() {
        let docs = vec![doc("a", "w1 w2 w3 w4 w5 w6"), doc("b", "w1 w2 w3 w4")];
        let config = AnalysisConfig::builder().num_blocks(3).build().unwrap();
        let result = analyze(&docs, &config, &mut Progress::silent()).unwrap();

        assert_eq!(result.blocks.len(), 3);
        let sizes: Vec<u64> = result.block_stats.iter().map(|s| s.token_count).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(result.blocks[0].name, "Block #1/3");
        assert_eq!(result.tf_in_dataset["w1"], 2);
        assert_eq!(result.df_in_dataset["w1"], 2);
        assert_eq!(result.df_in_dataset["w5"], 1);
        assert_eq!(result.df_in_corpus["w1"], 50);
        assert_eq!(result.num_dataset_tokens, 10);
    }

    #[test]
    fn test_blocks_per_document() {
        let docs = vec![
            doc("a", "w1 w2 w3 w4 w5").with_title("First"),
            doc("b", "w1 w2 w3"),
        ];
        let config = AnalysisConfig::builder()
            .block_size(2)
            .last_block(LastBlock::SmallLast)
            .split_across(false)
            .build()
            .unwrap();
        let result = analyze(&docs, &config, &mut Progress::silent()).unwrap();

        let names: Vec<&str> = result.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Block #1/3 (within 'First')",
                "Block #2/3 (within 'First')",
                "Block #3/3 (within 'First')",
                "Block #1/2 (within 'b')",
                "Block #2/2 (within 'b')",
            ]
        );
    }

    #[test]
    fn test_bigrams_with_exclusion() {
        let docs = vec![doc("a", "the fever of the marsh fever")];
        let config = AnalysisConfig::builder()
            .ngram_size(2)
            .exclusion_list(["the"])
            .build()
            .unwrap();
        let result = analyze(&docs, &config, &mut Progress::silent()).unwrap();

        assert_eq!(result.word_list, vec!["fever of", "marsh fever"]);
        assert!(result.df_in_corpus.is_empty());
        assert_eq!(result.block_stats[0].token_count, 5);
        assert_eq!(result.blocks[0].counts.len(), 2);
        assert_eq!(result.num_dataset_types, 5);
    }

    #[test]
    fn test_stemmed_units() {
        let docs = vec![doc("a", "fevers fever feverish diseases disease")];
        let config = AnalysisConfig::builder()
            .stemming(Stemming::Stem)
            .inclusion_list(["diseases"])
            .build()
            .unwrap();
        let result = analyze(&docs, &config, &mut Progress::silent()).unwrap();

        assert_eq!(result.word_list, vec!["diseas"]);
        assert_eq!(result.tf_in_dataset["diseas"], 2);
        assert!(result.df_in_corpus.is_empty());
    }

    #[test]
    fn test_truncation_loses_units() {
        let docs = vec![doc("a", "w1 w2 w3 w4 w5 w6 w7")];
        let config = AnalysisConfig::builder()
            .block_size(3)
            .last_block(LastBlock::TruncateLast)
            .build()
            .unwrap();
        let result = analyze(&docs, &config, &mut Progress::silent()).unwrap();

        assert_eq!(result.blocks.len(), 2);
        assert_eq!(result.num_dataset_tokens, 6);
        assert!(!result.tf_in_dataset.contains_key("w7"));
    }

    #[test]
    fn test_truncated_units_do_not_count_towards_document_frequency() {
        let docs = vec![doc("a", "alpha beta"), doc("b", "beta alpha"), doc("c", "")];
        let config = AnalysisConfig::builder()
            .block_size(1)
            .last_block(LastBlock::TruncateAll)
            .split_across(false)
            .build()
            .unwrap();
        let result = analyze(&docs, &config, &mut Progress::silent()).unwrap();

        assert_eq!(result.tf_in_dataset["alpha"], 1);
        assert_eq!(result.tf_in_dataset["beta"], 1);
        assert_eq!(result.df_in_dataset["alpha"], 1);
        assert_eq!(result.df_in_dataset["beta"], 1);
        for (unit, df) in &result.df_in_dataset {
            assert!(*df <= result.tf_in_dataset[unit], "{unit}");
        }
    }

    #[test]
    fn test_truncated_documents_across_dataset() {
        let docs = vec![doc("a", "w1 w2 w3"), doc("b", "w3 w4"), doc("c", "w3 w5")];
        let config = AnalysisConfig::builder()
            .block_size(2)
            .last_block(LastBlock::TruncateLast)
            .build()
            .unwrap();
        let result = analyze(&docs, &config, &mut Progress::silent()).unwrap();

        // Seven units cut into three blocks of two; "w5" is dropped.
        assert_eq!(result.num_dataset_tokens, 6);
        assert_eq!(result.df_in_dataset["w3"], 3);
        assert_eq!(result.df_in_dataset["w4"], 1);
        assert!(!result.df_in_dataset.contains_key("w5"));
        assert!(!result.tf_in_dataset.contains_key("w5"));
    }

    #[test]
    fn test_progress_checkpoints() {
        let docs = vec![doc("a", "w1 w2 w3"), doc("b", "w4 w5")];
        let config = AnalysisConfig::builder().num_blocks(2).build().unwrap();

        let mut seen = Vec::new();
        let mut record = |p: u8| seen.push(p);
        {
            let mut progress = Progress::new(Some(&mut record));
            analyze(&docs, &config, &mut progress).unwrap();
        }
        assert_eq!(seen, vec![40, 80, 85, 90, 93, 97]);
    }
}
