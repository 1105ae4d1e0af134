//! Criterion benchmarks for Freqscope.
//!
//! Covers the hot paths of an analysis:
//! - Term-vector decoding
//! - Block segmentation
//! - Fast and general path analyses end to end

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use freqscope::backend::StaticBackend;
use freqscope::config::{AnalysisConfig, LastBlock};
use freqscope::document::Dataset;
use freqscope::frequency::{BlockPlan, FrequencyAnalyzer, segmenter};
use freqscope::term_vector::TermVectorDecoder;
use serde_json::{Value, json};

const WORDS: [&str; 24] = [
    "malaria", "fever", "disease", "outbreak", "vaccine", "mosquito", "parasite", "infection",
    "clinic", "patient", "treatment", "symptom", "region", "season", "rainfall", "village",
    "health", "survey", "the", "of", "and", "in", "a", "to",
];

/// Generate whitespace-separated test documents.
fn generate_test_documents(count: usize) -> Vec<String> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let doc_words: Vec<&str> = (0..doc_length)
            .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()]) // Pseudo-random distribution
            .collect();
        documents.push(doc_words.join(" "));
    }
    documents
}

/// Encode documents as a term-vector payload.
fn generate_payload(documents: &[String]) -> Value {
    let mut vectors = vec![json!("uniqueKeyFieldName"), json!("id")];

    for (i, text) in documents.iter().enumerate() {
        let mut terms: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (position, word) in text.split_whitespace().enumerate() {
            terms.entry(word).or_default().push(position);
        }

        let mut field = Vec::with_capacity(terms.len() * 2);
        for (term, positions) in terms {
            let encoded: Vec<Value> = positions
                .iter()
                .flat_map(|p| [json!("position"), json!(p)])
                .collect();
            field.push(json!(term));
            field.push(json!(["tf", positions.len(), "positions", encoded, "df", 100 + i]));
        }

        let id = format!("doc-{i}");
        vectors.push(json!(id));
        vectors.push(json!(["uniqueKey", id, "fulltext", field]));
    }

    json!({ "termVectors": vectors })
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    let documents = generate_test_documents(200);
    let payload = generate_payload(&documents);
    let decoder = TermVectorDecoder::new();

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("decode_all_documents", |b| {
        b.iter(|| {
            for i in 0..documents.len() {
                let tv = decoder.decode(black_box(&payload), &format!("doc-{i}"));
                black_box(tv);
            }
        })
    });

    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    let units: Vec<String> = generate_test_documents(100)
        .iter()
        .flat_map(|doc| doc.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect();
    group.throughput(Throughput::Elements(units.len() as u64));

    for (name, config) in [
        ("by_size_big_last", AnalysisConfig::builder().block_size(500)),
        (
            "by_size_small_last",
            AnalysisConfig::builder()
                .block_size(500)
                .last_block(LastBlock::SmallLast),
        ),
        ("by_count", AnalysisConfig::builder().num_blocks(16)),
    ] {
        let config = config.build().unwrap();
        let plan = BlockPlan::derive(units.len(), &config);
        group.bench_function(name, |b| {
            b.iter(|| black_box(segmenter::segment(black_box(&units), plan, |_| true)))
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    group.sample_size(20);

    let documents = generate_test_documents(500);
    let backend = StaticBackend::new(generate_payload(&documents), 100_000);
    let dataset = Dataset::from_ids((0..documents.len()).map(|i| format!("doc-{i}")));
    let analyzer = FrequencyAnalyzer::new(&backend);

    group.throughput(Throughput::Elements(documents.len() as u64));
    for (name, config) in [
        ("fast_path", AnalysisConfig::builder().num_words(100)),
        ("general_blocks", AnalysisConfig::builder().num_blocks(10)),
        (
            "general_bigrams",
            AnalysisConfig::builder().ngram_size(2).exclusion_list(["the", "of"]),
        ),
    ] {
        let config = config.build().unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(analyzer.analyze(&dataset, &config, None).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decoding, bench_segmentation, bench_analysis);

criterion_main!(benches);
