//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{FreqscopeArgs, OutputFormat};
use crate::error::Result;
use crate::frequency::{AnalysisResult, AnalysisStrategy};

/// Summary of a completed analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub strategy: AnalysisStrategy,
    pub documents: usize,
    pub blocks: Vec<BlockSummary>,
    pub num_dataset_types: usize,
    pub num_dataset_tokens: u64,
    pub num_corpus_documents: u64,
    pub top_words: Vec<WordSummary>,
    pub duration_ms: u64,
}

/// One block of an analysis summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct BlockSummary {
    pub name: String,
    pub type_count: usize,
    pub token_count: u64,
}

/// One word of an analysis summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordSummary {
    pub unit: String,
    pub tf_in_dataset: u64,
    pub df_in_dataset: u64,
    pub df_in_corpus: Option<u64>,
    pub tf_idf: Option<f64>,
}

/// Strategy selection report.
#[derive(Debug, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: AnalysisStrategy,
    pub block_size: usize,
    pub num_blocks: usize,
    pub ngram_size: usize,
    pub stemming: String,
    pub last_block: String,
}

impl AnalysisSummary {
    /// Summarise `result`, listing at most `top` words.
    pub fn new(
        strategy: AnalysisStrategy,
        documents: usize,
        result: &AnalysisResult,
        top: usize,
        duration_ms: u64,
    ) -> Self {
        let blocks = result
            .block_stats
            .iter()
            .map(|stats| BlockSummary {
                name: stats.name.clone(),
                type_count: stats.type_count,
                token_count: stats.token_count,
            })
            .collect();

        let top_words = result
            .word_list
            .iter()
            .take(top)
            .map(|unit| WordSummary {
                unit: unit.clone(),
                tf_in_dataset: result.tf_in_dataset.get(unit).copied().unwrap_or_default(),
                df_in_dataset: result.df_in_dataset.get(unit).copied().unwrap_or_default(),
                df_in_corpus: result.df_in_corpus.get(unit).copied(),
                tf_idf: result.tf_idf(unit),
            })
            .collect();

        AnalysisSummary {
            strategy,
            documents,
            blocks,
            num_dataset_types: result.num_dataset_types,
            num_dataset_tokens: result.num_dataset_tokens,
            num_corpus_documents: result.num_corpus_documents,
            top_words,
            duration_ms,
        }
    }
}

/// Output a result according to the selected format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &FreqscopeArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &FreqscopeArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    if std::any::type_name::<T>().contains("AnalysisSummary") {
        output_summary_human(&value);
    } else {
        output_generic_human(&value);
    }
    Ok(())
}

fn output_summary_human(value: &serde_json::Value) {
    println!("Strategy: {}", format_value(&value["strategy"]));
    println!("Documents: {}", format_value(&value["documents"]));
    println!(
        "Dataset: {} types, {} tokens",
        format_value(&value["num_dataset_types"]),
        format_value(&value["num_dataset_tokens"])
    );
    println!("Duration: {}ms", format_value(&value["duration_ms"]));

    if let Some(blocks) = value["blocks"].as_array() {
        println!();
        println!("Blocks ({}):", blocks.len());
        for block in blocks {
            println!(
                "  {}: {} types, {} tokens",
                format_value(&block["name"]),
                format_value(&block["type_count"]),
                format_value(&block["token_count"])
            );
        }
    }

    if let Some(words) = value["top_words"].as_array() {
        println!();
        println!("Top words:");
        for (rank, word) in words.iter().enumerate() {
            println!(
                "  {:>3}. {} (tf {}, df {}, corpus df {})",
                rank + 1,
                format_value(&word["unit"]),
                format_value(&word["tf_in_dataset"]),
                format_value(&word["df_in_dataset"]),
                format_value(&word["df_in_corpus"])
            );
        }
    }
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FreqscopeArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::Array(arr) => format!("[{} items]", arr.len()),
        serde_json::Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("fast")), "fast");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(null)), "-");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
    }

    #[test]
    fn test_summary() {
        let mut result = AnalysisResult {
            word_list: vec!["malaria".to_string(), "fever".to_string()],
            num_dataset_types: 2,
            num_dataset_tokens: 5,
            num_corpus_documents: 1000,
            ..Default::default()
        };
        result.tf_in_dataset.insert("malaria".to_string(), 3);
        result.tf_in_dataset.insert("fever".to_string(), 2);
        result.df_in_corpus.insert("malaria".to_string(), 10);

        let summary = AnalysisSummary::new(AnalysisStrategy::Fast, 1, &result, 1, 7);

        assert_eq!(summary.top_words.len(), 1);
        assert_eq!(summary.top_words[0].unit, "malaria");
        assert_eq!(summary.top_words[0].df_in_corpus, Some(10));
        assert!(summary.top_words[0].tf_idf.is_some());
    }
}
