//! Command line argument parsing for Freqscope CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisParams;
use crate::error::Result;

/// Freqscope - word and n-gram frequency analysis over full-text datasets
#[derive(Parser, Debug, Clone)]
#[command(name = "freqscope")]
#[command(about = "Word and n-gram frequency analysis over full-text datasets")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Freqscope Contributors")]
#[command(long_about = None)]
pub struct FreqscopeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FreqscopeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a frequency analysis over a dataset
    Analyze(AnalyzeArgs),

    /// Show which strategy a configuration selects
    Strategy(StrategyArgs),
}

/// Arguments for running an analysis
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Term-vector payload returned by the search backend (JSON)
    #[arg(long, value_name = "PAYLOAD_FILE")]
    pub payload: PathBuf,

    /// Dataset file: JSON array of ids or {"id", "title"} objects
    #[arg(long, value_name = "DATASET_FILE")]
    pub dataset: PathBuf,

    /// Number of documents in the whole corpus
    #[arg(long, default_value = "0")]
    pub corpus_size: u64,

    /// Field whose term vectors are analysed (default: first field found)
    #[arg(long)]
    pub field: Option<String>,

    /// Print progress percentages to stderr
    #[arg(long)]
    pub progress: bool,

    /// Number of words to list in human output
    #[arg(long, default_value = "20")]
    pub top: usize,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for showing the selected strategy
#[derive(Parser, Debug, Clone)]
pub struct StrategyArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Analysis configuration options, layered over an optional JSON file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Analysis parameters file (JSON); flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Units per block
    #[arg(long, allow_negative_numbers = true)]
    pub block_size: Option<i64>,

    /// Number of blocks
    #[arg(long, allow_negative_numbers = true)]
    pub num_blocks: Option<i64>,

    /// Analyse each document separately instead of the whole dataset
    #[arg(long)]
    pub per_document: bool,

    /// Words per unit
    #[arg(long, allow_negative_numbers = true)]
    pub ngram_size: Option<i64>,

    /// Maximum number of units to keep (0 = all)
    #[arg(long, allow_negative_numbers = true)]
    pub num_words: Option<i64>,

    /// Keep every unit
    #[arg(long)]
    pub all: bool,

    /// Token normalisation: none, stem or lemma
    #[arg(long)]
    pub stemming: Option<String>,

    /// Leftover policy: big_last, small_last, truncate_last or truncate_all
    #[arg(long)]
    pub last_block: Option<String>,

    /// Whitespace-separated words to keep
    #[arg(long)]
    pub inclusion_list: Option<String>,

    /// Whitespace-separated words to drop
    #[arg(long)]
    pub exclusion_list: Option<String>,

    /// Whitespace-separated stop words
    #[arg(long)]
    pub stop_list: Option<String>,

    /// Language code of a built-in stop list
    #[arg(long)]
    pub stop_list_language: Option<String>,

    /// Document ids per backend request
    #[arg(long, allow_negative_numbers = true)]
    pub fetch_batch_size: Option<i64>,
}

impl ConfigArgs {
    /// Load the parameters file, if any, and apply the flags over it.
    pub fn to_params(&self) -> Result<AnalysisParams> {
        let mut params = match &self.config {
            Some(path) => AnalysisParams::from_file(path)?,
            None => AnalysisParams::default(),
        };

        if let Some(v) = self.block_size {
            params.block_size = v;
        }
        if let Some(v) = self.num_blocks {
            params.num_blocks = v;
        }
        if self.per_document {
            params.split_across = false;
        }
        if let Some(v) = self.ngram_size {
            params.ngram_size = v;
        }
        if let Some(v) = self.num_words {
            params.num_words = v;
        }
        if self.all {
            params.all = true;
        }
        if let Some(v) = &self.stemming {
            params.stemming = Some(v.clone());
        }
        if let Some(v) = &self.last_block {
            params.last_block = Some(v.clone());
        }
        if let Some(v) = &self.inclusion_list {
            params.inclusion_list = Some(v.clone());
        }
        if let Some(v) = &self.exclusion_list {
            params.exclusion_list = Some(v.clone());
        }
        if let Some(v) = &self.stop_list {
            params.stop_list = Some(v.clone());
        }
        if let Some(v) = &self.stop_list_language {
            params.stop_list_language = Some(v.clone());
        }
        if let Some(v) = self.fetch_batch_size {
            params.fetch_batch_size = Some(v);
        }

        Ok(params)
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
