//! Command implementations for Freqscope CLI.

use std::io::Write;
use std::time::Instant;

use log::info;

use crate::backend::{DatasetProvider, StaticBackend, StaticDatasets};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::frequency::{AnalysisStrategy, FrequencyAnalyzer};
use crate::term_vector::TermVectorDecoder;

/// Dataset id under which the dataset file is registered.
const CLI_DATASET: &str = "cli";

/// Execute a CLI command.
pub fn execute_command(args: FreqscopeArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => run_analysis(analyze_args.clone(), &args),
        Command::Strategy(strategy_args) => show_strategy(strategy_args.clone(), &args),
    }
}

/// Run a frequency analysis.
fn run_analysis(args: AnalyzeArgs, cli_args: &FreqscopeArgs) -> Result<()> {
    // Validate before touching the payload.
    let config = AnalysisConfig::from_params(args.config.to_params()?)?;
    let strategy = AnalysisStrategy::select(&config);

    if cli_args.verbosity() > 1 {
        println!("Payload: {}", args.payload.display());
        println!("Dataset: {}", args.dataset.display());
        println!("Strategy: {strategy}");
    }

    let mut datasets = StaticDatasets::new();
    datasets.load_file(CLI_DATASET, &args.dataset)?;
    let dataset = datasets.dataset(CLI_DATASET)?;

    let backend = StaticBackend::from_file(&args.payload, args.corpus_size)?;
    let decoder = match &args.field {
        Some(field) => TermVectorDecoder::for_field(field.clone()),
        None => TermVectorDecoder::new(),
    };
    let analyzer = FrequencyAnalyzer::new(&backend).with_decoder(decoder);

    let start_time = Instant::now();
    let mut report = |percent: u8| {
        let mut stderr = std::io::stderr();
        let _ = writeln!(stderr, "progress: {percent}%");
    };
    let progress: Option<&mut dyn FnMut(u8)> = if args.progress {
        Some(&mut report)
    } else {
        None
    };

    let result = analyzer.analyze(&dataset, &config, progress)?;
    let duration = start_time.elapsed();
    info!("analysis finished in {}ms", duration.as_millis());

    match cli_args.output_format {
        OutputFormat::Json => output_result("Analysis complete", &result, cli_args),
        OutputFormat::Human => output_result(
            "Analysis complete",
            &AnalysisSummary::new(
                strategy,
                dataset.len(),
                &result,
                args.top,
                duration.as_millis() as u64,
            ),
            cli_args,
        ),
    }
}

/// Show which strategy a configuration selects.
fn show_strategy(args: StrategyArgs, cli_args: &FreqscopeArgs) -> Result<()> {
    let config = AnalysisConfig::from_params(args.config.to_params()?)?;

    output_result(
        "Strategy selected",
        &StrategyReport {
            strategy: AnalysisStrategy::select(&config),
            block_size: config.block_size(),
            num_blocks: config.num_blocks(),
            ngram_size: config.ngram_size(),
            stemming: config.stemming().to_string(),
            last_block: config.last_block().to_string(),
        },
        cli_args,
    )
}
