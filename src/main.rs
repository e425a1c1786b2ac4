//! genome-tui - Terminal front-end for a genomic prediction service
//!
//! ## Usage
//!
//! ```bash
//! genome-tui                          # interactive, Turkish interface
//! genome-tui --lang en region.fa      # prefill the sequence form
//! genome-tui --variant chr22:36201698:A>C --tissue colon -o result.json
//! genome-tui --interval chr22:35677410-36725986 -o -
//! ```
//!
//! ## Keys
//!
//! - `1/2/3`: Sequence, variant, interval analysis
//! - `j/k`, `h/l`: Move between fields, change choices
//! - `r`: Analyze
//! - `:q`: Quit
//! - `?`: Help

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use genome_tui::client::{ClientFactory, HttpClientFactory};
use genome_tui::config::Settings;
use genome_tui::controller::{run_app, Analyzer};
use genome_tui::fasta::load_sequence_file;
use genome_tui::genome::{
    Interval, IntervalQuery, Organism, OutputType, Query, SequenceQuery, Target, Tissue, Variant,
    VariantQuery,
};
use genome_tui::i18n::Language;
use genome_tui::model::AppState;
use genome_tui::outcome::AnalysisOutcome;
use genome_tui::present::{download_filename, to_downloadable};
use genome_tui::request::RequestBuilder;
use genome_tui::ui::select_glyphs;

/// genome-tui - Sequence, variant and interval predictions from the terminal
///
/// Without -o/--output, opens the interactive interface.
/// With -o/--output, runs one analysis and writes the JSON result to a file
/// (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA or plain text file with the DNA sequence to analyze
    file: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Interface language
    #[arg(short = 'l', long = "lang", value_enum)]
    lang: Option<Language>,

    /// Base URL of the prediction service
    #[arg(long = "endpoint")]
    endpoint: Option<String>,

    /// Use emoji glyphs
    #[arg(long = "fancy")]
    fancy: bool,

    /// Log to a file in the temp directory (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output file (enables headless mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Variant to score in headless mode, e.g. chr22:36201698:A>C
    #[arg(long = "variant", conflicts_with_all = ["interval", "file"])]
    variant: Option<Variant>,

    /// Interval to predict in headless mode, e.g. chr22:35677410-36725986
    #[arg(long = "interval", conflicts_with = "file")]
    interval: Option<Interval>,

    /// Organism for headless mode
    #[arg(long = "organism", value_enum, default_value_t = Organism::Human)]
    organism: Organism,

    /// Tissue for headless mode
    #[arg(long = "tissue", value_enum, default_value_t = Tissue::Lung)]
    tissue: Tissue,

    /// Output type for headless mode
    #[arg(long = "output-type", value_enum, default_value_t = OutputType::RnaSeq)]
    output_type: OutputType,
}

/// Starts file logging when `-v` is given. The guard must live until exit.
fn init_logging(verbose: u8) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => return Ok(None),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let file_name = format!("genome-tui-{:08x}.log", rand::random::<u32>());
    let log_dir = std::env::temp_dir();
    let appender = tracing_appender::rolling::never(&log_dir, &file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    eprintln!("Logging to {}", log_dir.join(&file_name).display());
    Ok(Some(guard))
}

/// Builds the single query of headless mode.
fn headless_query(args: &Args) -> Result<Query> {
    let target = Target {
        organism: args.organism,
        tissue: args.tissue,
        output: args.output_type,
    };

    if let Some(variant) = args.variant {
        return Ok(Query::Variant(VariantQuery { target, variant }));
    }
    if let Some(interval) = args.interval {
        return Ok(Query::Interval(IntervalQuery { target, interval }));
    }
    match &args.file {
        Some(path) => {
            let loaded = load_sequence_file(path)
                .with_context(|| format!("Cannot read sequence file {}", path.display()))?;
            if loaded.record_count > 1 {
                warn!(
                    "{} holds {} records, analyzing the first one",
                    path.display(),
                    loaded.record_count
                );
            }
            Ok(Query::Sequence(SequenceQuery {
                target,
                sequence: loaded.data,
            }))
        }
        None => bail!("Headless mode needs --variant, --interval or a sequence file"),
    }
}

/// Runs headless mode: one analysis, JSON result to file or stdout.
fn run_cli_mode(
    args: &Args,
    settings: &Settings,
    analyzer: &Analyzer,
    output: &str,
) -> Result<()> {
    let query = headless_query(args)?;
    let api_key = settings.api_key.as_deref().unwrap_or("").trim();

    let lang = settings.language;

    let record = analyzer
        .prepare(api_key, &query)
        .and_then(|request| analyzer.submit(api_key, &request))
        .map_err(|err| anyhow::anyhow!(err.localized(lang)))?;
    let kind = record.kind();
    let file_name = download_filename(&record);
    let bytes = to_downloadable(&AnalysisOutcome::Success(record))?;

    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&bytes)?;
    } else {
        std::fs::write(output, &bytes).with_context(|| format!("Cannot write {}", output))?;
        eprintln!("Wrote {} result to {} (default name: {})", kind, output, file_name);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(args.verbose)?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(lang) = args.lang {
        settings.language = lang;
    }
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = Some(endpoint.clone());
    }
    if args.fancy {
        settings.fancy = true;
    }
    settings.validate()?;

    let factory: Option<Box<dyn ClientFactory>> = settings.endpoint().map(|endpoint| {
        Box::new(HttpClientFactory::new(endpoint, settings.timeout())) as Box<dyn ClientFactory>
    });
    info!(
        "Starting genome-tui (service configured: {}, flank: {})",
        factory.is_some(),
        settings.flank
    );
    let analyzer = Analyzer::new(factory, RequestBuilder::new(settings.flank));

    // Headless mode: output to file/stdout
    if let Some(output) = &args.output {
        return run_cli_mode(&args, &settings, &analyzer, output);
    }

    let mut state = AppState::new(settings.language, analyzer.is_available());
    if let Some(key) = &settings.api_key {
        state.api_key = key.trim().to_string();
    }
    if let Some(path) = &args.file {
        state.load_sequence(path);
    }

    run_app(state, analyzer, select_glyphs(settings.fancy))
}
