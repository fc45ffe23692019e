use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::TypedValueParser;
use tracing_subscriber::EnvFilter;

use wordfreq_rs::merge::write_report;
use wordfreq_rs::table::DEFAULT_BUCKETS;
use wordfreq_rs::{Config, FreqError, ReportOrder, count_file};

const TOOL_NAME: &str = "fwordfreq";

#[derive(Parser)]
#[command(
    name = "fwordfreq",
    version,
    about = "Count word frequencies of a file with a fixed pool of parallel workers",
    after_help = "Each worker scans one contiguous byte range; ranges are snapped to\n\
                  whitespace so no word is split or counted twice.\n\n\
                  EXAMPLES:\n    \
                  fwordfreq corpus.txt 8 0\n    \
                  fwordfreq corpus.txt 16 1 --sort | head"
)]
struct Cli {
    /// Input file
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Number of worker threads (at least 1)
    #[arg(value_name = "NUM_THREADS", value_parser = clap::value_parser!(u64).range(1..))]
    threads: u64,

    /// Pin worker i to CPU i mod online CPUs (1) or leave placement to the OS (0)
    #[arg(value_name = "AFFINITY", value_parser = clap::value_parser!(u8).range(0..=1))]
    affinity: u8,

    /// Buckets per frequency table
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BUCKETS,
          value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    buckets: usize,

    /// Print words by descending count instead of table order
    #[arg(long)]
    sort: bool,

    /// Log per-worker ranges and counts to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    wordfreq_rs::common::reset_sigpipe();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", TOOL_NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let order = if cli.sort {
        ReportOrder::ByCount
    } else {
        ReportOrder::Table
    };
    let workers = usize::try_from(cli.threads).context("thread count too large")?;
    let config = Config::new(cli.input, workers, cli.affinity)?
        .with_buckets(cli.buckets)?
        .with_order(order);

    let report = count_file(&config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(256 * 1024, stdout.lock());
    write_report(&mut out, &report.table, config.order, report.elapsed)
        .map_err(FreqError::Io)?;
    out.flush().map_err(FreqError::Io)?;
    Ok(())
}

/// Diagnostics go to stderr so stdout carries only the report.
fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("wordfreq_rs=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
