//! One counting run: stat, plan, dispatch, join, merge.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::common::io::file_size;
use crate::config::Config;
use crate::error::{FreqError, Result};
use crate::merge::merge_all;
use crate::planner::{dispatch, plan};
use crate::table::FreqTable;

/// Result of a completed run.
#[derive(Debug)]
pub struct CountReport {
    /// Merged counts over the whole input
    pub table: FreqTable,
    /// Tokens seen across all workers
    pub tokens: u64,
    pub file_size: u64,
    pub workers: usize,
    /// Wall-clock time for planning, scanning and merging
    pub elapsed: Duration,
}

/// Count word frequencies of `config.path` with `config.workers` workers.
///
/// Any setup failure (stat, open, spawn) aborts the run; no partial table
/// is returned.
pub fn count_file(config: &Config) -> Result<CountReport> {
    let size = file_size(&config.path).map_err(|source| FreqError::Stat {
        path: config.path.clone(),
        source,
    })?;

    let start = Instant::now();
    let ranges = plan(size, config.workers);
    debug!(
        file_size = size,
        workers = ranges.len(),
        chunk = size / config.workers.get() as u64,
        "planned chunks"
    );

    let outputs = dispatch(&config.path, &ranges, config.affinity, config.buckets)?;
    let tokens: u64 = outputs.iter().map(|o| o.tokens).sum();
    let table = merge_all(outputs, config.buckets);
    let elapsed = start.elapsed();

    debug!(
        tokens,
        distinct = table.len(),
        max_chain = table.max_chain(),
        elapsed_ms = elapsed.as_millis() as u64,
        "run complete"
    );

    Ok(CountReport {
        table,
        tokens,
        file_size: size,
        workers: ranges.len(),
        elapsed,
    })
}
