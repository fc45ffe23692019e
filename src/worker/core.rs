use std::path::Path;

use tracing::debug;

use crate::boundary::{align, is_space};
use crate::common::io::{map_file, map_shared, open_noatime};
use crate::error::{FreqError, Result};
use crate::table::{FreqTable, MAX_WORD_LEN};

/// Half-open byte interval `[start, end)` of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    pub fn new(start: u64, end: u64) -> Self {
        ChunkRange { start, end }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// What one worker hands back at the join point.
#[derive(Debug)]
pub struct WorkerOutput {
    /// Position of this worker in the plan.
    pub index: usize,
    /// Range assigned by the planner.
    pub raw: ChunkRange,
    /// Range actually scanned after boundary correction.
    pub corrected: ChunkRange,
    /// Tokens counted, including truncated ones.
    pub tokens: u64,
    pub table: FreqTable,
}

/// Snap both ends of `raw` to word boundaries of `data`.
///
/// Neighbouring chunks share a raw offset and `align` maps it to the same
/// corrected offset for both, so corrected ranges of a plan tile the data
/// with no gap or overlap.
pub fn correct_range(data: &[u8], raw: ChunkRange) -> ChunkRange {
    let start = align(data, clamp(raw.start, data.len()));
    let end = align(data, clamp(raw.end, data.len()));
    ChunkRange::new(start as u64, end.max(start) as u64)
}

#[inline]
fn clamp(offset: u64, len: usize) -> usize {
    usize::try_from(offset).map_or(len, |o| o.min(len))
}

/// Count every whitespace-delimited token of `data` into `table`.
///
/// Tokens longer than `MAX_WORD_LEN` are cut to their first `MAX_WORD_LEN`
/// bytes and counted once. Returns the number of tokens seen.
pub fn count_tokens(data: &[u8], table: &mut FreqTable) -> u64 {
    let len = data.len();
    let mut pos = 0;
    let mut tokens = 0u64;

    loop {
        while pos < len && is_space(data[pos]) {
            pos += 1;
        }
        if pos >= len {
            break;
        }
        let start = pos;
        while pos < len && !is_space(data[pos]) {
            pos += 1;
        }
        let end = pos.min(start + MAX_WORD_LEN);
        table.insert(&data[start..end]);
        tokens += 1;
    }
    tokens
}

/// Boundary-correct `raw` against `data`, then count its tokens into a
/// fresh table with `buckets` buckets.
pub fn count_chunk(data: &[u8], index: usize, raw: ChunkRange, buckets: usize) -> WorkerOutput {
    let corrected = correct_range(data, raw);
    let mut table = FreqTable::with_buckets(buckets);
    let tokens = count_tokens(
        &data[corrected.start as usize..corrected.end as usize],
        &mut table,
    );
    debug!(
        worker = index,
        raw_start = raw.start,
        raw_end = raw.end,
        start = corrected.start,
        end = corrected.end,
        tokens,
        distinct = table.len(),
        "chunk counted"
    );
    WorkerOutput {
        index,
        raw,
        corrected,
        tokens,
        table,
    }
}

/// Worker entry point: open a private read-only view of `path` and count
/// the chunk `raw`. An open or map failure aborts the whole run.
///
/// `shared` is set when other workers scan the same file; the view is then
/// always a mapping so no worker copies bytes outside its range. An empty
/// raw range owns no word, so the file is opened but never read.
pub fn process_chunk(
    path: &Path,
    index: usize,
    raw: ChunkRange,
    buckets: usize,
    shared: bool,
) -> Result<WorkerOutput> {
    let open_err = |source| FreqError::Open {
        path: path.to_path_buf(),
        source,
    };
    if raw.is_empty() {
        open_noatime(path).map_err(open_err)?;
        return Ok(count_chunk(&[], index, raw, buckets));
    }
    let data = if shared {
        map_shared(path)
    } else {
        map_file(path)
    }
    .map_err(open_err)?;
    Ok(count_chunk(&data, index, raw, buckets))
}
