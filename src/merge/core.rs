use std::io::{self, Write};
use std::time::Duration;

use tracing::debug;

use crate::config::ReportOrder;
use crate::table::FreqTable;
use crate::worker::WorkerOutput;

/// Fold every worker's table into a fresh global table.
///
/// Runs strictly after the join, single-threaded, in worker index order.
/// Each private table is dropped as soon as it has been folded in; empty
/// ones (workers whose range held no word) are dropped without a merge.
pub fn merge_all(outputs: Vec<WorkerOutput>, buckets: usize) -> FreqTable {
    let mut global = FreqTable::with_buckets(buckets);
    for out in outputs {
        if out.table.is_empty() {
            continue;
        }
        global.merge(&out.table);
        debug!(
            worker = out.index,
            distinct = out.table.len(),
            global = global.len(),
            "merged worker table"
        );
    }
    global
}

/// Write one `word: count` line per entry, a blank line, then the totals.
///
/// Words are written as raw bytes; nothing is assumed about their encoding.
pub fn write_report(
    out: &mut impl Write,
    table: &FreqTable,
    order: ReportOrder,
    elapsed: Duration,
) -> io::Result<()> {
    let mut itoa_buf = itoa::Buffer::new();
    match order {
        ReportOrder::Table => {
            for (word, count) in table {
                write_line(out, &mut itoa_buf, word, count)?;
            }
        }
        ReportOrder::ByCount => {
            for (word, count) in table.sorted_by_count() {
                write_line(out, &mut itoa_buf, word, count)?;
            }
        }
    }

    write!(
        out,
        "\nTotal unique words: {}\nExecution time: {:.2} seconds\n",
        table.len(),
        elapsed.as_secs_f64()
    )?;
    out.flush()
}

#[inline]
fn write_line<W: Write>(
    out: &mut W,
    itoa_buf: &mut itoa::Buffer,
    word: &[u8],
    count: u64,
) -> io::Result<()> {
    out.write_all(word)?;
    out.write_all(b": ")?;
    out.write_all(itoa_buf.format(count).as_bytes())?;
    out.write_all(b"\n")
}
