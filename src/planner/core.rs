use std::io;
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

use tracing::{debug, warn};

use crate::common::online_cpus;
use crate::config::Affinity;
use crate::error::{FreqError, Result};
use crate::worker::{ChunkRange, WorkerOutput, process_chunk};

/// Split `[0, file_size)` into `workers` contiguous raw ranges.
///
/// Every range is `file_size / workers` bytes except the last, whose end is
/// forced to `file_size` so it absorbs the division remainder. With more
/// workers than bytes the chunk size is 0 and only the last range is
/// non-empty.
pub fn plan(file_size: u64, workers: NonZeroUsize) -> Vec<ChunkRange> {
    let n = workers.get() as u64;
    let chunk = file_size / n;
    let mut ranges: Vec<ChunkRange> = (0..n)
        .map(|i| ChunkRange::new(i * chunk, (i + 1) * chunk))
        .collect();
    if let Some(last) = ranges.last_mut() {
        last.end = file_size;
    }
    ranges
}

/// Bind the calling thread to one logical CPU.
#[cfg(target_os = "linux")]
pub fn pin_current_thread(cpu: usize) -> io::Result<()> {
    // SAFETY: cpu_set_t is plain data; CPU_SET bounds-checks against its
    // capacity and sched_setaffinity(0, ..) targets only the caller.
    unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(cpu, &mut set);
        if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn pin_current_thread(_cpu: usize) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "thread affinity is only supported on Linux",
    ))
}

/// Run one worker per range and join them all.
///
/// Workers are scoped OS threads created once; each opens the input on its
/// own and owns its table, so nothing is shared until the join. Outputs are
/// returned in plan order. The first failing worker (by index) fails the run.
pub fn dispatch(
    path: &Path,
    ranges: &[ChunkRange],
    affinity: Affinity,
    buckets: usize,
) -> Result<Vec<WorkerOutput>> {
    let cpus = online_cpus();
    let shared = ranges.len() > 1;
    debug!(workers = ranges.len(), cpus, ?affinity, "dispatching workers");

    thread::scope(|s| -> Result<Vec<WorkerOutput>> {
        let mut handles = Vec::with_capacity(ranges.len());
        for (index, &raw) in ranges.iter().enumerate() {
            let handle = thread::Builder::new()
                .name(format!("fwordfreq-{}", index))
                .spawn_scoped(s, move || {
                    if affinity.is_pinned() {
                        let cpu = index % cpus;
                        // Placement is only a hint; counting is unaffected.
                        if let Err(e) = pin_current_thread(cpu) {
                            warn!(worker = index, cpu, error = %e, "could not pin worker");
                        }
                    }
                    process_chunk(path, index, raw, buckets, shared)
                })
                .map_err(|source| FreqError::Spawn { index, source })?;
            handles.push(handle);
        }

        handles
            .into_iter()
            .enumerate()
            .map(|(index, h)| h.join().map_err(|_| FreqError::WorkerPanicked { index })?)
            .collect()
    })
}
