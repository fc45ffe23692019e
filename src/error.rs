//! Error types for fwordfreq
//!
//! Every failure in this crate is a setup failure: the input cannot be
//! stat'ed or opened, a worker cannot be spawned, or the configuration is
//! invalid. None are retried; the run aborts with no partial report.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::io_error_msg;

/// Top-level error type for a counting run
#[derive(Error, Debug)]
pub enum FreqError {
    /// Size query on the input failed
    #[error("{}: cannot stat: {}", path.display(), io_error_msg(source))]
    Stat { path: PathBuf, source: io::Error },

    /// A worker could not open or map its own handle on the input
    #[error("{}: {}", path.display(), io_error_msg(source))]
    Open { path: PathBuf, source: io::Error },

    /// The OS refused to create a worker thread
    #[error("failed to spawn worker {index}: {}", io_error_msg(source))]
    Spawn { index: usize, source: io::Error },

    /// A worker panicked before returning its table
    #[error("worker {index} panicked")]
    WorkerPanicked { index: usize },

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O errors while writing the report
    #[error("write error: {}", io_error_msg(.0))]
    Io(#[from] io::Error),
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("number of threads must be at least 1")]
    ZeroWorkers,

    #[error("bucket count must be at least 1")]
    ZeroBuckets,

    #[error("invalid affinity '{0}': expected 0 or 1")]
    InvalidAffinity(u8),
}

pub type Result<T> = std::result::Result<T, FreqError>;
