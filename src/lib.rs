/// Use mimalloc as the global allocator.
/// Every distinct word is a small boxed allocation made concurrently by
/// several workers; mimalloc's thread-local caching keeps that cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod boundary;
pub mod common;
pub mod config;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod planner;
pub mod table;
pub mod worker;

pub use config::{Affinity, Config, ReportOrder};
pub use error::{ConfigError, FreqError};
pub use pipeline::{CountReport, count_file};
pub use table::FreqTable;
