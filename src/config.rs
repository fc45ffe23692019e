//! Run configuration, validated once before any worker starts.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::table::DEFAULT_BUCKETS;

/// Whether worker `i` is bound to CPU `i mod online_cpus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Affinity {
    /// Leave placement to the OS scheduler
    #[default]
    Off,
    /// Pin each worker to one logical CPU
    Pinned,
}

impl Affinity {
    #[inline]
    pub fn is_pinned(self) -> bool {
        self == Affinity::Pinned
    }
}

impl TryFrom<u8> for Affinity {
    type Error = ConfigError;

    fn try_from(flag: u8) -> Result<Self, ConfigError> {
        match flag {
            0 => Ok(Affinity::Off),
            1 => Ok(Affinity::Pinned),
            other => Err(ConfigError::InvalidAffinity(other)),
        }
    }
}

/// Order of the per-word lines in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportOrder {
    /// Table iteration order; unspecified but cheap
    #[default]
    Table,
    /// Descending count, ties by byte order
    ByCount,
}

/// Everything a counting run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub workers: NonZeroUsize,
    pub affinity: Affinity,
    /// Buckets per frequency table (every worker's and the global one)
    pub buckets: usize,
    pub order: ReportOrder,
}

impl Config {
    /// Validate the three positional parameters of a run.
    pub fn new(path: impl Into<PathBuf>, workers: usize, affinity: u8) -> Result<Self, ConfigError> {
        let workers = NonZeroUsize::new(workers).ok_or(ConfigError::ZeroWorkers)?;
        Ok(Config {
            path: path.into(),
            workers,
            affinity: Affinity::try_from(affinity)?,
            buckets: DEFAULT_BUCKETS,
            order: ReportOrder::default(),
        })
    }

    pub fn with_buckets(mut self, buckets: usize) -> Result<Self, ConfigError> {
        if buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        self.buckets = buckets;
        Ok(self)
    }

    pub fn with_order(mut self, order: ReportOrder) -> Self {
        self.order = order;
        self
    }
}
