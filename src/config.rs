//! Engine configuration.

use std::num::NonZero;

use serde::Deserialize;

const FALLBACK_WORKERS: usize = 4;

/// Settings shared by every query an [`Engine`](crate::Engine) runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Threads in the worker pool built for each concurrent query. Never zero.
    pub workers: usize,
}

impl EngineConfig {
    /// A configuration with `workers` threads per query, raised to 1 if zero.
    pub fn with_workers(workers: usize) -> Self {
        Self { workers: workers.max(1) }
    }

    pub(crate) fn worker_count(&self) -> usize {
        self.workers.max(1)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(NonZero::get)
                .unwrap_or(FALLBACK_WORKERS),
        }
    }
}
