//! Execution policies for per-device loops
//!
//! The host parallelism model the locks of this crate guard: a loop over
//! devices either runs on the calling thread or is spread over a `rayon`
//! pool with a fixed number of workers. Workers pull indices from a shared
//! counter, so uneven per-device costs balance out.

use fieldcalc_core::{threads, PARALLEL};
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// How a loop over devices is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// On the calling thread
    Sequential,
    /// On a pool of worker threads
    Parallel {
        /// Number of workers (at least 1)
        threads: usize,
    },
}

impl Execution {
    /// Parallel with `threads` workers if `P` is true, sequential otherwise
    pub const fn general<const P: bool>(threads: usize) -> Self {
        if P {
            Execution::Parallel { threads }
        } else {
            Execution::Sequential
        }
    }

    /// Policy of this build: parallel over all cores iff `PARALLEL`
    pub fn from_settings() -> Self {
        Self::general::<{ PARALLEL }>(threads())
    }

    /// Number of threads the loop body may run on
    pub fn threads(&self) -> usize {
        match *self {
            Execution::Sequential => 1,
            Execution::Parallel { threads } => threads.max(1),
        }
    }
}

impl Default for Execution {
    fn default() -> Self {
        Self::from_settings()
    }
}

/// Run `f(index, thread)` for every index in `0..len`
///
/// `thread` is the worker number in `0..exec.threads()`. A parallel policy
/// with a single worker, or a pool that cannot be built, runs sequentially.
pub fn parallel_for<F>(exec: Execution, len: usize, f: F)
where
    F: Fn(usize, usize) + Sync,
{
    let workers = exec.threads();
    if workers == 1 || len <= 1 {
        (0..len).for_each(|i| f(i, 0));
        return;
    }
    let pool = match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, workers, "worker pool unavailable, running sequentially");
            (0..len).for_each(|i| f(i, 0));
            return;
        }
    };
    debug!(workers, len, "parallel_for");
    let next = AtomicUsize::new(0);
    pool.broadcast(|ctx| loop {
        let i = next.fetch_add(1, Ordering::Relaxed);
        if i >= len {
            break;
        }
        f(i, ctx.index());
    });
}

/// Run `f(thread)` repeatedly on every worker until it returns false
///
/// Each worker stops independently the first time its call returns false.
pub fn parallel_while<F>(exec: Execution, f: F)
where
    F: Fn(usize) -> bool + Sync,
{
    let workers = exec.threads();
    if workers == 1 {
        while f(0) {}
        return;
    }
    let pool = match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, workers, "worker pool unavailable, running sequentially");
            while f(0) {}
            return;
        }
    };
    debug!(workers, "parallel_while");
    pool.broadcast(|ctx| while f(ctx.index()) {});
}
