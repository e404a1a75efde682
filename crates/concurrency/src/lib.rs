//! Concurrency layer for fieldcalc
//!
//! - [`Lock`]: mutual exclusion compiled in or out by a const flag, with the
//!   scoped [`LockGuard`] and [`UnlockGuard`]
//! - [`SharedLock`]: reader-writer locking, switchable the same way
//! - [`Execution`], [`parallel_for`], [`parallel_while`]: the worker model
//!   the locks guard in parallel builds

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod execution;
pub mod lock;
pub mod shared;

pub use execution::{parallel_for, parallel_while, Execution};
pub use lock::{Lock, LockGuard, LockSwitch, ParallelLock, UnlockGuard};
pub use shared::{ExclusiveGuard, ParallelSharedLock, SharedGuard, SharedLock, SharedSwitch};
