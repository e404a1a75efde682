//! Public types for the fieldcalc facade.
//!
//! This module re-exports types from the internal crates with one flat
//! interface.

// ============================================================================
// Settings
// ============================================================================

pub use fieldcalc_core::{ConfigError, Result, Settings, Switch};
pub use fieldcalc_core::{Device, Hops, Real, Times, TraceT};

// ============================================================================
// Concurrency
// ============================================================================

pub use fieldcalc_concurrency::{parallel_for, parallel_while, Execution};
pub use fieldcalc_concurrency::{Lock, LockGuard, LockSwitch, ParallelLock, UnlockGuard};
pub use fieldcalc_concurrency::{ExclusiveGuard, ParallelSharedLock, SharedGuard, SharedLock};

// ============================================================================
// Storage primitives
// ============================================================================

pub use fieldcalc_common::{ExportTwin, Mirror, Optional, Storage, Twin};

// ============================================================================
// Traces
// ============================================================================

pub use fieldcalc_trace::{code_point_of, hash_key};
pub use fieldcalc_trace::{Trace, TraceCall, TraceCycle, TraceKey, TraceReset};
pub use fieldcalc_trace::{FRAME_BITS, WIDE_BITS};
