//! Execution traces for fieldcalc
//!
//! Identifies code points by the path that reached them:
//! - [`Trace`]: the hash stack itself
//! - [`TraceCall`], [`TraceKey`], [`TraceCycle`], [`TraceReset`]: scoped
//!   updates that keep pushes and pops balanced
//! - [`hash_key`] and [`code_point!`]: deterministic tags for keys and
//!   source locations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod point;
pub mod scope;
pub mod trace;

pub use fieldcalc_core::TraceT;
pub use point::{code_point_of, hash_key};
pub use scope::{TraceCall, TraceCycle, TraceKey, TraceReset};
pub use trace::{Trace, FRAME_BITS, WIDE_BITS};
