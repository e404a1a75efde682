//! fieldcalc: compile-time switchable primitives for aggregate-computing
//! runtimes
//!
//! The runtime behaviour of a fieldcalc build is fixed by Cargo features
//! (see [`settings`]). The primitives below adapt to those features at
//! compile time, compiling out whatever the build does not need:
//!
//! - [`Lock`]: a mutex that is a no-op in sequential builds
//! - [`Optional`]: a value that is only stored when enabled
//! - [`Twin`]: one or two cells behind `first()` and `second()`
//! - [`Trace`] with its scoped helpers: code point identification
//!
//! # Example
//!
//! ```ignore
//! use fieldcalc::{Trace, TraceCall, TraceCycle};
//!
//! let mut trace = Trace::new();
//! let mut call = TraceCall::new(&mut trace, 15);
//! let mut i = TraceCycle::new(&mut call, 0);
//! while i < 3 {
//!     let point = i.hash(0);
//!     i += 1;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;

pub use types::*;

/// Build-time settings and their snapshot
pub mod settings {
    pub use fieldcalc_core::settings::*;
    pub use fieldcalc_core::{ConfigError, Settings};
}

pub use fieldcalc_trace::code_point;
