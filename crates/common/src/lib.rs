//! Switchable storage primitives for fieldcalc
//!
//! - [`Optional`]: a value stored only when a const flag is on
//! - [`Twin`]: two accessors over one shared cell or two separate cells

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod option;
pub mod twin;

pub use option::{Optional, Storage};
pub use twin::{ExportTwin, Mirror, Twin};
