//! Core definitions for fieldcalc
//!
//! This crate holds everything the other crates are parameterised on:
//! - Settings: numeric type aliases and build-time constants
//! - Switch: the type-level boolean used to select enabled/disabled variants
//! - Settings snapshot: serialisable view of the build configuration
//! - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod settings;
pub mod switch;

pub use config::Settings;
pub use error::{ConfigError, Result};
pub use settings::*;
pub use switch::Switch;
