//! Error types for settings handling
//!
//! Invalid feature combinations never reach runtime: they are rejected by
//! `compile_error!`/const assertions in [`crate::settings`]. The errors here
//! cover settings snapshots read back from text, e.g. the manifest of a peer
//! device.

use thiserror::Error;

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while parsing or checking a settings snapshot
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The snapshot is not valid TOML or misses fields
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The snapshot could not be rendered as TOML
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A setting holds a value outside its enumerated domain
    #[error("invalid value {value} for setting `{setting}`")]
    Invalid {
        /// Name of the offending setting
        setting: &'static str,
        /// The rejected value
        value: String,
    },

    /// Two builds disagree on a setting that must match across devices
    #[error("incompatible setting `{setting}`: local {local}, peer {peer}")]
    Incompatible {
        /// Name of the mismatching setting
        setting: &'static str,
        /// Value in this build
        local: String,
        /// Value in the other build
        peer: String,
    },
}
