//! Settings snapshot
//!
//! [`Settings`] gathers the build-time constants of [`crate::settings`] into
//! one serialisable value. Devices exchanging exports must agree on the
//! widths of traces, device identifiers, hop counts and reals, so a deployed
//! build can publish its snapshot as TOML and check the snapshot of a peer
//! with [`Settings::ensure_compatible`].
//!
//! # Example
//!
//! ```ignore
//! use fieldcalc_core::Settings;
//!
//! let local = Settings::current();
//! let peer = Settings::from_toml(&manifest)?;
//! local.ensure_compatible(&peer)?;
//! ```

use crate::error::{ConfigError, Result};
use crate::settings::{self, Configuration, Environment, System};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Serialisable view of the build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// System class
    pub system: System,
    /// Environment
    pub environment: Environment,
    /// Configuration
    pub configuration: Configuration,
    /// Rounds computed by parallel threads
    pub parallel: bool,
    /// Many simultaneous events expected
    pub synchronised: bool,
    /// Number of export cells (1 or 2)
    pub export_num: u8,
    /// Exports handled through shared pointers
    pub export_ptr: bool,
    /// Old messages dropped as new ones arrive
    pub online_drop: bool,
    /// Incoming messages pushed rather than pulled
    pub message_push: bool,
    /// Values pushed to aggregators rather than pulled
    pub value_push: bool,
    /// Lossy trace pushes reported
    pub warning_trace: bool,
    /// Bit width of reals (32 or 64)
    pub real_bits: u32,
    /// Bit width of trace hashes (16 or 64)
    pub trace_bits: u32,
    /// Bit width of device identifiers
    pub device_bits: u32,
    /// Bit width of hop counts
    pub hops_bits: u32,
    /// Real-time factor
    pub realtime: f64,
    /// Negligible time difference
    pub time_epsilon: f64,
    /// Worker threads
    pub threads: usize,
    /// Minimum refresh rate of graphical representations
    pub refresh_rate: f64,
    /// Antialiasing factor
    pub antialias: u32,
    /// Definition of spheres
    pub sphericity: u32,
    /// Granularity of tail snapshots
    pub tail_granularity: u32,
    /// Maximum number of field elements displayed
    pub field_draw_limit: u32,
}

impl Settings {
    /// Snapshot of the settings this crate was built with
    pub fn current() -> Self {
        Self {
            system: settings::SYSTEM,
            environment: settings::ENVIRONMENT,
            configuration: settings::CONFIGURATION,
            parallel: settings::PARALLEL,
            synchronised: settings::SYNCHRONISED,
            export_num: settings::EXPORT_NUM,
            export_ptr: settings::EXPORT_PTR,
            online_drop: settings::ONLINE_DROP,
            message_push: settings::MESSAGE_PUSH,
            value_push: settings::VALUE_PUSH,
            warning_trace: settings::WARNING_TRACE,
            real_bits: (std::mem::size_of::<settings::Real>() * 8) as u32,
            trace_bits: settings::TRACE_BITS,
            device_bits: settings::DEVICE_BITS,
            hops_bits: settings::HOPS_BITS,
            realtime: f64::from(settings::REALTIME),
            time_epsilon: f64::from(settings::TIME_EPSILON),
            threads: settings::threads(),
            refresh_rate: f64::from(settings::REFRESH_RATE),
            antialias: settings::ANTIALIAS,
            sphericity: settings::SPHERICITY,
            tail_granularity: settings::TAIL_GRANULARITY,
            field_draw_limit: settings::FIELD_DRAW_LIMIT,
        }
    }

    /// Parse a snapshot from TOML and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Render the snapshot as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check every setting against its enumerated domain
    pub fn validate(&self) -> Result<()> {
        check("export_num", self.export_num, &[1, 2])?;
        check("real_bits", self.real_bits, &[32, 64])?;
        check("trace_bits", self.trace_bits, &[16, 64])?;
        check("device_bits", self.device_bits, &[8, 16, 24, 32, 48, 64])?;
        check("hops_bits", self.hops_bits, &[8, 16, 32])?;
        if self.threads == 0 {
            return Err(invalid("threads", self.threads));
        }
        if self.time_epsilon.is_nan() || self.time_epsilon < 0.0 {
            return Err(invalid("time_epsilon", self.time_epsilon));
        }
        if self.realtime.is_nan() || self.realtime <= 0.0 {
            return Err(invalid("realtime", self.realtime));
        }
        if self.antialias == 0 {
            return Err(invalid("antialias", self.antialias));
        }
        if self.sphericity == 0 {
            return Err(invalid("sphericity", self.sphericity));
        }
        Ok(())
    }

    /// Check that a peer build can exchange exports with this one
    ///
    /// Both snapshots must be valid and agree on every width that shapes
    /// exchanged data. The first mismatch is reported.
    pub fn ensure_compatible(&self, peer: &Settings) -> Result<()> {
        self.validate()?;
        peer.validate()?;
        same("trace_bits", self.trace_bits, peer.trace_bits)?;
        same("device_bits", self.device_bits, peer.device_bits)?;
        same("hops_bits", self.hops_bits, peer.hops_bits)?;
        same("real_bits", self.real_bits, peer.real_bits)?;
        Ok(())
    }

    /// Emit the snapshot as a structured log event
    pub fn log(&self) {
        info!(
            system = ?self.system,
            environment = ?self.environment,
            configuration = ?self.configuration,
            parallel = self.parallel,
            threads = self.threads,
            export_num = self.export_num,
            trace_bits = self.trace_bits,
            device_bits = self.device_bits,
            hops_bits = self.hops_bits,
            "fieldcalc settings"
        );
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::current()
    }
}

fn invalid(setting: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        setting,
        value: value.to_string(),
    }
}

fn check<T: PartialEq + ToString>(setting: &'static str, value: T, allowed: &[T]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(setting, value))
    }
}

fn same(setting: &'static str, local: u32, peer: u32) -> Result<()> {
    if local == peer {
        Ok(())
    } else {
        Err(ConfigError::Incompatible {
            setting,
            local: local.to_string(),
            peer: peer.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_current_is_valid() {
        Settings::current().validate().unwrap();
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings::current();
        let text = settings.to_toml().unwrap();
        let parsed = Settings::from_toml(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_invalid_trace_width() {
        let mut settings = Settings::current();
        settings.trace_bits = 24;
        match settings.validate() {
            Err(ConfigError::Invalid { setting, value }) => {
                assert_eq!(setting, "trace_bits");
                assert_eq!(value, "24");
            }
            other => panic!("expected invalid trace width, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_export_num() {
        let mut settings = Settings::current();
        settings.export_num = 3;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { setting: "export_num", .. })
        ));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let mut settings = Settings::current();
        settings.threads = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_incompatible_device_width() {
        let local = Settings::current();
        let mut peer = local.clone();
        peer.device_bits = if local.device_bits == 8 { 16 } else { 8 };
        match local.ensure_compatible(&peer) {
            Err(ConfigError::Incompatible { setting, .. }) => assert_eq!(setting, "device_bits"),
            other => panic!("expected incompatibility, got {:?}", other),
        }
    }

    #[test]
    fn test_compatible_ignores_presentation() {
        let local = Settings::current();
        let mut peer = local.clone();
        peer.refresh_rate = 1.0;
        peer.threads = local.threads + 3;
        peer.antialias = 1;
        local.ensure_compatible(&peer).unwrap();
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Settings::from_toml("trace_bits = "),
            Err(ConfigError::Parse(_))
        ));
    }

    proptest! {
        #[test]
        fn trace_width_outside_domain_rejected(bits in any::<u32>()) {
            prop_assume!(bits != 16 && bits != 64);
            let mut settings = Settings::current();
            settings.trace_bits = bits;
            prop_assert!(settings.validate().is_err());
        }

        #[test]
        fn threads_do_not_affect_compatibility(threads in 1usize..1024) {
            let local = Settings::current();
            let peer = Settings { threads, ..local.clone() };
            prop_assert!(local.ensure_compatible(&peer).is_ok());
        }
    }
}
