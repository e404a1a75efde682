//! Build-time settings
//!
//! Every setting is fixed by Cargo features. A group of mutually exclusive
//! features left empty falls back to the default of the selected system
//! class or environment; enabling two features of the same group is a
//! compile error.
//!
//! | group | features | default |
//! |-------|----------|---------|
//! | system | `embedded` | general |
//! | environment | `env-logical`, `env-physical` | simulated |
//! | configuration | `dependent` | standalone |
//! | parallel | `parallel`, `serial` | on for logical environments |
//! | synchronised | `synchronised`, `unsynchronised` | on for logical environments |
//! | exports | `exports-1`, `exports-2` | 2 for physical environments |
//! | export by pointer | `export-ptr`, `export-value` | off for physical environments |
//! | online drop | `online-drop`, `round-drop` | on for physical environments |
//! | trace width | `trace-16`, `trace-64` | 64 (general), 16 (embedded) |
//! | device width | `device-8` ... `device-64` | 32 (general), 16 (embedded) |
//! | hop width | `hops-8`, `hops-16`, `hops-32` | 16 (general), 8 (embedded) |

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

// ============================================================================
// Feature validation
// ============================================================================

const fn count(flags: &[bool]) -> usize {
    let mut i = 0;
    let mut n = 0;
    while i < flags.len() {
        if flags[i] {
            n += 1;
        }
        i += 1;
    }
    n
}

const _: () = assert!(
    count(&[cfg!(feature = "env-logical"), cfg!(feature = "env-physical")]) <= 1,
    "features `env-logical` and `env-physical` are mutually exclusive"
);
const _: () = assert!(
    count(&[cfg!(feature = "parallel"), cfg!(feature = "serial")]) <= 1,
    "features `parallel` and `serial` are mutually exclusive"
);
const _: () = assert!(
    count(&[cfg!(feature = "synchronised"), cfg!(feature = "unsynchronised")]) <= 1,
    "features `synchronised` and `unsynchronised` are mutually exclusive"
);
const _: () = assert!(
    count(&[cfg!(feature = "exports-1"), cfg!(feature = "exports-2")]) <= 1,
    "features `exports-1` and `exports-2` are mutually exclusive"
);
const _: () = assert!(
    count(&[cfg!(feature = "export-ptr"), cfg!(feature = "export-value")]) <= 1,
    "features `export-ptr` and `export-value` are mutually exclusive"
);
const _: () = assert!(
    count(&[cfg!(feature = "online-drop"), cfg!(feature = "round-drop")]) <= 1,
    "features `online-drop` and `round-drop` are mutually exclusive"
);

#[cfg(all(feature = "trace-16", feature = "trace-64"))]
compile_error!("at most one `trace-*` feature may be enabled");

#[cfg(any(
    all(feature = "device-8", any(feature = "device-16", feature = "device-24", feature = "device-32", feature = "device-48", feature = "device-64")),
    all(feature = "device-16", any(feature = "device-24", feature = "device-32", feature = "device-48", feature = "device-64")),
    all(feature = "device-24", any(feature = "device-32", feature = "device-48", feature = "device-64")),
    all(feature = "device-32", any(feature = "device-48", feature = "device-64")),
    all(feature = "device-48", feature = "device-64"),
))]
compile_error!("at most one `device-*` feature may be enabled");

#[cfg(any(
    all(feature = "hops-8", any(feature = "hops-16", feature = "hops-32")),
    all(feature = "hops-16", feature = "hops-32"),
))]
compile_error!("at most one `hops-*` feature may be enabled");

// ============================================================================
// Classes
// ============================================================================

/// Class of the target system, selecting numeric widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    /// Low-end, resource constrained systems
    Embedded,
    /// High-end, general purpose systems
    General,
}

/// Overall environment, selecting export and scheduling defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Logical cloud systems, not simulating a physical world
    Logical,
    /// Physically deployed systems
    Physical,
    /// Simulations of deployed systems
    Simulated,
}

/// Whether the system depends on user or network interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    /// Operating stand-alone
    Standalone,
    /// Depending on user or network interaction
    Dependent,
}

/// The system class of this build
pub const SYSTEM: System = if cfg!(feature = "embedded") {
    System::Embedded
} else {
    System::General
};

/// The environment of this build
pub const ENVIRONMENT: Environment = if cfg!(feature = "env-logical") {
    Environment::Logical
} else if cfg!(feature = "env-physical") {
    Environment::Physical
} else {
    Environment::Simulated
};

/// The configuration of this build
pub const CONFIGURATION: Configuration = if cfg!(feature = "dependent") {
    Configuration::Dependent
} else {
    Configuration::Standalone
};

const LOGICAL: bool = matches!(ENVIRONMENT, Environment::Logical);
const PHYSICAL: bool = matches!(ENVIRONMENT, Environment::Physical);

// ============================================================================
// Scalar types
// ============================================================================

/// Type used for real numbers
#[cfg(feature = "embedded")]
pub type Real = f32;
/// Type used for real numbers
#[cfg(not(feature = "embedded"))]
pub type Real = f64;

/// Type used for times
pub type Times = Real;

/// Minimum time (infinitely in the past)
pub const TIME_MIN: Times = Times::NEG_INFINITY;
/// Maximum time (infinitely in the future)
pub const TIME_MAX: Times = Times::INFINITY;
/// Real infinity
pub const INF: Real = Real::INFINITY;
/// Real not-a-number
pub const NAN: Real = Real::NAN;
/// Time differences below this are negligible
pub const TIME_EPSILON: Times = 0.01;

/// Type of trace hashes
#[cfg(any(feature = "trace-16", all(feature = "embedded", not(feature = "trace-64"))))]
pub type TraceT = u16;
/// Type of trace hashes
#[cfg(not(any(feature = "trace-16", all(feature = "embedded", not(feature = "trace-64")))))]
pub type TraceT = u64;

/// Bit width of trace hashes
pub const TRACE_BITS: u32 = TraceT::BITS;

/// Type for device identifiers
#[cfg(feature = "device-8")]
pub type Device = u8;
/// Type for device identifiers
#[cfg(any(
    feature = "device-16",
    all(
        feature = "embedded",
        not(any(feature = "device-8", feature = "device-24", feature = "device-32", feature = "device-48", feature = "device-64"))
    )
))]
pub type Device = u16;
/// Type for device identifiers
#[cfg(any(
    feature = "device-24",
    feature = "device-32",
    all(
        not(feature = "embedded"),
        not(any(feature = "device-8", feature = "device-16", feature = "device-24", feature = "device-32", feature = "device-48", feature = "device-64"))
    )
))]
pub type Device = u32;
/// Type for device identifiers
#[cfg(any(feature = "device-48", feature = "device-64"))]
pub type Device = u64;

/// Nominal bit width of device identifiers
pub const DEVICE_BITS: u32 = if cfg!(feature = "device-8") {
    8
} else if cfg!(feature = "device-16") {
    16
} else if cfg!(feature = "device-24") {
    24
} else if cfg!(feature = "device-32") {
    32
} else if cfg!(feature = "device-48") {
    48
} else if cfg!(feature = "device-64") {
    64
} else if cfg!(feature = "embedded") {
    16
} else {
    32
};

/// Type for hop counts
#[cfg(any(feature = "hops-8", all(feature = "embedded", not(any(feature = "hops-16", feature = "hops-32")))))]
pub type Hops = i8;
/// Type for hop counts
#[cfg(any(
    feature = "hops-16",
    all(not(feature = "embedded"), not(any(feature = "hops-8", feature = "hops-16", feature = "hops-32")))
))]
pub type Hops = i16;
/// Type for hop counts
#[cfg(feature = "hops-32")]
pub type Hops = i32;

/// Bit width of hop counts
pub const HOPS_BITS: u32 = Hops::BITS;

// ============================================================================
// Behaviour flags
// ============================================================================

/// Whether rounds are computed by parallel threads
pub const PARALLEL: bool = if cfg!(feature = "parallel") {
    true
} else if cfg!(feature = "serial") {
    false
} else {
    LOGICAL
};

/// Whether many events are expected to happen at the same time
pub const SYNCHRONISED: bool = if cfg!(feature = "synchronised") {
    true
} else if cfg!(feature = "unsynchronised") {
    false
} else {
    LOGICAL
};

/// Number of export cells: 1 (self and neighbours share) or 2 (separate)
pub const EXPORT_NUM: u8 = if cfg!(feature = "exports-1") {
    1
} else if cfg!(feature = "exports-2") {
    2
} else if PHYSICAL {
    2
} else {
    1
};

/// Whether exports are handled through shared pointers rather than values
pub const EXPORT_PTR: bool = if cfg!(feature = "export-ptr") {
    true
} else if cfg!(feature = "export-value") {
    false
} else {
    !PHYSICAL
};

/// Whether old messages are dropped as new ones arrive (else at round start)
pub const ONLINE_DROP: bool = if cfg!(feature = "online-drop") {
    true
} else if cfg!(feature = "round-drop") {
    false
} else {
    PHYSICAL
};

/// Whether incoming messages are pushed (else pulled)
pub const MESSAGE_PUSH: bool = !cfg!(feature = "message-pull");

/// Whether new values are pushed to aggregators (else pulled when needed)
pub const VALUE_PUSH: bool = cfg!(feature = "value-push");

/// Whether lossy trace pushes are reported
pub const WARNING_TRACE: bool = cfg!(feature = "warning-trace");

/// Whether the two export cells alias each other
pub const TWIN_MIRRORED: bool = EXPORT_NUM == 1;

/// Factor multiplying real time passing (1 for physical or dependent systems)
pub const REALTIME: Real = if PHYSICAL || matches!(CONFIGURATION, Configuration::Dependent) {
    1.0
} else {
    INF
};

// Presentation parameters, consumed by displayers.

/// Minimum acceptable refresh rate of graphical representations
pub const REFRESH_RATE: Real = 0.1;
/// Antialiasing factor (1 to disable)
pub const ANTIALIAS: u32 = 4;
/// Definition of spheres (1 for icosahedron)
pub const SPHERICITY: u32 = 10;
/// Granularity of snapshot points in tails, in frames per second
pub const TAIL_GRANULARITY: u32 = 10;
/// Maximum number of elements displayed for a field
pub const FIELD_DRAW_LIMIT: u32 = 8;

/// Number of worker threads: the available hardware concurrency
pub fn threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Whether two times are equal up to [`TIME_EPSILON`]
#[inline]
pub fn times_close(a: Times, b: Times) -> bool {
    a == b || (a - b).abs() < TIME_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bounds() {
        assert!(TIME_MIN < 0.0);
        assert!(TIME_MAX > 0.0);
        assert!(TIME_MIN.is_infinite());
        assert!(TIME_MAX.is_infinite());
        assert!(NAN.is_nan());
        assert_eq!(INF, TIME_MAX);
    }

    #[test]
    fn test_widths_in_domain() {
        assert!([16, 64].contains(&TRACE_BITS));
        assert!([8, 16, 24, 32, 48, 64].contains(&DEVICE_BITS));
        assert!([8, 16, 32].contains(&HOPS_BITS));
        assert!(Device::BITS >= DEVICE_BITS);
    }

    #[test]
    fn test_system_defaults() {
        if !cfg!(any(feature = "trace-16", feature = "trace-64")) {
            let expected = match SYSTEM {
                System::General => 64,
                System::Embedded => 16,
            };
            assert_eq!(TRACE_BITS, expected);
        }
    }

    #[test]
    fn test_twin_follows_exports() {
        assert_eq!(TWIN_MIRRORED, EXPORT_NUM == 1);
        assert!(EXPORT_NUM == 1 || EXPORT_NUM == 2);
    }

    #[test]
    fn test_threads_positive() {
        assert!(threads() >= 1);
    }

    #[test]
    fn test_times_close() {
        assert!(times_close(1.0, 1.005));
        assert!(!times_close(1.0, 1.5));
        assert!(times_close(TIME_MAX, TIME_MAX));
    }
}
