//! Code point identifiers

use fieldcalc_core::{TraceT, TRACE_BITS};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Fold a 64-bit digest into the trace width
#[allow(clippy::unnecessary_cast)]
const fn narrow(mut digest: u64) -> TraceT {
    let mut out: TraceT = 0;
    while digest != 0 {
        out ^= digest as TraceT;
        digest = match digest.checked_shr(TRACE_BITS) {
            Some(rest) => rest,
            None => 0,
        };
    }
    out
}

/// Deterministic digest of `key`, for [`crate::Trace::push_wide`]
///
/// Uses FxHash, which does not depend on a per-process seed: the same key
/// gives the same trace on every device.
pub fn hash_key<K: Hash + ?Sized>(key: &K) -> TraceT {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    narrow(hasher.finish())
}

/// Identifier of a source location, as computed by [`crate::code_point!`]
pub const fn code_point_of(file: &str, line: u32, column: u32) -> TraceT {
    let bytes = file.as_bytes();
    let mut h = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        h ^= bytes[i] as u64;
        h = h.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    h ^= line as u64;
    h = h.wrapping_mul(FNV_PRIME);
    h ^= column as u64;
    h = h.wrapping_mul(FNV_PRIME);
    narrow(h)
}

/// Compile-time identifier of the invocation site
///
/// Distinct call sites get distinct values up to hash collisions, so the
/// result is meant for wide frames:
///
/// ```ignore
/// let _scope = TraceKey::new(&mut trace, code_point!());
/// ```
#[macro_export]
macro_rules! code_point {
    () => {{
        const POINT: $crate::TraceT = $crate::code_point_of(file!(), line!(), column!());
        POINT
    }};
}
