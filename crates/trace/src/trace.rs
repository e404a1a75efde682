//! Execution trace hash stack
//!
//! A [`Trace`] summarises the dynamic path through nested code regions as a
//! single [`TraceT`] hash, so that the same code point reached along the same
//! path gets the same identifier on every device and in every round.
//!
//! # Layout
//!
//! The hash is the concatenation of the pushed frames, least significant
//! first in push order. A frame pushed on top of frames totalling `u` bits
//! occupies bits `[u, u + s)`:
//!
//! ```text
//!   push(15), push(120), push(48)  with FRAME_BITS = 8
//!
//!   bit  63 ..... 24 | 23 .. 16 | 15 .. 8 | 7 .. 0
//!        0           |    48    |   120   |   15
//! ```
//!
//! Positions are taken modulo the trace width: once the frames fill the
//! hash, further frames wrap around and are xor-ed over the older ones, so
//! every frame keeps contributing. Each frame remembers the exact bits it
//! xor-ed in, and popping xors them back out, which restores the previous
//! hash exactly.
//!
//! # Collisions
//!
//! Pushes never fail. A tag wider than its frame is xor-folded into it, and
//! wrapped frames may cancel older ones. With the `warning-trace` feature
//! every such lossy push is reported as a `tracing` warning on target
//! `fieldcalc::trace`; otherwise it is silent.

use fieldcalc_core::{TraceT, TRACE_BITS, WARNING_TRACE};
use smallvec::SmallVec;
use tracing::warn;

/// Bits taken by a frame pushed with [`Trace::push`]
pub const FRAME_BITS: u32 = if TRACE_BITS == 16 { 4 } else { 8 };

/// Bits taken by a frame pushed with [`Trace::push_wide`]
pub const WIDE_BITS: u32 = TRACE_BITS;

// Inline frame capacity; deeper nesting spills to the heap.
const INLINE_FRAMES: usize = 16;

/// Mask of the lowest `bits` bits
#[inline]
pub(crate) const fn low_mask(bits: u32) -> TraceT {
    if bits >= TRACE_BITS {
        TraceT::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Xor-fold `value` into its lowest `bits` bits
#[inline]
pub(crate) const fn fold(value: TraceT, bits: u32) -> TraceT {
    if bits >= TRACE_BITS {
        return value;
    }
    if bits == 0 {
        return 0;
    }
    let mask = low_mask(bits);
    let mut rest = value;
    let mut out = 0;
    while rest != 0 {
        out ^= rest & mask;
        rest >>= bits;
    }
    out
}

/// One entry of the frame stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    /// Bits xor-ed into the hash by this frame
    bits: TraceT,
    /// Nominal size of the frame
    size: u8,
}

/// Hash stack identifying the current code point
///
/// Should mostly be driven through the scoped helpers
/// ([`crate::TraceCall`], [`crate::TraceKey`], [`crate::TraceCycle`]), which
/// keep pushes and pops balanced on every exit path. Direct
/// [`Trace::push`]/[`Trace::pop`] is available to low-level code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    /// Xor of all frames
    hash: TraceT,
    /// Total size of the frames, possibly beyond the width
    used: u32,
    /// Every frame, bottom first
    frames: SmallVec<[Frame; INLINE_FRAMES]>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no frame is on the stack
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames on the stack
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True once the frames fill the whole width and new ones wrap around
    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.used >= TRACE_BITS
    }

    /// The current hash combined with `salt`
    ///
    /// The salt fills the bits above the occupied frames; once the trace is
    /// saturated it is xor-ed in at the wrapped position of the next frame.
    /// `hash(0)` is the raw hash.
    #[inline]
    pub fn hash(&self, salt: TraceT) -> TraceT {
        if self.is_saturated() {
            return self.hash ^ salt.rotate_left(self.used % TRACE_BITS);
        }
        if WARNING_TRACE && salt > low_mask(TRACE_BITS - self.used) {
            warn!(
                target: "fieldcalc::trace",
                salt = salt as u64,
                used = self.used,
                "code point salt truncated: hashes may collide"
            );
        }
        self.hash | (salt << self.used)
    }

    /// Reset to the empty trace
    pub fn clear(&mut self) {
        self.hash = 0;
        self.used = 0;
        self.frames.clear();
    }

    /// Push a short tag, taking [`FRAME_BITS`] bits
    #[inline]
    pub fn push(&mut self, tag: TraceT) {
        self.push_frame(tag, FRAME_BITS);
    }

    /// Push a wide key, taking all [`WIDE_BITS`] bits
    ///
    /// The key starts at the first free bit and wraps around over the frames
    /// below it, so the whole key contributes; afterwards the trace is
    /// saturated.
    #[inline]
    pub fn push_wide(&mut self, key: TraceT) {
        self.push_frame(key, WIDE_BITS);
    }

    /// Remove the most recent frame, restoring the previous hash
    ///
    /// # Panics
    ///
    /// Panics if the trace is empty: pushes and pops are unbalanced.
    #[inline]
    pub fn pop(&mut self) {
        let Some(frame) = self.frames.pop() else {
            panic!("pop on an empty trace: unbalanced push/pop");
        };
        self.used -= u32::from(frame.size);
        self.hash ^= frame.bits;
    }

    fn push_frame(&mut self, value: TraceT, size: u32) {
        let offset = self.used % TRACE_BITS;
        if WARNING_TRACE {
            if value > low_mask(size) {
                warn!(
                    target: "fieldcalc::trace",
                    value = value as u64,
                    size,
                    used = self.used,
                    "trace frame truncated: code points may collide"
                );
            }
            if self.used + size > TRACE_BITS {
                warn!(
                    target: "fieldcalc::trace",
                    size,
                    used = self.used,
                    "trace frame wrapped: code points may collide"
                );
            }
        }
        let bits = fold(value, size).rotate_left(offset);
        self.hash ^= bits;
        self.used += size;
        self.frames.push(Frame {
            bits,
            size: size as u8,
        });
    }
}
