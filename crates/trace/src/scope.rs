//! Scoped trace updates
//!
//! Each helper pushes when built and pops when dropped, so frames stay
//! balanced on every exit path, early returns and unwinding included. The
//! helpers deref to the [`Trace`] they hold: nested regions are opened
//! through the enclosing helper. Frames pushed directly through a helper
//! must be popped before it is advanced or dropped; debug builds check this.
//!
//! ```ignore
//! let mut trace = Trace::new();
//! {
//!     let mut call = TraceCall::new(&mut trace, 15);
//!     {
//!         let inner = TraceCall::new(&mut call, 120);
//!         let point = inner.hash(0);
//!     }
//! }
//! assert!(trace.is_empty());
//! ```

use crate::point::hash_key;
use crate::trace::Trace;
use fieldcalc_core::TraceT;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::{AddAssign, Deref, DerefMut, SubAssign};

// Checks that the frame of a helper is on top of the stack.
#[inline]
fn check_balance(trace: &Trace, depth: usize) {
    if !std::thread::panicking() {
        debug_assert_eq!(
            trace.depth(),
            depth,
            "unbalanced trace: frames pushed inside a scope were not popped"
        );
    }
}

macro_rules! deref_trace {
    ($scope:ident) => {
        impl Deref for $scope<'_> {
            type Target = Trace;

            #[inline]
            fn deref(&self) -> &Trace {
                &*self.trace
            }
        }

        impl DerefMut for $scope<'_> {
            #[inline]
            fn deref_mut(&mut self) -> &mut Trace {
                &mut *self.trace
            }
        }
    };
}

/// Trace frame for a named nested region (function call)
#[must_use = "the frame is popped as soon as the scope is dropped"]
#[derive(Debug)]
pub struct TraceCall<'a> {
    trace: &'a mut Trace,
    depth: usize,
}

impl<'a> TraceCall<'a> {
    /// Push `tag` for the lifetime of the returned scope
    pub fn new(trace: &'a mut Trace, tag: TraceT) -> Self {
        trace.push(tag);
        let depth = trace.depth();
        Self { trace, depth }
    }
}

impl Drop for TraceCall<'_> {
    fn drop(&mut self) {
        check_balance(self.trace, self.depth);
        self.trace.pop();
    }
}

deref_trace!(TraceCall);

/// Trace frame for a value-keyed region (e.g. one process per key)
#[must_use = "the frame is popped as soon as the scope is dropped"]
#[derive(Debug)]
pub struct TraceKey<'a> {
    trace: &'a mut Trace,
    depth: usize,
}

impl<'a> TraceKey<'a> {
    /// Push the wide `key` for the lifetime of the returned scope
    pub fn new(trace: &'a mut Trace, key: TraceT) -> Self {
        trace.push_wide(key);
        let depth = trace.depth();
        Self { trace, depth }
    }

    /// Push the digest of `key` (see [`hash_key`])
    pub fn hashed<K: Hash + ?Sized>(trace: &'a mut Trace, key: &K) -> Self {
        Self::new(trace, hash_key(key))
    }
}

impl Drop for TraceKey<'_> {
    fn drop(&mut self) {
        check_balance(self.trace, self.depth);
        self.trace.pop();
    }
}

deref_trace!(TraceKey);

/// Trace frame for an iterated region
///
/// The frame holds the iteration counter, so each iteration of the loop body
/// sees a distinct hash, and running the same loop again reproduces the same
/// sequence. The cycle compares with [`TraceT`] and can bound the loop:
///
/// ```ignore
/// let mut i = TraceCycle::new(&mut trace, 0);
/// while i < 10 {
///     let point = i.hash(0);
///     i += 1;
/// }
/// ```
#[must_use = "the frame is popped as soon as the scope is dropped"]
#[derive(Debug)]
pub struct TraceCycle<'a> {
    trace: &'a mut Trace,
    depth: usize,
    i: TraceT,
}

impl<'a> TraceCycle<'a> {
    /// Push the counter, starting from `start`
    pub fn new(trace: &'a mut Trace, start: TraceT) -> Self {
        trace.push(start);
        let depth = trace.depth();
        Self {
            trace,
            depth,
            i: start,
        }
    }

    /// Current counter
    #[inline]
    pub fn index(&self) -> TraceT {
        self.i
    }

    /// Move to the next iteration
    #[inline]
    pub fn advance(&mut self) -> &mut Self {
        *self += 1;
        self
    }

    /// Move back to the previous iteration
    #[inline]
    pub fn retreat(&mut self) -> &mut Self {
        *self -= 1;
        self
    }

    fn rewrite(&mut self, i: TraceT) {
        check_balance(self.trace, self.depth);
        self.trace.pop();
        self.i = i;
        self.trace.push(i);
    }
}

impl AddAssign<TraceT> for TraceCycle<'_> {
    fn add_assign(&mut self, n: TraceT) {
        self.rewrite(self.i.wrapping_add(n));
    }
}

impl SubAssign<TraceT> for TraceCycle<'_> {
    fn sub_assign(&mut self, n: TraceT) {
        self.rewrite(self.i.wrapping_sub(n));
    }
}

impl PartialEq<TraceT> for TraceCycle<'_> {
    fn eq(&self, other: &TraceT) -> bool {
        self.i == *other
    }
}

impl PartialOrd<TraceT> for TraceCycle<'_> {
    fn partial_cmp(&self, other: &TraceT) -> Option<Ordering> {
        self.i.partial_cmp(other)
    }
}

impl Drop for TraceCycle<'_> {
    fn drop(&mut self) {
        check_balance(self.trace, self.depth);
        self.trace.pop();
    }
}

deref_trace!(TraceCycle);

/// Runs a region within an empty trace, clearing it on entry and on exit
#[must_use = "the trace is cleared as soon as the scope is dropped"]
#[derive(Debug)]
pub struct TraceReset<'a> {
    trace: &'a mut Trace,
}

impl<'a> TraceReset<'a> {
    /// Clear `trace` for the lifetime of the returned scope
    pub fn new(trace: &'a mut Trace) -> Self {
        trace.clear();
        Self { trace }
    }
}

impl Drop for TraceReset<'_> {
    fn drop(&mut self) {
        self.trace.clear();
    }
}

deref_trace!(TraceReset);

impl Trace {
    /// Run `f` inside a [`TraceCall`] frame for `tag`
    pub fn call<R>(&mut self, tag: TraceT, f: impl FnOnce(&mut Trace) -> R) -> R {
        let mut scope = TraceCall::new(self, tag);
        f(&mut *scope)
    }
}
