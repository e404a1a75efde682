//! Bypassable mutual exclusion
//!
//! [`Lock<E>`] exposes the same `set`/`test`/`unset` interface whether
//! locking is compiled in or not:
//!
//! - `Lock<true>` wraps a `parking_lot::RawMutex`
//! - `Lock<false>` is zero-sized; every operation is a no-op and `test()`
//!   always succeeds
//!
//! [`LockGuard`] holds the lock for a scope and [`UnlockGuard`] releases a
//! held lock for a scope, re-acquiring it on drop.
//!
//! Code shared between serial and parallel builds is written once against
//! `Lock<PARALLEL>` (see [`ParallelLock`]) and the serial build pays nothing.
//!
//! # Example
//!
//! ```ignore
//! use fieldcalc_concurrency::Lock;
//!
//! static AGGREGATE: Lock<true> = Lock::new();
//!
//! let _guard = AGGREGATE.guard();
//! // ... exclusive access until `_guard` drops
//! ```

use fieldcalc_core::{Switch, PARALLEL};
use parking_lot::lock_api::RawMutex as _;
use std::fmt;
use std::marker::PhantomData;

/// Raw locking behaviour selected by a [`Switch`]
///
/// Implemented for `Switch<true>` (a real mutex) and `Switch<false>`
/// (zero-sized, no-op).
pub trait LockSwitch {
    /// Storage held by the lock
    type Raw: Send + Sync;

    /// Unlocked initial state
    const INIT: Self::Raw;

    /// Acquire, blocking until available
    fn lock(raw: &Self::Raw);

    /// Acquire without blocking, returning whether it succeeded
    fn try_lock(raw: &Self::Raw) -> bool;

    /// Release
    ///
    /// # Safety
    ///
    /// The calling context must hold the lock.
    unsafe fn unlock(raw: &Self::Raw);
}

impl LockSwitch for Switch<true> {
    type Raw = parking_lot::RawMutex;

    const INIT: Self::Raw = parking_lot::RawMutex::INIT;

    #[inline]
    fn lock(raw: &Self::Raw) {
        raw.lock();
    }

    #[inline]
    fn try_lock(raw: &Self::Raw) -> bool {
        raw.try_lock()
    }

    #[inline]
    unsafe fn unlock(raw: &Self::Raw) {
        raw.unlock();
    }
}

impl LockSwitch for Switch<false> {
    type Raw = ();

    const INIT: Self::Raw = ();

    #[inline]
    fn lock(_: &Self::Raw) {}

    #[inline]
    fn try_lock(_: &Self::Raw) -> bool {
        true
    }

    #[inline]
    unsafe fn unlock(_: &Self::Raw) {}
}

/// Mutual-exclusion handle, active only when `E` is true
///
/// Not reentrant: calling [`Lock::set`] twice from the same thread without
/// an intervening [`Lock::unset`] deadlocks when enabled.
pub struct Lock<const E: bool>
where
    Switch<E>: LockSwitch,
{
    raw: <Switch<E> as LockSwitch>::Raw,
}

/// Lock enabled exactly when the build is parallel
pub type ParallelLock = Lock<{ PARALLEL }>;

impl<const E: bool> Lock<E>
where
    Switch<E>: LockSwitch,
{
    /// Whether this lock actually excludes anything
    pub const ENABLED: bool = E;

    /// Create an unlocked lock
    pub const fn new() -> Self {
        Self {
            raw: <Switch<E> as LockSwitch>::INIT,
        }
    }

    /// Acquire the lock, waiting if not available
    #[inline]
    pub fn set(&self) {
        <Switch<E> as LockSwitch>::lock(&self.raw);
    }

    /// Try to acquire the lock without waiting
    ///
    /// Returns true iff the lock was obtained. Always true when disabled.
    #[inline]
    pub fn test(&self) -> bool {
        <Switch<E> as LockSwitch>::try_lock(&self.raw)
    }

    /// Release the lock
    ///
    /// # Safety
    ///
    /// The lock must be held by the current context, acquired through
    /// [`Lock::set`] or a successful [`Lock::test`]. Releasing a lock that is
    /// not held breaks the exclusion other threads rely on.
    #[inline]
    pub unsafe fn unset(&self) {
        <Switch<E> as LockSwitch>::unlock(&self.raw);
    }

    /// Acquire the lock and release it when the guard drops
    pub fn guard(&self) -> LockGuard<'_, E> {
        self.set();
        LockGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Like [`Lock::guard`], without waiting
    pub fn try_guard(&self) -> Option<LockGuard<'_, E>> {
        if self.test() {
            Some(LockGuard {
                lock: self,
                _not_send: PhantomData,
            })
        } else {
            None
        }
    }

    /// Release the held lock until the returned guard drops
    ///
    /// # Safety
    ///
    /// The lock must be held by the current context, and the returned guard
    /// must be dropped, not leaked, before the lock is released again.
    /// [`LockGuard::unlocked`] is the safe way to do this.
    pub unsafe fn unlock_guard(&self) -> UnlockGuard<'_, E> {
        self.unset();
        UnlockGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }
}

impl<const E: bool> Default for Lock<E>
where
    Switch<E>: LockSwitch,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const E: bool> fmt::Debug for Lock<E>
where
    Switch<E>: LockSwitch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lock").field("enabled", &E).finish()
    }
}

/// Scoped ownership of a [`Lock`]; releases it on drop
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a, const E: bool>
where
    Switch<E>: LockSwitch,
{
    lock: &'a Lock<E>,
    // Released on the acquiring thread only.
    _not_send: PhantomData<*const ()>,
}

impl<const E: bool> Drop for LockGuard<'_, E>
where
    Switch<E>: LockSwitch,
{
    fn drop(&mut self) {
        // SAFETY: a guard only exists while its lock is held.
        unsafe { self.lock.unset() }
    }
}

impl<const E: bool> fmt::Debug for LockGuard<'_, E>
where
    Switch<E>: LockSwitch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard").field("enabled", &E).finish()
    }
}

impl<'a, const E: bool> LockGuard<'a, E>
where
    Switch<E>: LockSwitch,
{
    /// Run `f` with the lock released, re-acquiring it afterwards
    ///
    /// The lock is taken back even if `f` panics.
    pub fn unlocked<R>(&mut self, f: impl FnOnce() -> R) -> R {
        // SAFETY: this guard holds the lock and the unlock guard is dropped
        // before the call returns.
        let _relock = unsafe { self.lock.unlock_guard() };
        f()
    }
}

/// Scoped release of a held [`Lock`]; re-acquires it on drop
#[must_use = "the lock is re-acquired as soon as the guard is dropped"]
pub struct UnlockGuard<'a, const E: bool>
where
    Switch<E>: LockSwitch,
{
    lock: &'a Lock<E>,
    _not_send: PhantomData<*const ()>,
}

impl<const E: bool> Drop for UnlockGuard<'_, E>
where
    Switch<E>: LockSwitch,
{
    fn drop(&mut self) {
        self.lock.set();
    }
}

impl<const E: bool> fmt::Debug for UnlockGuard<'_, E>
where
    Switch<E>: LockSwitch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnlockGuard").field("enabled", &E).finish()
    }
}
