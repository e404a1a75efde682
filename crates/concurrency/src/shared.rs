//! Bypassable reader-writer locking
//!
//! [`SharedLock<E>`] allows many readers or one writer when `E` is true, on
//! top of a `parking_lot::RawRwLock`. When `E` is false it is zero-sized and
//! every acquisition succeeds immediately, like [`crate::Lock<false>`].

use fieldcalc_core::{Switch, PARALLEL};
use parking_lot::lock_api::RawRwLock as _;
use std::fmt;
use std::marker::PhantomData;

/// Raw reader-writer behaviour selected by a [`Switch`]
pub trait SharedSwitch {
    /// Storage held by the lock
    type Raw: Send + Sync;

    /// Unlocked initial state
    const INIT: Self::Raw;

    /// Acquire shared access, blocking until available
    fn lock_shared(raw: &Self::Raw);

    /// Acquire shared access without blocking
    fn try_lock_shared(raw: &Self::Raw) -> bool;

    /// Release shared access
    ///
    /// # Safety
    ///
    /// The calling context must hold shared access.
    unsafe fn unlock_shared(raw: &Self::Raw);

    /// Acquire exclusive access, blocking until available
    fn lock_exclusive(raw: &Self::Raw);

    /// Acquire exclusive access without blocking
    fn try_lock_exclusive(raw: &Self::Raw) -> bool;

    /// Release exclusive access
    ///
    /// # Safety
    ///
    /// The calling context must hold exclusive access.
    unsafe fn unlock_exclusive(raw: &Self::Raw);
}

impl SharedSwitch for Switch<true> {
    type Raw = parking_lot::RawRwLock;

    const INIT: Self::Raw = parking_lot::RawRwLock::INIT;

    #[inline]
    fn lock_shared(raw: &Self::Raw) {
        raw.lock_shared();
    }

    #[inline]
    fn try_lock_shared(raw: &Self::Raw) -> bool {
        raw.try_lock_shared()
    }

    #[inline]
    unsafe fn unlock_shared(raw: &Self::Raw) {
        raw.unlock_shared();
    }

    #[inline]
    fn lock_exclusive(raw: &Self::Raw) {
        raw.lock_exclusive();
    }

    #[inline]
    fn try_lock_exclusive(raw: &Self::Raw) -> bool {
        raw.try_lock_exclusive()
    }

    #[inline]
    unsafe fn unlock_exclusive(raw: &Self::Raw) {
        raw.unlock_exclusive();
    }
}

impl SharedSwitch for Switch<false> {
    type Raw = ();

    const INIT: Self::Raw = ();

    #[inline]
    fn lock_shared(_: &Self::Raw) {}

    #[inline]
    fn try_lock_shared(_: &Self::Raw) -> bool {
        true
    }

    #[inline]
    unsafe fn unlock_shared(_: &Self::Raw) {}

    #[inline]
    fn lock_exclusive(_: &Self::Raw) {}

    #[inline]
    fn try_lock_exclusive(_: &Self::Raw) -> bool {
        true
    }

    #[inline]
    unsafe fn unlock_exclusive(_: &Self::Raw) {}
}

/// Reader-writer lock, active only when `E` is true
pub struct SharedLock<const E: bool>
where
    Switch<E>: SharedSwitch,
{
    raw: <Switch<E> as SharedSwitch>::Raw,
}

/// Reader-writer lock enabled exactly when the build is parallel
pub type ParallelSharedLock = SharedLock<{ PARALLEL }>;

impl<const E: bool> SharedLock<E>
where
    Switch<E>: SharedSwitch,
{
    /// Whether this lock actually excludes anything
    pub const ENABLED: bool = E;

    /// Create an unlocked lock
    pub const fn new() -> Self {
        Self {
            raw: <Switch<E> as SharedSwitch>::INIT,
        }
    }

    /// Acquire shared access until the guard drops
    pub fn read(&self) -> SharedGuard<'_, E> {
        <Switch<E> as SharedSwitch>::lock_shared(&self.raw);
        SharedGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Like [`SharedLock::read`], without waiting
    pub fn try_read(&self) -> Option<SharedGuard<'_, E>> {
        if <Switch<E> as SharedSwitch>::try_lock_shared(&self.raw) {
            Some(SharedGuard {
                lock: self,
                _not_send: PhantomData,
            })
        } else {
            None
        }
    }

    /// Acquire exclusive access until the guard drops
    pub fn write(&self) -> ExclusiveGuard<'_, E> {
        <Switch<E> as SharedSwitch>::lock_exclusive(&self.raw);
        ExclusiveGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Like [`SharedLock::write`], without waiting
    pub fn try_write(&self) -> Option<ExclusiveGuard<'_, E>> {
        if <Switch<E> as SharedSwitch>::try_lock_exclusive(&self.raw) {
            Some(ExclusiveGuard {
                lock: self,
                _not_send: PhantomData,
            })
        } else {
            None
        }
    }
}

impl<const E: bool> Default for SharedLock<E>
where
    Switch<E>: SharedSwitch,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const E: bool> fmt::Debug for SharedLock<E>
where
    Switch<E>: SharedSwitch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLock").field("enabled", &E).finish()
    }
}

/// Shared access to a [`SharedLock`]; released on drop
#[must_use = "shared access ends as soon as the guard is dropped"]
pub struct SharedGuard<'a, const E: bool>
where
    Switch<E>: SharedSwitch,
{
    lock: &'a SharedLock<E>,
    _not_send: PhantomData<*const ()>,
}

impl<const E: bool> Drop for SharedGuard<'_, E>
where
    Switch<E>: SharedSwitch,
{
    fn drop(&mut self) {
        // SAFETY: a shared guard only exists while shared access is held.
        unsafe { <Switch<E> as SharedSwitch>::unlock_shared(&self.lock.raw) }
    }
}

impl<const E: bool> fmt::Debug for SharedGuard<'_, E>
where
    Switch<E>: SharedSwitch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedGuard").field("enabled", &E).finish()
    }
}

/// Exclusive access to a [`SharedLock`]; released on drop
#[must_use = "exclusive access ends as soon as the guard is dropped"]
pub struct ExclusiveGuard<'a, const E: bool>
where
    Switch<E>: SharedSwitch,
{
    lock: &'a SharedLock<E>,
    _not_send: PhantomData<*const ()>,
}

impl<const E: bool> Drop for ExclusiveGuard<'_, E>
where
    Switch<E>: SharedSwitch,
{
    fn drop(&mut self) {
        // SAFETY: an exclusive guard only exists while exclusive access is held.
        unsafe { <Switch<E> as SharedSwitch>::unlock_exclusive(&self.lock.raw) }
    }
}

impl<const E: bool> fmt::Debug for ExclusiveGuard<'_, E>
where
    Switch<E>: SharedSwitch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusiveGuard").field("enabled", &E).finish()
    }
}
