//! Optional data, compiled in or out by a const flag
//!
//! [`Optional<T, E>`] carries one `T` when `E` is true and nothing at all when
//! `E` is false. Reads of a disabled value silently produce `T::default()`,
//! so code that fills and reads per-region payloads is written once and the
//! payload disappears from builds that do not need it.
//!
//! The container view (`len`, `iter`, `as_slice`) treats an enabled value as
//! a one-element sequence and a disabled one as empty.

use fieldcalc_core::Switch;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::slice;

/// Storage behaviour selected by a [`Switch`]
///
/// `Switch<true>` stores the value itself, `Switch<false>` stores a
/// zero-sized marker.
pub trait Storage {
    /// Storage for a value of type `T`
    type Slot<T>;

    /// What [`Optional::front`] yields: `&T` or an owned default
    type Front<'a, T: 'a>;

    /// Number of stored values (0 or 1)
    const LEN: usize;

    /// Build the storage, calling `make` only if something is stored
    fn store<T>(make: impl FnOnce() -> T) -> Self::Slot<T>;

    /// Read access to the stored value or a default
    fn front<'a, T: Default + 'a>(slot: &'a Self::Slot<T>) -> Self::Front<'a, T>;

    /// Stored values as a slice
    fn as_slice<T>(slot: &Self::Slot<T>) -> &[T];

    /// Stored values as a mutable slice
    fn as_mut_slice<T>(slot: &mut Self::Slot<T>) -> &mut [T];

    /// Clone the storage
    fn clone_slot<T: Clone>(slot: &Self::Slot<T>) -> Self::Slot<T>;
}

impl Storage for Switch<true> {
    type Slot<T> = T;
    type Front<'a, T: 'a> = &'a T;

    const LEN: usize = 1;

    #[inline]
    fn store<T>(make: impl FnOnce() -> T) -> T {
        make()
    }

    #[inline]
    fn front<'a, T: Default + 'a>(slot: &'a T) -> &'a T {
        slot
    }

    #[inline]
    fn as_slice<T>(slot: &T) -> &[T] {
        slice::from_ref(slot)
    }

    #[inline]
    fn as_mut_slice<T>(slot: &mut T) -> &mut [T] {
        slice::from_mut(slot)
    }

    #[inline]
    fn clone_slot<T: Clone>(slot: &T) -> T {
        slot.clone()
    }
}

impl Storage for Switch<false> {
    type Slot<T> = PhantomData<T>;
    type Front<'a, T: 'a> = T;

    const LEN: usize = 0;

    #[inline]
    fn store<T>(_: impl FnOnce() -> T) -> PhantomData<T> {
        PhantomData
    }

    #[inline]
    fn front<'a, T: Default + 'a>(_: &'a PhantomData<T>) -> T {
        T::default()
    }

    #[inline]
    fn as_slice<T>(_: &PhantomData<T>) -> &[T] {
        &[]
    }

    #[inline]
    fn as_mut_slice<T>(_: &mut PhantomData<T>) -> &mut [T] {
        &mut []
    }

    #[inline]
    fn clone_slot<T: Clone>(_: &PhantomData<T>) -> PhantomData<T> {
        PhantomData
    }
}

/// A `T` that is stored only when `E` is true
///
/// `Optional<T, false>` is zero-sized and all its operations compile to
/// nothing.
///
/// # Example
///
/// ```ignore
/// use fieldcalc_common::Optional;
///
/// let kept = Optional::<i32, true>::new(42);
/// assert_eq!(*kept.front(), 42);
///
/// let dropped = Optional::<i32, false>::new(42);
/// assert_eq!(dropped.front(), 0);
/// ```
pub struct Optional<T, const E: bool>
where
    Switch<E>: Storage,
{
    slot: <Switch<E> as Storage>::Slot<T>,
}

impl<T, const E: bool> Optional<T, E>
where
    Switch<E>: Storage,
{
    /// Whether a value is actually stored
    pub const ENABLED: bool = E;

    /// Wrap a value (dropped immediately when disabled)
    #[inline]
    pub fn new(value: T) -> Self {
        Self::with(|| value)
    }

    /// Wrap the result of `make`; a disabled optional never calls it
    #[inline]
    pub fn with(make: impl FnOnce() -> T) -> Self {
        Self {
            slot: <Switch<E> as Storage>::store(make),
        }
    }

    /// The stored value by reference, or `T::default()` by value when disabled
    #[inline]
    pub fn front(&self) -> <Switch<E> as Storage>::Front<'_, T>
    where
        T: Default,
    {
        <Switch<E> as Storage>::front(&self.slot)
    }

    /// Number of stored values (1 when enabled, 0 when disabled)
    #[inline]
    pub fn len(&self) -> usize {
        <Switch<E> as Storage>::LEN
    }

    /// True when disabled
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored values as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        <Switch<E> as Storage>::as_slice(&self.slot)
    }

    /// The stored values as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        <Switch<E> as Storage>::as_mut_slice(&mut self.slot)
    }

    /// Iterate over the stored values
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the stored values
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Optional<T, true> {
    /// The stored value
    #[inline]
    pub fn get(&self) -> &T {
        &self.slot
    }

    /// The stored value, mutably
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.slot
    }

    /// Unwrap the stored value
    #[inline]
    pub fn into_inner(self) -> T {
        self.slot
    }
}

impl<T: Default, const E: bool> Default for Optional<T, E>
where
    Switch<E>: Storage,
{
    fn default() -> Self {
        Self::with(T::default)
    }
}

impl<T, const E: bool> From<T> for Optional<T, E>
where
    Switch<E>: Storage,
{
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Clone, const E: bool> Clone for Optional<T, E>
where
    Switch<E>: Storage,
{
    fn clone(&self) -> Self {
        Self {
            slot: <Switch<E> as Storage>::clone_slot(&self.slot),
        }
    }
}

impl<T: PartialEq, const E: bool> PartialEq for Optional<T, E>
where
    Switch<E>: Storage,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const E: bool> Eq for Optional<T, E> where Switch<E>: Storage {}

impl<T: Hash, const E: bool> Hash for Optional<T, E>
where
    Switch<E>: Storage,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug, const E: bool> fmt::Debug for Optional<T, E>
where
    Switch<E>: Storage,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_slice().first() {
            Some(value) => f.debug_tuple("Optional").field(value).finish(),
            None => f.write_str("Optional(-)"),
        }
    }
}

impl<'a, T, const E: bool> IntoIterator for &'a Optional<T, E>
where
    Switch<E>: Storage,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const E: bool> IntoIterator for &'a mut Optional<T, E>
where
    Switch<E>: Storage,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
