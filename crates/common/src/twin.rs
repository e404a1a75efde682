//! Two accessors over one or two cells
//!
//! [`Twin<T, M>`] offers `first()` and `second()`. When `M` is true the twin
//! is mirrored and both accessors reach the same cell; when `M` is false the
//! two cells are independent. Exports use it to decide at build time whether
//! the export a device keeps for itself is the one it sends to neighbours
//! ([`ExportTwin`]).
//!
//! Callers must not assume that `first()` and `second()` denote distinct
//! objects: writing through one is visible through the other when mirrored.

use fieldcalc_core::{Switch, TWIN_MIRRORED};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Cell layout selected by a [`Switch`]
///
/// `Switch<true>` keeps one shared cell, `Switch<false>` keeps two.
pub trait Mirror {
    /// Storage for the cells
    type Cells<T>;

    /// Build the cells, calling `make` once per cell
    fn make<T>(make: impl FnMut() -> T) -> Self::Cells<T>;

    /// Build the cells from one value, cloning it when two cells are needed
    fn splat<T: Clone>(value: T) -> Self::Cells<T>;

    /// The first cell
    fn first<T>(cells: &Self::Cells<T>) -> &T;

    /// The first cell, mutably
    fn first_mut<T>(cells: &mut Self::Cells<T>) -> &mut T;

    /// The second cell
    fn second<T>(cells: &Self::Cells<T>) -> &T;

    /// The second cell, mutably
    fn second_mut<T>(cells: &mut Self::Cells<T>) -> &mut T;

    /// All distinct cells, in order
    fn as_slice<T>(cells: &Self::Cells<T>) -> &[T];

    /// Clone the cells
    fn clone_cells<T: Clone>(cells: &Self::Cells<T>) -> Self::Cells<T>;
}

impl Mirror for Switch<true> {
    type Cells<T> = T;

    fn make<T>(mut make: impl FnMut() -> T) -> T {
        make()
    }

    fn splat<T: Clone>(value: T) -> T {
        value
    }

    #[inline]
    fn first<T>(cells: &T) -> &T {
        cells
    }

    #[inline]
    fn first_mut<T>(cells: &mut T) -> &mut T {
        cells
    }

    #[inline]
    fn second<T>(cells: &T) -> &T {
        cells
    }

    #[inline]
    fn second_mut<T>(cells: &mut T) -> &mut T {
        cells
    }

    #[inline]
    fn as_slice<T>(cells: &T) -> &[T] {
        std::slice::from_ref(cells)
    }

    fn clone_cells<T: Clone>(cells: &T) -> T {
        cells.clone()
    }
}

impl Mirror for Switch<false> {
    type Cells<T> = [T; 2];

    fn make<T>(mut make: impl FnMut() -> T) -> [T; 2] {
        let first = make();
        [first, make()]
    }

    fn splat<T: Clone>(value: T) -> [T; 2] {
        [value.clone(), value]
    }

    #[inline]
    fn first<T>(cells: &[T; 2]) -> &T {
        &cells[0]
    }

    #[inline]
    fn first_mut<T>(cells: &mut [T; 2]) -> &mut T {
        &mut cells[0]
    }

    #[inline]
    fn second<T>(cells: &[T; 2]) -> &T {
        &cells[1]
    }

    #[inline]
    fn second_mut<T>(cells: &mut [T; 2]) -> &mut T {
        &mut cells[1]
    }

    #[inline]
    fn as_slice<T>(cells: &[T; 2]) -> &[T] {
        cells
    }

    fn clone_cells<T: Clone>(cells: &[T; 2]) -> [T; 2] {
        cells.clone()
    }
}

/// Access to one (`M = true`) or two (`M = false`) values through `first()`
/// and `second()`
pub struct Twin<T, const M: bool>
where
    Switch<M>: Mirror,
{
    cells: <Switch<M> as Mirror>::Cells<T>,
}

/// Twin holding the self and neighbour exports of a device
pub type ExportTwin<T> = Twin<T, { TWIN_MIRRORED }>;

impl<T, const M: bool> Twin<T, M>
where
    Switch<M>: Mirror,
{
    /// Whether both accessors reach the same cell
    pub const MIRRORED: bool = M;

    /// Twin with every cell set to `value`
    pub fn new(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            cells: <Switch<M> as Mirror>::splat(value),
        }
    }

    /// Twin whose cells are built by successive calls to `make`
    pub fn from_fn(make: impl FnMut() -> T) -> Self {
        Self {
            cells: <Switch<M> as Mirror>::make(make),
        }
    }

    /// Access to the first element
    #[inline]
    pub fn first(&self) -> &T {
        <Switch<M> as Mirror>::first(&self.cells)
    }

    /// Mutable access to the first element
    #[inline]
    pub fn first_mut(&mut self) -> &mut T {
        <Switch<M> as Mirror>::first_mut(&mut self.cells)
    }

    /// Access to the second element
    #[inline]
    pub fn second(&self) -> &T {
        <Switch<M> as Mirror>::second(&self.cells)
    }

    /// Mutable access to the second element
    #[inline]
    pub fn second_mut(&mut self) -> &mut T {
        <Switch<M> as Mirror>::second_mut(&mut self.cells)
    }
}

impl<T> Twin<T, false> {
    /// Both cells, mutably at the same time
    pub fn split_mut(&mut self) -> (&mut T, &mut T) {
        let [first, second] = &mut self.cells;
        (first, second)
    }
}

impl<T: Default, const M: bool> Default for Twin<T, M>
where
    Switch<M>: Mirror,
{
    fn default() -> Self {
        Self::from_fn(T::default)
    }
}

impl<T: Clone, const M: bool> Clone for Twin<T, M>
where
    Switch<M>: Mirror,
{
    fn clone(&self) -> Self {
        Self {
            cells: <Switch<M> as Mirror>::clone_cells(&self.cells),
        }
    }
}

impl<T: PartialEq, const M: bool> PartialEq for Twin<T, M>
where
    Switch<M>: Mirror,
{
    fn eq(&self, other: &Self) -> bool {
        <Switch<M> as Mirror>::as_slice(&self.cells) == <Switch<M> as Mirror>::as_slice(&other.cells)
    }
}

impl<T: Eq, const M: bool> Eq for Twin<T, M> where Switch<M>: Mirror {}

impl<T: Hash, const M: bool> Hash for Twin<T, M>
where
    Switch<M>: Mirror,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        <Switch<M> as Mirror>::as_slice(&self.cells).hash(state);
    }
}

impl<T: fmt::Debug, const M: bool> fmt::Debug for Twin<T, M>
where
    Switch<M>: Mirror,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Twin")
            .field("mirrored", &M)
            .field("first", self.first())
            .field("second", self.second())
            .finish()
    }
}
