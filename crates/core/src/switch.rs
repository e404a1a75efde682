//! Type-level booleans
//!
//! Stable Rust cannot pick a struct layout from a `const bool` directly, so
//! every switchable primitive stores `<Switch<B> as SomeTrait>::Storage` and
//! each crate implements its own trait for `Switch<true>` and `Switch<false>`.
//! The disabled implementation always uses a zero-sized storage type.

use std::fmt;

/// Marker type lifting a `const bool` to the type level.
///
/// Never instantiated; only used in trait bounds and projections such as
/// `<Switch<E> as LockSwitch>::Raw`.
pub struct Switch<const ON: bool>;

impl<const ON: bool> Switch<ON> {
    /// The boolean carried by this switch.
    pub const ON: bool = ON;
}

impl<const ON: bool> fmt::Debug for Switch<ON> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Switch<{}>", ON)
    }
}
