//! Construction-time policies: ordering, equality, and teardown.
//!
//! Containers take their customization hooks as type parameters rather than
//! runtime function pointers. Each hook has a zero-sized default that defers
//! to the element's own traits, and a blanket impl for closures:
//!
//! | Policy | Default | Closure form |
//! |--------|---------|--------------|
//! | [`Compare<T>`] | [`Natural`] (`T: Ord`) | `Fn(&T, &T) -> Ordering` |
//! | [`Equality<T>`] | [`NaturalEq`] (`T: PartialEq`) | `Fn(&T, &T) -> bool` |
//! | [`Teardown<T>`] | [`Retain`] (plain drop) | `FnMut(T)` |
//!
//! Because teardown is part of the container's type, a container that
//! releases its elements and one that does not are different types. Copies
//! are always produced with [`Retain`], so a copy can never release data it
//! did not receive ownership of.
//!
//! # Example
//!
//! ```
//! use nexus_containers::{Heap, policy::Compare};
//! use std::cmp::Ordering;
//!
//! // Max-heap by reversing the natural order.
//! let mut heap = Heap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
//! heap.push(1).unwrap();
//! heap.push(9).unwrap();
//! assert_eq!(heap.pop(), Ok(9));
//!
//! assert_eq!(nexus_containers::policy::Natural.compare(&1, &2), Ordering::Less);
//! ```

use std::cmp::Ordering;

/// Ranks two elements. `Less` means `a` comes out of a heap before `b`.
pub trait Compare<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] impl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Decides whether two elements are the same for lookup purposes.
pub trait Equality<T: ?Sized> {
    /// Returns `true` if `a` and `b` are equal.
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// Compares elements with their [`PartialEq`] impl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalEq;

impl<T: PartialEq + ?Sized> Equality<T> for NaturalEq {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized, F> Equality<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Receives every element still held by a container when it is cleared or
/// dropped.
///
/// This is the single release point for elements that are handles to
/// externally owned resources. The container never releases such resources
/// on its own.
pub trait Teardown<T> {
    /// Takes ownership of one live element.
    fn release(&mut self, item: T);
}

/// No teardown: elements are simply dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Retain;

impl<T> Teardown<T> for Retain {
    #[inline]
    fn release(&mut self, item: T) {
        drop(item);
    }
}

impl<T, F> Teardown<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn release(&mut self, item: T) {
        self(item)
    }
}
