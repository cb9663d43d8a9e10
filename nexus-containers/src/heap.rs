//! Array-backed binary min-heap with pluggable ordering and teardown.
//!
//! The root always holds the element that ranks first under the heap's
//! [`Compare`] policy. With the default [`Natural`] policy that is the
//! smallest element.
//!
//! # Growth
//!
//! The heap tracks its own logical capacity, starting at
//! [`INITIAL_CAPACITY`]. Just before an insertion would reach it, the
//! capacity grows by a quarter. Growth reserves with
//! [`Vec::try_reserve_exact`], so an allocation failure is reported as
//! [`Exhausted`] and leaves the heap untouched.
//!
//! # Example
//!
//! ```
//! use nexus_containers::Heap;
//!
//! let mut heap: Heap<u64> = Heap::new();
//! heap.push(5).unwrap();
//! heap.push(1).unwrap();
//! heap.push(3).unwrap();
//!
//! assert_eq!(heap.peek(), Ok(&1));
//! assert_eq!(heap.pop(), Ok(1));
//! assert_eq!(heap.pop(), Ok(3));
//! assert_eq!(heap.pop(), Ok(5));
//! assert!(heap.pop().is_err());
//! ```

use core::fmt;
use std::str::FromStr;

use crate::error::{Exhausted, ParseError, Underflow};
use crate::policy::{Compare, Natural, Retain, Teardown};
use crate::render;

/// Capacity of a new or cleared heap.
pub const INITIAL_CAPACITY: usize = 10;

/// Separator used by the heap's text form.
const SEPARATOR: &str = ",";

/// Next logical capacity: 1.25x, always making progress.
#[inline]
fn grown(capacity: usize) -> usize {
    capacity.saturating_add((capacity >> 2).max(1))
}

/// A binary min-heap.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `C`: Ordering policy (default [`Natural`])
/// - `D`: Teardown policy run over every live element on `clear` and drop
///   (default [`Retain`])
///
/// # Example
///
/// Releasing externally owned handles when the heap goes away:
///
/// ```
/// use nexus_containers::Heap;
/// use std::cell::RefCell;
///
/// let released = RefCell::new(Vec::new());
/// {
///     let mut heap = Heap::with_teardown(|handle: u32| released.borrow_mut().push(handle));
///     heap.push(7).unwrap();
///     heap.push(3).unwrap();
/// }
/// let mut released = released.into_inner();
/// released.sort();
/// assert_eq!(released, vec![3, 7]);
/// ```
pub struct Heap<T, C = Natural, D: Teardown<T> = Retain> {
    /// Elements in heap order.
    items: Vec<T>,
    /// Logical capacity, grown by the 1.25x rule.
    capacity: usize,
    cmp: C,
    teardown: D,
}

impl<T: Ord> Heap<T> {
    /// Creates an empty heap ordered by `T`'s [`Ord`] impl.
    pub fn new() -> Self {
        Self::with_policies(Natural, Retain)
    }
}

impl<T: Ord> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T, &T) -> core::cmp::Ordering,
{
    /// Creates an empty heap ranked by `cmp`.
    ///
    /// `cmp(a, b) == Less` means `a` is popped before `b`.
    pub fn with_comparator(cmp: F) -> Self {
        Self::with_policies(cmp, Retain)
    }
}

impl<T: Ord, D> Heap<T, Natural, D>
where
    D: FnMut(T),
{
    /// Creates an empty naturally ordered heap that hands every live element
    /// to `teardown` on `clear` and drop.
    pub fn with_teardown(teardown: D) -> Self {
        Self::with_policies(Natural, teardown)
    }
}

// =============================================================================
// Base impl - any policies
// =============================================================================

impl<T, C, D: Teardown<T>> Heap<T, C, D> {
    /// Creates an empty heap from explicit policies.
    ///
    /// Closures passed here need annotated argument types:
    ///
    /// ```
    /// use nexus_containers::Heap;
    ///
    /// let mut heap = Heap::with_policies(|a: &i32, b: &i32| b.cmp(a), |_: i32| {});
    /// heap.push(1).unwrap();
    /// heap.push(2).unwrap();
    /// assert_eq!(heap.peek(), Ok(&2));
    /// ```
    pub fn with_policies(cmp: C, teardown: D) -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            cmp,
            teardown,
        }
    }

    /// Returns the number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the logical capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the element that ranks first without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Underflow`] if the heap is empty.
    #[inline]
    pub fn peek(&self) -> Result<&T, Underflow> {
        self.items.first().ok_or(Underflow)
    }

    /// Returns the elements in internal array order.
    ///
    /// Index 0 is the root; the children of `i` are `2i + 1` and `2i + 2`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the elements in internal array order.
    ///
    /// This is *not* sorted order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Takes all elements out in array order without running teardown.
    ///
    /// Ownership of every element passes to the caller.
    pub fn into_vec(mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    /// Runs teardown over every live element and resets to a fresh heap
    /// with [`INITIAL_CAPACITY`].
    pub fn clear(&mut self) {
        self.release_all();
        self.items = Vec::with_capacity(INITIAL_CAPACITY);
        self.capacity = INITIAL_CAPACITY;
    }

    /// Renders the heap in array order using `item2str` for each element.
    ///
    /// ```
    /// use nexus_containers::Heap;
    ///
    /// let mut heap: Heap<u8> = Heap::new();
    /// heap.push(2).unwrap();
    /// heap.push(1).unwrap();
    /// assert_eq!(heap.render_with(|x| format!("#{x}")), "[#1,#2]");
    /// ```
    pub fn render_with<F>(&self, item2str: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        render::render_with(&self.items, SEPARATOR, item2str)
    }

    /// Deep-copies the elements and the ordering policy.
    ///
    /// The copy never inherits the teardown policy: it is always a
    /// [`Retain`] heap, so it cannot release elements it does not own.
    pub fn duplicate(&self) -> Heap<T, C, Retain>
    where
        T: Clone,
        C: Clone,
    {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend(self.items.iter().cloned());
        Heap {
            items,
            capacity: self.capacity,
            cmp: self.cmp.clone(),
            teardown: Retain,
        }
    }

    fn release_all(&mut self) {
        for item in self.items.drain(..) {
            self.teardown.release(item);
        }
    }

    /// Grows the logical capacity until it exceeds `min`, and makes sure the
    /// backing storage covers it.
    ///
    /// On failure nothing changes.
    fn ensure_capacity(&mut self, min: usize) -> Result<(), std::collections::TryReserveError> {
        let mut capacity = self.capacity;
        while min >= capacity {
            capacity = grown(capacity);
        }
        if self.items.capacity() < capacity {
            self.items
                .try_reserve_exact(capacity - self.items.len())?;
        }
        self.capacity = capacity;
        Ok(())
    }
}

// =============================================================================
// Ordered impl - requires a comparator
// =============================================================================

impl<T, C: Compare<T>, D: Teardown<T>> Heap<T, C, D> {
    /// Pushes an element onto the heap.
    ///
    /// # Errors
    ///
    /// Returns `Err(Exhausted(item))` if storage could not grow. The heap is
    /// unchanged in that case.
    pub fn push(&mut self, item: T) -> Result<(), Exhausted<T>> {
        if self.ensure_capacity(self.items.len() + 1).is_err() {
            return Err(Exhausted(item));
        }
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
        Ok(())
    }

    /// Removes and returns the element that ranks first.
    ///
    /// # Errors
    ///
    /// Returns [`Underflow`] if the heap is empty.
    pub fn pop(&mut self) -> Result<T, Underflow> {
        if self.items.is_empty() {
            return Err(Underflow);
        }
        let root = self.items.swap_remove(0);
        self.sift_down(0);
        Ok(root)
    }

    /// Removes the first element (in array order) comparing equal to `item`.
    ///
    /// Returns `false`, changing nothing, if no such element exists.
    pub fn remove(&mut self, item: &T) -> bool {
        self.remove_with(item, drop)
    }

    /// Like [`remove`](Self::remove), handing the removed element to
    /// `deleter` instead of dropping it.
    pub fn remove_with<F>(&mut self, item: &T, deleter: F) -> bool
    where
        F: FnOnce(T),
    {
        match self.position(item) {
            Some(pos) => {
                deleter(self.remove_at(pos));
                true
            }
            None => false,
        }
    }

    /// Returns `true` if some element compares equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    /// Replaces the contents with `items`, inserted one at a time in order.
    ///
    /// Capacity is reserved up front. The previous elements go through
    /// teardown.
    ///
    /// # Errors
    ///
    /// Returns `Err(Exhausted(items))` if the reservation fails. The heap is
    /// unchanged in that case.
    ///
    /// ```
    /// use nexus_containers::Heap;
    ///
    /// let mut heap: Heap<i32> = Heap::new();
    /// heap.heapify([5, 3, 8, 1, 4]).unwrap();
    /// let drained: Vec<_> = heap.drain_while(|_| true).collect();
    /// assert_eq!(drained, vec![1, 3, 4, 5, 8]);
    /// ```
    pub fn heapify<I>(&mut self, items: I) -> Result<(), Exhausted<Vec<T>>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = items.into_iter().collect();

        let mut capacity = INITIAL_CAPACITY;
        while items.len() >= capacity {
            capacity = grown(capacity);
        }
        if items.try_reserve_exact(capacity - items.len()).is_err() {
            return Err(Exhausted(items));
        }

        self.release_all();
        self.items = items;
        self.capacity = capacity;

        // Sifting each prefix in turn is the same work as pushing one by one.
        for pos in 1..self.items.len() {
            self.sift_up(pos);
        }
        Ok(())
    }

    /// Removes elements while the predicate holds for the current root.
    ///
    /// Elements come out in rank order.
    ///
    /// ```
    /// use nexus_containers::Heap;
    ///
    /// let mut heap: Heap<u64> = Heap::new();
    /// heap.heapify([1, 5, 3, 7]).unwrap();
    ///
    /// let due: Vec<_> = heap.drain_while(|&x| x < 4).collect();
    /// assert_eq!(due, vec![1, 3]);
    /// assert_eq!(heap.peek(), Ok(&5));
    /// ```
    pub fn drain_while<F>(&mut self, pred: F) -> DrainWhile<'_, T, C, D, F>
    where
        F: FnMut(&T) -> bool,
    {
        DrainWhile { heap: self, pred }
    }

    /// Returns a cursor over the elements in array order, supporting removal.
    pub fn cursor(&mut self) -> Cursor<'_, T, C, D> {
        Cursor {
            heap: self,
            pos: 0,
            dirty: usize::MAX,
        }
    }

    fn position(&self, item: &T) -> Option<usize> {
        self.items
            .iter()
            .position(|x| self.cmp.compare(x, item).is_eq())
    }

    /// Removes the element at `pos`, filling the hole with the last element
    /// and restoring heap order around it.
    fn remove_at(&mut self, pos: usize) -> T {
        let removed = self.items.swap_remove(pos);
        if pos < self.items.len() && self.sift_down(pos) == pos {
            // The replacement came from another subtree and may rank before
            // its new parent.
            self.sift_up(pos);
        }
        removed
    }

    #[inline]
    fn ranks_before(&self, a: usize, b: usize) -> bool {
        self.cmp.compare(&self.items[a], &self.items[b]).is_lt()
    }

    /// Moves the element at `pos` toward the root. Returns its final position.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.ranks_before(pos, parent) {
                self.items.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    /// Moves the element at `pos` toward the leaves. Returns its final
    /// position.
    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.items.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let first = if right < len && self.ranks_before(right, left) {
                right
            } else {
                left
            };

            if self.ranks_before(first, pos) {
                self.items.swap(pos, first);
                pos = first;
            } else {
                break;
            }
        }
        pos
    }
}

impl<T, C, D: Teardown<T>> Drop for Heap<T, C, D> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<T: Clone, C: Clone> Clone for Heap<T, C, Retain> {
    fn clone(&self) -> Self {
        self.duplicate()
    }

    fn clone_from(&mut self, source: &Self) {
        self.items.clear();
        self.items.reserve_exact(source.capacity);
        self.items.extend(source.items.iter().cloned());
        self.capacity = source.capacity;
        self.cmp = source.cmp.clone();
    }
}

impl<T: fmt::Debug, C, D: Teardown<T>> fmt::Debug for Heap<T, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("items", &self.items)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Array order, `,`-separated: `[1,3,2]`.
impl<T: fmt::Display, C, D: Teardown<T>> fmt::Display for Heap<T, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_bracketed(f, &self.items, SEPARATOR, |f, item| {
            fmt::Display::fmt(item, f)
        })
    }
}

/// Parses the [`Display`](fmt::Display) form, inserting in text order.
///
/// Parsing the rendering of a heap reproduces the same array.
impl<T: Ord + FromStr> FromStr for Heap<T> {
    type Err = ParseError<T::Err>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let items = render::parse_bracketed(s)?;
        let mut heap = Self::new();
        heap.heapify(items).map_err(|_| ParseError::Exhausted)?;
        Ok(heap)
    }
}

impl<'a, T, C, D: Teardown<T>> IntoIterator for &'a Heap<T, C, D> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iteration
// =============================================================================

/// An iterator that pops elements while a predicate holds.
///
/// Created by [`Heap::drain_while`].
pub struct DrainWhile<'a, T, C, D: Teardown<T>, F> {
    heap: &'a mut Heap<T, C, D>,
    pred: F,
}

impl<T, C, D, F> Iterator for DrainWhile<'_, T, C, D, F>
where
    C: Compare<T>,
    D: Teardown<T>,
    F: FnMut(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let root = self.heap.peek().ok()?;
        if (self.pred)(root) {
            self.heap.pop().ok()
        } else {
            None
        }
    }
}

/// A cursor over a heap's positions `0..len` in array order.
///
/// Removing the current element moves the last element into its slot and the
/// cursor stays put, so every element present when the walk started is seen
/// exactly once. Heap order is not repaired per removal: slots from the first
/// removal onward are re-sifted when the cursor is dropped.
///
/// Leaking the cursor (e.g. with [`mem::forget`](std::mem::forget)) leaves the
/// heap out of order.
///
/// # Example
///
/// ```
/// use nexus_containers::Heap;
///
/// let mut heap: Heap<u32> = Heap::new();
/// heap.heapify([4, 9, 2, 7, 6]).unwrap();
///
/// // Drop every even element while walking.
/// let mut cursor = heap.cursor();
/// while let Some(&value) = cursor.current() {
///     if value % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.advance();
///     }
/// }
///
/// drop(cursor);
///
/// assert_eq!(heap.peek(), Ok(&7));
/// assert_eq!(heap.len(), 2);
/// ```
pub struct Cursor<'a, T, C: Compare<T>, D: Teardown<T>> {
    heap: &'a mut Heap<T, C, D>,
    pos: usize,
    /// Lowest slot touched by a removal. Everything below is still in heap
    /// order.
    dirty: usize,
}

impl<T, C: Compare<T>, D: Teardown<T>> Cursor<'_, T, C, D> {
    /// Returns the element under the cursor, or `None` past the end.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.heap.items.get(self.pos)
    }

    /// Returns the cursor's array position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once the cursor is past the last element.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.heap.len()
    }

    /// Moves to the next array position.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.pos += 1;
        }
    }

    /// Removes the element under the cursor.
    ///
    /// Returns `None` if the cursor is exhausted.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.is_exhausted() {
            return None;
        }
        self.dirty = self.dirty.min(self.pos);
        Some(self.heap.items.swap_remove(self.pos))
    }
}

impl<T, C: Compare<T>, D: Teardown<T>> Drop for Cursor<'_, T, C, D> {
    fn drop(&mut self) {
        // The prefix below `dirty` is a valid heap; sift the rest in as
        // heapify does.
        for pos in self.dirty..self.heap.len() {
            self.heap.sift_up(pos);
        }
    }
}
