//! Doubly linked list with permanent sentinel nodes.
//!
//! Nodes live in a [`slab::Slab`] arena and link to each other by slab key.
//! Two sentinel nodes (head and tail) are allocated on construction and never
//! removed, so every data node always has both a predecessor and a successor
//! and no operation special-cases the ends of the list.
//!
//! ```text
//!   head <-> a <-> b <-> c <-> tail
//! ```
//!
//! The sentinels link to themselves on their outer side: stepping past the
//! tail stays on the tail, stepping before the head stays on the head.
//!
//! # Cursors
//!
//! [`Cursor`] walks the list in one direction and can remove the element it
//! is on. Removal parks the cursor on the neighbor *behind* it, so the next
//! [`advance`](Cursor::advance) lands on the element that followed the
//! removed one:
//!
//! ```
//! use nexus_containers::DLinkedList;
//!
//! let mut list: DLinkedList<u32> = (1..=6).collect();
//!
//! let mut cursor = list.cursor_front();
//! while !cursor.is_exhausted() {
//!     if cursor.current().is_some_and(|x| x % 2 == 0) {
//!         cursor.remove_current();
//!     }
//!     cursor.advance();
//! }
//!
//! assert_eq!(list.to_string(), "[1, 3, 5]");
//! ```

use core::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::str::FromStr;

use slab::Slab;

use crate::error::{OutOfRange, ParseError};
use crate::policy::{Equality, NaturalEq, Retain, Teardown};
use crate::render;

/// Separator used by the list's text form.
const SEPARATOR: &str = ", ";

/// A list node. Sentinels carry no data.
#[derive(Debug)]
struct Node<T> {
    data: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked list with sentinel head and tail nodes.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `E`: Equality policy used by lookups (default [`NaturalEq`])
/// - `D`: Teardown policy run over every data node on `clear` and drop
///   (default [`Retain`])
///
/// Lookups ([`index_of`](Self::index_of), [`contains`](Self::contains),
/// [`remove_item`](Self::remove_item)) only exist when `E` implements
/// [`Equality<T>`]. A list of a type without [`PartialEq`] needs an explicit
/// equality closure before it can search.
///
/// # Example
///
/// ```
/// use nexus_containers::DLinkedList;
///
/// let mut list: DLinkedList<&str> = DLinkedList::new();
/// list.insert(0, "a").unwrap();
/// list.insert(1, "b").unwrap();
/// list.insert(1, "c").unwrap();
///
/// assert_eq!(list.get(1), Ok(&"c"));
/// assert_eq!(list.remove_at(0), Ok("a"));
/// assert_eq!(list.to_string(), "[c, b]");
/// ```
pub struct DLinkedList<T, E = NaturalEq, D: Teardown<T> = Retain> {
    nodes: Slab<Node<T>>,
    head: usize,
    tail: usize,
    len: usize,
    eq: E,
    teardown: D,
}

impl<T> DLinkedList<T> {
    /// Creates an empty list using `T`'s [`PartialEq`] for lookups.
    pub fn new() -> Self {
        Self::with_policies(NaturalEq, Retain)
    }
}

impl<T> Default for DLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> DLinkedList<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Creates an empty list whose lookups use `eq`.
    pub fn with_equality(eq: F) -> Self {
        Self::with_policies(eq, Retain)
    }
}

impl<T, D> DLinkedList<T, NaturalEq, D>
where
    D: FnMut(T),
{
    /// Creates an empty list that hands every remaining element to
    /// `teardown` on `clear` and drop.
    pub fn with_teardown(teardown: D) -> Self {
        Self::with_policies(NaturalEq, teardown)
    }
}

// =============================================================================
// Base impl - any policies
// =============================================================================

impl<T, E, D: Teardown<T>> DLinkedList<T, E, D> {
    /// Creates an empty list from explicit policies.
    pub fn with_policies(eq: E, teardown: D) -> Self {
        let mut nodes = Slab::with_capacity(2);
        let head = nodes.insert(Node {
            data: None,
            prev: 0,
            next: 0,
        });
        let tail = nodes.insert(Node {
            data: None,
            prev: head,
            next: 0,
        });
        nodes[head].prev = head;
        nodes[head].next = tail;
        nodes[tail].next = tail;

        Self {
            nodes,
            head,
            tail,
            len: 0,
            eq,
            teardown,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an element to the back of the list.
    #[inline]
    pub fn add(&mut self, item: T) {
        self.push_back(item);
    }

    /// Appends an element to the back of the list.
    #[inline]
    pub fn push_back(&mut self, item: T) {
        self.link_before(self.tail, item);
    }

    /// Prepends an element to the front of the list.
    #[inline]
    pub fn push_front(&mut self, item: T) {
        let first = self.nodes[self.head].next;
        self.link_before(first, item);
    }

    /// Inserts an element so that it ends up at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] unless `index <= len`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), OutOfRange> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        let at = self.key_at(index);
        self.link_before(at, item);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] unless `index < len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, OutOfRange> {
        let key = self.data_key(index)?;
        let err = self.out_of_range(index);
        self.unlink(key).ok_or(err)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] unless `index < len`.
    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        let key = self.data_key(index)?;
        let err = self.out_of_range(index);
        self.nodes[key].data.as_ref().ok_or(err)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] unless `index < len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let key = self.data_key(index)?;
        let err = self.out_of_range(index);
        self.nodes[key].data.as_mut().ok_or(err)
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.nodes[self.nodes[self.head].next].data.as_ref()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.nodes[self.nodes[self.tail].prev].data.as_ref()
    }

    /// Removes and returns the first element.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.unlink(self.nodes[self.head].next)
    }

    /// Removes and returns the last element.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        self.unlink(self.nodes[self.tail].prev)
    }

    /// Runs teardown over every element, front to back, and empties the
    /// list. The sentinels stay.
    pub fn clear(&mut self) {
        let mut key = self.nodes[self.head].next;
        while key != self.tail {
            let node = self.nodes.remove(key);
            if let Some(data) = node.data {
                self.teardown.release(data);
            }
            key = node.next;
        }
        self.nodes[self.head].next = self.tail;
        self.nodes[self.tail].prev = self.head;
        self.len = 0;
    }

    /// Returns an iterator over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes[self.head].next,
            back: self.nodes[self.tail].prev,
            remaining: self.len,
        }
    }

    /// Returns an iterator over mutable references, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.nodes[self.head].next,
            back: self.nodes[self.tail].prev,
            remaining: self.len,
            nodes: &mut self.nodes,
        }
    }

    /// Returns a cursor on the first element, walking toward the back.
    ///
    /// On an empty list the cursor starts exhausted.
    #[inline]
    pub fn cursor_front(&mut self) -> Cursor<'_, T, E, D, Forward> {
        let current = self.nodes[self.head].next;
        Cursor {
            list: self,
            current,
            _dir: PhantomData,
        }
    }

    /// Returns a cursor on the last element, walking toward the front.
    ///
    /// On an empty list the cursor starts exhausted.
    #[inline]
    pub fn cursor_back(&mut self) -> Cursor<'_, T, E, D, Backward> {
        let current = self.nodes[self.tail].prev;
        Cursor {
            list: self,
            current,
            _dir: PhantomData,
        }
    }

    /// Renders the list front to back using `item2str` for each element.
    ///
    /// ```
    /// use nexus_containers::DLinkedList;
    ///
    /// let list: DLinkedList<u8> = [1, 2].into_iter().collect();
    /// assert_eq!(list.render_with(|x| format!("{x:02}")), "[01, 02]");
    /// ```
    pub fn render_with<F>(&self, item2str: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        render::render_with(self.iter(), SEPARATOR, item2str)
    }

    /// Deep-copies the elements, in order, and the equality policy.
    ///
    /// The copy never inherits the teardown policy.
    pub fn duplicate(&self) -> DLinkedList<T, E, Retain>
    where
        T: Clone,
        E: Clone,
    {
        let mut copy = DLinkedList::with_policies(self.eq.clone(), Retain);
        copy.extend(self.iter().cloned());
        copy
    }

    fn out_of_range(&self, index: usize) -> OutOfRange {
        OutOfRange {
            index,
            len: self.len,
        }
    }

    /// Key of the data node at `index`.
    fn data_key(&self, index: usize) -> Result<usize, OutOfRange> {
        if index < self.len {
            Ok(self.key_at(index))
        } else {
            Err(self.out_of_range(index))
        }
    }

    /// Key of the node at `index`, for `index <= len`. `len` maps to the tail.
    ///
    /// Walks from whichever sentinel is nearer.
    fn key_at(&self, index: usize) -> usize {
        debug_assert!(index <= self.len);
        if index <= self.len / 2 {
            let mut key = self.nodes[self.head].next;
            for _ in 0..index {
                key = self.nodes[key].next;
            }
            key
        } else {
            let mut key = self.tail;
            for _ in index..self.len {
                key = self.nodes[key].prev;
            }
            key
        }
    }

    /// Splices a new data node in front of `next`.
    fn link_before(&mut self, next: usize, item: T) {
        let prev = self.nodes[next].prev;
        let key = self.nodes.insert(Node {
            data: Some(item),
            prev,
            next,
        });
        self.nodes[prev].next = key;
        self.nodes[next].prev = key;
        self.len += 1;
    }

    /// Unlinks and frees a data node. Sentinels are left alone.
    fn unlink(&mut self, key: usize) -> Option<T> {
        if key == self.head || key == self.tail {
            return None;
        }
        let node = self.nodes.remove(key);
        self.nodes[node.prev].next = node.next;
        self.nodes[node.next].prev = node.prev;
        self.len -= 1;
        node.data
    }
}

// =============================================================================
// Lookup impl - requires an equality policy
// =============================================================================

impl<T, E: Equality<T>, D: Teardown<T>> DLinkedList<T, E, D> {
    /// Returns the index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|x| self.eq.equals(x, item))
    }

    /// Returns `true` if some element equals `item`.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Removes the first element equal to `item`.
    ///
    /// Returns `false`, changing nothing, if there is none.
    pub fn remove_item(&mut self, item: &T) -> bool {
        self.remove_item_with(item, drop)
    }

    /// Like [`remove_item`](Self::remove_item), handing the removed element
    /// to `deleter` once it is unlinked.
    pub fn remove_item_with<F>(&mut self, item: &T, deleter: F) -> bool
    where
        F: FnOnce(T),
    {
        let mut key = self.nodes[self.head].next;
        while key != self.tail {
            let node = &self.nodes[key];
            let next = node.next;
            if node.data.as_ref().is_some_and(|x| self.eq.equals(x, item)) {
                if let Some(removed) = self.unlink(key) {
                    deleter(removed);
                }
                return true;
            }
            key = next;
        }
        false
    }

    /// Returns `true` if the list has the same length as `items` and every
    /// element equals its counterpart.
    pub fn matches(&self, items: &[T]) -> bool {
        self.len == items.len()
            && self
                .iter()
                .zip(items)
                .all(|(a, b)| self.eq.equals(a, b))
    }
}

impl<T, E, D: Teardown<T>> Drop for DLinkedList<T, E, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone, E: Clone> Clone for DLinkedList<T, E, Retain> {
    fn clone(&self) -> Self {
        self.duplicate()
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.eq = source.eq.clone();
        self.extend(source.iter().cloned());
    }
}

impl<T, E, D: Teardown<T>> Extend<T> for DLinkedList<T, E, D> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for DLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Debug, E, D: Teardown<T>> fmt::Debug for DLinkedList<T, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front to back, `, `-separated: `[a, b, c]`.
impl<T: fmt::Display, E, D: Teardown<T>> fmt::Display for DLinkedList<T, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_bracketed(f, self.iter(), SEPARATOR, |f, item| {
            fmt::Display::fmt(item, f)
        })
    }
}

/// Parses the [`Display`](fmt::Display) form, preserving order.
impl<T: FromStr> FromStr for DLinkedList<T> {
    type Err = ParseError<T::Err>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(render::parse_bracketed(s)?.into_iter().collect())
    }
}

impl<'a, T, E, D: Teardown<T>> IntoIterator for &'a DLinkedList<T, E, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, E, D: Teardown<T>> IntoIterator for &'a mut DLinkedList<T, E, D> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T> {
    nodes: &'a Slab<Node<T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        node.data.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        node.data.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T> {
    nodes: &'a mut Slab<Node<T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &mut self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        let data = node.data.as_mut()?;
        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *(data as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &mut self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        let data = node.data.as_mut()?;
        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *(data as *mut T) })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// =============================================================================
// Cursor
// =============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Travel direction of a [`Cursor`].
pub trait Direction: sealed::Sealed {
    /// `true` for front-to-back travel.
    const FORWARD: bool;
}

/// Front-to-back travel. Created by [`DLinkedList::cursor_front`].
#[derive(Debug, Clone, Copy)]
pub enum Forward {}

/// Back-to-front travel. Created by [`DLinkedList::cursor_back`].
#[derive(Debug, Clone, Copy)]
pub enum Backward {}

impl sealed::Sealed for Forward {}
impl sealed::Sealed for Backward {}

impl Direction for Forward {
    const FORWARD: bool = true;
}

impl Direction for Backward {
    const FORWARD: bool = false;
}

/// A cursor that walks a list in one direction and can remove as it goes.
///
/// The cursor always sits on a node. On a sentinel there is no current
/// element: the sentinel it travels toward means the walk is over
/// ([`is_exhausted`](Self::is_exhausted)), the one it started from means
/// it is parked before the first element.
///
/// # Example
///
/// Walking backward, removal parks the cursor on the successor, so
/// continuing reaches every earlier element exactly once:
///
/// ```
/// use nexus_containers::DLinkedList;
///
/// let mut list: DLinkedList<i32> = [3, -1, 4, -1, 5].into_iter().collect();
/// let mut seen = Vec::new();
///
/// let mut cursor = list.cursor_back();
/// while let Some(&x) = cursor.current() {
///     seen.push(x);
///     if x < 0 {
///         cursor.remove_current();
///     }
///     cursor.advance();
/// }
///
/// assert_eq!(seen, vec![5, -1, 4, -1, 3]);
/// assert_eq!(list.to_string(), "[3, 4, 5]");
/// ```
pub struct Cursor<'a, T, E, D: Teardown<T>, Dir> {
    list: &'a mut DLinkedList<T, E, D>,
    current: usize,
    _dir: PhantomData<Dir>,
}

impl<T, E, D: Teardown<T>, Dir: Direction> Cursor<'_, T, E, D, Dir> {
    /// Returns the current element, or `None` on a sentinel.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.list.nodes[self.current].data.as_ref()
    }

    /// Returns the current element mutably, or `None` on a sentinel.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.nodes[self.current].data.as_mut()
    }

    /// Returns `true` once the cursor has walked off the far end.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current == self.terminal()
    }

    /// Moves one node in the direction of travel.
    ///
    /// Stays put once exhausted.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.step(Dir::FORWARD);
    }

    /// Moves one node against the direction of travel.
    ///
    /// Stays put on the starting sentinel.
    #[inline]
    pub fn retreat(&mut self) {
        self.current = self.step(!Dir::FORWARD);
    }

    /// Removes the current element and parks the cursor on the node behind
    /// it, so the next [`advance`](Self::advance) reaches the element that
    /// followed.
    ///
    /// Returns `None` on a sentinel.
    pub fn remove_current(&mut self) -> Option<T> {
        let behind = self.step(!Dir::FORWARD);
        let removed = self.list.unlink(self.current)?;
        self.current = behind;
        Some(removed)
    }

    #[inline]
    fn step(&self, forward: bool) -> usize {
        let node = &self.list.nodes[self.current];
        if forward { node.next } else { node.prev }
    }

    #[inline]
    fn terminal(&self) -> usize {
        if Dir::FORWARD {
            self.list.tail
        } else {
            self.list.head
        }
    }
}
