//! Capability interfaces for code that depends on a container abstractly.
//!
//! Both traits are object safe, so a consumer can hold a
//! `Box<dyn PriorityQueue<T>>` or `&mut dyn Sequence<T>` without knowing the
//! container's policies.
//!
//! ```
//! use nexus_containers::{DLinkedList, Heap, PriorityQueue, Sequence};
//!
//! fn schedule(queue: &mut dyn PriorityQueue<u32>, batches: &dyn Sequence<u32>) {
//!     for &batch in batches.iter() {
//!         queue.push(batch).unwrap();
//!     }
//! }
//!
//! let mut queue: Heap<u32> = Heap::new();
//! let batches: DLinkedList<u32> = [7, 2, 5].into_iter().collect();
//! schedule(&mut queue, &batches);
//! assert_eq!(queue.pop(), Ok(2));
//! ```

use crate::error::{Exhausted, OutOfRange, Underflow};
use crate::heap::Heap;
use crate::list::DLinkedList;
use crate::policy::{Compare, Equality, Teardown};

/// A priority queue: the element that ranks first comes out first.
pub trait PriorityQueue<T> {
    /// Inserts an element.
    fn push(&mut self, item: T) -> Result<(), Exhausted<T>>;

    /// Removes the element that ranks first.
    fn pop(&mut self) -> Result<T, Underflow>;

    /// Returns the element that ranks first.
    fn peek(&self) -> Result<&T, Underflow>;

    /// Removes one element equal to `item`. Returns `false` if absent.
    fn remove(&mut self, item: &T) -> bool;

    /// Returns `true` if an element equal to `item` is present.
    fn contains(&self, item: &T) -> bool;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the contents with `items`.
    fn heapify(&mut self, items: Vec<T>) -> Result<(), Exhausted<Vec<T>>>;

    /// Releases every element.
    fn clear(&mut self);

    /// Iterates in storage order, which is not rank order.
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a>
    where
        T: 'a;
}

/// An indexed sequence with front-to-back and back-to-front traversal.
pub trait Sequence<T> {
    /// Appends an element.
    fn add(&mut self, item: T);

    /// Inserts an element at `index`, valid for `index <= len`.
    fn insert(&mut self, index: usize, item: T) -> Result<(), OutOfRange>;

    /// Removes the element at `index`.
    fn remove_at(&mut self, index: usize) -> Result<T, OutOfRange>;

    /// Removes the first element equal to `item`. Returns `false` if absent.
    fn remove_item(&mut self, item: &T) -> bool;

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Result<&T, OutOfRange>;

    /// Returns the element at `index` mutably.
    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange>;

    /// Position of the first element equal to `item`.
    fn index_of(&self, item: &T) -> Option<usize>;

    /// Returns `true` if an element equal to `item` is present.
    fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases every element.
    fn clear(&mut self);

    /// Iterates front to back.
    fn iter<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = &'a T> + 'a>
    where
        T: 'a;

    /// Iterates back to front.
    fn iter_rev<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a>
    where
        T: 'a,
    {
        Box::new(self.iter().rev())
    }
}

impl<T, C: Compare<T>, D: Teardown<T>> PriorityQueue<T> for Heap<T, C, D> {
    #[inline]
    fn push(&mut self, item: T) -> Result<(), Exhausted<T>> {
        Heap::push(self, item)
    }

    #[inline]
    fn pop(&mut self) -> Result<T, Underflow> {
        Heap::pop(self)
    }

    #[inline]
    fn peek(&self) -> Result<&T, Underflow> {
        Heap::peek(self)
    }

    #[inline]
    fn remove(&mut self, item: &T) -> bool {
        Heap::remove(self, item)
    }

    #[inline]
    fn contains(&self, item: &T) -> bool {
        Heap::contains(self, item)
    }

    #[inline]
    fn len(&self) -> usize {
        Heap::len(self)
    }

    fn heapify(&mut self, items: Vec<T>) -> Result<(), Exhausted<Vec<T>>> {
        Heap::heapify(self, items)
    }

    fn clear(&mut self) {
        Heap::clear(self)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a>
    where
        T: 'a,
    {
        Box::new(Heap::iter(self))
    }
}

impl<T, E: Equality<T>, D: Teardown<T>> Sequence<T> for DLinkedList<T, E, D> {
    #[inline]
    fn add(&mut self, item: T) {
        DLinkedList::add(self, item)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<(), OutOfRange> {
        DLinkedList::insert(self, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<T, OutOfRange> {
        DLinkedList::remove_at(self, index)
    }

    fn remove_item(&mut self, item: &T) -> bool {
        DLinkedList::remove_item(self, item)
    }

    fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        DLinkedList::get(self, index)
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        DLinkedList::get_mut(self, index)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        DLinkedList::index_of(self, item)
    }

    #[inline]
    fn len(&self) -> usize {
        DLinkedList::len(self)
    }

    fn clear(&mut self) {
        DLinkedList::clear(self)
    }

    fn iter<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = &'a T> + 'a>
    where
        T: 'a,
    {
        Box::new(DLinkedList::iter(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut dyn PriorityQueue<i32>) -> Vec<i32> {
        let mut out = Vec::with_capacity(queue.len());
        while let Ok(x) = queue.pop() {
            out.push(x);
        }
        out
    }

    #[test]
    fn heap_through_trait_object() {
        let mut heap: Box<dyn PriorityQueue<i32>> = Box::new(Heap::new());
        heap.heapify(vec![5, 3, 8, 1, 4]).unwrap();

        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek(), Ok(&1));
        assert!(heap.contains(&8));
        assert!(heap.remove(&8));
        assert!(!heap.remove(&8));
        assert_eq!(heap.iter().count(), 4);

        assert_eq!(drain(heap.as_mut()), vec![1, 3, 4, 5]);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), Err(Underflow));
    }

    #[test]
    fn heap_policies_behind_trait() {
        let mut heap = Heap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        PriorityQueue::push(&mut heap, 1).unwrap();
        PriorityQueue::push(&mut heap, 3).unwrap();
        assert_eq!(drain(&mut heap), vec![3, 1]);

        PriorityQueue::push(&mut heap, 2).unwrap();
        PriorityQueue::clear(&mut heap);
        assert!(PriorityQueue::is_empty(&heap));
    }

    #[test]
    fn list_through_trait_object() {
        let mut list: Box<dyn Sequence<&str>> = Box::new(DLinkedList::new());
        list.insert(0, "a").unwrap();
        list.insert(1, "b").unwrap();
        list.insert(1, "c").unwrap();
        list.add("d");

        assert_eq!(list.get(1), Ok(&"c"));
        *list.get_mut(3).unwrap() = "e";
        assert_eq!(list.index_of(&"b"), Some(2));
        assert!(list.contains(&"e"));

        let forward: Vec<_> = list.iter().copied().collect();
        let backward: Vec<_> = list.iter_rev().copied().collect();
        assert_eq!(forward, vec!["a", "c", "b", "e"]);
        assert_eq!(backward, vec!["e", "b", "c", "a"]);

        assert_eq!(list.remove_at(0), Ok("a"));
        assert!(list.remove_item(&"b"));
        assert_eq!(list.len(), 2);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.remove_at(0), Err(OutOfRange { index: 0, len: 0 }));
    }
}
