//! Generic containers with pluggable ordering, equality, and teardown.
//!
//! Two independent structures:
//!
//! | Structure | Use Case | Key Operations |
//! |-----------|----------|----------------|
//! | [`Heap`] | Priority queues, schedulers | O(log n) push/pop, O(1) peek |
//! | [`DLinkedList`] | Ordered batches, work lists | O(1) push at either end, indexed access, removal while walking |
//!
//! # Policies
//!
//! Customization hooks are type parameters fixed at construction
//! (see [`policy`]):
//!
//! ```text
//! Heap<T, C = Natural, D = Retain>
//!     C: Compare<T>    - ranks elements, Less pops first
//!     D: Teardown<T>   - receives each live element on clear/drop
//!
//! DLinkedList<T, E = NaturalEq, D = Retain>
//!     E: Equality<T>   - decides lookups (index_of, contains, remove_item)
//!     D: Teardown<T>   - receives each live element on clear/drop
//! ```
//!
//! Copies ([`Heap::duplicate`], [`DLinkedList::duplicate`], and `Clone`) are
//! always `Retain` containers. A copy never releases elements through the
//! original's teardown hook.
//!
//! # Quick Start
//!
//! ```
//! use nexus_containers::{DLinkedList, Heap};
//!
//! let mut heap: Heap<u32> = Heap::new();
//! heap.heapify([5, 3, 8, 1, 4]).unwrap();
//! assert_eq!(heap.pop(), Ok(1));
//!
//! let mut list: DLinkedList<&str> = DLinkedList::new();
//! list.add("a");
//! list.add("b");
//! list.insert(1, "c").unwrap();
//! assert_eq!(list.to_string(), "[a, c, b]");
//! assert_eq!(list.index_of(&"b"), Some(2));
//! ```
//!
//! # Errors
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`Underflow`] | `Heap::pop`, `Heap::peek` on an empty heap |
//! | [`OutOfRange`] | positional list operations with a bad index |
//! | [`Exhausted`] | heap growth that could not allocate; the heap is unchanged |
//! | [`ParseError`] | parsing the bracketed text form |
//!
//! Removing a value that is not present is not an error: `remove` and
//! `remove_item` return `false`.
//!
//! # Threading
//!
//! Containers are plain single-owner values with no internal
//! synchronization. Share them across threads behind a lock.

#![warn(missing_docs)]

pub mod error;
pub mod heap;
pub mod list;
pub mod policy;
pub mod traits;

mod render;

pub use error::{Exhausted, OutOfRange, ParseError, Underflow};
pub use heap::Heap;
pub use list::{Backward, DLinkedList, Forward};
pub use policy::{Compare, Equality, Natural, NaturalEq, Retain, Teardown};
pub use traits::{PriorityQueue, Sequence};
