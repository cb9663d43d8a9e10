use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use nexus_containers::{Compare, Heap, ParseError, PriorityQueue, Teardown, Underflow};

fn drain<T, C: Compare<T>, D: Teardown<T>>(heap: &mut Heap<T, C, D>) -> Vec<T> {
    heap.drain_while(|_| true).collect()
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn pops_non_decreasing() {
    let mut heap: Heap<i64> = Heap::new();
    for x in [42, -7, 13, 0, 99, -7, 5, 18, 3, 3, 64, -100] {
        heap.push(x).unwrap();
    }

    let mut last = i64::MIN;
    while let Ok(x) = heap.pop() {
        assert!(x >= last);
        last = x;
    }
}

#[test]
fn heapify_then_drain() {
    let mut heap: Heap<i32> = Heap::new();
    heap.heapify([5, 3, 8, 1, 4]).unwrap();
    assert_eq!(drain(&mut heap), vec![1, 3, 4, 5, 8]);
}

#[test]
fn heapify_matches_pushes() {
    let input = [9, 4, 7, 1, 8, 2, 6, 3, 5, 0, 11, 10];

    let mut bulk: Heap<u8> = Heap::new();
    bulk.heapify(input).unwrap();

    let mut single: Heap<u8> = Heap::new();
    for x in input {
        single.push(x).unwrap();
    }

    assert_eq!(bulk.as_slice(), single.as_slice());
    assert_eq!(bulk.capacity(), single.capacity());
}

#[test]
fn struct_elements_by_key() {
    #[derive(Debug, Clone, PartialEq)]
    struct Job {
        deadline: u64,
        name: &'static str,
    }

    let mut heap = Heap::with_comparator(|a: &Job, b: &Job| a.deadline.cmp(&b.deadline));
    heap.push(Job { deadline: 30, name: "c" }).unwrap();
    heap.push(Job { deadline: 10, name: "a" }).unwrap();
    heap.push(Job { deadline: 20, name: "b" }).unwrap();

    let names: Vec<_> = drain(&mut heap).into_iter().map(|j| j.name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn float_ordering_via_comparator() {
    let mut heap = Heap::with_comparator(|a: &f64, b: &f64| a.total_cmp(b));
    heap.heapify([2.5, -1.0, 0.25, 10.0]).unwrap();
    assert_eq!(heap.pop(), Ok(-1.0));
    assert_eq!(heap.peek(), Ok(&0.25));
}

// =============================================================================
// Size and underflow
// =============================================================================

#[test]
fn size_accounting() {
    let mut heap: Heap<u32> = Heap::new();
    for i in 0..25 {
        heap.push(i * 3 % 7).unwrap();
    }
    for _ in 0..10 {
        heap.pop().unwrap();
    }
    assert_eq!(heap.len(), 15);
}

#[test]
fn underflow_after_emptying() {
    let mut heap: Heap<u32> = Heap::new();
    assert_eq!(heap.pop(), Err(Underflow));
    assert_eq!(heap.peek(), Err(Underflow));

    heap.push(1).unwrap();
    heap.push(2).unwrap();
    heap.pop().unwrap();
    heap.pop().unwrap();

    assert_eq!(heap.pop(), Err(Underflow));
    assert_eq!(heap.peek(), Err(Underflow));
    assert_eq!(Underflow.to_string(), "heap is empty");
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn remove_missing_changes_nothing() {
    let mut heap: Heap<u32> = Heap::new();
    heap.heapify([8, 3, 5]).unwrap();
    let before = heap.to_string();

    assert!(!heap.remove(&4));
    assert_eq!(heap.to_string(), before);
    assert_eq!(heap.len(), 3);
}

#[test]
fn remove_each_element() {
    let values: Vec<u32> = (0..64).map(|i| (i * 37) % 64).collect();

    for target in &values {
        let mut heap: Heap<u32> = Heap::new();
        heap.heapify(values.iter().copied()).unwrap();

        assert!(heap.remove(target));
        assert_eq!(heap.len(), values.len() - 1);

        let drained = drain(&mut heap);
        let mut expected: Vec<u32> = values.iter().copied().filter(|v| v != target).collect();
        expected.sort();
        assert_eq!(drained, expected);
    }
}

#[test]
fn remove_with_hands_over_value() {
    let mut heap: Heap<String> = Heap::new();
    heap.push("pear".to_string()).unwrap();
    heap.push("apple".to_string()).unwrap();

    let mut taken = Vec::new();
    assert!(heap.remove_with(&"pear".to_string(), |s| taken.push(s)));
    assert_eq!(taken, vec!["pear".to_string()]);
    assert_eq!(heap.len(), 1);
}

// =============================================================================
// Teardown and copies
// =============================================================================

#[test]
fn teardown_releases_live_elements_once() {
    let released = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&released);
    let mut heap = Heap::with_teardown(move |x: u32| sink.borrow_mut().push(x));

    heap.heapify([4, 1, 3, 2]).unwrap();
    assert_eq!(heap.pop(), Ok(1));

    heap.clear();
    let mut after_clear = released.borrow().clone();
    after_clear.sort();
    assert_eq!(after_clear, vec![2, 3, 4]);

    heap.push(8).unwrap();
    drop(heap);
    assert_eq!(released.borrow().len(), 4);
}

#[test]
fn heapify_releases_previous_contents() {
    let released = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&released);
    let mut heap = Heap::with_teardown(move |_: u8| *counter.borrow_mut() += 1);

    heap.heapify([1, 2, 3]).unwrap();
    heap.heapify([4, 5]).unwrap();
    assert_eq!(*released.borrow(), 3);
    assert_eq!(heap.len(), 2);
}

#[test]
fn copy_independent_both_ways() {
    let mut original: Heap<u32> = Heap::new();
    original.heapify([10, 20, 30]).unwrap();

    let mut copy = original.clone();
    copy.push(5).unwrap();
    original.remove(&20);

    assert_eq!(drain(&mut original), vec![10, 30]);
    assert_eq!(drain(&mut copy), vec![5, 10, 20, 30]);
}

#[test]
fn copy_never_fires_teardown() {
    let released = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&released);
    let mut owner = Heap::with_teardown(move |x: u32| sink.borrow_mut().push(x));
    owner.heapify([1, 2]).unwrap();

    let mut copy = owner.duplicate();
    copy.push(3).unwrap();
    copy.clear();
    drop(copy);
    assert!(released.borrow().is_empty());

    drop(owner);
    let mut released = released.borrow().clone();
    released.sort();
    assert_eq!(released, vec![1, 2]);
}

#[test]
fn custom_comparator_survives_copy() {
    let heap = {
        let mut heap = Heap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
        heap.heapify([1, 5, 3]).unwrap();
        heap
    };
    let mut copy = heap.clone();
    copy.push(9).unwrap();
    assert_eq!(copy.pop(), Ok(9));
    assert_eq!(copy.pop(), Ok(5));
}

// =============================================================================
// Text form
// =============================================================================

#[test]
fn round_trip_same_multiset() {
    let mut heap: Heap<i32> = Heap::new();
    heap.heapify([17, -3, 8, 8, 0, 42, -19]).unwrap();

    let mut parsed: Heap<i32> = heap.to_string().parse().unwrap();
    assert_eq!(parsed.as_slice(), heap.as_slice());

    let mut original = drain(&mut heap);
    let mut reparsed = drain(&mut parsed);
    original.sort();
    reparsed.sort();
    assert_eq!(original, reparsed);
}

#[test]
fn parse_unordered_input() {
    let mut heap: Heap<u32> = "[9, 2, 7, 1]".parse().unwrap();
    assert_eq!(drain(&mut heap), vec![1, 2, 7, 9]);

    let empty: Heap<u32> = "[]".parse().unwrap();
    assert!(empty.is_empty());
}

#[test]
fn parse_errors() {
    assert_eq!("1,2".parse::<Heap<u32>>().unwrap_err(), ParseError::MissingBrackets);
    assert!(matches!(
        "[1,-2]".parse::<Heap<u32>>(),
        Err(ParseError::Element(_))
    ));
}

#[test]
fn render_with_formatter() {
    let mut heap: Heap<u32> = Heap::new();
    heap.heapify([3, 1, 2]).unwrap();
    assert_eq!(heap.to_string(), "[1,3,2]");
    assert_eq!(heap.render_with(|x| format!("0x{x:x}")), "[0x1,0x3,0x2]");
}

// =============================================================================
// Cursor
// =============================================================================

#[test]
fn cursor_visits_array_order() {
    let mut heap: Heap<u32> = Heap::new();
    heap.heapify([6, 2, 9, 4]).unwrap();
    let expected: Vec<_> = heap.iter().copied().collect();

    let mut cursor = heap.cursor();
    let mut seen = Vec::new();
    while let Some(&x) = cursor.current() {
        seen.push(x);
        cursor.advance();
    }
    assert_eq!(seen, expected);
}

#[test]
fn cursor_removal_visits_each_once() {
    let mut heap: Heap<u32> = Heap::new();
    heap.heapify((0..50).map(|i| (i * 13) % 50)).unwrap();

    let mut visited = Vec::new();
    let mut cursor = heap.cursor();
    while let Some(&x) = cursor.current() {
        visited.push(x);
        if x % 3 == 0 {
            cursor.remove_current();
        } else {
            cursor.advance();
        }
    }
    drop(cursor);

    visited.sort();
    assert_eq!(visited, (0..50).collect::<Vec<_>>());
    assert_eq!(drain(&mut heap), (0..50).filter(|x| x % 3 != 0).collect::<Vec<_>>());
}

// =============================================================================
// Capability interface
// =============================================================================

#[test]
fn usable_as_trait_object() {
    fn fill(queue: &mut dyn PriorityQueue<u32>) {
        for x in [4, 2, 6] {
            queue.push(x).unwrap();
        }
    }

    let mut heap = Heap::with_comparator(|a: &u32, b: &u32| match (a % 2, b % 2) {
        (0, 1) => Ordering::Less,
        (1, 0) => Ordering::Greater,
        _ => a.cmp(b),
    });
    fill(&mut heap);
    heap.push(1).unwrap();

    assert_eq!(drain(&mut heap), vec![2, 4, 6, 1]);
}
