use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-priority queue keyed by weight, with ties broken by insertion order.
///
/// Every pushed item is stamped with a monotonically increasing sequence
/// number, so two items of equal weight always come out in the order they
/// went in. This keeps tree shape reproducible for identical input.
#[derive(Debug)]
pub(crate) struct MinQueue<T> {
    heap: BinaryHeap<Reverse<(u64, u64, T)>>,
    next_seq: u64,
}

impl<T: Ord> MinQueue<T> {
    /// Creates an empty queue with room for `capacity` items.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Inserts `item` with priority `weight`.
    pub(crate) fn push(&mut self, weight: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((weight, seq, item)));
    }

    /// Removes the item with the smallest weight (earliest on ties).
    pub(crate) fn pop(&mut self) -> Option<(u64, T)> {
        self.heap
            .pop()
            .map(|Reverse((weight, _, item))| (weight, item))
    }
}
