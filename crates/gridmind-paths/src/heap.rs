//! D-ary min-heap used as the search frontier.
//!
//! Every parent has [`ARITY`] children, stored in one flat `Vec`.

/// Children per parent.
pub const ARITY: usize = 4;

/// A min-priority queue backed by a 4-ary heap.
///
/// The smallest element according to `Ord` is always at the root. Equal
/// elements come out in an unspecified order.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    data: Vec<T>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert an element.
    pub fn enqueue(&mut self, item: T) {
        self.data.push(item);

        let mut child = self.data.len() - 1;
        while child > 0 {
            let parent = (child - 1) / ARITY;
            if self.data[child] >= self.data[parent] {
                break;
            }
            self.data.swap(child, parent);
            child = parent;
        }
    }

    /// Remove and return the smallest element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Check [`len`](Self::len) first.
    pub fn dequeue(&mut self) -> T {
        assert!(!self.data.is_empty(), "dequeue on an empty PriorityQueue");

        let front = self.data.swap_remove(0);
        let len = self.data.len();

        let mut parent = 0;
        loop {
            let first = parent * ARITY + 1;
            if first >= len {
                break;
            }

            let mut best = first;
            for child in (first + 1)..(first + ARITY).min(len) {
                if self.data[child] < self.data[best] {
                    best = child;
                }
            }

            if self.data[parent] <= self.data[best] {
                break;
            }
            self.data.swap(parent, best);
            parent = best;
        }

        front
    }

    /// The smallest element, without removing it.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn peek(&self) -> &T {
        assert!(!self.data.is_empty(), "peek on an empty PriorityQueue");
        &self.data[0]
    }

    /// Drop every element, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterate over the queued elements in heap (not sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{RngExt, SeedableRng};

    #[test]
    fn dequeue_in_order() {
        let mut q = PriorityQueue::new();
        for v in [5, 1, 9, 3, 7, 2, 8] {
            q.enqueue(v);
        }
        let mut out = Vec::new();
        while q.len() > 0 {
            out.push(q.dequeue());
        }
        assert_eq!(out, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn every_dequeue_is_minimum_of_remaining() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut q = PriorityQueue::with_capacity(128);

        for _ in 0..50 {
            for _ in 0..100 {
                q.enqueue(rng.random_range(0..i32::MAX));
            }
            while q.len() > 0 {
                let front = q.dequeue();
                assert!(q.iter().all(|&item| item >= front));
            }
        }
    }

    #[test]
    fn interleaved_operations_keep_heap_order() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut q = PriorityQueue::new();
        let mut mirror: Vec<i32> = Vec::new();

        for _ in 0..2000 {
            if mirror.is_empty() || rng.random_range(0..3) > 0 {
                let v = rng.random_range(-1000..1000);
                q.enqueue(v);
                mirror.push(v);
            } else {
                let got = q.dequeue();
                let min = *mirror.iter().min().unwrap();
                assert_eq!(got, min);
                let pos = mirror.iter().position(|&v| v == min).unwrap();
                mirror.swap_remove(pos);
            }
            assert_eq!(q.len(), mirror.len());
        }
    }

    #[test]
    fn peek_returns_minimum_without_removing() {
        let mut q = PriorityQueue::new();
        q.enqueue(4);
        q.enqueue(2);
        q.enqueue(6);
        assert_eq!(*q.peek(), 2);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn duplicates_are_all_returned() {
        let mut q = PriorityQueue::new();
        for v in [3, 1, 3, 1, 3] {
            q.enqueue(v);
        }
        let out: Vec<_> = std::iter::from_fn(|| (!q.is_empty()).then(|| q.dequeue())).collect();
        assert_eq!(out, vec![1, 1, 3, 3, 3]);
    }

    #[test]
    fn clear_keeps_queue_usable() {
        let mut q = PriorityQueue::new();
        q.enqueue(1);
        q.enqueue(2);
        q.clear();
        assert!(q.is_empty());
        q.enqueue(10);
        assert_eq!(q.dequeue(), 10);
    }

    #[test]
    #[should_panic(expected = "empty PriorityQueue")]
    fn dequeue_empty_panics() {
        let mut q: PriorityQueue<i32> = PriorityQueue::new();
        q.dequeue();
    }

    #[test]
    #[should_panic(expected = "empty PriorityQueue")]
    fn peek_empty_panics() {
        let q: PriorityQueue<i32> = PriorityQueue::new();
        q.peek();
    }
}
