//! Instrumented binary max-heap
//!
//! An array-backed max-heap over `i32` keys that reports every comparison,
//! relocation, slot access and growth event to an [`OpCounters`] passed in
//! by the caller.
//!
//! The heap is stored as a complete binary tree in a contiguous buffer: the
//! parent of slot `i > 0` is `(i - 1) / 2` and its children are `2i + 1` and
//! `2i + 2`. Capacity starts at the value given to
//! [`MaxHeap::with_capacity`] and doubles whenever an insert finds the
//! buffer full. It never shrinks.
//!
//! Both sift routines hold the moving value aside and write it exactly once,
//! at the slot where it comes to rest. Values displaced along the way are
//! shifted one level each, so a sift over `k` levels costs `k` writes plus
//! one instead of the `2k` reads and `2k` writes of a swap-based loop.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity       |
//! |----------------|------------------|
//! | `insert`       | O(log n) amortized |
//! | `extract_max`  | O(log n)         |
//! | `peek`         | O(1)             |
//! | `increase_key` | O(log n)         |
//! | `value_at`     | O(1)             |
//! | `to_vec`       | O(n)             |
//!
//! # Example
//!
//! ```rust
//! use instrumented_heap::{MaxHeap, OpCounters};
//!
//! let mut counters = OpCounters::new();
//! let mut heap = MaxHeap::with_capacity(4).unwrap();
//! for value in [10, 5, 30, 20] {
//!     heap.insert(value, &mut counters);
//! }
//!
//! assert_eq!(heap.extract_max(&mut counters), Ok(30));
//! assert_eq!(heap.extract_max(&mut counters), Ok(20));
//! assert_eq!(heap.extract_max(&mut counters), Ok(10));
//! assert_eq!(heap.extract_max(&mut counters), Ok(5));
//! assert!(heap.is_empty());
//! ```

use crate::counters::OpCounters;
use crate::error::HeapError;
use tracing::trace;

/// Array-backed binary max-heap with operation accounting
///
/// All fallible operations validate their arguments before touching the
/// buffer: on `Err` the heap is exactly as it was before the call.
#[derive(Debug, Clone)]
pub struct MaxHeap {
    /// Logical elements; `data.len()` is the heap size
    data: Vec<i32>,
    /// Logical capacity, doubled on growth
    capacity: usize,
}

impl MaxHeap {
    /// Creates an empty heap able to hold `capacity` elements before growing
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidArgument`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, HeapError> {
        if capacity == 0 {
            return Err(HeapError::InvalidArgument("capacity must be positive"));
        }
        Ok(Self {
            data: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Number of elements currently in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current logical capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Uninstrumented view of the logical elements in heap order
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Inserts `value`, doubling capacity first if the heap is full
    pub fn insert(&mut self, value: i32, counters: &mut OpCounters) {
        if self.data.len() == self.capacity {
            self.grow(counters);
        }

        counters.record_array_access();
        self.data.push(value);

        let last = self.data.len() - 1;
        self.sift_up(last, value, counters);
    }

    /// Removes and returns the largest value
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn extract_max(&mut self, counters: &mut OpCounters) -> Result<i32, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::Empty);
        }

        counters.record_array_access();
        let max = self.data[0];

        counters.record_array_access();
        let Some(last) = self.data.pop() else {
            return Err(HeapError::Empty);
        };

        if !self.data.is_empty() {
            self.sift_down(0, last, counters);
        }

        Ok(max)
    }

    /// Returns the largest value without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn peek(&self, counters: &mut OpCounters) -> Result<i32, HeapError> {
        let max = *self.data.first().ok_or(HeapError::Empty)?;
        counters.record_array_access();
        Ok(max)
    }

    /// Raises the value at `index` to `new_value` and restores heap order
    ///
    /// Keys may only grow; an equal value is accepted and leaves the heap
    /// unchanged apart from the rewrite.
    ///
    /// # Errors
    /// - [`HeapError::IndexOutOfRange`] if `index >= len()`
    /// - [`HeapError::InvalidArgument`] if `new_value` is below the current value
    pub fn increase_key(
        &mut self,
        index: usize,
        new_value: i32,
        counters: &mut OpCounters,
    ) -> Result<(), HeapError> {
        self.check_index(index)?;

        counters.record_array_access();
        if new_value < self.data[index] {
            return Err(HeapError::InvalidArgument(
                "new value is smaller than current value",
            ));
        }

        self.sift_up(index, new_value, counters);
        Ok(())
    }

    /// Reads the value stored at `index` in heap order
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfRange`] if `index >= len()`.
    pub fn value_at(&self, index: usize, counters: &mut OpCounters) -> Result<i32, HeapError> {
        self.check_index(index)?;
        counters.record_array_access();
        Ok(self.data[index])
    }

    /// Copies the logical elements out in heap order
    ///
    /// The copy is charged as a single bulk access.
    pub fn to_vec(&self, counters: &mut OpCounters) -> Vec<i32> {
        counters.record_array_access();
        self.data.clone()
    }

    fn check_index(&self, index: usize) -> Result<(), HeapError> {
        if index >= self.data.len() {
            return Err(HeapError::IndexOutOfRange {
                index,
                len: self.data.len(),
            });
        }
        Ok(())
    }

    fn grow(&mut self, counters: &mut OpCounters) {
        let new_capacity = self.capacity.saturating_mul(2);
        self.data.reserve_exact(new_capacity - self.data.len());
        trace!(
            old_capacity = self.capacity,
            new_capacity,
            "grew heap buffer"
        );
        self.capacity = new_capacity;
        counters.record_allocation();
    }

    /// Moves `held` from `index` toward the root while it beats its parent
    ///
    /// The slot at `index` must already exist; its current content is
    /// overwritten.
    fn sift_up(&mut self, mut index: usize, held: i32, counters: &mut OpCounters) {
        counters.update_depth(1);

        while index > 0 {
            let parent = (index - 1) / 2;

            counters.record_array_access();
            let parent_value = self.data[parent];

            counters.record_comparison();
            if held > parent_value {
                counters.record_array_access();
                counters.record_swap();
                self.data[index] = parent_value;
                index = parent;
            } else {
                break;
            }
        }

        counters.record_array_access();
        self.data[index] = held;
    }

    /// Moves `held` from `index` toward the leaves while a child beats it
    ///
    /// Ties go to the held value first, then to the left child.
    fn sift_down(&mut self, mut index: usize, held: i32, counters: &mut OpCounters) {
        counters.update_depth(1);
        let len = self.data.len();

        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;
            let mut largest_value = held;

            if left < len {
                counters.record_array_access();
                let left_value = self.data[left];
                counters.record_comparison();
                if left_value > largest_value {
                    largest = left;
                    largest_value = left_value;
                }
            }
            if right < len {
                counters.record_array_access();
                let right_value = self.data[right];
                counters.record_comparison();
                if right_value > largest_value {
                    largest = right;
                    largest_value = right_value;
                }
            }

            if largest == index {
                break;
            }

            counters.record_array_access();
            counters.record_swap();
            self.data[index] = largest_value;
            index = largest;
        }

        counters.record_array_access();
        self.data[index] = held;
    }
}
