//! Sparse set of NFA state IDs, used as the simulation frontier.
//!
//! Based on: https://research.swtch.com/sparse
//!
//! Insertion and membership are O(1), clearing is O(1), and iteration
//! follows insertion order. The matcher relies on that order to decide
//! which thread wins a state during a search.

use crate::nfa::StateId;

/// A set of state IDs below a fixed capacity.
#[derive(Clone, Debug)]
pub struct SparseSet {
    /// Number of elements currently in the set.
    len: usize,
    /// IDs in insertion order.
    dense: Vec<StateId>,
    /// Maps an ID to its position in `dense`.
    /// An ID is in the set iff sparse[id] < len && dense[sparse[id]] == id.
    sparse: Vec<usize>,
}

impl SparseSet {
    /// Create a new sparse set for IDs in `[0, capacity)`.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        SparseSet { len: 0, dense: vec![0; capacity], sparse: vec![0; capacity] }
    }

    /// Returns the capacity of this set.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an ID into the set. Returns true if the ID was not already
    /// present.
    ///
    /// Panics if id >= capacity.
    #[inline]
    pub fn insert(&mut self, id: StateId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.dense[self.len] = id;
        self.sparse[id] = self.len;
        self.len += 1;
        true
    }

    /// Panics if id >= capacity.
    #[inline]
    pub fn contains(&self, id: StateId) -> bool {
        let idx = self.sparse[id];
        idx < self.len && self.dense[idx] == id
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Iterate over elements in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.dense[..self.len].iter().copied()
    }
}
