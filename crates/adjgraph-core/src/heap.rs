//! Indexed binary min-heap with decrease-key support.
//!
//! # Overview
//!
//! [`IndexedMinHeap`] stores `(key, value)` pairs ordered by `value`, plus a
//! `key → slot` map so a queued key can be located in O(1). That map is what
//! makes `update_key` and `remove_key` O(log n) instead of O(n), which is the
//! decrease-key contract Dijkstra and A* rely on.
//!
//! # Invariants
//!
//! - `position[items[i].0] == i` for every slot `i`; every swap updates both
//!   entries.
//! - `items[parent(i)].1 <= items[i].1` for every non-root slot.
//! - Keys are unique.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::HeapError;

/// Binary min-heap over `(K, V)` pairs with a key → position index.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K, V> {
    items: Vec<(K, V)>,
    position: HashMap<K, usize>,
}

impl<K, V> Default for IndexedMinHeap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IndexedMinHeap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialOrd,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            position: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            position: HashMap::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.position.contains_key(key)
    }

    /// Queue `key` with priority `value`.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::DuplicateKey`] if `key` is already queued.
    pub fn push(&mut self, key: K, value: V) -> Result<(), HeapError> {
        if self.position.contains_key(&key) {
            return Err(HeapError::DuplicateKey);
        }

        let slot = self.items.len();
        self.position.insert(key.clone(), slot);
        self.items.push((key, value));
        self.sift_up(slot);
        Ok(())
    }

    /// Smallest entry without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::Empty`] if nothing is queued.
    pub fn peek(&self) -> Result<(&K, &V), HeapError> {
        self.items
            .first()
            .map(|(key, value)| (key, value))
            .ok_or(HeapError::Empty)
    }

    /// Remove and return the entry with the smallest value.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::Empty`] if nothing is queued.
    pub fn pop(&mut self) -> Result<(K, V), HeapError> {
        if self.items.is_empty() {
            return Err(HeapError::Empty);
        }
        Ok(self.take_slot(0))
    }

    /// Replace the value stored for `key`, restoring heap order.
    ///
    /// The new value may be smaller or larger than the old one.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::KeyNotFound`] if `key` is not queued.
    pub fn update_key(&mut self, key: &K, value: V) -> Result<(), HeapError> {
        let slot = self.index_of_key(key)?;
        self.items[slot].1 = value;
        let slot = self.sift_up(slot);
        self.sift_down(slot);
        Ok(())
    }

    /// Remove `key` and return its value.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::KeyNotFound`] if `key` is not queued.
    pub fn remove_key(&mut self, key: &K) -> Result<V, HeapError> {
        let slot = self.index_of_key(key)?;
        Ok(self.take_slot(slot).1)
    }

    /// Slot currently holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::KeyNotFound`] if `key` is not queued.
    pub fn index_of_key(&self, key: &K) -> Result<usize, HeapError> {
        self.position.get(key).copied().ok_or(HeapError::KeyNotFound)
    }

    /// Value currently stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::KeyNotFound`] if `key` is not queued.
    pub fn value_of_key(&self, key: &K) -> Result<&V, HeapError> {
        let slot = self.index_of_key(key)?;
        Ok(&self.items[slot].1)
    }

    /// Iterate queued entries in slot order (not priority order).
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.items.iter().map(|(key, value)| (key, value))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Move the last entry into `slot`, shrink, and re-establish heap order.
    fn take_slot(&mut self, slot: usize) -> (K, V) {
        let last = self.items.len() - 1;
        if slot != last {
            self.swap(slot, last);
        }

        let (key, value) = self
            .items
            .pop()
            .unwrap_or_else(|| unreachable!("take_slot on an empty heap"));
        self.position.remove(&key);

        if slot < self.items.len() {
            let slot = self.sift_up(slot);
            self.sift_down(slot);
        }

        (key, value)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        if let Some(p) = self.position.get_mut(&self.items[a].0) {
            *p = a;
        }
        if let Some(p) = self.position.get_mut(&self.items[b].0) {
            *p = b;
        }
    }

    /// Returns the slot the entry settled in.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.items[slot].1 < self.items[parent].1 {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.items[left].1 < self.items[smallest].1 {
                smallest = left;
            }
            if right < len && self.items[right].1 < self.items[smallest].1 {
                smallest = right;
            }
            if smallest == slot {
                return;
            }

            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_invariants(heap: &IndexedMinHeap<u32, i64>) {
        assert_eq!(heap.items.len(), heap.position.len());
        for (slot, (key, value)) in heap.items.iter().enumerate() {
            assert_eq!(heap.position[key], slot, "position map out of sync for {key}");
            if slot > 0 {
                let parent = (slot - 1) / 2;
                assert!(
                    heap.items[parent].1 <= *value,
                    "heap order violated at slot {slot}"
                );
            }
        }
    }

    #[test]
    fn pops_in_value_order() {
        let mut heap = IndexedMinHeap::new();
        for (key, value) in [(1_u32, 50_i64), (2, 10), (3, 40), (4, 20), (5, 30)] {
            heap.push(key, value).expect("unique key");
        }

        let popped: Vec<u32> = std::iter::from_fn(|| heap.pop().ok().map(|(k, _)| k)).collect();
        assert_eq!(popped, vec![2, 4, 5, 3, 1]);
    }

    #[test]
    fn duplicate_push_is_rejected() {
        let mut heap = IndexedMinHeap::new();
        heap.push(1_u32, 1_i64).expect("first push");
        assert_eq!(heap.push(1, 0), Err(HeapError::DuplicateKey));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn empty_heap_operations_fail() {
        let mut heap: IndexedMinHeap<u32, i64> = IndexedMinHeap::new();
        assert_eq!(heap.pop(), Err(HeapError::Empty));
        assert_eq!(heap.peek(), Err(HeapError::Empty));
        assert_eq!(heap.update_key(&3, 1), Err(HeapError::KeyNotFound));
        assert_eq!(heap.remove_key(&3), Err(HeapError::KeyNotFound));
        assert_eq!(heap.value_of_key(&3), Err(HeapError::KeyNotFound));
    }

    #[test]
    fn decrease_key_moves_entry_to_root() {
        let mut heap = IndexedMinHeap::new();
        for key in 0_u32..8 {
            heap.push(key, i64::from(key) * 10).expect("unique key");
        }

        heap.update_key(&7, -1).expect("queued");
        assert_eq!(heap.index_of_key(&7), Ok(0));
        assert_eq!(heap.peek(), Ok((&7, &-1)));
        assert_invariants(&heap);
    }

    #[test]
    fn increase_key_sinks_entry() {
        let mut heap = IndexedMinHeap::new();
        for key in 0_u32..8 {
            heap.push(key, i64::from(key)).expect("unique key");
        }

        heap.update_key(&0, 100).expect("queued");
        assert_eq!(heap.peek().map(|(k, _)| *k), Ok(1));
        assert_eq!(heap.value_of_key(&0), Ok(&100));
        assert_invariants(&heap);
    }

    #[test]
    fn remove_key_from_middle_keeps_order() {
        let mut heap = IndexedMinHeap::new();
        for key in 0_u32..10 {
            heap.push(key, i64::from(9 - key)).expect("unique key");
        }

        assert_eq!(heap.remove_key(&4), Ok(5));
        assert!(!heap.contains_key(&4));
        assert_invariants(&heap);

        let values: Vec<i64> = std::iter::from_fn(|| heap.pop().ok().map(|(_, v)| v)).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 6, 7, 8, 9]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u32, i64),
        Pop,
        Update(u32, i64),
        Remove(u32),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0_u32..32, -100_i64..100).prop_map(|(k, v)| Op::Push(k, v)),
            Just(Op::Pop),
            (0_u32..32, -100_i64..100).prop_map(|(k, v)| Op::Update(k, v)),
            (0_u32..32).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_after_any_operation_sequence(ops in prop::collection::vec(arb_op(), 0..200)) {
            let mut heap = IndexedMinHeap::new();
            let mut model: HashMap<u32, i64> = HashMap::new();

            for op in ops {
                match op {
                    Op::Push(k, v) => {
                        let result = heap.push(k, v);
                        prop_assert_eq!(result.is_ok(), !model.contains_key(&k));
                        model.entry(k).or_insert(v);
                    }
                    Op::Pop => match heap.pop() {
                        Ok((k, v)) => {
                            let min = model.values().copied().min();
                            prop_assert_eq!(Some(v), min);
                            prop_assert_eq!(model.remove(&k), Some(v));
                        }
                        Err(err) => {
                            prop_assert_eq!(err, HeapError::Empty);
                            prop_assert!(model.is_empty());
                        }
                    },
                    Op::Update(k, v) => {
                        let result = heap.update_key(&k, v);
                        prop_assert_eq!(result.is_ok(), model.contains_key(&k));
                        if let Some(slot) = model.get_mut(&k) {
                            *slot = v;
                        }
                    }
                    Op::Remove(k) => {
                        let result = heap.remove_key(&k).ok();
                        prop_assert_eq!(result, model.remove(&k));
                    }
                }
                assert_invariants(&heap);
            }
        }
    }
}
