//! `IndexedHeap` — binary min-heap with removal by identity.
//!
//! # Why this exists
//!
//! `std::collections::BinaryHeap` can only pop its top element.  D* Lite has
//! to pull an arbitrary cell out of its open list whenever that cell's `rhs`
//! changes, and both searches want to order entries by a comparator that is
//! not the entry type's natural `Ord` (`f` for A*, a two-component key for
//! D* Lite).
//!
//! `IndexedHeap` keeps an index from each item's identity to the slots it
//! occupies, so `remove` and `contains` never scan the backing `Vec`.
//!
//! # Removal
//!
//! Removing slot `i` swaps it with the last slot, shrinks the `Vec`, then
//! sifts the element that landed in `i` both up and down.  It may be smaller
//! than its new parent or larger than its new children, and skipping either
//! direction breaks the ordering of later `extract_min` calls.
//!
//! # Duplicates
//!
//! The heap does not deduplicate.  The same identity may be inserted several
//! times with different priorities; `remove(id)` drops every copy.

use std::cmp::Ordering;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::{QueueError, QueueResult};

/// An element that can live in an [`IndexedHeap`].
///
/// `id()` is the element's identity for [`IndexedHeap::remove`] and
/// [`IndexedHeap::contains`].  Two entries with the same id are the same
/// logical element regardless of their priorities.
pub trait HeapItem {
    type Id: Copy + Eq + Hash;

    fn id(&self) -> Self::Id;
}

/// Binary min-heap over a caller-supplied total order.
///
/// `cmp(a, b) == Ordering::Less` means `a` comes out first.
///
/// # Example
///
/// ```
/// use gp_queue::{HeapItem, IndexedHeap};
///
/// #[derive(Clone, Copy)]
/// struct Job { id: u32, prio: u32 }
///
/// impl HeapItem for Job {
///     type Id = u32;
///     fn id(&self) -> u32 { self.id }
/// }
///
/// let mut q = IndexedHeap::new(|a: &Job, b: &Job| a.prio.cmp(&b.prio));
/// q.insert(Job { id: 1, prio: 30 });
/// q.insert(Job { id: 2, prio: 10 });
/// q.insert(Job { id: 3, prio: 20 });
/// assert_eq!(q.remove(2), 1);
/// assert_eq!(q.extract_min().unwrap().id, 3);
/// assert_eq!(q.len(), 1);
/// ```
pub struct IndexedHeap<T: HeapItem, C> {
    heap:  Vec<T>,
    /// Identity → every slot in `heap` holding that identity.
    slots: FxHashMap<T::Id, Vec<usize>>,
    cmp:   C,
}

impl<T, C> IndexedHeap<T, C>
where
    T: HeapItem,
    C: Fn(&T, &T) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self { heap: Vec::new(), slots: FxHashMap::default(), cmp }
    }

    pub fn with_capacity(capacity: usize, cmp: C) -> Self {
        let mut slots = FxHashMap::default();
        slots.reserve(capacity);
        Self { heap: Vec::with_capacity(capacity), slots, cmp }
    }

    /// Number of live entries (duplicates counted separately).
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// `true` if at least one entry with identity `id` is queued.
    #[inline]
    pub fn contains(&self, id: T::Id) -> bool {
        self.slots.contains_key(&id)
    }

    /// Append `item` and sift it up.  O(log n).
    pub fn insert(&mut self, item: T) {
        let slot = self.heap.len();
        self.slots.entry(item.id()).or_default().push(slot);
        self.heap.push(item);
        self.sift_up(slot);
    }

    /// The minimum entry, without removing it.
    pub fn peek_min(&self) -> QueueResult<&T> {
        self.heap.first().ok_or(QueueError::Empty)
    }

    /// Remove and return the minimum entry.  O(log n).
    pub fn extract_min(&mut self) -> QueueResult<T> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }
        Ok(self.remove_at(0))
    }

    /// Remove every entry whose identity is `id`.  Returns how many were
    /// removed; 0 means `id` was not queued.
    pub fn remove(&mut self, id: T::Id) -> usize {
        let mut removed = 0;
        while let Some(slot) = self.slots.get(&id).and_then(|s| s.last().copied()) {
            self.remove_at(slot);
            removed += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    /// Entries in storage order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.heap.iter()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn remove_at(&mut self, slot: usize) -> T {
        let last = self.heap.len() - 1;
        let item = self.heap.swap_remove(slot);
        self.forget(item.id(), slot);
        if slot < last {
            // The former last element now sits at `slot`.
            let moved = self.heap[slot].id();
            self.relocate(moved, last, slot);
            let slot = self.sift_up(slot);
            self.sift_down(slot);
        }
        item
    }

    /// Returns the slot the element came to rest in.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if (self.cmp)(&self.heap[i], &self.heap[parent]) == Ordering::Less {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left  = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            if left < len && (self.cmp)(&self.heap[left], &self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && (self.cmp)(&self.heap[right], &self.heap[smallest]) == Ordering::Less {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        let a = self.heap[i].id();
        let b = self.heap[j].id();
        self.heap.swap(i, j);
        if a != b {
            self.relocate(a, i, j);
            self.relocate(b, j, i);
        }
    }

    fn relocate(&mut self, id: T::Id, from: usize, to: usize) {
        if let Some(slot) = self
            .slots
            .get_mut(&id)
            .and_then(|slots| slots.iter_mut().find(|s| **s == from))
        {
            *slot = to;
        } else {
            debug_assert!(false, "slot index out of sync");
        }
    }

    fn forget(&mut self, id: T::Id, slot: usize) {
        let Some(slots) = self.slots.get_mut(&id) else {
            debug_assert!(false, "slot index out of sync");
            return;
        };
        if let Some(pos) = slots.iter().position(|&s| s == slot) {
            slots.swap_remove(pos);
        }
        if slots.is_empty() {
            self.slots.remove(&id);
        }
    }

    /// Heap order holds and the slot index matches storage.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let ordered = (1..self.heap.len())
            .all(|i| (self.cmp)(&self.heap[i], &self.heap[(i - 1) / 2]) != Ordering::Less);
        let indexed = self.slots.values().map(Vec::len).sum::<usize>() == self.heap.len()
            && self.slots.iter().all(|(id, slots)| {
                slots.iter().all(|&s| self.heap.get(s).is_some_and(|item| item.id() == *id))
            });
        ordered && indexed
    }
}
