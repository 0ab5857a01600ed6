//! Unit tests for gp-queue.

#[cfg(test)]
mod helpers {
    use std::cmp::Ordering;

    use crate::{HeapItem, IndexedHeap};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Entry {
        pub id:   u32,
        pub prio: u32,
    }

    impl HeapItem for Entry {
        type Id = u32;
        fn id(&self) -> u32 {
            self.id
        }
    }

    pub fn by_prio(a: &Entry, b: &Entry) -> Ordering {
        a.prio.cmp(&b.prio)
    }

    pub type Queue = IndexedHeap<Entry, fn(&Entry, &Entry) -> Ordering>;

    pub fn queue() -> Queue {
        IndexedHeap::new(by_prio as fn(&Entry, &Entry) -> Ordering)
    }

    pub fn e(id: u32, prio: u32) -> Entry {
        Entry { id, prio }
    }

    /// Extract everything, returning priorities in extraction order.
    pub fn drain(q: &mut Queue) -> Vec<u32> {
        let mut out = Vec::new();
        while let Ok(item) = q.extract_min() {
            out.push(item.prio);
        }
        out
    }
}

// ── Basic contract ────────────────────────────────────────────────────────────

#[cfg(test)]
mod basic {
    use super::helpers::{drain, e, queue};
    use crate::QueueError;

    #[test]
    fn empty_queue_errors() {
        let mut q = queue();
        assert!(q.is_empty());
        assert_eq!(q.peek_min().unwrap_err(), QueueError::Empty);
        assert_eq!(q.extract_min().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = queue();
        q.insert(e(1, 5));
        q.insert(e(2, 3));
        assert_eq!(q.peek_min().unwrap().id, 2);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn extracts_in_priority_order() {
        let mut q = queue();
        for (id, prio) in [(0, 7), (1, 3), (2, 9), (3, 1), (4, 4), (5, 8)] {
            q.insert(e(id, prio));
        }
        assert_eq!(drain(&mut q), vec![1, 3, 4, 7, 8, 9]);
        assert!(q.is_empty());
    }

    #[test]
    fn contains_tracks_identity() {
        let mut q = queue();
        q.insert(e(10, 1));
        assert!(q.contains(10));
        assert!(!q.contains(11));
        q.extract_min().unwrap();
        assert!(!q.contains(10));
    }

    #[test]
    fn clear_empties_index() {
        let mut q = queue();
        q.insert(e(1, 1));
        q.insert(e(2, 2));
        q.clear();
        assert!(q.is_empty());
        assert!(!q.contains(1));
        assert!(q.is_consistent());
    }
}

// ── Arbitrary removal ─────────────────────────────────────────────────────────

#[cfg(test)]
mod removal {
    use super::helpers::{drain, e, queue};

    #[test]
    fn remove_absent_is_noop() {
        let mut q = queue();
        q.insert(e(1, 1));
        assert_eq!(q.remove(99), 0);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn remove_requires_sift_up() {
        // Storage after inserts: [1, 50, 2, 60, 70, 3, 4].
        // Removing 60 moves the last element (4) under 50, where it must sift up.
        let mut q = queue();
        for (id, prio) in [(0, 1), (1, 50), (2, 2), (3, 60), (4, 70), (5, 3), (6, 4)] {
            q.insert(e(id, prio));
        }
        assert_eq!(q.remove(3), 1);
        assert!(q.is_consistent());
        assert_eq!(drain(&mut q), vec![1, 2, 3, 4, 50, 70]);
    }

    #[test]
    fn remove_requires_sift_down() {
        let mut q = queue();
        for (id, prio) in [(0, 1), (1, 2), (2, 30), (3, 3), (4, 4), (5, 31), (6, 32), (7, 90)] {
            q.insert(e(id, prio));
        }
        // Removing the root-adjacent 2 drops 90 into an interior slot.
        assert_eq!(q.remove(1), 1);
        assert!(q.is_consistent());
        assert_eq!(drain(&mut q), vec![1, 3, 4, 30, 31, 32, 90]);
    }

    #[test]
    fn remove_last_slot() {
        let mut q = queue();
        q.insert(e(0, 1));
        q.insert(e(1, 2));
        assert_eq!(q.remove(1), 1);
        assert!(q.is_consistent());
        assert_eq!(drain(&mut q), vec![1]);
    }

    #[test]
    fn remove_drops_every_duplicate() {
        let mut q = queue();
        q.insert(e(7, 5));
        q.insert(e(8, 4));
        q.insert(e(7, 2));
        q.insert(e(7, 9));
        assert_eq!(q.len(), 4);
        assert_eq!(q.remove(7), 3);
        assert!(!q.contains(7));
        assert!(q.is_consistent());
        assert_eq!(drain(&mut q), vec![4]);
    }

    #[test]
    fn duplicates_extract_independently() {
        let mut q = queue();
        q.insert(e(1, 5));
        q.insert(e(1, 2));
        assert_eq!(q.extract_min().unwrap(), e(1, 2));
        assert!(q.contains(1));
        assert_eq!(q.extract_min().unwrap(), e(1, 5));
        assert!(!q.contains(1));
    }
}

// ── Randomised interleavings ──────────────────────────────────────────────────

#[cfg(test)]
mod interleaving {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{drain, e, queue, Entry};

    #[test]
    fn matches_reference_model() {
        for seed in 0..20u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut q = queue();
            let mut model: Vec<Entry> = Vec::new();
            let (mut inserted, mut removed, mut extracted) = (0usize, 0usize, 0usize);

            for _ in 0..500 {
                match rng.gen_range(0..10) {
                    0..=4 => {
                        let item = e(rng.gen_range(0..40), rng.gen_range(0..1_000));
                        q.insert(item);
                        model.push(item);
                        inserted += 1;
                    }
                    5..=6 => {
                        let id = rng.gen_range(0..40);
                        let n = q.remove(id);
                        let before = model.len();
                        model.retain(|m| m.id != id);
                        assert_eq!(n, before - model.len());
                        removed += n;
                    }
                    _ => match q.extract_min() {
                        Ok(item) => {
                            let min = model.iter().map(|m| m.prio).min().unwrap();
                            assert_eq!(item.prio, min, "seed {seed}");
                            let pos = model.iter().position(|m| *m == item).unwrap();
                            model.swap_remove(pos);
                            extracted += 1;
                        }
                        Err(_) => assert!(model.is_empty()),
                    },
                }
                assert_eq!(q.len(), inserted - removed - extracted);
                assert!(q.is_consistent(), "seed {seed}");
            }

            let rest = drain(&mut q);
            assert!(rest.windows(2).all(|w| w[0] <= w[1]), "seed {seed}");
            assert_eq!(rest.len(), model.len());
        }
    }
}
