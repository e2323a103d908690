use crate::grid::Cost;
use crate::node::PathNode;

use super::OpenList;

/// Upper bound on entries per node: a node gets re-queued at most once per
/// expansion of one of its 8 neighbours, and every node is expanded at most once.
const MAX_ENTRIES_PER_NODE: usize = 8;

#[derive(Copy, Clone, Debug)]
struct Element {
    key: Cost,
    value: usize,
}

/// Binary heap with lazy deletion and sentinel keys.
///
/// Slots are 1-indexed. Slot 0 holds the infimum and slot `slots + 1` the
/// supremum, and every unused slot in between also holds the supremum, so the
/// sift loops never need to check whether they ran off either end. Real keys
/// must lie strictly between the two sentinels.
///
/// Enqueue always inserts a fresh entry even if the node is already queued.
/// The outdated entries stay in the heap and are thrown away once they are
/// popped and their node turns out to be closed already.
#[derive(Debug)]
pub struct LazyHeapOpenList {
    data: Vec<Element>,
    slots: usize,
    supremum: Cost,
    size: usize,
    high_water: usize,
}

impl LazyHeapOpenList {
    /// Build a heap with explicit sentinels and room for `slots` entries.
    ///
    /// Inserting a key less than or equal to `infimum`, greater than or equal
    /// to `supremum`, or more than `slots` entries at once corrupts the heap.
    pub fn with_sentinels(slots: usize, infimum: Cost, supremum: Cost) -> Self {
        let mut data = vec![
            Element {
                key: supremum,
                value: 0,
            };
            slots + 2
        ];
        data[0].key = infimum;

        Self {
            data,
            slots,
            supremum,
            size: 0,
            high_water: 0,
        }
    }

    /// Number of entries the heap can hold at once
    pub fn slots(&self) -> usize {
        self.slots
    }

    fn push(&mut self, value: usize, key: Cost) {
        debug_assert!(self.size < self.slots, "lazy heap overflow");
        self.size += 1;

        let mut hole = self.size;
        let mut pred = hole >> 1;
        while self.data[pred].key > key {
            self.data[hole] = self.data[pred];
            hole = pred;
            pred >>= 1;
        }

        self.data[hole] = Element { key, value };
    }

    fn pop(&mut self) -> usize {
        debug_assert!(self.size > 0);
        let min = self.data[1].value;

        // walk the hole down to a leaf, always pulling up the smaller child
        let sz = self.size;
        let mut hole = 1;
        let mut succ = 2;
        while succ < sz {
            if self.data[succ].key > self.data[succ + 1].key {
                succ += 1;
            }
            self.data[hole] = self.data[succ];
            hole = succ;
            succ <<= 1;
        }

        // then bubble the last element up into it
        let bubble = self.data[sz];
        let mut pred = hole >> 1;
        while self.data[pred].key > bubble.key {
            self.data[hole] = self.data[pred];
            hole = pred;
            pred >>= 1;
        }
        self.data[hole] = bubble;

        self.data[sz].key = self.supremum;
        self.size = sz - 1;

        min
    }

    #[cfg(test)]
    fn peek_key(&self) -> Option<Cost> {
        (self.size > 0).then(|| self.data[1].key)
    }
}

impl OpenList for LazyHeapOpenList {
    fn with_capacity(node_count: usize) -> Self {
        Self::with_sentinels(node_count * MAX_ENTRIES_PER_NODE + 1, Cost::MIN, Cost::MAX)
    }

    /// Largest node count whose worst-case number of entries fits in the slots
    fn capacity(&self) -> usize {
        self.slots.saturating_sub(1) / MAX_ENTRIES_PER_NODE
    }

    fn enqueue(&mut self, nodes: &mut [PathNode], index: usize) {
        let node = &mut nodes[index];
        self.push(index, node.f_cost());
        node.set_in_open();
        self.high_water = self.high_water.max(self.size);
    }

    fn dequeue_min(&mut self, nodes: &mut [PathNode]) -> Option<usize> {
        while self.size > 0 {
            let index = self.pop();
            let node = &mut nodes[index];
            node.remove_from_open();
            if !node.is_in_closed() {
                return Some(index);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.size
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::open_list::test_util::{nodes, set_f};

    /// Every parent key is no larger than its children's and unused slots hold the supremum
    fn assert_heap_order(heap: &LazyHeapOpenList) {
        assert_eq!(heap.data[0].key, Cost::MIN);
        for slot in 2..=heap.size {
            assert!(heap.data[slot >> 1].key <= heap.data[slot].key, "slot {slot}");
        }
        for slot in heap.size + 1..heap.data.len() {
            assert_eq!(heap.data[slot].key, heap.supremum);
        }
    }

    #[test]
    fn pops_in_key_order() {
        let mut heap = LazyHeapOpenList::with_sentinels(16, -1, 1000);
        for (value, key) in [(0, 7), (1, 3), (2, 9), (3, 1), (4, 3), (5, 0)] {
            heap.push(value, key);
            assert_heap_order(&heap);
        }

        let mut keys = Vec::new();
        while heap.size > 0 {
            keys.push(heap.peek_key().unwrap());
            heap.pop();
            assert_heap_order(&heap);
        }
        assert_eq!(keys, vec![0, 1, 3, 3, 7, 9]);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let mut nodes = nodes(3);
        let mut list = LazyHeapOpenList::with_capacity(nodes.len());

        set_f(&mut nodes, 0, 50);
        list.enqueue(&mut nodes, 0);
        set_f(&mut nodes, 1, 40);
        list.enqueue(&mut nodes, 1);
        // improve node 0, the entry with key 50 goes stale
        set_f(&mut nodes, 0, 20);
        list.enqueue(&mut nodes, 0);
        assert_eq!(list.len(), 3);

        assert_eq!(list.dequeue_min(&mut nodes), Some(0));
        nodes[0].set_in_closed();
        assert_eq!(list.dequeue_min(&mut nodes), Some(1));
        nodes[1].set_in_closed();

        // only the stale entry is left
        assert_eq!(list.len(), 1);
        assert_eq!(list.dequeue_min(&mut nodes), None);
        assert!(list.is_empty());
    }

    #[test]
    fn capacity_counts_worst_case_entries() {
        assert_eq!(LazyHeapOpenList::with_capacity(25).capacity(), 25);
        assert_eq!(LazyHeapOpenList::with_sentinels(3, Cost::MIN, Cost::MAX).capacity(), 0);
        assert_eq!(LazyHeapOpenList::with_sentinels(0, Cost::MIN, Cost::MAX).capacity(), 0);
        // one slot short of room for 10 nodes
        assert_eq!(LazyHeapOpenList::with_sentinels(80, Cost::MIN, Cost::MAX).capacity(), 9);
    }

    #[test]
    fn dequeue_clears_open_flag() {
        let mut nodes = nodes(2);
        let mut list = LazyHeapOpenList::with_capacity(nodes.len());
        set_f(&mut nodes, 1, 10);
        list.enqueue(&mut nodes, 1);
        assert!(nodes[1].is_in_open());
        assert_eq!(list.dequeue_min(&mut nodes), Some(1));
        assert!(!nodes[1].is_in_open());
    }

    #[test]
    fn root_is_live_minimum_under_random_interleaving() {
        let mut rng = StdRng::seed_from_u64(7);
        let count = 40;
        let mut nodes = nodes(count as i32);
        // nodes stay open far longer than in a search, so allow plenty of duplicates
        let fresh = || LazyHeapOpenList::with_sentinels(4096, Cost::MIN, Cost::MAX);
        let mut list = fresh();

        for _ in 0..2000 {
            if rng.gen_bool(0.6) {
                let index = rng.gen_range(0..count);
                if nodes[index].is_in_closed() {
                    continue;
                }
                // only ever improve, like the search does
                let f = if nodes[index].is_in_open() {
                    nodes[index].f_cost() - rng.gen_range(1..5)
                } else {
                    rng.gen_range(1_000..2_000)
                };
                set_f(&mut nodes, index, f);
                list.enqueue(&mut nodes, index);
            } else {
                let live_min = nodes
                    .iter()
                    .filter(|n| n.is_in_open())
                    .map(|n| n.f_cost())
                    .min();
                match list.dequeue_min(&mut nodes) {
                    Some(index) => {
                        assert_eq!(Some(nodes[index].f_cost()), live_min);
                        nodes[index].set_in_closed();
                    }
                    None => assert_eq!(live_min, None),
                }
            }
            assert_heap_order(&list);
            assert!(list.len() <= list.slots());

            // reopen everything now and then so the heap keeps churning
            if nodes.iter().all(|n| n.is_in_closed()) {
                nodes = crate::open_list::test_util::nodes(count as i32);
                list = fresh();
            }
        }
    }
}
