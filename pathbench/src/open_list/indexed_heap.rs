use crate::grid::Cost;
use crate::node::PathNode;

use super::OpenList;

/// Marks a node index that has no entry in the heap
const ABSENT: usize = usize::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    f_cost: Cost,
    index: usize,
}

/// Binary min-heap with decrease-key.
///
/// `slots[node]` is the heap position of that node's entry, or [`ABSENT`].
/// Every node has at most one entry, so both arrays are sized to the node count
/// up front and never grow.
#[derive(Debug)]
pub struct IndexedHeapOpenList {
    data: Vec<Entry>,
    slots: Vec<usize>,
    high_water: usize,
}

impl IndexedHeapOpenList {
    pub fn contains(&self, index: usize) -> bool {
        self.slots[index] != ABSENT
    }

    /// The node index at the root, if any
    pub fn peek_min(&self) -> Option<usize> {
        self.data.first().map(|e| e.index)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.slots[self.data[a].index] = a;
        self.slots[self.data[b].index] = b;
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.data[parent].f_cost <= self.data[slot].f_cost {
                return;
            }
            self.swap(parent, slot);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let size = self.data.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            if left >= size {
                return;
            }

            let mut min = slot;
            if self.data[min].f_cost > self.data[left].f_cost {
                min = left;
            }
            if right < size && self.data[min].f_cost > self.data[right].f_cost {
                min = right;
            }
            if min == slot {
                return;
            }

            self.swap(slot, min);
            slot = min;
        }
    }
}

impl OpenList for IndexedHeapOpenList {
    fn with_capacity(node_count: usize) -> Self {
        Self {
            data: Vec::with_capacity(node_count),
            slots: vec![ABSENT; node_count],
            high_water: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn enqueue(&mut self, nodes: &mut [PathNode], index: usize) {
        let node = &mut nodes[index];
        let f_cost = node.f_cost();
        node.set_in_open();

        let slot = self.slots[index];
        if slot == ABSENT {
            let slot = self.data.len();
            self.data.push(Entry { f_cost, index });
            self.slots[index] = slot;
            self.sift_up(slot);
            self.high_water = self.high_water.max(self.data.len());
            return;
        }

        let old = self.data[slot].f_cost;
        if f_cost == old {
            return;
        }
        self.data[slot].f_cost = f_cost;
        if f_cost < old {
            self.sift_up(slot);
        } else {
            // the search only ever improves costs, but keep the heap valid anyway
            self.sift_down(slot);
        }
    }

    fn dequeue_min(&mut self, nodes: &mut [PathNode]) -> Option<usize> {
        if self.data.is_empty() {
            return None;
        }

        let min = self.data.swap_remove(0).index;
        if let Some(moved) = self.data.first() {
            self.slots[moved.index] = 0;
        }
        self.slots[min] = ABSENT;
        self.sift_down(0);

        nodes[min].remove_from_open();
        Some(min)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}
