use crate::node::PathNode;

use super::OpenList;

/// Unordered list of node indices, scanned in full on every dequeue.
///
/// No key is stored: the scan reads the current `f_cost` from the node array,
/// so a queued node whose cost improves needs no extra work.
#[derive(Debug)]
pub struct ArrayOpenList {
    data: Vec<usize>,
    capacity: usize,
    high_water: usize,
}

impl OpenList for ArrayOpenList {
    fn with_capacity(node_count: usize) -> Self {
        Self {
            data: Vec::with_capacity(node_count),
            capacity: node_count,
            high_water: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn enqueue(&mut self, nodes: &mut [PathNode], index: usize) {
        let node = &mut nodes[index];
        if !node.is_in_open() {
            debug_assert!(self.data.len() < self.capacity);
            self.data.push(index);
            node.set_in_open();
            self.high_water = self.high_water.max(self.data.len());
        }
    }

    fn dequeue_min(&mut self, nodes: &mut [PathNode]) -> Option<usize> {
        let (&first, rest) = self.data.split_first()?;

        // first-seen minimum wins ties
        let mut min_slot = 0;
        let mut min_f_cost = nodes[first].f_cost();
        for (slot, &index) in rest.iter().enumerate() {
            let f_cost = nodes[index].f_cost();
            if f_cost < min_f_cost {
                min_slot = slot + 1;
                min_f_cost = f_cost;
            }
        }

        let min_index = self.data.swap_remove(min_slot);
        nodes[min_index].remove_from_open();
        Some(min_index)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}
