//! Interchangeable frontiers for the A* loop.
//!
//! All three lists order node indices by the `f_cost` stored in the node array,
//! but they differ in how they react to a node whose cost improves while it is
//! still queued:
//!
//! | List | Enqueue | Dequeue | Re-enqueue of a queued node |
//! |---|---|---|---|
//! | [`ArrayOpenList`] | O(1) | O(n) | ignored, cost is re-read while scanning |
//! | [`LazyHeapOpenList`] | O(log n) | O(log n) amortized | duplicate entry, stale ones skipped on pop |
//! | [`IndexedHeapOpenList`] | O(log n) | O(log n) | decrease-key in place |
//!
//! Ties between equal `f_cost` values are broken by the structure of each list,
//! so two lists may return different (equally short) paths.

mod array;
mod indexed_heap;
mod lazy_heap;

pub use array::ArrayOpenList;
pub use indexed_heap::IndexedHeapOpenList;
pub use lazy_heap::LazyHeapOpenList;

use crate::node::PathNode;

pub trait OpenList {
    /// Create a list able to hold every node index below `node_count`.
    ///
    /// All backing storage is allocated here; `enqueue` never grows it.
    fn with_capacity(node_count: usize) -> Self
    where
        Self: Sized;

    /// Number of grid nodes a search using this list may cover
    fn capacity(&self) -> usize;

    /// Queue a node whose cost was just set or improved and mark it as open
    fn enqueue(&mut self, nodes: &mut [PathNode], index: usize);

    /// Remove the open node with the lowest `f_cost` and clear its open flag.
    ///
    /// Returns `None` once no live entry is left.
    fn dequeue_min(&mut self, nodes: &mut [PathNode]) -> Option<usize>;

    /// Number of stored entries, including stale ones for lists that keep them
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The largest number of entries held at once
    fn high_water(&self) -> usize;
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::grid::{Cost, Grid, Point};
    use crate::node::{NodeArray, PathNode};

    /// A row of nodes whose costs can be set freely
    pub fn nodes(count: i32) -> NodeArray {
        NodeArray::new(&Grid::new(count, 1), Point::new(0, 0))
    }

    /// Give a node the requested total cost
    pub fn set_f(nodes: &mut [PathNode], index: usize, f_cost: Cost) {
        let h_cost = nodes[index].h_cost();
        nodes[index].set_g_cost(f_cost - h_cost);
    }
}
