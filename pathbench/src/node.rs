//! Per-node search state, stored flat in row-major order.
//!
//! The engine and the open lists mutate these records in place through the
//! flag helpers below. A node's `f_cost` only ever changes through
//! [`PathNode::set_g_cost`].

use std::fmt::Display;
use std::ops::{BitAnd, BitOr, Deref, DerefMut, Not};

use crate::grid::{octile, Cost, Grid, Point};

/// Marker for a `g_cost` that has not been set yet
pub const UNVISITED: Cost = Cost::MAX;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeFlags(u8);

impl NodeFlags {
    pub const EMPTY: NodeFlags = NodeFlags(0);
    pub const WALL: NodeFlags = NodeFlags(1);
    pub const IN_CLOSED: NodeFlags = NodeFlags(2);
    pub const IN_OPEN: NodeFlags = NodeFlags(4);

    pub fn contains(self, other: NodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: NodeFlags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for NodeFlags {
    type Output = NodeFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        NodeFlags(self.0 | rhs.0)
    }
}

impl BitAnd for NodeFlags {
    type Output = NodeFlags;

    fn bitand(self, rhs: Self) -> Self::Output {
        NodeFlags(self.0 & rhs.0)
    }
}

impl Not for NodeFlags {
    type Output = NodeFlags;

    fn not(self) -> Self::Output {
        NodeFlags(!self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub position: Point,
    pub index: usize,
    g_cost: Cost,
    h_cost: Cost,
    f_cost: Cost,
    pub flags: NodeFlags,
    pub came_from: Option<usize>,
}

impl PathNode {
    /// An unvisited node, its heuristic measured towards `goal`
    pub fn new(position: Point, index: usize, goal: Point) -> Self {
        let h_cost = octile(position, goal);
        Self {
            position,
            index,
            g_cost: UNVISITED,
            h_cost,
            f_cost: h_cost,
            flags: NodeFlags::EMPTY,
            came_from: None,
        }
    }

    #[inline]
    pub fn g_cost(&self) -> Cost {
        self.g_cost
    }

    #[inline]
    pub fn h_cost(&self) -> Cost {
        self.h_cost
    }

    #[inline]
    pub fn f_cost(&self) -> Cost {
        self.f_cost
    }

    /// Set the cost so far and recompute the total estimate
    #[inline]
    pub fn set_g_cost(&mut self, g_cost: Cost) {
        self.g_cost = g_cost;
        self.f_cost = g_cost + self.h_cost;
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.flags.contains(NodeFlags::WALL)
    }

    #[inline]
    pub fn is_in_open(&self) -> bool {
        self.flags.contains(NodeFlags::IN_OPEN)
    }

    #[inline]
    pub fn is_in_closed(&self) -> bool {
        self.flags.contains(NodeFlags::IN_CLOSED)
    }

    #[inline]
    pub fn is_blocked_or_closed(&self) -> bool {
        self.flags.intersects(NodeFlags::WALL | NodeFlags::IN_CLOSED)
    }

    pub fn set_wall(&mut self) {
        self.flags = self.flags | NodeFlags::WALL;
    }

    #[inline]
    pub fn set_in_open(&mut self) {
        self.flags = self.flags | NodeFlags::IN_OPEN;
    }

    #[inline]
    pub fn remove_from_open(&mut self) {
        self.flags = self.flags & !NodeFlags::IN_OPEN;
    }

    #[inline]
    pub fn set_in_closed(&mut self) {
        self.flags = self.flags | NodeFlags::IN_CLOSED;
    }
}

impl Display for PathNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wall() {
            write!(f, "XXX ")
        } else if self.g_cost == UNVISITED {
            write!(f, "{:3} ", "")
        } else {
            write!(f, "{:03} ", self.g_cost)
        }
    }
}

/// All nodes of one search, created fresh for every call.
#[derive(Debug)]
pub struct NodeArray {
    width: i32,
    nodes: Vec<PathNode>,
}

impl NodeArray {
    /// Lay out every node of a validated `grid` with its heuristic towards `goal`
    /// and mark the walls.
    pub fn new(grid: &Grid, goal: Point) -> Self {
        let mut nodes = Vec::with_capacity(grid.node_count());
        for y in 0..grid.height {
            for x in 0..grid.width {
                let position = Point::new(x, y);
                let mut node = PathNode::new(position, grid.index(position), goal);
                if grid.is_wall(position) {
                    node.set_wall();
                }
                nodes.push(node);
            }
        }

        Self {
            width: grid.width,
            nodes,
        }
    }
}

impl Deref for NodeArray {
    type Target = [PathNode];

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl DerefMut for NodeArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.nodes
    }
}

impl Display for NodeArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.nodes.chunks(self.width as usize) {
            for node in row {
                write!(f, "{}", node)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
