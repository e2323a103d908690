use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Endpoint, SolveError};
use crate::grid::{octile, Cost, Grid, Point};
use crate::node::{NodeArray, PathNode};
use crate::open_list::{ArrayOpenList, IndexedHeapOpenList, LazyHeapOpenList, OpenList};
use crate::path::reconstruct;

/// The 8 directions plus the zero offset. The zero offset lands on the node
/// being expanded, which is already closed at that point and gets skipped.
const NEIGHBOR_OFFSETS: [Point; 9] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(0, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct PathResult {
    /// Ordered from start to goal, both included
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    pub total_cost: Cost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState {
    Computing,
    NoPathFound,
    PathFound(PathResult),
}

impl PathFinderState {
    pub fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// A* over a grid, generic over the open list so that each strategy gets its
/// own monomorphized search loop.
///
/// The node array and the open list belong to this finder alone and are
/// dropped with it.
#[derive(Debug)]
pub struct PathFinder<'g, O: OpenList> {
    grid: &'g Grid,
    start: Point,
    goal: Point,
    start_index: usize,
    goal_index: usize,
    nodes: NodeArray,
    open_list: O,
    state: PathFinderState,
}

impl<'g, O: OpenList> PathFinder<'g, O> {
    /// Set up a search with an open list sized to the grid
    pub fn new(grid: &'g Grid, start: Point, goal: Point) -> Result<Self, SolveError> {
        check_request(grid, start, goal)?;
        let open_list = O::with_capacity(grid.node_count());
        Ok(Self::seeded(grid, start, goal, open_list))
    }

    /// Set up a search with a caller-provided, empty open list
    pub fn with_open_list(
        grid: &'g Grid,
        start: Point,
        goal: Point,
        open_list: O,
    ) -> Result<Self, SolveError> {
        check_request(grid, start, goal)?;
        if open_list.capacity() < grid.node_count() {
            return Err(SolveError::CapacityTooSmall {
                capacity: open_list.capacity(),
                required: grid.node_count(),
            });
        }
        if !open_list.is_empty() {
            return Err(SolveError::OpenListNotEmpty {
                len: open_list.len(),
            });
        }
        Ok(Self::seeded(grid, start, goal, open_list))
    }

    fn seeded(grid: &'g Grid, start: Point, goal: Point, mut open_list: O) -> Self {
        let mut nodes = NodeArray::new(grid, goal);
        let start_index = grid.index(start);
        nodes[start_index].set_g_cost(0);
        open_list.enqueue(&mut nodes, start_index);

        Self {
            grid,
            start,
            goal,
            start_index,
            goal_index: grid.index(goal),
            nodes,
            open_list,
            state: PathFinderState::Computing,
        }
    }

    /// Run the search to the end and hand back the final state and the node array
    pub fn finish(mut self) -> (PathFinderState, NodeArray) {
        while !self.step().is_done() {}
        (self.state, self.nodes)
    }

    /// Expand a single node
    pub fn step(&mut self) -> &PathFinderState {
        if self.state.is_done() {
            return &self.state;
        }

        let Some(current) = self.open_list.dequeue_min(&mut self.nodes) else {
            self.state = PathFinderState::NoPathFound;
            return &self.state;
        };

        if current == self.goal_index {
            let mut path = reconstruct(&self.nodes, self.start_index, current);
            path.reverse();

            self.state = PathFinderState::PathFound(PathResult {
                path,
                start: self.start,
                goal: self.goal,
                total_cost: self.nodes[current].g_cost(),
            });
            return &self.state;
        }

        self.expand(current);
        &self.state
    }

    fn expand(&mut self, current: usize) {
        let nodes: &mut [PathNode] = &mut self.nodes;
        nodes[current].set_in_closed();
        let position = nodes[current].position;
        let g_cost = nodes[current].g_cost();

        for offset in NEIGHBOR_OFFSETS {
            let neighbor = position + offset;
            if !self.grid.contains(neighbor) {
                continue;
            }

            let index = self.grid.index(neighbor);
            let node = &mut nodes[index];
            if node.is_blocked_or_closed() {
                continue;
            }

            let tentative = g_cost + octile(position, neighbor);
            if tentative < node.g_cost() {
                node.came_from = Some(current);
                node.set_g_cost(tentative);
                self.open_list.enqueue(nodes, index);
            }
        }
    }

    pub fn state(&self) -> &PathFinderState {
        &self.state
    }

    pub fn nodes(&self) -> &NodeArray {
        &self.nodes
    }

    pub fn open_list(&self) -> &O {
        &self.open_list
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }
}

fn check_request(grid: &Grid, start: Point, goal: Point) -> Result<(), SolveError> {
    grid.validate()?;
    grid.check_endpoint(Endpoint::Start, start)?;
    grid.check_endpoint(Endpoint::Goal, goal)
}

/// Shortest path from `start` to `goal`, using `O` as the open list.
///
/// The path runs from start to goal. It is empty when the goal cannot be
/// reached and holds just `start` when start and goal coincide.
pub fn solve<O: OpenList>(grid: &Grid, start: Point, goal: Point) -> Result<Vec<Point>, SolveError> {
    let (state, _) = PathFinder::<O>::new(grid, start, goal)?.finish();
    Ok(match state {
        PathFinderState::PathFound(result) => result.path,
        _ => Vec::new(),
    })
}

/// The open list implementations, for choosing one at run time
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Array,
    LazyHeap,
    IndexedHeap,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Array, Strategy::LazyHeap, Strategy::IndexedHeap];
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strategy::Array => "array",
                Strategy::LazyHeap => "lazy_heap",
                Strategy::IndexedHeap => "indexed_heap",
            }
        )
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" => Ok(Strategy::Array),
            "lazy_heap" => Ok(Strategy::LazyHeap),
            "indexed_heap" => Ok(Strategy::IndexedHeap),
            _ => Err(anyhow::anyhow!("Invalid strategy: {}", s)),
        }
    }
}

/// [`solve`] with the open list picked by `strategy`.
///
/// The choice is made once per call; the search loop itself is the
/// monomorphized one of the chosen list.
pub fn solve_with(
    strategy: Strategy,
    grid: &Grid,
    start: Point,
    goal: Point,
) -> Result<Vec<Point>, SolveError> {
    match strategy {
        Strategy::Array => solve::<ArrayOpenList>(grid, start, goal),
        Strategy::LazyHeap => solve::<LazyHeapOpenList>(grid, start, goal),
        Strategy::IndexedHeap => solve::<IndexedHeapOpenList>(grid, start, goal),
    }
}
