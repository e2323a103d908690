use crate::grid::{octile, Cost, Point};
use crate::node::PathNode;

/// Walk the predecessor links back from `goal`.
///
/// The result is ordered goal first, start last. A goal that was never reached
/// gives an empty path, except when it is the start itself: that is a path of
/// one point.
pub fn reconstruct(nodes: &[PathNode], start: usize, goal: usize) -> Vec<Point> {
    let goal_node = &nodes[goal];
    if goal == start {
        return vec![goal_node.position];
    }
    if goal_node.came_from.is_none() {
        return Vec::new();
    }

    let mut path = vec![goal_node.position];
    let mut current = goal_node;
    while let Some(from) = current.came_from {
        current = &nodes[from];
        path.push(current.position);
    }
    debug_assert_eq!(current.index, start, "backtracking did not end at the start");

    path
}

/// Sum of the step costs along a path
pub fn path_cost(path: &[Point]) -> Cost {
    path.windows(2).map(|step| octile(step[0], step[1])).sum()
}
