use std::fmt::Display;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::{Endpoint, SolveError};

/// Integer path cost. Straight moves cost [`MOVE_STRAIGHT_COST`], diagonal moves
/// [`MOVE_DIAGONAL_COST`].
pub type Cost = i32;

pub const MOVE_STRAIGHT_COST: Cost = 10;
pub const MOVE_DIAGONAL_COST: Cost = 14;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Octile distance between two points.
///
/// Admissible and consistent for 8-directional movement, and exact when nothing
/// blocks the way.
pub fn octile(a: Point, b: Point) -> Cost {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    MOVE_DIAGONAL_COST * dx.min(dy) + MOVE_STRAIGHT_COST * (dx - dy).abs()
}

/// Where the walls of a [`Grid`] are
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallLayout {
    /// No walls at all
    Open,
    /// Benchmark pattern: the column at `width / 2` is solid except for its last row
    #[default]
    Column,
    /// Row-major mask, `true` marks a wall
    Mask(Vec<bool>),
}

/// The topology of a search: a rectangle of cells and its walls
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub walls: WallLayout,
}

impl Grid {
    /// A grid without any walls
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: WallLayout::Open,
        }
    }

    /// A grid with the single-gap wall column used for benchmarking
    pub fn with_column_wall(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: WallLayout::Column,
        }
    }

    pub fn with_mask(width: i32, height: i32, mask: Vec<bool>) -> Self {
        Self {
            width,
            height,
            walls: WallLayout::Mask(mask),
        }
    }

    /// Check that the grid can be searched at all.
    ///
    /// The largest key ever handed to an open list is bounded by a path through
    /// every node using diagonal moves plus the largest heuristic value, and it
    /// has to stay strictly below [`Cost::MAX`], which doubles as the unvisited
    /// marker and the heap supremum.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SolveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let nodes = self.width as i64 * self.height as i64;
        let worst = nodes * MOVE_DIAGONAL_COST as i64
            + self.width.max(self.height) as i64 * MOVE_DIAGONAL_COST as i64;
        if worst >= Cost::MAX as i64 {
            return Err(SolveError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        if let WallLayout::Mask(mask) = &self.walls {
            if mask.len() != self.node_count() {
                return Err(SolveError::MaskSizeMismatch {
                    expected: self.node_count(),
                    actual: mask.len(),
                });
            }
        }

        Ok(())
    }

    pub(crate) fn check_endpoint(
        &self,
        endpoint: Endpoint,
        point: Point,
    ) -> Result<(), SolveError> {
        if self.contains(point) {
            Ok(())
        } else {
            Err(SolveError::OutOfBounds {
                endpoint,
                point,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn node_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Row-major index of a point inside the grid
    #[inline]
    pub fn index(&self, p: Point) -> usize {
        debug_assert!(self.contains(p));
        (p.x + p.y * self.width) as usize
    }

    /// Point at a row-major index of a validated grid
    pub(crate) fn point(&self, index: usize) -> Point {
        debug_assert!(self.width > 0);
        let index = index as i32;
        Point {
            x: index % self.width,
            y: index / self.width,
        }
    }

    /// Cells a short mask does not cover count as walls
    pub fn is_wall(&self, p: Point) -> bool {
        match &self.walls {
            WallLayout::Open => false,
            WallLayout::Column => p.x == self.width / 2 && p.y < self.height - 1,
            WallLayout::Mask(mask) => mask.get(self.index(p)).copied().unwrap_or(true),
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", if self.is_wall(Point::new(x, y)) { "X" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
