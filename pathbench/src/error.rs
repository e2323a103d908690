//! Errors for malformed search requests.
//!
//! These are all caller errors detected before the search starts. An
//! unreachable goal is not an error: the search terminates normally and
//! yields an empty path.

use std::fmt::Display;

use crate::grid::Point;

/// Which end of the requested path an error refers to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Endpoint::Start => "start",
                Endpoint::Goal => "goal",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Width or height is zero or negative.
    InvalidDimensions { width: i32, height: i32 },
    /// The worst-case path cost on this grid would not fit below the heap sentinels.
    GridTooLarge { width: i32, height: i32 },
    /// Start or goal lies outside of the grid.
    OutOfBounds {
        endpoint: Endpoint,
        point: Point,
        width: i32,
        height: i32,
    },
    /// The open list cannot track every node of the grid.
    CapacityTooSmall { capacity: usize, required: usize },
    /// The open list handed to a new search still holds entries.
    OpenListNotEmpty { len: usize },
    /// A wall mask does not cover the grid exactly.
    MaskSizeMismatch { expected: usize, actual: usize },
}

impl Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::GridTooLarge { width, height } => {
                write!(f, "grid {width}x{height} is too large for 32-bit path costs")
            }
            Self::OutOfBounds {
                endpoint,
                point,
                width,
                height,
            } => write!(
                f,
                "{endpoint} {point} is outside of the {width}x{height} grid"
            ),
            Self::CapacityTooSmall { capacity, required } => write!(
                f,
                "open list capacity {capacity} is smaller than the node count {required}"
            ),
            Self::OpenListNotEmpty { len } => {
                write!(f, "open list still holds {len} entries from an earlier search")
            }
            Self::MaskSizeMismatch { expected, actual } => write!(
                f,
                "wall mask has {actual} cells but the grid has {expected}"
            ),
        }
    }
}

impl std::error::Error for SolveError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = SolveError::OutOfBounds {
            endpoint: Endpoint::Goal,
            point: Point::new(7, -1),
            width: 5,
            height: 5,
        };
        assert_eq!(err.to_string(), "goal (7, -1) is outside of the 5x5 grid");

        let err = SolveError::CapacityTooSmall {
            capacity: 3,
            required: 25,
        };
        assert!(err.to_string().contains("smaller than the node count 25"));
    }

    #[test]
    fn converts_into_anyhow() {
        let err: anyhow::Error = SolveError::InvalidDimensions {
            width: 0,
            height: 4,
        }
        .into();
        assert_eq!(err.to_string(), "invalid grid dimensions 0x4");
    }
}
