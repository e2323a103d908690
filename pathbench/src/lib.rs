//! A* on a fixed-size grid with three interchangeable open lists, plus the
//! harness used to time them against each other.
//!
//! Every call to [`solve`] builds its own node array and open list and drops
//! them before returning, so calls can run on as many threads as needed
//! without sharing anything.

pub mod bench;
pub mod config;
pub mod error;
pub mod find;
pub mod grid;
pub mod node;
pub mod open_list;
pub mod path;
pub mod util;

pub use error::SolveError;
pub use find::{solve, solve_with, PathFinder, PathFinderState, PathResult, Strategy};
pub use grid::{octile, Cost, Grid, Point, WallLayout};
pub use open_list::{ArrayOpenList, IndexedHeapOpenList, LazyHeapOpenList, OpenList};
