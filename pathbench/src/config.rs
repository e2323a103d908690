use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::find::Strategy;
use crate::grid::{Grid, Point, WallLayout};
use crate::util::load_grid;

/// Settings for a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct BenchConfig {
    /// Width and height of the square grid (ignored when `wall_image` is set)
    pub grid_size: i32,
    /// Searches run in parallel per pass
    pub job_count: usize,
    /// Measured passes per strategy
    pub passes: usize,
    /// Passes run and thrown away before measuring
    pub warmup_passes: usize,
    pub start: Point,
    /// Defaults to the top right corner
    pub goal: Option<Point>,
    pub walls: WallLayout,
    /// Black and white image to take the grid from instead
    pub wall_image: Option<PathBuf>,
    pub strategies: Vec<Strategy>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            grid_size: 100,
            job_count: 20,
            passes: 200,
            warmup_passes: 200,
            start: Point::new(0, 0),
            goal: None,
            walls: WallLayout::Column,
            wall_image: None,
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: BenchConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Build the grid to search
    pub fn grid(&self) -> Result<Grid, anyhow::Error> {
        let grid = match &self.wall_image {
            Some(path) => load_grid(path)?,
            None => Grid {
                width: self.grid_size,
                height: self.grid_size,
                walls: self.walls.clone(),
            },
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn goal_for(&self, grid: &Grid) -> Point {
        self.goal.unwrap_or(Point::new(grid.width - 1, 0))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_reference_benchmark() {
        let config = BenchConfig::default();
        let grid = config.grid().unwrap();
        assert_eq!((grid.width, grid.height), (100, 100));
        assert_eq!(grid.walls, WallLayout::Column);
        assert_eq!(config.goal_for(&grid), Point::new(99, 0));
        assert_eq!(config.job_count, 20);
        assert_eq!(config.strategies.len(), 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: BenchConfig = serde_json::from_str(
            r#"{ "grid_size": 16, "goal": { "x": 3, "y": 12 }, "walls": "open", "strategies": ["indexed_heap"] }"#,
        )
        .unwrap();

        assert_eq!(config.grid_size, 16);
        assert_eq!(config.goal, Some(Point::new(3, 12)));
        assert_eq!(config.walls, WallLayout::Open);
        assert_eq!(config.strategies, vec![Strategy::IndexedHeap]);
        assert_eq!(config.passes, BenchConfig::default().passes);
    }

    #[test]
    fn mask_layout_from_json() {
        let config: BenchConfig =
            serde_json::from_str(r#"{ "grid_size": 2, "walls": { "mask": [false, true, false, false] } }"#)
                .unwrap();
        let grid = config.grid().unwrap();
        assert!(grid.is_wall(Point::new(1, 0)));
    }

    #[test]
    fn invalid_grid_is_reported() {
        let config = BenchConfig {
            grid_size: 0,
            ..Default::default()
        };
        assert!(config.grid().is_err());
    }
}
