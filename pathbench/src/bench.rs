//! Timing harness comparing the open lists.
//!
//! A pass launches `job_count` identical searches in parallel and measures the
//! wall-clock time until all of them are done. Strategies take turns pass by
//! pass so that they see the same machine conditions, and warm-up passes are
//! thrown away before any timing is kept.

use std::fmt::Display;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::BenchConfig;
use crate::error::SolveError;
use crate::find::{solve, solve_with, Strategy};
use crate::grid::{Grid, Point};
use crate::open_list::{ArrayOpenList, IndexedHeapOpenList, LazyHeapOpenList, OpenList};
use crate::path::path_cost;

/// Run `job_count` searches side by side and time them as a whole
pub fn run_pass<O: OpenList>(
    grid: &Grid,
    start: Point,
    goal: Point,
    job_count: usize,
) -> Result<Duration, SolveError> {
    let started = Instant::now();
    (0..job_count)
        .into_par_iter()
        .map(|_| solve::<O>(grid, start, goal).map(|path| path.len()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(started.elapsed())
}

pub fn run_pass_with(
    strategy: Strategy,
    grid: &Grid,
    start: Point,
    goal: Point,
    job_count: usize,
) -> Result<Duration, SolveError> {
    match strategy {
        Strategy::Array => run_pass::<ArrayOpenList>(grid, start, goal, job_count),
        Strategy::LazyHeap => run_pass::<LazyHeapOpenList>(grid, start, goal, job_count),
        Strategy::IndexedHeap => run_pass::<IndexedHeapOpenList>(grid, start, goal, job_count),
    }
}

/// Pass timings of one strategy, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    pub strategy: Strategy,
    pub passes: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl BenchReport {
    fn from_timings(strategy: Strategy, timings: &[Duration]) -> Self {
        let millis: Vec<f64> = timings.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        let (mean_ms, min_ms, max_ms) = if millis.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                millis.iter().sum::<f64>() / millis.len() as f64,
                millis.iter().copied().fold(f64::INFINITY, f64::min),
                millis.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        };

        Self {
            strategy,
            passes: timings.len(),
            mean_ms,
            min_ms,
            max_ms,
        }
    }
}

impl Display for BenchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<13} mean {:>9.3} ms  min {:>9.3} ms  max {:>9.3} ms  ({} passes)",
            self.strategy.to_string(),
            self.mean_ms,
            self.min_ms,
            self.max_ms,
            self.passes
        )
    }
}

/// Run the whole benchmark described by `config`
pub fn run(config: &BenchConfig) -> Result<Vec<BenchReport>, anyhow::Error> {
    let grid = config.grid()?;
    let start = config.start;
    let goal = config.goal_for(&grid);
    info!(
        "benchmarking {:?} on a {}x{} grid, {} -> {}, {} jobs per pass",
        config.strategies, grid.width, grid.height, start, goal, config.job_count
    );

    // one untimed search per strategy to report what is being measured
    for &strategy in &config.strategies {
        let path = solve_with(strategy, &grid, start, goal)?;
        if path.is_empty() {
            warn!("{strategy}: no path from {start} to {goal}");
        } else {
            debug!(
                "{strategy}: path of {} points, cost {}",
                path.len(),
                path_cost(&path)
            );
        }
    }

    for _ in 0..config.warmup_passes {
        for &strategy in &config.strategies {
            run_pass_with(strategy, &grid, start, goal, config.job_count)?;
        }
    }

    let mut timings = vec![Vec::with_capacity(config.passes); config.strategies.len()];
    for _ in 0..config.passes {
        for (i, &strategy) in config.strategies.iter().enumerate() {
            timings[i].push(run_pass_with(strategy, &grid, start, goal, config.job_count)?);
        }
    }

    let reports: Vec<BenchReport> = config
        .strategies
        .iter()
        .zip(&timings)
        .map(|(&strategy, timings)| BenchReport::from_timings(strategy, timings))
        .collect();
    for report in &reports {
        info!("{report}");
    }

    Ok(reports)
}
