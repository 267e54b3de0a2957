//! Runs the selected solver on one instance and records its statistics.

use std::time::Instant;

use super::{
    ExactSolver, Method, MethodRequest, MethodSelector, NearestNeighborSolver, PrunedSolver,
    SolverOutput, SpanningTreeSolver, TspSolver,
};
use crate::config::OptimizerConfig;
use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::SolveStats;

/// A solved instance: the local tour plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedTour {
    /// Visit order over local indices.
    pub tour: Vec<usize>,
    /// Method, timing, counters and warning.
    pub stats: SolveStats,
}

/// Selects a method for `distances` under `request` and runs it.
///
/// Forced methods run even when oversized (the warning is attached to the
/// stats and logged); only the exhaustive solvers' hard limits from
/// `config` can refuse an instance.
///
/// # Errors
///
/// [`TourError::EmptyInput`] for an empty matrix, and
/// [`TourError::InputSizeExceeded`] beyond a hard limit.
///
/// # Examples
///
/// ```
/// use u_tour::config::OptimizerConfig;
/// use u_tour::distance::{DistanceMatrix, Metric};
/// use u_tour::models::Point;
/// use u_tour::solver::{solve, Method, MethodRequest};
///
/// let points: Vec<Point> = (0..5).map(|i| Point::new("p", i as f64, 0.0)).collect();
/// let config = OptimizerConfig::new(Metric::Planar);
/// let dm = DistanceMatrix::from_points(&points, &config.metric);
///
/// let solved = solve(&dm, MethodRequest::Automatic, &config).unwrap();
/// assert_eq!(solved.stats.method, Some(Method::Exact));
/// assert!((solved.stats.length - 8.0).abs() < 1e-10);
/// ```
pub fn solve(
    distances: &DistanceMatrix,
    request: MethodRequest,
    config: &OptimizerConfig,
) -> Result<SolvedTour> {
    let n = distances.size();
    if n == 0 {
        return Err(TourError::EmptyInput);
    }
    debug_assert!(distances.is_symmetric(1e-9), "solvers assume a symmetric matrix");

    let selection = MethodSelector::new(config.thresholds).select(n, request);
    if let Some(warning) = &selection.warning {
        log::warn!("solver.select: {warning}");
    }

    let started = Instant::now();
    let output = run(selection.method, distances, config)?;
    let elapsed = started.elapsed();

    log::debug!(
        "solver.solve: method={} n={n} length={:.4} elapsed={elapsed:?}",
        selection.method,
        output.length
    );

    Ok(SolvedTour {
        stats: SolveStats {
            method: Some(selection.method),
            requested: request,
            points: n,
            length: output.length,
            elapsed,
            counters: output.counters,
            warning: selection.warning,
        },
        tour: output.tour,
    })
}

fn run(method: Method, distances: &DistanceMatrix, config: &OptimizerConfig) -> Result<SolverOutput> {
    match method {
        Method::Exact => ExactSolver::new()
            .with_max_size(config.exact_hard_limit)
            .solve(distances),
        Method::Pruned => PrunedSolver::new()
            .with_max_size(config.pruned_hard_limit)
            .solve(distances),
        Method::NearestNeighbor => NearestNeighborSolver::new().solve(distances),
        Method::SpanningTree => SpanningTreeSolver.solve(distances),
    }
}
