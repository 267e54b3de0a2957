//! Domain model types for cluster-first tour optimization.
//!
//! Provides named points with latitude/longitude coordinates, the statistics
//! a solver reports for each group, and the per-group and global tour
//! results the assembler produces.

mod point;
mod solution;
mod stats;

pub use point::{Coordinate, Point};
pub use solution::{GlobalTour, GroupTour, MethodUsage};
pub use stats::{SearchCounters, SolveStats};
