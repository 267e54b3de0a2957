//! # u-tour
//!
//! Cluster-first tour optimization: partition geographic points into
//! spatial groups, solve a travelling-salesman tour inside each group
//! exactly or heuristically depending on its size, then stitch the group
//! tours into one closed global tour.
//!
//! ## Modules
//!
//! - [`models`]: points, per-group and global tour results, solve statistics
//! - [`distance`]: planar and great-circle metrics, dense distance matrix
//! - [`solver`]: exact, branch-and-bound, nearest-neighbor and spanning-tree
//!   solvers plus size-based method selection
//! - [`partition`]: the grouping interface and a seeded k-means partitioner
//! - [`assembly`]: group ordering, stitching and the distance breakdown
//! - [`config`]: optimizer configuration
//!
//! ## Example
//!
//! ```
//! use u_tour::assembly::TourAssembler;
//! use u_tour::config::OptimizerConfig;
//! use u_tour::distance::Metric;
//! use u_tour::models::Point;
//! use u_tour::partition::Partition;
//!
//! let points = vec![
//!     Point::new("depot", 0.0, 0.0),
//!     Point::new("north", 0.0, 3.0),
//!     Point::new("east", 4.0, 0.0),
//! ];
//! let partition = Partition::from_labels(&points, &[0, 0, 0]).unwrap();
//! let tour = TourAssembler::new(OptimizerConfig::new(Metric::Planar))
//!     .assemble(&points, &partition)
//!     .unwrap();
//!
//! assert!((tour.intra_group_distance() - 12.0).abs() < 1e-10);
//! // Plus the edge from the last stop back to the first.
//! assert!((tour.total_distance() - 16.0).abs() < 1e-10);
//! ```

pub mod assembly;
pub mod config;
pub mod distance;
pub mod error;
pub mod models;
pub mod partition;
pub mod solver;

pub use error::{Result, TourError};
