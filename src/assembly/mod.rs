//! Global tour assembly.
//!
//! Turns a [`Partition`](crate::partition::Partition) into a single closed
//! tour:
//!
//! - [`assembler`]: per-group solving, index remapping, stitching and the
//!   distance breakdown
//! - [`ordering`]: group visit order by nearest-centroid chaining

pub mod assembler;
pub mod ordering;

pub use assembler::TourAssembler;
pub use ordering::chain_by_nearest_centroid;
