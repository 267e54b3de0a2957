//! Spatial partitioning of points into groups.
//!
//! The assembler only needs a [`Partition`]: every point in exactly one
//! group, each group with a centroid. Any clustering routine can supply one
//! through the [`Partitioner`] trait; [`KMeans`] is the built-in choice, and
//! [`Partition::from_labels`] accepts an assignment computed elsewhere.

mod kmeans;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TourError};
use crate::models::{Coordinate, Point};

pub use kmeans::{KMeans, KMeansConfig};

/// Produces a partition of points into at most `k` groups.
pub trait Partitioner {
    /// Partitions `points` into at most `k` non-empty groups.
    fn partition(&self, points: &[Point], k: usize) -> Result<Partition>;
}

/// Points sharing a cluster label.
///
/// Members are global point indices in ascending order; a member's position
/// in [`members`](Self::members) is its local index inside the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    label: usize,
    members: Vec<usize>,
    centroid: Coordinate,
}

impl Group {
    /// Creates a group with a centroid supplied by the partitioner.
    ///
    /// Members are sorted into ascending global order.
    pub fn new(label: usize, mut members: Vec<usize>, centroid: Coordinate) -> Self {
        members.sort_unstable();
        Self {
            label,
            members,
            centroid,
        }
    }

    /// Creates a group whose centroid is the mean of its members.
    ///
    /// Returns `None` for an empty member list.
    pub fn from_members(label: usize, members: Vec<usize>, points: &[Point]) -> Option<Self> {
        let centroid = Coordinate::mean(members.iter().map(|&i| points[i].coordinate()))?;
        Some(Self::new(label, members, centroid))
    }

    /// Cluster label.
    pub fn label(&self) -> usize {
        self.label
    }

    /// Global indices, indexed by local index.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Mean coordinate of the members.
    pub fn centroid(&self) -> Coordinate {
        self.centroid
    }

    /// Global index of local index `local`.
    pub fn global_index(&self, local: usize) -> usize {
        self.members[local]
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A set of groups covering a point list.
///
/// # Examples
///
/// ```
/// use u_tour::models::Point;
/// use u_tour::partition::Partition;
///
/// let points = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 5.0, 5.0),
///     Point::new("c", 0.0, 1.0),
/// ];
/// let partition = Partition::from_labels(&points, &[3, 7, 3]).unwrap();
/// assert_eq!(partition.len(), 2);
/// assert_eq!(partition.groups()[0].members(), &[0, 2]);
/// assert_eq!(partition.groups()[1].label(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    groups: Vec<Group>,
    inertia: Option<f64>,
}

impl Partition {
    /// Creates a partition from prepared groups, dropping empty ones.
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups: groups.into_iter().filter(|g| !g.is_empty()).collect(),
            inertia: None,
        }
    }

    /// Records the clustering objective reported by the partitioner.
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = Some(inertia);
        self
    }

    /// Groups points by a per-point label.
    ///
    /// Groups come out in ascending label order with centroids computed as
    /// member means.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidPartition`] if `labels` and `points` differ in
    /// length.
    pub fn from_labels(points: &[Point], labels: &[usize]) -> Result<Self> {
        if labels.len() != points.len() {
            return Err(TourError::invalid_partition(format!(
                "{} labels for {} points",
                labels.len(),
                points.len()
            )));
        }

        let mut by_label: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (index, &label) in labels.iter().enumerate() {
            by_label.entry(label).or_default().push(index);
        }

        let groups = by_label
            .into_iter()
            .filter_map(|(label, members)| Group::from_members(label, members, points))
            .collect();
        Ok(Self::new(groups))
    }

    /// Groups in partition order; position 0 is where group ordering starts.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Member count of each group.
    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Group::len).collect()
    }

    /// Clustering objective (sum of squared distances to centroids), if the
    /// partitioner reported one.
    pub fn inertia(&self) -> Option<f64> {
        self.inertia
    }

    /// Checks that the groups cover `0..num_points` exactly once each.
    pub fn validate(&self, num_points: usize) -> Result<()> {
        let mut seen = vec![false; num_points];
        for group in &self.groups {
            for &index in group.members() {
                match seen.get_mut(index) {
                    None => {
                        return Err(TourError::invalid_partition(format!(
                            "group {} references point {index} of {num_points}",
                            group.label()
                        )))
                    }
                    Some(true) => {
                        return Err(TourError::invalid_partition(format!(
                            "point {index} appears in more than one group"
                        )))
                    }
                    Some(slot) => *slot = true,
                }
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(TourError::invalid_partition(format!(
                "point {missing} is not in any group"
            )));
        }
        Ok(())
    }
}
