//! Size-based method selection.

use serde::{Deserialize, Serialize};

use super::{Method, MethodRequest};

/// Automatic selection uses [`Method::Exact`] up to this many points.
pub const EXACT_AUTO_LIMIT: usize = 10;

/// Automatic selection uses [`Method::Pruned`] up to this many points.
pub const PRUNED_AUTO_LIMIT: usize = 15;

/// Size boundaries for automatic method selection.
///
/// These are also the recommended ceilings: forcing a method on a larger
/// instance still runs it, but with a warning.
///
/// # Examples
///
/// ```
/// use u_tour::solver::SelectionThresholds;
///
/// let t = SelectionThresholds::default();
/// assert_eq!((t.exact_max, t.pruned_max), (10, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionThresholds {
    /// Largest instance solved by exhaustive search.
    pub exact_max: usize,
    /// Largest instance solved by branch-and-bound.
    pub pruned_max: usize,
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            exact_max: EXACT_AUTO_LIMIT,
            pruned_max: PRUNED_AUTO_LIMIT,
        }
    }
}

/// The method to run and an optional note about its suitability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Method to execute.
    pub method: Method,
    /// Human-readable warning when a forced method is oversized.
    pub warning: Option<String>,
}

/// Chooses a solving method for an instance size.
///
/// An explicit request is always honored, even when it is a poor fit; this
/// lets callers compare methods on the same input.
///
/// # Examples
///
/// ```
/// use u_tour::solver::{Method, MethodRequest, MethodSelector};
///
/// let selector = MethodSelector::default();
/// assert_eq!(selector.select(8, MethodRequest::Automatic).method, Method::Exact);
/// assert_eq!(selector.select(12, MethodRequest::Automatic).method, Method::Pruned);
/// assert_eq!(selector.select(40, MethodRequest::Automatic).method, Method::NearestNeighbor);
///
/// let forced = selector.select(12, MethodRequest::Forced(Method::Exact));
/// assert_eq!(forced.method, Method::Exact);
/// assert!(forced.warning.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodSelector {
    thresholds: SelectionThresholds,
}

impl MethodSelector {
    /// Creates a selector with the given thresholds.
    pub fn new(thresholds: SelectionThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> SelectionThresholds {
        self.thresholds
    }

    /// Picks the method for `n` points.
    pub fn select(&self, n: usize, request: MethodRequest) -> Selection {
        match request {
            MethodRequest::Automatic => Selection {
                method: self.automatic(n),
                warning: None,
            },
            MethodRequest::Forced(method) => Selection {
                method,
                warning: self.oversize_warning(method, n),
            },
        }
    }

    fn automatic(&self, n: usize) -> Method {
        if n <= self.thresholds.exact_max {
            Method::Exact
        } else if n <= self.thresholds.pruned_max {
            Method::Pruned
        } else {
            Method::NearestNeighbor
        }
    }

    fn oversize_warning(&self, method: Method, n: usize) -> Option<String> {
        match method {
            Method::Exact if n > self.thresholds.exact_max => Some(format!(
                "exact search over {n} points enumerates {}! orderings and may be very slow \
                 (recommended for at most {} points)",
                n - 1,
                self.thresholds.exact_max
            )),
            Method::Pruned if n > self.thresholds.pruned_max => Some(format!(
                "branch-and-bound over {n} points may take a very long time \
                 (recommended for at most {} points)",
                self.thresholds.pruned_max
            )),
            _ => None,
        }
    }
}
