//! Optimizer configuration.

use serde::{Deserialize, Serialize};

use crate::distance::Metric;
use crate::error::{Result, TourError};
use crate::solver::{MethodRequest, SelectionThresholds, EXACT_HARD_LIMIT, PRUNED_HARD_LIMIT};

/// Configuration for a tour computation.
///
/// The distance metric has no default and must be chosen when the config is
/// created; everything else has a sensible default.
///
/// # Examples
///
/// ```
/// use u_tour::config::OptimizerConfig;
/// use u_tour::distance::Metric;
/// use u_tour::solver::{Method, MethodRequest};
///
/// let config = OptimizerConfig::new(Metric::Haversine)
///     .with_request(MethodRequest::Forced(Method::Pruned))
///     .with_hard_limits(12, 20);
/// assert_eq!(config.metric, Metric::Haversine);
/// assert_eq!(config.pruned_hard_limit, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Distance model for matrices, scoring and transitions.
    pub metric: Metric,
    /// Method request applied to every group.
    pub request: MethodRequest,
    /// Size boundaries for automatic selection and oversize warnings.
    pub thresholds: SelectionThresholds,
    /// Exhaustive search refuses groups larger than this.
    pub exact_hard_limit: usize,
    /// Branch-and-bound refuses groups larger than this.
    pub pruned_hard_limit: usize,
}

impl OptimizerConfig {
    /// Creates a config using `metric`, automatic method selection and the
    /// default thresholds and hard limits.
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            request: MethodRequest::Automatic,
            thresholds: SelectionThresholds::default(),
            exact_hard_limit: EXACT_HARD_LIMIT,
            pruned_hard_limit: PRUNED_HARD_LIMIT,
        }
    }

    /// Sets the method request.
    pub fn with_request(mut self, request: MethodRequest) -> Self {
        self.request = request;
        self
    }

    /// Sets the automatic-selection thresholds.
    pub fn with_thresholds(mut self, thresholds: SelectionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the hard size limits of the exhaustive solvers.
    pub fn with_hard_limits(mut self, exact: usize, pruned: usize) -> Self {
        self.exact_hard_limit = exact;
        self.pruned_hard_limit = pruned;
        self
    }

    /// Validates the configuration.
    ///
    /// Automatic selection must never pick a solver that would then refuse
    /// the instance, so each hard limit has to cover its threshold.
    pub fn validate(&self) -> Result<()> {
        let t = self.thresholds;
        if t.exact_max > t.pruned_max {
            return Err(TourError::invalid_config(
                "exact_max must not exceed pruned_max",
            ));
        }
        if self.exact_hard_limit < t.exact_max {
            return Err(TourError::invalid_config(
                "exact_hard_limit must be at least exact_max",
            ));
        }
        if self.pruned_hard_limit < t.pruned_max {
            return Err(TourError::invalid_config(
                "pruned_hard_limit must be at least pruned_max",
            ));
        }
        if self.exact_hard_limit == 0 || self.pruned_hard_limit == 0 {
            return Err(TourError::invalid_config("hard limits must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Method;

    #[test]
    fn test_new_defaults() {
        let config = OptimizerConfig::new(Metric::Planar);
        assert_eq!(config.metric, Metric::Planar);
        assert_eq!(config.request, MethodRequest::Automatic);
        assert_eq!(config.thresholds, SelectionThresholds::default());
        assert_eq!(config.exact_hard_limit, EXACT_HARD_LIMIT);
        assert_eq!(config.pruned_hard_limit, PRUNED_HARD_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = OptimizerConfig::new(Metric::Haversine)
            .with_request(Method::SpanningTree.into())
            .with_thresholds(SelectionThresholds {
                exact_max: 8,
                pruned_max: 12,
            })
            .with_hard_limits(9, 14);
        assert_eq!(config.request, MethodRequest::Forced(Method::SpanningTree));
        assert_eq!(config.thresholds.exact_max, 8);
        assert_eq!(config.exact_hard_limit, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_thresholds() {
        let config = OptimizerConfig::new(Metric::Planar).with_thresholds(SelectionThresholds {
            exact_max: 12,
            pruned_max: 8,
        });
        assert!(matches!(config.validate(), Err(TourError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_hard_limit_below_threshold() {
        let config = OptimizerConfig::new(Metric::Planar).with_hard_limits(5, PRUNED_HARD_LIMIT);
        assert!(matches!(config.validate(), Err(TourError::InvalidConfig(_))));

        let config = OptimizerConfig::new(Metric::Planar).with_hard_limits(EXACT_HARD_LIMIT, 10);
        assert!(matches!(config.validate(), Err(TourError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_limits() {
        let config = OptimizerConfig::new(Metric::Planar)
            .with_thresholds(SelectionThresholds {
                exact_max: 0,
                pruned_max: 0,
            })
            .with_hard_limits(0, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = OptimizerConfig::new(Metric::Haversine).with_request(Method::Exact.into());
        let json = serde_json::to_string(&config).expect("serializable");
        let back: OptimizerConfig = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, config);
    }
}
