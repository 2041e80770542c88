//! Optimizer configuration.
//!
//! Every tunable lives here and is passed explicitly into each call, so two
//! optimizations with different weights can run side by side.

use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};
use crate::haversine::REFERENCE_SPEED_KMH;

/// Weights for the priority score terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringWeights {
    pub priority_high: f64,
    pub priority_medium: f64,
    pub priority_low: f64,
    /// Multiplier applied to the tier weight.
    pub priority_scale: f64,
    pub skill_weight: f64,
    /// Distance term is `max(0, ceiling - km / divisor) * weight`.
    pub distance_ceiling: f64,
    pub distance_divisor: f64,
    pub distance_weight: f64,
    pub time_fit_bonus: f64,
    pub time_overrun_penalty: f64,
    pub deadline_critical_hours: f64,
    pub deadline_critical_bonus: f64,
    pub deadline_soon_hours: f64,
    pub deadline_soon_bonus: f64,
    pub tier_premium: f64,
    pub tier_standard: f64,
    pub tier_basic: f64,
    pub emergency_weight: f64,
    pub profit_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            priority_high: 10.0,
            priority_medium: 5.0,
            priority_low: 2.0,
            priority_scale: 2.0,
            skill_weight: 8.0,
            distance_ceiling: 10.0,
            distance_divisor: 5.0,
            distance_weight: 1.5,
            time_fit_bonus: 3.0,
            time_overrun_penalty: 2.0,
            deadline_critical_hours: 24.0,
            deadline_critical_bonus: 15.0,
            deadline_soon_hours: 72.0,
            deadline_soon_bonus: 7.0,
            tier_premium: 5.0,
            tier_standard: 2.0,
            tier_basic: 0.0,
            emergency_weight: 3.0,
            profit_weight: 0.05,
        }
    }
}

/// Multipliers used to turn a nominal estimate into a predicted duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DurationModel {
    pub low_skill_threshold: f64,
    pub low_skill_factor: f64,
    pub high_skill_threshold: f64,
    pub high_skill_factor: f64,
    /// Duration shrinks by this fraction per efficiency point above 1.
    pub efficiency_step: f64,
    /// Duration grows by this fraction per complexity point.
    pub complexity_step: f64,
    /// History is ignored below this many samples.
    pub min_history_samples: usize,
    pub min_hours: f64,
}

impl Default for DurationModel {
    fn default() -> Self {
        Self {
            low_skill_threshold: 0.5,
            low_skill_factor: 1.3,
            high_skill_threshold: 0.8,
            high_skill_factor: 0.9,
            efficiency_step: 0.1,
            complexity_step: 0.1,
            min_history_samples: 6,
            min_hours: 0.5,
        }
    }
}

/// Fit score used by the workload distributor:
/// `skill_fraction * skill - km * distance + efficiency * efficiency_weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadWeights {
    pub skill: f64,
    pub distance: f64,
    pub efficiency: f64,
}

impl Default for WorkloadWeights {
    fn default() -> Self {
        Self {
            skill: 10.0,
            distance: 0.1,
            efficiency: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizerConfig {
    /// Reference speed for distance to drive-time conversion.
    pub speed_kmh: f64,
    /// Distance floor in the greedy attractiveness ratio.
    pub min_greedy_distance_km: f64,
    /// Upper bound on full 2-opt passes per route.
    pub max_two_opt_passes: usize,
    pub scoring: ScoringWeights,
    pub duration: DurationModel,
    pub workload: WorkloadWeights,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            speed_kmh: REFERENCE_SPEED_KMH,
            min_greedy_distance_km: 0.1,
            max_two_opt_passes: 100,
            scoring: ScoringWeights::default(),
            duration: DurationModel::default(),
            workload: WorkloadWeights::default(),
        }
    }
}

impl OptimizerConfig {
    /// Interactive use: same weights, fewer improvement passes.
    pub fn fast() -> Self {
        Self {
            max_two_opt_passes: 10,
            ..Self::default()
        }
    }

    /// Construction only, no 2-opt.
    pub fn greedy_only() -> Self {
        Self {
            max_two_opt_passes: 0,
            ..Self::default()
        }
    }

    /// Rejects speeds, floors and model parameters that would break routing.
    pub fn validate(&self) -> Result<()> {
        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return Err(OptimizerError::InvalidConfig(format!(
                "speed_kmh must be positive, got {}",
                self.speed_kmh
            )));
        }
        if !(self.min_greedy_distance_km.is_finite() && self.min_greedy_distance_km > 0.0) {
            return Err(OptimizerError::InvalidConfig(format!(
                "min_greedy_distance_km must be positive, got {}",
                self.min_greedy_distance_km
            )));
        }
        if !(self.scoring.distance_divisor.is_finite() && self.scoring.distance_divisor > 0.0) {
            return Err(OptimizerError::InvalidConfig(format!(
                "scoring.distance_divisor must be positive, got {}",
                self.scoring.distance_divisor
            )));
        }
        if self.scoring.deadline_critical_hours > self.scoring.deadline_soon_hours {
            return Err(OptimizerError::InvalidConfig(
                "scoring.deadline_critical_hours must not exceed deadline_soon_hours".to_string(),
            ));
        }
        if !(self.duration.min_hours.is_finite() && self.duration.min_hours >= 0.0) {
            return Err(OptimizerError::InvalidConfig(format!(
                "duration.min_hours must be non-negative, got {}",
                self.duration.min_hours
            )));
        }
        Ok(())
    }
}
