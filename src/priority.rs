//! Job desirability scoring for a (job, technician, time) triple.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;

use crate::config::ScoringWeights;
use crate::model::{CustomerTier, Job, Priority, TechnicianProfile};
use crate::traits::DistanceProvider;

/// Individual score terms, in the order they are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub priority: f64,
    pub skill: f64,
    pub proximity: f64,
    pub time_fit: f64,
    pub deadline: f64,
    pub customer_tier: f64,
    pub emergency: f64,
    pub profit: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms, never below zero.
    pub fn total(&self) -> f64 {
        let raw = self.priority
            + self.skill
            + self.proximity
            + self.time_fit
            + self.deadline
            + self.customer_tier
            + self.emergency
            + self.profit;
        raw.max(0.0)
    }
}

/// Priority score of `job` for `technician` at `now`. Higher is more urgent.
pub fn score<D>(
    job: &Job,
    technician: &TechnicianProfile,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
    distance: &D,
) -> f64
where
    D: DistanceProvider + ?Sized,
{
    breakdown(job, technician, now, weights, distance).total()
}

/// Every term of [`score`] before summing, for display and tuning.
pub fn breakdown<D>(
    job: &Job,
    technician: &TechnicianProfile,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
    distance: &D,
) -> ScoreBreakdown
where
    D: DistanceProvider + ?Sized,
{
    let km = distance.distance_km(technician.current_location, job.location);

    let time_fit = if job.estimated_hours <= remaining_hours(technician, now) {
        weights.time_fit_bonus
    } else {
        -weights.time_overrun_penalty
    };

    ScoreBreakdown {
        priority: tier_weight(job.priority, weights) * weights.priority_scale,
        skill: technician.skill_match(job) * weights.skill_weight,
        proximity: (weights.distance_ceiling - km / weights.distance_divisor).max(0.0)
            * weights.distance_weight,
        time_fit,
        deadline: deadline_bonus(job, now, weights),
        customer_tier: match job.customer_tier {
            Some(CustomerTier::Premium) => weights.tier_premium,
            Some(CustomerTier::Standard) => weights.tier_standard,
            Some(CustomerTier::Basic) => weights.tier_basic,
            None => 0.0,
        },
        emergency: job.emergency_level.unwrap_or(0.0) * weights.emergency_weight,
        profit: job.profit_margin.unwrap_or(0.0) * weights.profit_weight,
    }
}

/// Working hours left today for `technician`.
///
/// Before the shift starts this is the whole working day; once it is over
/// it is zero.
pub fn remaining_hours(technician: &TechnicianProfile, now: DateTime<Utc>) -> f64 {
    let hours = technician.working_hours;
    let current = (now.hour() as f64 + now.minute() as f64 / 60.0).max(hours.start_hour as f64);
    (hours.end_hour as f64 - current).max(0.0)
}

fn tier_weight(priority: Priority, weights: &ScoringWeights) -> f64 {
    match priority {
        Priority::High => weights.priority_high,
        Priority::Medium => weights.priority_medium,
        Priority::Low => weights.priority_low,
    }
}

fn deadline_bonus(job: &Job, now: DateTime<Utc>, weights: &ScoringWeights) -> f64 {
    let Some(deadline) = job.deadline else {
        return 0.0;
    };
    // Overdue jobs fall into the critical bucket.
    let hours_left = (deadline - now).num_milliseconds() as f64 / 3_600_000.0;
    if hours_left < weights.deadline_critical_hours {
        weights.deadline_critical_bonus
    } else if hours_left < weights.deadline_soon_hours {
        weights.deadline_soon_bonus
    } else {
        0.0
    }
}
