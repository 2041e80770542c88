//! Predicted on-site duration.
//!
//! Starts from the nominal estimate and applies, in order: skill fit,
//! technician efficiency, equipment complexity, then a historical correction
//! once enough samples exist. The result never drops below the minimum
//! dispatch unit.

use crate::config::DurationModel;
use crate::model::{DurationSample, Job, TechnicianProfile};

/// Predicted hours for `technician` to complete `job`.
///
/// `history` overrides the job's own `duration_history` when supplied.
pub fn predict_duration(
    job: &Job,
    technician: &TechnicianProfile,
    history: Option<&[DurationSample]>,
    model: &DurationModel,
) -> f64 {
    let mut hours = job.estimated_hours;

    let skill = technician.skill_match(job);
    if skill < model.low_skill_threshold {
        hours *= model.low_skill_factor;
    } else if skill > model.high_skill_threshold {
        hours *= model.high_skill_factor;
    }

    hours *= 1.0 - (technician.efficiency - 1.0) * model.efficiency_step;

    if let Some(complexity) = job.equipment_complexity {
        hours *= 1.0 + complexity * model.complexity_step;
    }

    let history = history.unwrap_or(&job.duration_history);
    if let Some(correction) = historical_ratio(history, model.min_history_samples) {
        hours *= correction;
    }

    // `max` also maps a NaN prediction to the floor.
    hours.max(model.min_hours)
}

/// Mean of `actual / estimated` over usable samples, if there are enough.
///
/// Samples with a non-positive estimate carry no ratio and are skipped.
pub fn historical_ratio(history: &[DurationSample], min_samples: usize) -> Option<f64> {
    let ratios: Vec<f64> = history
        .iter()
        .filter(|sample| sample.estimated_hours > 0.0)
        .map(|sample| sample.actual_hours / sample.estimated_hours)
        .collect();

    if ratios.is_empty() || ratios.len() < min_samples {
        return None;
    }
    Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
}
