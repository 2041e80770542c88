//! Greedy best-fit distribution of jobs across technicians.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::OptimizerConfig;
use crate::model::{
    Job, TechnicianProfile, UnassignedJob, UnassignedReason, WorkloadAssignment,
    WorkloadConstraints,
};
use crate::priority;
use crate::traits::DistanceProvider;

/// Running totals for one technician during distribution.
#[derive(Debug, Clone, Default)]
struct Load<'a> {
    jobs: Vec<&'a Job>,
    hours: f64,
}

/// Assign each job to the best-fitting technician that still has capacity.
///
/// Jobs are triaged by priority score against the first technician, then
/// placed one by one. Jobs nobody can take end up in `unassigned`.
///
/// Profiles sharing an id are one technician: they share a single load, so
/// the caps hold for the id as reported in `assignments`.
pub fn distribute_workload<'a, I, D>(
    jobs: I,
    technicians: &[TechnicianProfile],
    constraints: &WorkloadConstraints,
    now: DateTime<Utc>,
    config: &OptimizerConfig,
    distance: &D,
) -> WorkloadAssignment<'a>
where
    I: IntoIterator<Item = &'a Job>,
    D: DistanceProvider + ?Sized,
{
    let jobs: Vec<&'a Job> = jobs.into_iter().collect();

    let Some(reference) = technicians.first() else {
        if !jobs.is_empty() {
            warn!(jobs = jobs.len(), "no technicians available, nothing assigned");
        }
        return WorkloadAssignment {
            assignments: BTreeMap::new(),
            unassigned: jobs
                .into_iter()
                .map(|job| UnassignedJob {
                    job,
                    reason: UnassignedReason::NoTechnicians,
                })
                .collect(),
        };
    };

    let mut ranked: Vec<(&'a Job, f64)> = jobs
        .iter()
        .map(|&job| {
            let score = priority::score(job, reference, now, &config.scoring, distance);
            (job, score)
        })
        .collect();
    // Stable: equal scores keep input order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    // Index of the first profile with the same id.
    let slots: Vec<usize> = technicians
        .iter()
        .enumerate()
        .map(|(idx, technician)| {
            technicians
                .iter()
                .position(|other| other.id == technician.id)
                .unwrap_or(idx)
        })
        .collect();
    for (idx, technician) in technicians.iter().enumerate() {
        if slots[idx] != idx {
            warn!(technician = %technician.id, "duplicate technician id, sharing one load");
        }
    }

    let mut loads: Vec<Load<'a>> = vec![Load::default(); technicians.len()];
    let mut unassigned = Vec::new();

    for (job, _) in ranked {
        let mut best: Option<(usize, f64)> = None;
        let mut skilled_seen = false;

        for (idx, technician) in technicians.iter().enumerate() {
            if constraints.skill_requirements && !technician.covers(job) {
                continue;
            }
            skilled_seen = true;

            let load = &loads[slots[idx]];
            if let Some(max_hours) = constraints.max_hours_per_tech {
                if load.hours + job.estimated_hours > max_hours {
                    continue;
                }
            }
            if let Some(max_jobs) = constraints.max_jobs_per_tech {
                if load.jobs.len() + 1 > max_jobs {
                    continue;
                }
            }

            let fit = fit_score(job, technician, config, distance);
            match best {
                Some((_, best_fit)) if fit <= best_fit => {}
                _ => best = Some((idx, fit)),
            }
        }

        match best {
            Some((idx, _)) => {
                let load = &mut loads[slots[idx]];
                load.jobs.push(job);
                load.hours += job.estimated_hours;
            }
            None => {
                let reason = if skilled_seen {
                    UnassignedReason::CapacityExceeded
                } else {
                    UnassignedReason::MissingSkills
                };
                warn!(job = %job.id, ?reason, "job left unassigned");
                unassigned.push(UnassignedJob { job, reason });
            }
        }
    }

    let mut assignments: BTreeMap<String, Vec<&'a Job>> = BTreeMap::new();
    for (idx, (technician, load)) in technicians.iter().zip(loads).enumerate() {
        if slots[idx] != idx {
            continue;
        }
        debug!(
            technician = %technician.id,
            jobs = load.jobs.len(),
            hours = load.hours,
            "workload assigned"
        );
        assignments.insert(technician.id.clone(), load.jobs);
    }

    WorkloadAssignment {
        assignments,
        unassigned,
    }
}

/// How well `technician` suits `job`; higher is better.
pub fn fit_score<D>(
    job: &Job,
    technician: &TechnicianProfile,
    config: &OptimizerConfig,
    distance: &D,
) -> f64
where
    D: DistanceProvider + ?Sized,
{
    let weights = &config.workload;
    let km = distance.distance_km(technician.current_location, job.location);
    technician.skill_match(job) * weights.skill - km * weights.distance
        + technician.efficiency * weights.efficiency
}
