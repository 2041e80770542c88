//! Optimizer facade and the multi-technician dispatch pipeline.
//!
//! `Optimizer` bundles a validated configuration with a distance provider.
//! `plan` runs the full flow: distribute jobs, then route and schedule each
//! technician's share. Shares are independent, so they are scheduled in
//! parallel.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::OptimizerConfig;
use crate::duration;
use crate::error::{OptimizerError, Result};
use crate::haversine::Haversine;
use crate::model::{
    Coordinate, DurationSample, Job, RouteResult, ScheduledVisit, TechnicianProfile,
    UnassignedJob, WorkloadAssignment, WorkloadConstraints,
};
use crate::route;
use crate::schedule::{self, ScheduleOptions};
use crate::traits::DistanceProvider;
use crate::workload;

/// One technician's ordered, time-stamped day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianItinerary<'a> {
    pub technician_id: String,
    pub route: RouteResult<'a>,
    pub visits: Vec<ScheduledVisit<'a>>,
}

/// Output of the full pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPlan<'a> {
    /// One entry per technician, in input order.
    pub itineraries: Vec<TechnicianItinerary<'a>>,
    pub unassigned: Vec<UnassignedJob<'a>>,
}

impl<'a> DispatchPlan<'a> {
    /// Returns the itinerary for `technician_id`, if that technician was planned.
    pub fn itinerary_for(&self, technician_id: &str) -> Option<&TechnicianItinerary<'a>> {
        self.itineraries
            .iter()
            .find(|itinerary| itinerary.technician_id == technician_id)
    }

    /// Kilometres driven across all itineraries.
    pub fn total_distance_km(&self) -> f64 {
        self.itineraries
            .iter()
            .map(|itinerary| itinerary.route.total_distance_km)
            .sum()
    }

    /// Number of visits on the clock across all itineraries.
    pub fn scheduled_count(&self) -> usize {
        self.itineraries
            .iter()
            .map(|itinerary| itinerary.visits.len())
            .sum()
    }
}

/// Configuration, schedule options and a distance provider bundled for reuse.
#[derive(Debug, Clone)]
pub struct Optimizer<D = Haversine> {
    config: OptimizerConfig,
    schedule_options: ScheduleOptions,
    distance: D,
}

impl Default for Optimizer<Haversine> {
    fn default() -> Self {
        Self {
            config: OptimizerConfig::default(),
            schedule_options: ScheduleOptions::default(),
            distance: Haversine,
        }
    }
}

impl Optimizer<Haversine> {
    /// Creates a Haversine-backed optimizer, rejecting an invalid `config`.
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        Self::with_distance(config, Haversine)
    }
}

impl<D> Optimizer<D>
where
    D: DistanceProvider + Sync,
{
    /// Creates an optimizer that measures legs with `distance`.
    pub fn with_distance(config: OptimizerConfig, distance: D) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            schedule_options: ScheduleOptions::default(),
            distance,
        })
    }

    /// Replaces the schedule options used by `schedule_jobs` and `plan`.
    pub fn with_schedule_options(mut self, options: ScheduleOptions) -> Self {
        self.schedule_options = options;
        self
    }

    /// Returns a reference to the validated configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// See [`route::build_route`].
    pub fn build_route<'a>(
        &self,
        jobs: &'a [Job],
        start: Coordinate,
        technician: &TechnicianProfile,
        now: DateTime<Utc>,
    ) -> RouteResult<'a> {
        route::build_route(jobs, start, technician, now, &self.config, &self.distance)
    }

    /// See [`schedule::schedule_jobs`].
    pub fn schedule_jobs<'a>(
        &self,
        jobs: &'a [Job],
        technician: &TechnicianProfile,
        start_time: DateTime<Utc>,
    ) -> Vec<ScheduledVisit<'a>> {
        schedule::schedule_jobs(
            jobs,
            technician,
            start_time,
            &self.config,
            self.schedule_options,
            &self.distance,
        )
    }

    /// See [`duration::predict_duration`].
    pub fn predict_duration(
        &self,
        job: &Job,
        technician: &TechnicianProfile,
        history: Option<&[DurationSample]>,
    ) -> f64 {
        duration::predict_duration(job, technician, history, &self.config.duration)
    }

    /// See [`workload::distribute_workload`].
    pub fn distribute_workload<'a>(
        &self,
        jobs: &'a [Job],
        technicians: &[TechnicianProfile],
        constraints: &WorkloadConstraints,
        now: DateTime<Utc>,
    ) -> WorkloadAssignment<'a> {
        workload::distribute_workload(
            jobs,
            technicians,
            constraints,
            now,
            &self.config,
            &self.distance,
        )
    }

    /// Validate inputs, distribute jobs, then route and schedule every technician.
    pub fn plan<'a>(
        &self,
        jobs: &'a [Job],
        technicians: &[TechnicianProfile],
        constraints: &WorkloadConstraints,
        start_time: DateTime<Utc>,
    ) -> Result<DispatchPlan<'a>> {
        validate_inputs(jobs, technicians)?;

        let assignment = self.distribute_workload(jobs, technicians, constraints, start_time);

        let itineraries: Vec<TechnicianItinerary<'a>> = technicians
            .par_iter()
            .map(|technician| {
                let assigned = assignment.jobs_for(&technician.id);
                let route = route::build_route(
                    assigned.iter().copied(),
                    technician.current_location,
                    technician,
                    start_time,
                    &self.config,
                    &self.distance,
                );
                let visits = schedule::schedule_route(
                    &route,
                    technician,
                    start_time,
                    &self.config,
                    self.schedule_options,
                    &self.distance,
                );
                debug!(
                    technician = %technician.id,
                    visits = visits.len(),
                    km = route.total_distance_km,
                    "itinerary ready"
                );
                TechnicianItinerary {
                    technician_id: technician.id.clone(),
                    route,
                    visits,
                }
            })
            .collect();

        info!(
            jobs = jobs.len(),
            technicians = technicians.len(),
            assigned = assignment.assigned_count(),
            unassigned = assignment.unassigned.len(),
            "dispatch plan built"
        );

        Ok(DispatchPlan {
            itineraries,
            unassigned: assignment.unassigned,
        })
    }
}

/// Check every job and technician, and that ids are unique within each list.
pub fn validate_inputs(jobs: &[Job], technicians: &[TechnicianProfile]) -> Result<()> {
    let mut seen = HashSet::new();
    for job in jobs {
        job.validate()?;
        if !seen.insert(job.id.as_str()) {
            return Err(OptimizerError::DuplicateId {
                kind: "job",
                id: job.id.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for technician in technicians {
        technician.validate()?;
        if !seen.insert(technician.id.as_str()) {
            return Err(OptimizerError::DuplicateId {
                kind: "technician",
                id: technician.id.clone(),
            });
        }
    }
    Ok(())
}
