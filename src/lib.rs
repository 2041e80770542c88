//! dispatch-optimizer core
//!
//! Routing, prioritization and scheduling for field technicians. Every entry
//! point is a pure function over borrowed inputs.

pub mod config;
pub mod duration;
pub mod error;
pub mod haversine;
pub mod model;
pub mod planner;
pub mod polyline;
pub mod priority;
pub mod route;
pub mod schedule;
pub mod traits;
pub mod workload;

pub use config::OptimizerConfig;
pub use error::OptimizerError;
pub use model::{
    Coordinate, CustomerTier, DurationSample, Job, Priority, RouteResult, ScheduledVisit,
    TechnicianProfile, WorkingHours, WorkloadAssignment, WorkloadConstraints,
};
pub use planner::{DispatchPlan, Optimizer, TechnicianItinerary};

use chrono::{DateTime, Utc};

use crate::haversine::Haversine;

/// Order one technician's jobs starting from `start` using the default configuration.
pub fn build_route<'a>(
    jobs: &'a [Job],
    start: Coordinate,
    technician: &TechnicianProfile,
    now: DateTime<Utc>,
) -> RouteResult<'a> {
    route::build_route(jobs, start, technician, now, &OptimizerConfig::default(), &Haversine)
}

/// Route and timestamp one technician's jobs using the default configuration.
pub fn schedule_jobs<'a>(
    jobs: &'a [Job],
    technician: &TechnicianProfile,
    start_time: DateTime<Utc>,
) -> Vec<ScheduledVisit<'a>> {
    schedule::schedule_jobs(
        jobs,
        technician,
        start_time,
        &OptimizerConfig::default(),
        schedule::ScheduleOptions::default(),
        &Haversine,
    )
}

/// Predict the real duration of a job in hours using the default duration model.
pub fn predict_duration(
    job: &Job,
    technician: &TechnicianProfile,
    history: Option<&[DurationSample]>,
) -> f64 {
    duration::predict_duration(job, technician, history, &config::DurationModel::default())
}

/// Spread jobs across technicians using the default configuration.
pub fn distribute_workload<'a>(
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
        &OptimizerConfig::default(),
        &Haversine,
    )
}
