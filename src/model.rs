//! Domain records for jobs, technicians and optimizer output.
//!
//! Inputs are owned, (de)serializable records. Outputs borrow the input jobs,
//! so the optimizer only ever orders and timestamps references to them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};
use crate::polyline::Polyline;

/// Longest single job accepted by validation: one working week.
pub const MAX_ESTIMATED_HOURS: f64 = 7.0 * 24.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Dispatcher-assigned urgency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Premium,
    Standard,
    Basic,
}

/// One past execution of a comparable job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationSample {
    pub actual_hours: f64,
    pub estimated_hours: f64,
}

/// A unit of field work awaiting dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: Coordinate,
    pub priority: Priority,
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
    /// Nominal duration in hours.
    pub estimated_hours: f64,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customer_tier: Option<CustomerTier>,
    /// Additive urgency weight; callers keep it bounded.
    #[serde(default)]
    pub emergency_level: Option<f64>,
    /// Informational only, not applied to distances.
    #[serde(default)]
    pub traffic_multiplier: Option<f64>,
    /// Informational only, not applied to distances.
    #[serde(default)]
    pub weather_multiplier: Option<f64>,
    /// 0 means trivial equipment.
    #[serde(default)]
    pub equipment_complexity: Option<f64>,
    #[serde(default)]
    pub duration_history: Vec<DurationSample>,
    #[serde(default)]
    pub profit_margin: Option<f64>,
}

impl Job {
    /// Creates a job with no skills, deadline or optional attributes.
    pub fn new(
        id: impl Into<String>,
        location: Coordinate,
        priority: Priority,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            location,
            priority,
            required_skills: BTreeSet::new(),
            estimated_hours,
            deadline: None,
            customer_tier: None,
            emergency_level: None,
            traffic_multiplier: None,
            weather_multiplier: None,
            equipment_complexity: None,
            duration_history: Vec::new(),
            profit_margin: None,
        }
    }

    /// Reject values that would poison scores or schedules.
    pub fn validate(&self) -> Result<()> {
        if !self.location.is_valid() {
            return Err(OptimizerError::InvalidCoordinate {
                job_id: self.id.clone(),
                lat: self.location.lat,
                lng: self.location.lng,
            });
        }
        if !(0.0..=MAX_ESTIMATED_HOURS).contains(&self.estimated_hours) {
            return Err(OptimizerError::InvalidDuration {
                job_id: self.id.clone(),
                hours: self.estimated_hours,
            });
        }

        let non_negative = [
            ("emergencyLevel", self.emergency_level),
            ("equipmentComplexity", self.equipment_complexity),
            ("trafficMultiplier", self.traffic_multiplier),
            ("weatherMultiplier", self.weather_multiplier),
        ];
        for (field, value) in non_negative {
            if let Some(value) = value {
                if !(value.is_finite() && value >= 0.0) {
                    return Err(self.invalid_field(field, value));
                }
            }
        }
        if let Some(margin) = self.profit_margin {
            if !margin.is_finite() {
                return Err(self.invalid_field("profitMargin", margin));
            }
        }
        for sample in &self.duration_history {
            if !sample.actual_hours.is_finite() {
                return Err(self.invalid_field("durationHistory.actualHours", sample.actual_hours));
            }
            if !sample.estimated_hours.is_finite() {
                return Err(
                    self.invalid_field("durationHistory.estimatedHours", sample.estimated_hours)
                );
            }
        }
        Ok(())
    }

    fn invalid_field(&self, field: &'static str, value: f64) -> OptimizerError {
        OptimizerError::InvalidField {
            job_id: self.id.clone(),
            field,
            value,
        }
    }
}

/// Daily working window, whole hours 0-23 in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 17,
        }
    }
}

/// The worker a route is built for. Read-only during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianProfile {
    pub id: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    /// Nominally 1-10, higher is faster.
    pub efficiency: f64,
    #[serde(default)]
    pub experience_years: f64,
    pub current_location: Coordinate,
    #[serde(default)]
    pub working_hours: WorkingHours,
    /// Informational, not scored.
    #[serde(default)]
    pub preferred_job_types: BTreeSet<String>,
}

impl TechnicianProfile {
    /// Creates a technician with efficiency 1.0 and default working hours.
    pub fn new(id: impl Into<String>, current_location: Coordinate) -> Self {
        Self {
            id: id.into(),
            skills: BTreeSet::new(),
            efficiency: 1.0,
            experience_years: 0.0,
            current_location,
            working_hours: WorkingHours::default(),
            preferred_job_types: BTreeSet::new(),
        }
    }

    /// Fraction of the job's required skills this technician has.
    ///
    /// A job with no requirements is a full match.
    pub fn skill_match(&self, job: &Job) -> f64 {
        if job.required_skills.is_empty() {
            return 1.0;
        }
        let matched = job
            .required_skills
            .iter()
            .filter(|skill| self.skills.contains(*skill))
            .count();
        matched as f64 / job.required_skills.len() as f64
    }

    /// Checks location, working window and efficiency.
    pub fn validate(&self) -> Result<()> {
        if !self.current_location.is_valid() {
            return Err(OptimizerError::InvalidTechnicianLocation {
                technician_id: self.id.clone(),
                lat: self.current_location.lat,
                lng: self.current_location.lng,
            });
        }
        let WorkingHours {
            start_hour,
            end_hour,
        } = self.working_hours;
        if start_hour >= end_hour || end_hour > 23 {
            return Err(OptimizerError::InvalidWorkingHours {
                technician_id: self.id.clone(),
                start_hour,
                end_hour,
            });
        }
        if !(self.efficiency.is_finite() && self.efficiency > 0.0) {
            return Err(OptimizerError::InvalidEfficiency {
                technician_id: self.id.clone(),
                efficiency: self.efficiency,
            });
        }
        Ok(())
    }

    /// True if the technician's skills are a superset of the job's requirements.
    pub fn covers(&self, job: &Job) -> bool {
        job.required_skills.is_subset(&self.skills)
    }
}

/// A job placed on the clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledVisit<'a> {
    pub job: &'a Job,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    /// Drive time from the previous stop.
    pub travel_minutes: f64,
    pub distance_km: f64,
}

impl ScheduledVisit<'_> {
    /// Time on site in hours.
    pub fn duration_hours(&self) -> f64 {
        (self.scheduled_end - self.scheduled_start).num_milliseconds() as f64 / 3_600_000.0
    }
}

/// Ordered jobs for one technician plus route totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult<'a> {
    pub start_location: Coordinate,
    pub jobs: Vec<&'a Job>,
    pub total_distance_km: f64,
    /// Job hours plus drive hours at the reference speed.
    pub total_time_hours: f64,
}

impl<'a> RouteResult<'a> {
    /// A route with no stops, parked at `start_location`.
    pub fn empty(start_location: Coordinate) -> Self {
        Self {
            start_location,
            jobs: Vec::new(),
            total_distance_km: 0.0,
            total_time_hours: 0.0,
        }
    }

    /// Returns true if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job ids in visiting order.
    pub fn job_ids(&self) -> Vec<&'a str> {
        self.jobs.iter().map(|job| job.id.as_str()).collect()
    }

    /// The path driven: start location followed by every stop in order.
    pub fn geometry(&self) -> Polyline {
        let mut points = Vec::with_capacity(self.jobs.len() + 1);
        points.push(self.start_location);
        points.extend(self.jobs.iter().map(|job| job.location));
        Polyline::new(points)
    }
}

/// Caps applied while spreading jobs across technicians.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadConstraints {
    pub max_hours_per_tech: Option<f64>,
    pub max_jobs_per_tech: Option<usize>,
    /// Only assign jobs to technicians holding every required skill.
    pub skill_requirements: bool,
}

/// Why a job could not be given to anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnassignedReason {
    NoTechnicians,
    MissingSkills,
    CapacityExceeded,
}

/// A job nobody could take, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedJob<'a> {
    pub job: &'a Job,
    pub reason: UnassignedReason,
}

/// Jobs per technician id, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadAssignment<'a> {
    pub assignments: BTreeMap<String, Vec<&'a Job>>,
    pub unassigned: Vec<UnassignedJob<'a>>,
}

impl<'a> WorkloadAssignment<'a> {
    /// Jobs given to `technician_id`; empty for unknown ids.
    pub fn jobs_for(&self, technician_id: &str) -> &[&'a Job] {
        self.assignments
            .get(technician_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of jobs assigned across all technicians.
    pub fn assigned_count(&self) -> usize {
        self.assignments.values().map(Vec::len).sum()
    }

    /// Nominal hours assigned to `technician_id`.
    pub fn hours_for(&self, technician_id: &str) -> f64 {
        self.jobs_for(technician_id)
            .iter()
            .map(|job| job.estimated_hours)
            .sum()
    }
}
