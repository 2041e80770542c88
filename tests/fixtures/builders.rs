//! Builders for test jobs and technicians.

use chrono::{DateTime, TimeZone, Utc};

use dispatch_optimizer::{
    Coordinate, CustomerTier, Job, Priority, TechnicianProfile, WorkingHours,
};

use super::nyc_locations::Location;

/// Builder for test jobs with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestJob {
    job: Job,
}

impl TestJob {
    pub fn new(id: &str) -> Self {
        Self {
            job: Job::new(id, Coordinate::new(40.7128, -74.0060), Priority::Medium, 1.0),
        }
    }

    pub fn at(mut self, location: &Location) -> Self {
        self.job.location = location.coords();
        self.job.title = location.name.to_string();
        self
    }

    pub fn location(mut self, lat: f64, lng: f64) -> Self {
        self.job.location = Coordinate::new(lat, lng);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.job.priority = priority;
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.job.estimated_hours = hours;
        self
    }

    pub fn requires(mut self, skill: &str) -> Self {
        self.job.required_skills.insert(skill.to_string());
        self
    }

    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.job.deadline = Some(deadline);
        self
    }

    pub fn tier(mut self, tier: CustomerTier) -> Self {
        self.job.customer_tier = Some(tier);
        self
    }

    pub fn emergency(mut self, level: f64) -> Self {
        self.job.emergency_level = Some(level);
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

/// Builder for test technicians with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestTechnician {
    technician: TechnicianProfile,
}

impl TestTechnician {
    pub fn new(id: &str) -> Self {
        Self {
            technician: TechnicianProfile::new(id, Coordinate::new(40.7140, -74.0080)),
        }
    }

    pub fn at(mut self, location: &Location) -> Self {
        self.technician.current_location = location.coords();
        self
    }

    pub fn location(mut self, lat: f64, lng: f64) -> Self {
        self.technician.current_location = Coordinate::new(lat, lng);
        self
    }

    pub fn skill(mut self, skill: &str) -> Self {
        self.technician.skills.insert(skill.to_string());
        self
    }

    pub fn efficiency(mut self, efficiency: f64) -> Self {
        self.technician.efficiency = efficiency;
        self
    }

    pub fn hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.technician.working_hours = WorkingHours {
            start_hour,
            end_hour,
        };
        self
    }

    pub fn build(self) -> TechnicianProfile {
        self.technician
    }
}

/// Monday 2024-03-04 at `hour`:00 UTC.
pub fn monday_at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, 0, 0).unwrap()
}

pub fn ids<'a>(jobs: &[&'a Job]) -> Vec<&'a str> {
    jobs.iter().map(|job| job.id.as_str()).collect()
}

pub fn sorted_ids<'a>(jobs: &[&'a Job]) -> Vec<&'a str> {
    let mut ids = ids(jobs);
    ids.sort_unstable();
    ids
}
