//! Validation errors.
//!
//! The routing entry points themselves never fail; these errors come from the
//! opt-in checks that reject inputs which would otherwise turn into `NaN`
//! scores or nonsense schedules.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    #[error("job {job_id}: coordinate ({lat}, {lng}) is out of range")]
    InvalidCoordinate { job_id: String, lat: f64, lng: f64 },

    #[error("job {job_id}: estimated hours must be between 0 and 168, got {hours}")]
    InvalidDuration { job_id: String, hours: f64 },

    #[error("job {job_id}: {field} has invalid value {value}")]
    InvalidField {
        job_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("technician {technician_id}: working hours {start_hour}-{end_hour} are invalid")]
    InvalidWorkingHours {
        technician_id: String,
        start_hour: u32,
        end_hour: u32,
    },

    #[error("technician {technician_id}: efficiency must be finite and positive, got {efficiency}")]
    InvalidEfficiency { technician_id: String, efficiency: f64 },

    #[error("technician {technician_id}: location ({lat}, {lng}) is out of range")]
    InvalidTechnicianLocation {
        technician_id: String,
        lat: f64,
        lng: f64,
    },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
