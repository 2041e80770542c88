//! Test fixtures for dispatch-optimizer.
//!
//! Provides realistic test data including:
//! - Lower Manhattan / Brooklyn service locations
//! - Builders for jobs and technicians with sensible defaults

#![allow(dead_code)]

pub mod builders;
pub mod nyc_locations;

pub use builders::*;
pub use nyc_locations::*;
