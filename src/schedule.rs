//! Wall-clock schedule for one technician.
//!
//! Walks an optimized route from the technician's current location, adding
//! drive time at the reference speed before each visit and the job duration
//! during it. Visits never overlap.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::OptimizerConfig;
use crate::duration::predict_duration;
use crate::haversine::travel_minutes;
use crate::model::{Job, RouteResult, ScheduledVisit, TechnicianProfile};
use crate::route::build_route;
use crate::traits::DistanceProvider;

/// Where visit lengths come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DurationSource {
    /// The job's own `estimated_hours`.
    #[default]
    Nominal,
    /// The duration predictor's adjusted estimate for this technician.
    Predicted,
}

/// Knobs for turning a route into visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleOptions {
    pub durations: DurationSource,
}

/// Route `jobs` from the technician's location and put each on the clock.
///
/// Priority scores used for ordering are evaluated at `start_time`.
pub fn schedule_jobs<'a, I, D>(
    jobs: I,
    technician: &TechnicianProfile,
    start_time: DateTime<Utc>,
    config: &OptimizerConfig,
    options: ScheduleOptions,
    distance: &D,
) -> Vec<ScheduledVisit<'a>>
where
    I: IntoIterator<Item = &'a Job>,
    D: DistanceProvider + ?Sized,
{
    let route = build_route(
        jobs,
        technician.current_location,
        technician,
        start_time,
        config,
        distance,
    );
    schedule_route(&route, technician, start_time, config, options, distance)
}

/// Timestamp an already ordered route.
///
/// The first leg starts at `route.start_location`. Negative estimates are
/// treated as zero so the clock never runs backwards. Times past the end of
/// the representable calendar saturate instead of wrapping.
pub fn schedule_route<'a, D>(
    route: &RouteResult<'a>,
    technician: &TechnicianProfile,
    start_time: DateTime<Utc>,
    config: &OptimizerConfig,
    options: ScheduleOptions,
    distance: &D,
) -> Vec<ScheduledVisit<'a>>
where
    D: DistanceProvider + ?Sized,
{
    let mut visits = Vec::with_capacity(route.jobs.len());
    let mut clock = start_time;
    let mut current = route.start_location;

    for &job in &route.jobs {
        let distance_km = distance.distance_km(current, job.location);
        let travel = travel_minutes(distance_km, config.speed_kmh);
        clock = advance(clock, minutes_to_duration(travel));

        let hours = match options.durations {
            DurationSource::Nominal => job.estimated_hours,
            DurationSource::Predicted => {
                predict_duration(job, technician, None, &config.duration)
            }
        };

        let scheduled_start = clock;
        let scheduled_end = advance(scheduled_start, hours_to_duration(hours));

        visits.push(ScheduledVisit {
            job,
            scheduled_start,
            scheduled_end,
            travel_minutes: travel,
            distance_km,
        });

        clock = scheduled_end;
        current = job.location;
    }

    visits
}

fn advance(clock: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    clock
        .checked_add_signed(by)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn minutes_to_duration(minutes: f64) -> Duration {
    millis_to_duration(minutes.max(0.0) * 60_000.0)
}

fn hours_to_duration(hours: f64) -> Duration {
    millis_to_duration(hours.max(0.0) * 3_600_000.0)
}

// `as i64` saturates; NaN becomes zero.
fn millis_to_duration(millis: f64) -> Duration {
    Duration::try_milliseconds(millis.round() as i64).unwrap_or(Duration::MAX)
}
