//! Single-technician route construction.
//!
//! A priority-weighted nearest-neighbour pass builds the initial order, then
//! 2-opt reverses segments while that shortens the open path from the start
//! location through every stop.

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::config::OptimizerConfig;
use crate::haversine::travel_hours;
use crate::model::{Coordinate, Job, RouteResult, TechnicianProfile};
use crate::priority;
use crate::traits::DistanceProvider;

/// Reversals must shorten the route by more than this to count.
const IMPROVEMENT_EPSILON_KM: f64 = 1e-9;

/// Order `jobs` for `technician`, departing from `start`.
///
/// Every input job appears exactly once in the result. An empty input gives
/// an empty route with zero distance and time.
pub fn build_route<'a, I, D>(
    jobs: I,
    start: Coordinate,
    technician: &TechnicianProfile,
    now: DateTime<Utc>,
    config: &OptimizerConfig,
    distance: &D,
) -> RouteResult<'a>
where
    I: IntoIterator<Item = &'a Job>,
    D: DistanceProvider + ?Sized,
{
    let jobs: Vec<&'a Job> = jobs.into_iter().collect();
    if jobs.is_empty() {
        return RouteResult::empty(start);
    }

    let scores: Vec<f64> = jobs
        .iter()
        .map(|job| priority::score(job, technician, now, &config.scoring, distance))
        .collect();

    let mut route = greedy_order(&jobs, &scores, start, config.min_greedy_distance_km, distance);
    let greedy_km = route_distance_km(start, &route, distance);
    let passes = two_opt(&mut route, start, config.max_two_opt_passes, distance);

    let total_distance_km = route_distance_km(start, &route, distance);
    let job_hours: f64 = route.iter().map(|job| job.estimated_hours).sum();
    let total_time_hours = job_hours + travel_hours(total_distance_km, config.speed_kmh);

    debug!(
        technician = %technician.id,
        stops = route.len(),
        greedy_km,
        total_distance_km,
        passes,
        "built route"
    );

    RouteResult {
        start_location: start,
        jobs: route,
        total_distance_km,
        total_time_hours,
    }
}

/// Length of the open path `start -> route[0] -> ... -> route[n-1]`.
pub fn route_distance_km<D>(start: Coordinate, route: &[&Job], distance: &D) -> f64
where
    D: DistanceProvider + ?Sized,
{
    let mut current = start;
    let mut total = 0.0;
    for job in route {
        total += distance.distance_km(current, job.location);
        current = job.location;
    }
    total
}

/// Repeatedly take the remaining job with the best `score / distance` ratio.
///
/// The distance is floored at `min_distance_km` so colocated jobs do not
/// divide by zero. Ties keep the first job in input order.
fn greedy_order<'a, D>(
    jobs: &[&'a Job],
    scores: &[f64],
    start: Coordinate,
    min_distance_km: f64,
    distance: &D,
) -> Vec<&'a Job>
where
    D: DistanceProvider + ?Sized,
{
    let mut remaining: Vec<usize> = (0..jobs.len()).collect();
    let mut order = Vec::with_capacity(jobs.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_ratio = f64::NEG_INFINITY;

        for (pos, &idx) in remaining.iter().enumerate() {
            let km = distance.distance_km(current, jobs[idx].location);
            let ratio = scores[idx] / km.max(min_distance_km);
            if ratio > best_ratio {
                best_ratio = ratio;
                best_pos = pos;
            }
        }

        // `Vec::remove` keeps the remaining jobs in input order for tie-breaks.
        let chosen = jobs[remaining.remove(best_pos)];
        current = chosen.location;
        order.push(chosen);
    }

    order
}

/// 2-opt over segment reversals `route[i..=j]` with `1 <= i <= n-3`, `i < j <= n-1`.
///
/// Runs full passes until one finds no improvement or `max_passes` is hit.
/// Returns the number of passes run.
fn two_opt<D>(route: &mut [&Job], start: Coordinate, max_passes: usize, distance: &D) -> usize
where
    D: DistanceProvider + ?Sized,
{
    let n = route.len();
    if n < 3 {
        return 0;
    }

    let mut best_km = route_distance_km(start, route, distance);
    let mut passes = 0;

    while passes < max_passes {
        passes += 1;
        let mut improved = false;

        for i in 1..n - 2 {
            for j in i + 1..n {
                route[i..=j].reverse();
                let candidate_km = route_distance_km(start, route, distance);
                if candidate_km < best_km - IMPROVEMENT_EPSILON_KM {
                    trace!(i, j, from = best_km, to = candidate_km, "2-opt improvement");
                    best_km = candidate_km;
                    improved = true;
                } else {
                    route[i..=j].reverse();
                }
            }
        }

        if !improved {
            return passes;
        }
    }

    if max_passes > 0 {
        warn!(max_passes, stops = n, "2-opt stopped at pass limit");
    }
    passes
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::haversine::Haversine;
    use crate::model::Priority;

    /// Manhattan distance in degrees (simple, predictable).
    struct Manhattan;

    impl DistanceProvider for Manhattan {
        fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
            (from.lat - to.lat).abs() + (from.lng - to.lng).abs()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn job(id: &str, lat: f64, lng: f64) -> Job {
        Job::new(id, Coordinate::new(lat, lng), Priority::Medium, 1.0)
    }

    fn ids<'a>(route: &[&'a Job]) -> Vec<&'a str> {
        route.iter().map(|job| job.id.as_str()).collect()
    }

    #[test]
    fn test_greedy_prefers_ratio_not_raw_score() {
        let near = job("near", 0.0, 1.0);
        let mut far = job("far", 0.0, 10.0);
        far.priority = Priority::High;
        let jobs = [&far, &near];
        let order = greedy_order(&jobs, &[40.0, 20.0], Coordinate::new(0.0, 0.0), 0.1, &Manhattan);
        assert_eq!(ids(&order), vec!["near", "far"]);
    }

    #[test]
    fn test_greedy_tie_keeps_input_order() {
        let a = job("a", 1.0, 0.0);
        let b = job("b", 0.0, 1.0);
        let jobs = [&a, &b];
        let order = greedy_order(&jobs, &[10.0, 10.0], Coordinate::new(0.0, 0.0), 0.1, &Manhattan);
        assert_eq!(ids(&order), vec!["a", "b"]);

        let jobs = [&b, &a];
        let order = greedy_order(&jobs, &[10.0, 10.0], Coordinate::new(0.0, 0.0), 0.1, &Manhattan);
        assert_eq!(ids(&order), vec!["b", "a"]);
    }

    #[test]
    fn test_greedy_colocated_jobs_use_floor() {
        let a = job("a", 0.0, 0.0);
        let b = job("b", 0.0, 0.0);
        let jobs = [&a, &b];
        let order = greedy_order(&jobs, &[5.0, 9.0], Coordinate::new(0.0, 0.0), 0.1, &Manhattan);
        assert_eq!(ids(&order), vec!["b", "a"]);
    }

    #[test]
    fn test_two_opt_untangles_crossing() {
        // Zig-zag along a line: 0 -> 1 -> 4 -> 2 -> 3 -> 5 is worse than sorted.
        let jobs: Vec<Job> = [1.0, 4.0, 2.0, 3.0, 5.0]
            .iter()
            .map(|x| job(&format!("x{}", x), *x, 0.0))
            .collect();
        let mut route: Vec<&Job> = jobs.iter().collect();
        let start = Coordinate::new(0.0, 0.0);
        let before = route_distance_km(start, &route, &Manhattan);
        let passes = two_opt(&mut route, start, 100, &Manhattan);
        let after = route_distance_km(start, &route, &Manhattan);
        assert!(passes >= 1);
        assert!(after < before, "2-opt should shorten {} -> {}", before, after);
        assert_eq!(after, 5.0);
    }

    #[test]
    fn test_two_opt_skips_short_routes() {
        let jobs = [job("a", 2.0, 0.0), job("b", 1.0, 0.0), job("c", 3.0, 0.0)];
        let mut route: Vec<&Job> = jobs.iter().collect();
        assert_eq!(two_opt(&mut route, Coordinate::new(0.0, 0.0), 100, &Manhattan), 0);
        assert_eq!(ids(&route), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_two_opt_respects_pass_cap() {
        let jobs: Vec<Job> = [1.0, 4.0, 2.0, 3.0, 5.0]
            .iter()
            .map(|x| job(&format!("x{}", x), *x, 0.0))
            .collect();
        let mut route: Vec<&Job> = jobs.iter().collect();
        assert_eq!(two_opt(&mut route, Coordinate::new(0.0, 0.0), 0, &Manhattan), 0);
        assert_eq!(ids(&route), vec!["x1", "x4", "x2", "x3", "x5"]);
    }

    #[test]
    fn test_empty_route() {
        let tech = TechnicianProfile::new("t", Coordinate::new(0.0, 0.0));
        let jobs: Vec<Job> = Vec::new();
        let route = build_route(
            &jobs,
            Coordinate::new(0.0, 0.0),
            &tech,
            now(),
            &OptimizerConfig::default(),
            &Haversine,
        );
        assert!(route.is_empty());
        assert_eq!(route.total_distance_km, 0.0);
        assert_eq!(route.total_time_hours, 0.0);
    }

    #[test]
    fn test_total_time_includes_drive_time() {
        let tech = TechnicianProfile::new("t", Coordinate::new(0.0, 0.0));
        let jobs = [job("a", 15.0, 0.0)];
        let route = build_route(
            &jobs,
            Coordinate::new(0.0, 0.0),
            &tech,
            now(),
            &OptimizerConfig::default(),
            &Manhattan,
        );
        // 1h of work plus 15 km at 30 km/h.
        assert_eq!(route.total_distance_km, 15.0);
        assert!((route.total_time_hours - 1.5).abs() < 1e-12);
    }
}
