//! Hours-of-Service duty-cycle simulation
//!
//! Walks a single trip forward on a virtual clock (hours since trip start)
//! and lays down duty segments: pickup, driving chunks, 30-minute breaks,
//! fuel stops, 10-hour resets and the final drop-off. The continuous
//! timeline is cut into day-logs whenever a reset starts a new duty period
//! and once more after the drop-off.
//!
//! Every loop iteration either drives a strictly positive chunk or fails
//! with [`HosError::SchedulingInfeasible`], so the simulation always
//! terminates regardless of how the rules are configured.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{HosError, HosResult};
use crate::services::day_log::finalize_day;
use crate::services::hos_rules::HosRules;
use crate::types::duty::hours_to_duration;
use crate::types::{Activity, DayLog, DutySegment, DutyStatus, TripInput};

/// Tolerance for comparing accumulated hour counters against limits.
const EPSILON: f64 = 1e-9;

/// Duty-cycle simulator bound to one validated rule set
#[derive(Debug, Clone, Default)]
pub struct DutyCycleSimulator {
    rules: HosRules,
}

impl DutyCycleSimulator {
    pub fn new(rules: HosRules) -> HosResult<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Produce the ordered day-logs for a trip.
    ///
    /// A missing, non-positive or non-finite distance yields no logs.
    pub fn simulate(&self, trip: &TripInput) -> HosResult<Vec<DayLog>> {
        let distance = match trip.total_distance_miles {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => {
                debug!(
                    "No usable distance for trip {} -> {}, skipping logs",
                    trip.pickup_location, trip.dropoff_location
                );
                return Ok(Vec::new());
            }
        };

        let rules = &self.rules;
        let total_drive_hours = distance / rules.drive_speed_mph;
        let fuel_stops_required = rules.fuel_stops_for(distance);

        let mut state =
            SimState::new(rules, trip.trip_start, total_drive_hours, fuel_stops_required);

        state.push(
            DutyStatus::OnDuty,
            rules.pickup_hours,
            Some(Activity::Pickup),
            Some(trip.pickup_location.clone()),
        );

        while state.remaining_drive > EPSILON {
            if state.drive_since_break >= rules.max_continuous_drive_hours - EPSILON {
                state.take_break();
            }

            if state.duty_period_exhausted() {
                state.start_new_duty_period();
            }

            let mut chunk = state.next_drive_chunk();
            if chunk <= EPSILON {
                debug!("No drive time left on day {}, forcing a reset", state.day_number);
                state.start_new_duty_period();
                chunk = state.next_drive_chunk();
                if chunk <= EPSILON {
                    warn!(
                        "Scheduling infeasible on day {} with {:.2} h of driving left",
                        state.day_number, state.remaining_drive
                    );
                    return Err(HosError::SchedulingInfeasible {
                        day: state.day_number,
                        remaining_drive_hours: state.remaining_drive,
                    });
                }
            }

            // Fuel stops reuse the label of the chunk they follow
            let location = state.route_label();
            state.drive(chunk, location.clone());

            while state.fuel_stop_due() {
                state.ensure_on_duty_room(rules.fuel_stop_duration_hours);
                state.push(
                    DutyStatus::OnDuty,
                    rules.fuel_stop_duration_hours,
                    Some(Activity::FuelStop),
                    Some(location.clone()),
                );
                state.remaining_fuel_stops -= 1;
            }
        }

        state.ensure_on_duty_room(rules.dropoff_hours);
        state.push(
            DutyStatus::OnDuty,
            rules.dropoff_hours,
            Some(Activity::Dropoff),
            Some(trip.dropoff_location.clone()),
        );
        state.flush_day();

        info!(
            "Simulated {:.2} mi trip {} -> {}: {} day(s), {:.2} h driving, {} fuel stop(s)",
            distance,
            trip.pickup_location,
            trip.dropoff_location,
            state.logs.len(),
            total_drive_hours,
            fuel_stops_required
        );

        Ok(state.logs)
    }
}

/// Simulate a trip under the default regulatory rules.
pub fn simulate(trip: &TripInput) -> HosResult<Vec<DayLog>> {
    DutyCycleSimulator::default().simulate(trip)
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Counters for one simulation run. Never outlives the `simulate` call.
struct SimState<'a> {
    rules: &'a HosRules,
    trip_start: DateTime<Utc>,
    total_drive_hours: f64,
    fuel_stops_required: u64,

    /// Hours since trip start
    clock: f64,
    day_number: u32,
    day_start: f64,
    segments: Vec<DutySegment>,
    logs: Vec<DayLog>,

    on_duty_today: f64,
    drive_since_break: f64,
    remaining_drive: f64,
    remaining_fuel_stops: u64,
}

impl<'a> SimState<'a> {
    fn new(
        rules: &'a HosRules,
        trip_start: DateTime<Utc>,
        total_drive_hours: f64,
        fuel_stops_required: u64,
    ) -> Self {
        Self {
            rules,
            trip_start,
            total_drive_hours,
            fuel_stops_required,
            clock: 0.0,
            day_number: 1,
            day_start: 0.0,
            segments: Vec::new(),
            logs: Vec::new(),
            on_duty_today: 0.0,
            drive_since_break: 0.0,
            remaining_drive: total_drive_hours,
            remaining_fuel_stops: fuel_stops_required,
        }
    }

    /// Append a segment at the current clock and advance the clock.
    /// On-duty statuses count against today's on-duty window.
    fn push(
        &mut self,
        status: DutyStatus,
        hours: f64,
        activity: Option<Activity>,
        location: Option<String>,
    ) {
        self.segments.push(DutySegment {
            offset: hours_to_duration(self.clock),
            status,
            duration_hours: hours,
            activity,
            location,
        });
        self.clock += hours;
        if status.is_on_duty() {
            self.on_duty_today += hours;
        }
    }

    /// Off duty, but the on-duty window keeps running.
    fn take_break(&mut self) {
        self.push(
            DutyStatus::OffDuty,
            self.rules.break_duration_hours,
            Some(Activity::Break),
            None,
        );
        self.on_duty_today += self.rules.break_duration_hours;
        self.drive_since_break = 0.0;
    }

    fn duty_period_exhausted(&self) -> bool {
        self.on_duty_today >= self.rules.max_on_duty_hours_per_day - EPSILON
    }

    /// Close the current day and open the next one with a full reset.
    fn start_new_duty_period(&mut self) {
        self.flush_day();
        self.push(
            DutyStatus::OffDuty,
            self.rules.daily_reset_hours,
            Some(Activity::Reset),
            None,
        );
        self.on_duty_today = 0.0;
        self.drive_since_break = 0.0;
    }

    /// Reset first if `hours` more on duty would overrun today's window.
    fn ensure_on_duty_room(&mut self, hours: f64) {
        if self.on_duty_today + hours > self.rules.max_on_duty_hours_per_day + EPSILON {
            debug!(
                "{:.2} h on duty would overrun day {}, resetting first",
                hours, self.day_number
            );
            self.start_new_duty_period();
        }
    }

    fn flush_day(&mut self) {
        let segments = std::mem::take(&mut self.segments);
        let log = finalize_day(
            self.day_number,
            segments,
            self.day_start,
            self.clock,
            self.trip_start,
        );
        debug!(
            "Day {} closed: {:.2} h driving, {:.2} h on duty, {:.2} h off duty",
            log.day_number,
            log.summary.drive_hours,
            log.summary.on_duty_hours,
            log.summary.off_duty_hours
        );
        self.logs.push(log);
        self.day_number += 1;
        self.day_start = self.clock;
    }

    fn next_drive_chunk(&self) -> f64 {
        let rules = self.rules;
        (rules.max_continuous_drive_hours - self.drive_since_break)
            .min(rules.max_drive_hours_per_duty_period - self.drive_since_break)
            .min(rules.max_on_duty_hours_per_day - self.on_duty_today)
            .min(self.remaining_drive)
    }

    fn drive(&mut self, chunk: f64, location: String) {
        // Absorb float residue so the last chunk lands exactly on zero
        let chunk = if self.remaining_drive - chunk <= EPSILON {
            self.remaining_drive
        } else {
            chunk
        };
        self.push(DutyStatus::Drive, chunk, None, Some(location));
        self.drive_since_break += chunk;
        self.remaining_drive = if chunk == self.remaining_drive {
            0.0
        } else {
            self.remaining_drive - chunk
        };
    }

    fn driven_hours(&self) -> f64 {
        self.total_drive_hours - self.remaining_drive
    }

    /// The next unconsumed threshold sits at `n * interval / speed` hours of driving.
    fn fuel_stop_due(&self) -> bool {
        if self.remaining_fuel_stops == 0 {
            return false;
        }
        let next = self.fuel_stops_required - self.remaining_fuel_stops + 1;
        let threshold = next as f64 * self.rules.fuel_interval_hours();
        self.driven_hours() >= threshold - EPSILON
    }

    /// Trip progress as a route marker, e.g. `Route 42.3%`.
    fn route_label(&self) -> String {
        let progress = 1.0 - self.remaining_drive / self.total_drive_hours;
        format!("Route {:.1}%", progress * 100.0)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn trip(distance: Option<f64>) -> TripInput {
        TripInput {
            total_distance_miles: distance,
            pickup_location: "Chicago, IL".to_string(),
            dropoff_location: "Denver, CO".to_string(),
            current_cycle_hours: 0.0,
            pickup_dropoff_allowance_hours: 2.0,
            trip_start: Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
        }
    }

    fn all_segments(logs: &[DayLog]) -> Vec<&DutySegment> {
        logs.iter().flat_map(|l| l.segments.iter()).collect()
    }

    fn count_activity(logs: &[DayLog], activity: Activity) -> usize {
        all_segments(logs)
            .into_iter()
            .filter(|s| s.activity == Some(activity))
            .count()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -----------------------------------------------------------------------
    // Missing or unusable distance
    // -----------------------------------------------------------------------

    #[test]
    fn missing_or_non_positive_distance_yields_no_logs() {
        for distance in [None, Some(0.0), Some(-120.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let logs = simulate(&trip(distance)).unwrap();
            assert!(logs.is_empty(), "distance {:?} should produce no logs", distance);
        }
    }

    // -----------------------------------------------------------------------
    // Reference scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn short_haul_fits_in_one_day_without_break() {
        let logs = simulate(&trip(Some(50.0))).unwrap();

        assert_eq!(logs.len(), 1);
        let day = &logs[0];
        let statuses: Vec<_> = day.segments.iter().map(|s| s.status).collect();
        assert_eq!(statuses, vec![DutyStatus::OnDuty, DutyStatus::Drive, DutyStatus::OnDuty]);
        assert_eq!(day.summary.drive_hours, 0.83);
        assert_eq!(day.summary.on_duty_hours, 2.83);
        assert_eq!(day.summary.off_duty_hours, 0.0);
        assert_eq!(day.summary.fuel_stops, 0);
        assert_eq!(count_activity(&logs, Activity::Break), 0);
    }

    #[test]
    fn five_hundred_miles_gets_a_break_after_eight_hours() {
        let logs = simulate(&trip(Some(500.0))).unwrap();

        assert_eq!(logs.len(), 1);
        let day = &logs[0];
        let activities: Vec<_> = day.segments.iter().map(|s| s.activity).collect();
        assert_eq!(
            activities,
            vec![Some(Activity::Pickup), None, Some(Activity::Break), None, Some(Activity::Dropoff)]
        );

        assert_eq!(day.segments[1].duration_hours, 8.0);
        assert_eq!(day.segments[1].location.as_deref(), Some("Route 0.0%"));
        assert_eq!(day.segments[3].location.as_deref(), Some("Route 96.0%"));
        assert_eq!(day.segments[4].location.as_deref(), Some("Denver, CO"));

        assert_eq!(day.summary.drive_hours, 8.33);
        assert_eq!(day.summary.on_duty_hours, 10.33);
        assert_eq!(day.summary.off_duty_hours, 0.5);
        assert_eq!(day.summary.fuel_stops, 0);
        assert_eq!(day.date, date(2026, 3, 2));
        assert_eq!(day.end_offset.num_minutes(), 10 * 60 + 50);
    }

    #[test]
    fn long_haul_spans_days_with_resets_and_fuel_stops() {
        let logs = simulate(&trip(Some(2200.0))).unwrap();

        assert_eq!(logs.len(), 3);
        assert_eq!(count_activity(&logs, Activity::FuelStop), 2);
        assert_eq!(count_activity(&logs, Activity::Reset), 2);

        // Every day after the first opens with a reset
        for log in &logs[1..] {
            assert_eq!(log.segments[0].activity, Some(Activity::Reset));
            assert_eq!(log.segments[0].duration_hours, 10.0);
        }

        let fuel_per_day: Vec<u32> = logs.iter().map(|l| l.summary.fuel_stops).collect();
        assert_eq!(fuel_per_day, vec![0, 1, 1]);

        let day_numbers: Vec<u32> = logs.iter().map(|l| l.day_number).collect();
        assert_eq!(day_numbers, vec![1, 2, 3]);

        // pickup 1 + drive 8 + break 0.5 + drive 4.5 closes day 1 at 14 h
        assert_eq!(logs[0].end_offset.num_hours(), 14);
        assert_eq!(logs[0].summary.drive_hours, 12.5);
        assert_eq!(logs[0].summary.on_duty_hours, 13.5);

        // Day 2 opens 14 h in (22:00), still on the first calendar date
        assert_eq!(logs[1].date, date(2026, 3, 2));
        assert_eq!(logs[2].date, date(2026, 3, 3));

        let last = logs.last().unwrap().segments.last().unwrap();
        assert_eq!(last.activity, Some(Activity::Dropoff));
    }

    #[test]
    fn days_before_the_last_close_on_a_full_duty_window() {
        for distance in [2200.0, 3000.0, 5000.0] {
            let logs = simulate(&trip(Some(distance))).unwrap();
            assert!(logs.len() > 1);

            for log in &logs[..logs.len() - 1] {
                // Breaks keep the window running, resets do not
                let window: f64 = log
                    .segments
                    .iter()
                    .filter(|s| s.activity != Some(Activity::Reset))
                    .map(|s| s.duration_hours)
                    .sum();
                assert!(
                    (window - 14.0).abs() < 1e-6,
                    "distance {} day {} window {}",
                    distance,
                    log.day_number,
                    window
                );
            }
        }
    }

    #[test]
    fn first_fuel_stop_comes_after_first_thousand_miles() {
        let logs = simulate(&trip(Some(2200.0))).unwrap();
        let segments = all_segments(&logs);

        let mut driven = 0.0;
        for segment in &segments {
            if segment.status == DutyStatus::Drive {
                driven += segment.duration_hours;
            }
            if segment.activity == Some(Activity::FuelStop) {
                assert!(driven * 60.0 >= 1000.0 - 1e-6);
                break;
            }
        }

        // Each fuel stop repeats the label of the drive chunk it follows
        let mut fuel_labels = Vec::new();
        for pair in segments.windows(2) {
            if pair[1].activity == Some(Activity::FuelStop) {
                assert_eq!(pair[0].status, DutyStatus::Drive);
                assert_eq!(pair[1].location, pair[0].location);
                fuel_labels.push(pair[1].location.as_deref().unwrap());
            }
        }
        assert_eq!(fuel_labels, vec!["Route 34.1%", "Route 70.2%"]);
    }

    // -----------------------------------------------------------------------
    // Properties over a range of distances
    // -----------------------------------------------------------------------

    const DISTANCES: [f64; 11] = [
        1.0, 50.0, 480.0, 500.0, 660.0, 1000.0, 1234.5, 2200.0, 3000.0, 5000.0, 10_000.0,
    ];

    #[test]
    fn drive_hours_add_up_to_distance() {
        for distance in DISTANCES {
            let logs = simulate(&trip(Some(distance))).unwrap();
            let expected = distance / 60.0;

            let raw: f64 = all_segments(&logs)
                .iter()
                .filter(|s| s.status == DutyStatus::Drive)
                .map(|s| s.duration_hours)
                .sum();
            assert!((raw - expected).abs() < 1e-6, "distance {}", distance);

            let summarized: f64 = logs.iter().map(|l| l.summary.drive_hours).sum();
            let tolerance = 0.005 * logs.len() as f64 + 1e-9;
            assert!((summarized - expected).abs() <= tolerance, "distance {}", distance);
        }
    }

    #[test]
    fn no_day_exceeds_on_duty_cap() {
        for distance in DISTANCES {
            let logs = simulate(&trip(Some(distance))).unwrap();
            for log in &logs {
                assert!(
                    log.summary.on_duty_hours <= 14.0,
                    "distance {} day {}",
                    distance,
                    log.day_number
                );
            }
        }
    }

    #[test]
    fn drive_segments_respect_drive_limits() {
        for distance in DISTANCES {
            let logs = simulate(&trip(Some(distance))).unwrap();

            let mut continuous = 0.0;
            for segment in all_segments(&logs) {
                match segment.status {
                    DutyStatus::Drive => {
                        assert!(segment.duration_hours <= 11.0 + 1e-9);
                        continuous += segment.duration_hours;
                        assert!(continuous <= 8.0 + 1e-9, "distance {}", distance);
                    }
                    DutyStatus::OffDuty if segment.duration_hours >= 0.5 => continuous = 0.0,
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn fuel_stop_count_matches_distance() {
        for distance in DISTANCES {
            let logs = simulate(&trip(Some(distance))).unwrap();
            let expected = (distance / 1000.0).floor() as usize;
            let count = count_activity(&logs, Activity::FuelStop);
            assert_eq!(count, expected, "distance {}", distance);

            let summarized: u32 = logs.iter().map(|l| l.summary.fuel_stops).sum();
            assert_eq!(summarized as usize, expected);
        }
    }

    #[test]
    fn segments_are_contiguous_and_days_chain() {
        let logs = simulate(&trip(Some(3000.0))).unwrap();

        let mut expected_offset = chrono::Duration::zero();
        for log in &logs {
            assert_eq!(log.start_offset, expected_offset);
            for segment in &log.segments {
                let drift = (segment.offset - expected_offset).num_milliseconds().abs();
                assert!(drift <= 1);
                expected_offset = segment.offset + hours_to_duration(segment.duration_hours);
            }
            let drift = (log.end_offset - expected_offset).num_milliseconds().abs();
            assert!(drift <= 1);
            expected_offset = log.end_offset;
        }
    }

    #[test]
    fn simulation_is_idempotent() {
        let input = trip(Some(2750.0));
        let first = simulate(&input).unwrap();
        let second = simulate(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cycle_hours_do_not_change_the_schedule() {
        let mut loaded = trip(Some(1500.0));
        loaded.current_cycle_hours = 40.0;
        loaded.pickup_dropoff_allowance_hours = 5.0;
        assert_eq!(simulate(&loaded).unwrap(), simulate(&trip(Some(1500.0))).unwrap());
    }

    // -----------------------------------------------------------------------
    // Custom rules
    // -----------------------------------------------------------------------

    #[test]
    fn short_fuel_interval_emits_every_threshold() {
        let rules = HosRules {
            fuel_stop_interval_miles: 100.0,
            ..HosRules::default()
        };
        let simulator = DutyCycleSimulator::new(rules).unwrap();
        let logs = simulator.simulate(&trip(Some(1000.0))).unwrap();

        assert_eq!(count_activity(&logs, Activity::FuelStop), 10);
        for log in &logs {
            assert!(log.summary.on_duty_hours <= 14.0);
        }
    }

    #[test]
    fn drop_off_moves_to_next_day_when_window_is_full() {
        // pickup 1 + drive 8 + break 0.5 + drive 0.5 fills a 10 h window
        let rules = HosRules {
            max_on_duty_hours_per_day: 10.0,
            ..HosRules::default()
        };
        let simulator = DutyCycleSimulator::new(rules).unwrap();
        let logs = simulator.simulate(&trip(Some(510.0))).unwrap();

        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].summary.on_duty_hours, 9.5);
        assert_eq!(logs[0].segments.last().unwrap().status, DutyStatus::Drive);

        let activities: Vec<_> = logs[1].segments.iter().map(|s| s.activity).collect();
        assert_eq!(activities, vec![Some(Activity::Reset), Some(Activity::Dropoff)]);
    }

    #[test]
    fn zero_drive_limit_is_infeasible() {
        let rules = HosRules {
            max_drive_hours_per_duty_period: 0.0,
            ..HosRules::default()
        };
        let simulator = DutyCycleSimulator::new(rules).unwrap();
        let result = simulator.simulate(&trip(Some(500.0)));
        assert!(matches!(result, Err(HosError::SchedulingInfeasible { .. })));
    }

    #[test]
    fn negative_on_duty_limit_is_infeasible() {
        let rules = HosRules {
            max_on_duty_hours_per_day: -1.0,
            ..HosRules::default()
        };
        let simulator = DutyCycleSimulator::new(rules).unwrap();
        match simulator.simulate(&trip(Some(500.0))) {
            Err(HosError::SchedulingInfeasible { remaining_drive_hours, .. }) => {
                assert!((remaining_drive_hours - 500.0 / 60.0).abs() < 1e-9);
            }
            other => panic!("expected infeasible, got {:?}", other),
        }
    }

    #[test]
    fn zero_continuous_limit_is_infeasible() {
        let rules = HosRules {
            max_continuous_drive_hours: 0.0,
            ..HosRules::default()
        };
        let simulator = DutyCycleSimulator::new(rules).unwrap();
        assert!(simulator.simulate(&trip(Some(50.0))).is_err());
    }

    #[test]
    fn invalid_rules_are_rejected_up_front() {
        let rules = HosRules {
            drive_speed_mph: -60.0,
            ..HosRules::default()
        };
        assert!(matches!(
            DutyCycleSimulator::new(rules),
            Err(HosError::InvalidRules { field: "drive_speed_mph", .. })
        ));
    }
}
