//! Linear projection of accrual snapshots

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::clock::{Clock, SystemClock};
use super::fixed_point::{decode_fixed_point, scale_amount};
use super::SECONDS_PER_DAY;

/// Parse an API timestamp.
///
/// RFC 3339 is what the API sends. Timestamps without an offset, and bare
/// dates, are read as UTC. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole seconds from `snapshot_time` to `now`, floored.
///
/// A snapshot in the future gives a negative count; `-0.5s` floors to `-1`.
pub fn elapsed_whole_seconds(snapshot_time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - snapshot_time).num_milliseconds().div_euclid(1000)
}

/// Points gained per day at the given per-second wire rate
pub fn projected_daily_rate(amount_per_second: &str, scale_down: bool) -> f64 {
    let per_day = decode_fixed_point(amount_per_second) * SECONDS_PER_DAY as f64;
    scale_amount(per_day, scale_down)
}

/// A decoded (amount, rate, timestamp) triple.
///
/// Amounts stay in raw fixed-point units; scaling happens on the way out.
/// A timestamp that failed to parse is kept as `None` and every projection
/// from it is NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualSnapshot {
    pub base_amount: f64,
    pub amount_per_second: f64,
    pub snapshot_time: Option<DateTime<Utc>>,
}

impl AccrualSnapshot {
    /// Decode a snapshot from its wire strings
    pub fn from_wire(base_amount: &str, amount_per_second: &str, estimated_at: &str) -> Self {
        Self {
            base_amount: decode_fixed_point(base_amount),
            amount_per_second: decode_fixed_point(amount_per_second),
            snapshot_time: parse_timestamp(estimated_at),
        }
    }

    /// Whole seconds elapsed since the snapshot, if its timestamp is known
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.snapshot_time.map(|t| elapsed_whole_seconds(t, now))
    }

    /// Projected amount at `now`: `base + rate × elapsed`
    pub fn project_at(&self, now: DateTime<Utc>, scale_down: bool) -> f64 {
        match self.elapsed_seconds(now) {
            Some(elapsed) => {
                let current = self.base_amount + self.amount_per_second * elapsed as f64;
                scale_amount(current, scale_down)
            }
            None => f64::NAN,
        }
    }

    /// Accrual rate per second
    pub fn per_second(&self, scale_down: bool) -> f64 {
        scale_amount(self.amount_per_second, scale_down)
    }

    /// Accrual per day at the snapshot's rate
    pub fn daily_rate(&self, scale_down: bool) -> f64 {
        scale_amount(self.amount_per_second * SECONDS_PER_DAY as f64, scale_down)
    }
}

/// Projects snapshots to the instant reported by its clock
#[derive(Debug, Clone, Default)]
pub struct AccrualEstimator<C = SystemClock> {
    clock: C,
}

impl AccrualEstimator<SystemClock> {
    /// Estimator reading the wall clock
    pub fn system() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> AccrualEstimator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current value of a snapshot given as wire strings.
    ///
    /// With `scale_down` the result is in F Points, otherwise in raw
    /// fixed-point units. Malformed input yields NaN.
    pub fn project_current_amount(
        &self,
        base_amount: &str,
        amount_per_second: &str,
        snapshot_time: &str,
        scale_down: bool,
    ) -> f64 {
        AccrualSnapshot::from_wire(base_amount, amount_per_second, snapshot_time)
            .project_at(self.clock.now(), scale_down)
    }

    /// Current value of an already decoded snapshot
    pub fn project(&self, snapshot: &AccrualSnapshot, scale_down: bool) -> f64 {
        snapshot.project_at(self.clock.now(), scale_down)
    }
}
