//! Real-time F Point accrual estimation
//!
//! The points API reports balances as snapshots: an amount that was correct at
//! `estimatedAt` plus the rate at which it grows every second. Everything in
//! this module projects such a snapshot forward to a later instant and turns
//! the result into display strings. No I/O happens here; the only impurity is
//! the current time, which comes from an injected [`Clock`].

mod clock;
mod estimator;
mod fixed_point;
mod format;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use estimator::{
    elapsed_whole_seconds, parse_timestamp, projected_daily_rate, AccrualEstimator,
    AccrualSnapshot,
};
pub use fixed_point::{decode_fixed_point, scale_amount, scaled_amount};
pub use format::{format_amount, format_rank_delta, Emphasis, RankDelta};
pub(crate) use format::round_decimal;

// ============================================================================
// Wire encoding constants
// ============================================================================
// Amounts and rates travel as decimal strings holding integers with four
// implied decimal digits, so "1000000" means 100.0000 F Points.

/// Number of implied decimal digits in wire amounts
pub const FIXED_POINT_DECIMALS: u32 = 4;

/// Divisor converting wire fixed-point values to human-scale values (10^4)
pub const FIXED_POINT_SCALE: f64 = 10_000.0;

/// Seconds in one day, used for daily accrual rates
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Default number of fractional digits for point balances
pub const DEFAULT_PRECISION: usize = 4;

/// Fractional digits used when showing per-second rates
pub const RATE_PRECISION: usize = 6;

/// Fractional digits used when showing daily rates
pub const DAILY_PRECISION: usize = 2;
