//! F Point accrual tracking for Fragmetric wallets
//!
//! The points API publishes balances as snapshots (amount, per-second rate,
//! timestamp). This crate projects those snapshots to the present, breaks them
//! down per DeFi pool and keeps them moving between fetches.
//!
//! - [`accrual`]: the estimator (projection, daily rate, formatting)
//! - [`api`]: wire types and the REST client
//! - [`report`]: all balances of one wallet at one instant
//! - [`live`]: periodic re-projection with slower refetching
//! - [`activity`]: per-day activity series
//! - [`holders`]: per-owner counts from a mintlist

pub mod accrual;
pub mod activity;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod holders;
pub mod live;
pub mod report;

pub use accrual::{
    format_amount, format_rank_delta, projected_daily_rate, AccrualEstimator, AccrualSnapshot,
    Clock, Emphasis, RankDelta, SystemClock,
};
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use live::LiveTracker;
pub use report::PointsReport;
