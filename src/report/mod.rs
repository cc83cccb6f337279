//! Point-in-time view of every balance of one wallet
//!
//! A [`PointsReport`] is what a display refresh produces: the user snapshot and
//! each pool snapshot projected to the same instant, plus the rates and rank
//! information that go alongside them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::accrual::{format_rank_delta, scaled_amount, RankDelta};
use crate::api::{PoolEstimations, UserFPointEstimation};

/// One DeFi pool's projected balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolBalance {
    /// Key the API returned the pool under
    pub key: String,
    pub label: String,
    pub receipt_token_mint: String,
    pub current: f64,
    pub per_second: f64,
    pub daily: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankInfo {
    pub rank: u64,
    pub change: Option<RankDelta>,
    /// "Top N%" figure as reported by the API
    pub percentile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsReport {
    pub wallet: String,
    pub as_of: DateTime<Utc>,
    pub estimated_at: String,
    /// `None` when `estimated_at` could not be parsed
    pub seconds_since_estimate: Option<i64>,

    pub total: f64,
    pub base: f64,
    pub referral: f64,
    pub settled: f64,

    pub total_per_second: f64,
    pub base_per_second: f64,
    pub referral_per_second: f64,
    pub total_daily: f64,

    pub rank: Option<RankInfo>,
    pub pools: Vec<PoolBalance>,
}

impl PointsReport {
    /// Project `user` and `pools` to `now`. All amounts are in F Points.
    pub fn build(
        user: &UserFPointEstimation,
        pools: Option<&PoolEstimations>,
        now: DateTime<Utc>,
    ) -> Self {
        let total = user.total_snapshot();
        let base = user.base_snapshot();
        let referral = user.referral_snapshot();

        // rank 0 is treated as unranked
        let rank = user.rank.filter(|&r| r > 0).map(|rank| RankInfo {
            rank,
            change: user.rank_change.map(format_rank_delta),
            percentile: user.rank_percentile,
        });

        let pools: Vec<PoolBalance> = pools
            .map(|pools| {
                pools
                    .iter()
                    .map(|(key, estimation)| {
                        let snapshot = estimation.snapshot();
                        PoolBalance {
                            key: key.clone(),
                            label: estimation.label(key).to_string(),
                            receipt_token_mint: estimation.receipt_token_mint_address.clone(),
                            current: snapshot.project_at(now, true),
                            per_second: snapshot.per_second(true),
                            daily: snapshot.daily_rate(true),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            wallet: user.public_key.clone(),
            as_of: now,
            estimated_at: user.estimated_at.clone(),
            seconds_since_estimate: total.elapsed_seconds(now),
            total: total.project_at(now, true),
            base: base.project_at(now, true),
            referral: referral.project_at(now, true),
            settled: scaled_amount(&user.settled_amount),
            total_per_second: total.per_second(true),
            base_per_second: base.per_second(true),
            referral_per_second: referral.per_second(true),
            total_daily: total.daily_rate(true),
            rank,
            pools,
        }
    }

    /// Sum of all pool balances
    pub fn pools_total(&self) -> f64 {
        self.pools.iter().map(|p| p.current).sum()
    }
}
