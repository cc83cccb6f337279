//! JSON records returned by the points API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::accrual::AccrualSnapshot;

/// Pool estimations keyed by the identifier the API returns them under
pub type PoolEstimations = BTreeMap<String, DeFiPoolFPointEstimation>;

/// Accrual of one wallet inside one DeFi pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeFiPoolFPointEstimation {
    pub accrual_amount: String,
    pub accrual_amount_per_second: String,
    pub estimated_at: String,
    pub pool_address: Option<String>,
    pub receipt_token_mint_address: String,
}

impl DeFiPoolFPointEstimation {
    pub fn snapshot(&self) -> AccrualSnapshot {
        AccrualSnapshot::from_wire(
            &self.accrual_amount,
            &self.accrual_amount_per_second,
            &self.estimated_at,
        )
    }

    /// Display name: the pool address, or the map key when the API omits it
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.pool_address.as_deref().unwrap_or(key)
    }
}

/// Accrual summary for one wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFPointEstimation {
    pub base_accrual_amount: String,
    pub base_accrual_amount_per_second: String,
    #[serde(default)]
    pub base_accrual_items: Vec<DeFiPoolFPointEstimation>,
    pub estimated_at: String,
    pub public_key: String,
    pub rank: Option<u64>,
    pub rank_change: Option<i64>,
    pub rank_percentile: Option<f64>,
    pub referral_accrual_amount: String,
    pub referral_accrual_amount_per_second: String,
    pub settled_amount: String,
    pub snapshot_updated_at: Option<String>,
    pub total_accrual_amount: String,
    pub total_accrual_amount_per_second: String,
}

impl UserFPointEstimation {
    pub fn total_snapshot(&self) -> AccrualSnapshot {
        AccrualSnapshot::from_wire(
            &self.total_accrual_amount,
            &self.total_accrual_amount_per_second,
            &self.estimated_at,
        )
    }

    pub fn base_snapshot(&self) -> AccrualSnapshot {
        AccrualSnapshot::from_wire(
            &self.base_accrual_amount,
            &self.base_accrual_amount_per_second,
            &self.estimated_at,
        )
    }

    pub fn referral_snapshot(&self) -> AccrualSnapshot {
        AccrualSnapshot::from_wire(
            &self.referral_accrual_amount,
            &self.referral_accrual_amount_per_second,
            &self.estimated_at,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_user_estimation_decodes() {
        let user = fixtures::user();
        assert_eq!(user.rank, Some(42));
        assert_eq!(user.rank_change, Some(-3));
        assert_eq!(user.rank_percentile, Some(5.5));
        assert_eq!(user.snapshot_updated_at, None);
        assert_eq!(user.base_accrual_items.len(), 1);
        assert_eq!(user.base_accrual_items[0].pool_address.as_deref(), Some("PoolAddr1111"));
    }

    #[test]
    fn test_missing_items_default_to_empty() {
        let mut value: serde_json::Value =
            serde_json::from_str(fixtures::USER_JSON).expect("Failed to parse");
        value
            .as_object_mut()
            .expect("fixture is an object")
            .remove("baseAccrualItems");
        let user: super::UserFPointEstimation =
            serde_json::from_value(value).expect("Failed to decode");
        assert!(user.base_accrual_items.is_empty());
    }

    #[test]
    fn test_snapshots_project() {
        let user = fixtures::user();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 10).unwrap();
        assert!((user.total_snapshot().project_at(later, true) - 120.1).abs() < 1e-9);
        assert!((user.base_snapshot().project_at(later, true) - 100.08).abs() < 1e-9);
        assert!((user.referral_snapshot().project_at(later, true) - 20.02).abs() < 1e-9);

        let before = later - Duration::seconds(20);
        assert!(user.total_snapshot().project_at(before, true) < 120.0);
    }

    #[test]
    fn test_pool_label_falls_back_to_key() {
        let pools = fixtures::pools();
        assert_eq!(pools["zeta"].label("zeta"), "zeta");
        assert_eq!(pools["alpha"].label("alpha"), "AlphaPool");
        // BTreeMap keeps keys sorted
        assert_eq!(pools.keys().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
    }
}
