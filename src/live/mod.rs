//! Live tracking: re-project on every tick, refetch on a slower cadence
//!
//! Each tick is an independent recomputation from the last snapshot held. A
//! failed refetch keeps the previous snapshot so the display keeps moving.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use crate::accrual::Clock;
use crate::api::{PointsSource, PoolEstimations, UserFPointEstimation};
use crate::report::PointsReport;

pub struct LiveTracker<S, C> {
    source: S,
    clock: C,
    wallet: String,
    pool_addresses: Vec<String>,
    refetch_interval: Duration,
    user: Option<UserFPointEstimation>,
    pools: Option<PoolEstimations>,
    last_fetch: Option<DateTime<Utc>>,
}

impl<S: PointsSource, C: Clock> LiveTracker<S, C> {
    pub fn new(source: S, clock: C, wallet: impl Into<String>, refetch_interval: Duration) -> Self {
        Self {
            source,
            clock,
            wallet: wallet.into(),
            pool_addresses: Vec::new(),
            refetch_interval,
            user: None,
            pools: None,
            last_fetch: None,
        }
    }

    /// Restrict the pool breakdown to these pool addresses
    pub fn with_pools(mut self, pool_addresses: Vec<String>) -> Self {
        self.pool_addresses = pool_addresses;
        self
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    pub fn user(&self) -> Option<&UserFPointEstimation> {
        self.user.as_ref()
    }

    pub fn needs_refetch(&self, now: DateTime<Utc>) -> bool {
        match self.last_fetch {
            None => true,
            Some(last) => now - last >= self.refetch_interval,
        }
    }

    /// Fetch fresh snapshots.
    ///
    /// `Ok(None)` from the source replaces the held snapshot (the API has no
    /// data for this wallet); errors leave it untouched. The attempt time is
    /// recorded either way so a failing API is retried once per interval.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.last_fetch = Some(now);

        match self.source.user_estimation(&self.wallet) {
            Ok(user) => {
                if user.is_none() {
                    info!("no estimation available for {}", self.wallet);
                }
                self.user = user;
            }
            Err(e) => warn!("keeping previous estimation for {}: {e}", self.wallet),
        }

        match self.source.pool_estimations(&self.wallet, &self.pool_addresses) {
            Ok(pools) => self.pools = pools,
            Err(e) => warn!("keeping previous pool estimations for {}: {e}", self.wallet),
        }
    }

    /// Refetch if due, then project the held snapshot to the current time
    pub fn tick(&mut self) -> Option<PointsReport> {
        let now = self.clock.now();
        if self.needs_refetch(now) {
            debug!("refetching estimations for {}", self.wallet);
            self.refresh(now);
        }

        self.user
            .as_ref()
            .map(|user| PointsReport::build(user, self.pools.as_ref(), now))
    }
}
