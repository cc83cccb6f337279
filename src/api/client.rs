//! Blocking REST client for the points API
//!
//! Deliberately thin: one GET per call and no retries. A 404 means the API
//! has nothing for that address and comes back as `Ok(None)`.

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{PoolEstimations, UserFPointEstimation};
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};

pub const DEFAULT_API_URL: &str = "https://api.fragmetric.xyz/v1";

pub fn user_estimation_url(base_url: &str, wallet: &str) -> String {
    format!("{}/public/fpoint/user/{}", base_url.trim_end_matches('/'), wallet)
}

/// DeFi estimation URL; the pool filter is only added when pools are given
pub fn defi_estimation_url(base_url: &str, wallet: &str, pool_addresses: &[String]) -> String {
    let mut url = format!("{}/public/fpoint/defi/{}", base_url.trim_end_matches('/'), wallet);
    if !pool_addresses.is_empty() {
        url.push_str("?pool_addresses=");
        url.push_str(&pool_addresses.join(","));
    }
    url
}

pub fn wrapped_token_amount_url(base_url: &str, pool_address: &str) -> String {
    format!(
        "{}/public/wrapped-token-amount/{}",
        base_url.trim_end_matches('/'),
        pool_address
    )
}

/// Where snapshot estimations come from
pub trait PointsSource {
    fn user_estimation(&self, wallet: &str) -> Result<Option<UserFPointEstimation>>;

    fn pool_estimations(
        &self,
        wallet: &str,
        pool_addresses: &[String],
    ) -> Result<Option<PoolEstimations>>;
}

impl<S: PointsSource + ?Sized> PointsSource for &S {
    fn user_estimation(&self, wallet: &str) -> Result<Option<UserFPointEstimation>> {
        (**self).user_estimation(wallet)
    }

    fn pool_estimations(
        &self,
        wallet: &str,
        pool_addresses: &[String],
    ) -> Result<Option<PoolEstimations>> {
        (**self).pool_estimations(wallet, pool_addresses)
    }
}

#[derive(Debug, Clone)]
pub struct FragmetricClient {
    http: Client,
    base_url: String,
}

impl FragmetricClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("fpoint-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base_url: base_url.into() })
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Amount of wrapped tokens held by a DeFi pool
    pub fn wrapped_token_amount(&self, pool_address: &str) -> Result<Option<f64>> {
        if pool_address.is_empty() {
            return Ok(None);
        }
        self.get_json(&wrapped_token_amount_url(&self.base_url, pool_address))
            .inspect_err(|e| warn!("wrapped token amount for {pool_address} failed: {e}"))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        debug!("GET {url}");
        let response = self.http.get(url).send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("{url} not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TrackerError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = response.text()?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

impl PointsSource for FragmetricClient {
    fn user_estimation(&self, wallet: &str) -> Result<Option<UserFPointEstimation>> {
        if wallet.is_empty() {
            return Ok(None);
        }
        self.get_json(&user_estimation_url(&self.base_url, wallet))
            .inspect_err(|e| warn!("user estimation for {wallet} failed: {e}"))
    }

    fn pool_estimations(
        &self,
        wallet: &str,
        pool_addresses: &[String],
    ) -> Result<Option<PoolEstimations>> {
        if wallet.is_empty() {
            return Ok(None);
        }
        self.get_json(&defi_estimation_url(&self.base_url, wallet, pool_addresses))
            .inspect_err(|e| warn!("pool estimations for {wallet} failed: {e}"))
    }
}
