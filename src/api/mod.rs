//! Points API wire types and REST client

mod client;
mod types;

pub use client::{
    defi_estimation_url, user_estimation_url, wrapped_token_amount_url, FragmetricClient,
    PointsSource, DEFAULT_API_URL,
};
pub use types::{DeFiPoolFPointEstimation, PoolEstimations, UserFPointEstimation};

#[cfg(test)]
pub(crate) use types::fixtures;
