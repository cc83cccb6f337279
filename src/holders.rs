//! Holder counts for a collection mintlist
//!
//! A mintlist snapshot is a JSON array of assets, each naming its current
//! owner under `ownership.owner`. [`aggregate`] turns it into one row per
//! owner with the number of assets held.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// One asset from a mintlist snapshot; other fields are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub ownership: Ownership,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ownership {
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holder {
    pub address: String,
    /// Number of assets owned
    pub amount: u64,
}

pub fn assets_from_json_str(json: &str) -> Result<Vec<Asset>> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_assets(path: &Path) -> Result<Vec<Asset>> {
    assets_from_json_str(&std::fs::read_to_string(path)?)
}

/// Count assets per owner, largest holders first.
///
/// Owners holding the same number of assets keep the order in which they
/// first appear in `assets`.
pub fn aggregate(assets: &[Asset]) -> Vec<Holder> {
    let mut holders: Vec<Holder> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for asset in assets {
        let owner = asset.ownership.owner.as_str();
        match index.get(owner) {
            Some(&i) => holders[i].amount += 1,
            None => {
                index.insert(owner, holders.len());
                holders.push(Holder { address: owner.to_string(), amount: 1 });
            }
        }
    }

    // stable: ties stay in first-seen order
    holders.sort_by(|a, b| b.amount.cmp(&a.amount));
    holders
}
