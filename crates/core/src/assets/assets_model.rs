//! Asset metadata consumed read-only by the analytics engine.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Descriptive metadata for a tradable instrument.
///
/// `sector_weights` is the decomposition for multi-sector instruments (ETFs):
/// an ordered mapping of sector name to weight in `[0, 1]`, summing to at
/// most 1. Single-sector instruments leave it empty and rely on `sector`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    pub symbol: String,
    pub name: String,
    /// e.g. "EQUITY", "ETF"
    pub asset_type: String,
    /// Trading currency of the instrument
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sector_weights: BTreeMap<String, Decimal>,
}

impl AssetMeta {
    /// True when the instrument carries a multi-sector decomposition.
    pub fn is_multi_sector(&self) -> bool {
        !self.sector_weights.is_empty()
    }
}
