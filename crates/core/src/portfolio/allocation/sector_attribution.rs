//! Sector attribution over valued positions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::constants::{PERCENT_PRECISION, UNKNOWN_SECTOR};

/// One position's contribution to sector exposure.
///
/// `sector_weights` splits a multi-sector instrument (an ETF) across
/// sectors; when empty, the whole value lands on `sector`, defaulting to
/// the unknown bucket.
#[derive(Clone, Debug)]
pub struct SectorExposure {
    /// Market value in the portfolio base currency.
    pub market_value: Decimal,
    pub sector: Option<String>,
    pub sector_weights: BTreeMap<String, Decimal>,
}

/// Aggregate exposures into sector percentages of total value.
///
/// Percentages are rounded to two decimals and keyed by sector name in
/// lexicographic order. An empty or zero-value input yields an empty map.
pub fn attribute_sectors(exposures: &[SectorExposure]) -> BTreeMap<String, Decimal> {
    let total: Decimal = exposures.iter().map(|e| e.market_value).sum();
    if total <= Decimal::ZERO {
        return BTreeMap::new();
    }

    let mut by_sector: BTreeMap<String, Decimal> = BTreeMap::new();
    for exposure in exposures {
        if exposure.sector_weights.is_empty() {
            let sector = exposure
                .sector
                .clone()
                .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());
            *by_sector.entry(sector).or_insert(Decimal::ZERO) += exposure.market_value;
        } else {
            for (sector, weight) in &exposure.sector_weights {
                *by_sector.entry(sector.clone()).or_insert(Decimal::ZERO) +=
                    exposure.market_value * weight;
            }
        }
    }

    by_sector
        .into_iter()
        .map(|(sector, value)| {
            (
                sector,
                (value / total * Decimal::ONE_HUNDRED).round_dp(PERCENT_PRECISION),
            )
        })
        .collect()
}
