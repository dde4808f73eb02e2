//! Rebasing of a value series to percentage returns.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PERCENT_PRECISION;
use crate::portfolio::valuation::ValuationPoint;

/// One point of a return-rebased series.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    /// Cumulative return in percent relative to the base point.
    pub return_percent: Decimal,
}

/// Rebase a value series to cumulative percentage returns.
///
/// The first point with a positive value becomes the base (0%). Points
/// before it are emitted as exactly 0% rather than dropped, so the output
/// keeps the input's length and dates. An all-zero series normalizes to
/// all-zero returns. Values are rounded to two decimals.
pub fn normalize_returns(points: &[ValuationPoint]) -> Vec<NormalizedPoint> {
    let base = points.iter().find(|p| p.value > Decimal::ZERO).map(|p| p.value);

    points
        .iter()
        .map(|point| {
            let return_percent = match base {
                Some(base) if point.value > Decimal::ZERO => {
                    ((point.value - base) / base * Decimal::ONE_HUNDRED)
                        .round_dp(PERCENT_PRECISION)
                }
                _ => Decimal::ZERO,
            };
            NormalizedPoint {
                date: point.date,
                return_percent,
            }
        })
        .collect()
}
