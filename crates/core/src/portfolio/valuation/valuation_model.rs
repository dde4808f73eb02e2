use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of the reconstructed portfolio value series.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationPoint {
    pub date: NaiveDate,
    /// Total portfolio value in the base currency.
    pub value: Decimal,
}

/// Mutable state carried through the day-by-day replay.
///
/// `last_prices` carries the most recent known close per symbol forward
/// across non-trading days; `quantities` is the position after applying
/// every delta up to and including the current day.
#[derive(Clone, Debug, Default)]
pub struct ReplayState {
    pub quantities: HashMap<String, Decimal>,
    pub last_prices: HashMap<String, Decimal>,
}
