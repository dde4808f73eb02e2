use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-symbol position quantities over a window.
///
/// `initial_quantities` holds positions as of the day before the window
/// start; `daily_deltas` holds the net in-window quantity change per date.
/// Replaying the deltas over the initial state yields the position on any
/// day of the window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HoldingsTimeline {
    pub initial_quantities: HashMap<String, Decimal>,
    pub daily_deltas: BTreeMap<NaiveDate, HashMap<String, Decimal>>,
}

impl HoldingsTimeline {
    /// Every symbol the timeline touches, deduplicated.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self
            .initial_quantities
            .keys()
            .chain(self.daily_deltas.values().flat_map(|m| m.keys()))
            .cloned()
            .collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }

    pub fn is_empty(&self) -> bool {
        self.initial_quantities.is_empty() && self.daily_deltas.is_empty()
    }
}

/// One valued position in the current-holdings view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub symbol: String,
    pub name: String,
    pub quantity: Decimal,
    /// Average cost per unit in the instrument currency.
    pub average_cost: Decimal,
    /// Latest price per unit in the instrument currency.
    pub current_price: Decimal,
    pub currency: String,
    /// Position value converted into the portfolio base currency.
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

/// Current-holdings snapshot for one portfolio.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub portfolio_id: String,
    pub base_currency: String,
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_gain_loss: Decimal,
    pub holdings: Vec<HoldingValuation>,
    /// Sector name to percentage of total value, ordered by sector name.
    pub sector_allocation: BTreeMap<String, Decimal>,
    pub approximate_fx: bool,
    pub warnings: Vec<String>,
}
