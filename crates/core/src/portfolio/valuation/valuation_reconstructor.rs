//! Day-by-day portfolio value reconstruction.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::fx::ConversionTable;
use crate::market_data::PriceSeriesSet;
use crate::portfolio::holdings::HoldingsTimeline;
use crate::portfolio::window::DateWindow;

use super::{ReplayState, ValuationPoint};

/// Reconstruct the daily base-currency value series over the window.
///
/// The replay walks every calendar day in order: position deltas for the
/// day are applied first, then fresh closes update the carried prices, then
/// open positions (quantity > 0) are summed at their last known price,
/// converted into the base currency with the snapshot rate. Days without
/// trades or quotes still emit a point, so the output is one point per
/// calendar day with no gaps. A symbol that never sees a price contributes
/// zero throughout.
#[allow(clippy::too_many_arguments)]
pub fn reconstruct_daily_values(
    timeline: &HoldingsTimeline,
    prices: &PriceSeriesSet,
    instrument_currencies: &HashMap<String, String>,
    base_currency: &str,
    conversion: &ConversionTable,
    spot_rate: Decimal,
    window: DateWindow,
) -> Vec<ValuationPoint> {
    let symbols = timeline.symbols();
    if symbols.is_empty() {
        return Vec::new();
    }

    let mut state = ReplayState {
        quantities: timeline.initial_quantities.clone(),
        last_prices: HashMap::new(),
    };

    // Seed carried prices from the last close strictly before the window,
    // so positions opened earlier are valued from day one.
    for symbol in &symbols {
        if let Some(series) = prices.series_for(symbol) {
            if let Some((_, close)) = series.range(..window.start).next_back() {
                state.last_prices.insert(symbol.clone(), *close);
            }
        }
    }

    let mut points = Vec::new();
    for day in window.days() {
        if let Some(deltas) = timeline.daily_deltas.get(&day) {
            for (symbol, delta) in deltas {
                *state
                    .quantities
                    .entry(symbol.clone())
                    .or_insert(Decimal::ZERO) += *delta;
            }
        }

        for symbol in &symbols {
            if let Some(close) = prices.series_for(symbol).and_then(|s| s.get(&day)) {
                state.last_prices.insert(symbol.clone(), *close);
            }
        }

        let mut value = Decimal::ZERO;
        for (symbol, quantity) in &state.quantities {
            if *quantity <= Decimal::ZERO {
                continue;
            }
            let Some(price) = state.last_prices.get(symbol) else {
                continue;
            };
            let currency = instrument_currencies
                .get(symbol)
                .map(String::as_str)
                .unwrap_or(base_currency);
            value += conversion.convert(*quantity * *price, base_currency, currency, spot_rate);
        }

        points.push(ValuationPoint { date: day, value });
    }
    points
}
