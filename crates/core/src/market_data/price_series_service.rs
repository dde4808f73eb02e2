//! Batched historical price retrieval.
//!
//! All symbols for a request are fetched concurrently. A symbol whose fetch
//! fails degrades to an empty series and a warning on the result set; one
//! bad ticker never sinks the whole valuation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use stockfolio_market_data::MarketDataProvider;

use crate::errors::Result;

/// Date-ordered close prices for one symbol.
pub type PriceSeries = BTreeMap<NaiveDate, Decimal>;

/// Per-symbol price series plus the warnings accumulated while fetching them.
#[derive(Debug, Default)]
pub struct PriceSeriesSet {
    pub series: HashMap<String, PriceSeries>,
    pub warnings: Vec<String>,
}

impl PriceSeriesSet {
    pub fn series_for(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }
}

/// Fetches daily close series for a set of symbols in one concurrent pass.
pub struct PriceSeriesService {
    provider: Arc<dyn MarketDataProvider>,
}

impl PriceSeriesService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch `[start, end]` close series for every symbol.
    ///
    /// Each symbol always appears in the result; failed fetches map to an
    /// empty series with a warning describing the failure.
    pub async fn fetch_series(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeriesSet> {
        debug!(
            "Fetching {} price series from {} to {}",
            symbols.len(),
            start,
            end
        );

        let fetches = symbols.iter().map(|symbol| {
            let provider = Arc::clone(&self.provider);
            let symbol = symbol.clone();
            async move {
                let result = provider.daily_close_series(&symbol, start, end).await;
                (symbol, result)
            }
        });

        let mut set = PriceSeriesSet::default();
        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(quotes) => {
                    let series: PriceSeries =
                        quotes.into_iter().map(|q| (q.date, q.close)).collect();
                    set.series.insert(symbol, series);
                }
                Err(e) => {
                    warn!("Price series fetch failed for {}: {}", symbol, e);
                    set.warnings
                        .push(format!("No price data for {}: {}", symbol, e));
                    set.series.insert(symbol, PriceSeries::new());
                }
            }
        }
        Ok(set)
    }
}
