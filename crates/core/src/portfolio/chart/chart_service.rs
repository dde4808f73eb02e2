//! Portfolio chart orchestration.
//!
//! A chart request runs the full reconstruction pipeline: resolve the
//! window, replay the transaction log into a holdings timeline, fetch the
//! price series, rebuild the daily value series, then resample and
//! optionally rebase to returns.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use stockfolio_market_data::MarketDataProvider;

use crate::constants::benchmark_for_key;
use crate::errors::{Error, Result};
use crate::fx::{ConversionTable, FxService};
use crate::market_data::PriceSeriesService;
use crate::portfolio::holdings::replay_transactions;
use crate::portfolio::series::{normalize_returns, resample};
use crate::portfolio::valuation::{reconstruct_daily_values, ValuationPoint};
use crate::portfolio::window::resolve_window;
use crate::transactions::{PortfolioStore, TransactionStore};

use super::{BenchmarkSeries, ChartPoint, ChartQuery, ChartSeries};

/// Calendar days fetched before the window start so carried prices can be
/// seeded from the prior close.
const PRICE_SEED_LOOKBACK_DAYS: i64 = 7;

pub struct ChartService {
    portfolio_store: Arc<dyn PortfolioStore>,
    transaction_store: Arc<dyn TransactionStore>,
    provider: Arc<dyn MarketDataProvider>,
    conversion: ConversionTable,
}

impl ChartService {
    pub fn new(
        portfolio_store: Arc<dyn PortfolioStore>,
        transaction_store: Arc<dyn TransactionStore>,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            portfolio_store,
            transaction_store,
            provider,
            conversion: ConversionTable::with_default_pairs(),
        }
    }

    /// Build the value chart with today as the window end.
    pub async fn chart(&self, portfolio_id: &str, query: ChartQuery) -> Result<ChartSeries> {
        self.chart_as_of(portfolio_id, query, Utc::now().date_naive())
            .await
    }

    /// Build the value chart for a window ending at `as_of`.
    pub async fn chart_as_of(
        &self,
        portfolio_id: &str,
        query: ChartQuery,
        as_of: NaiveDate,
    ) -> Result<ChartSeries> {
        let portfolio = self.portfolio_store.get_portfolio(portfolio_id).await?;
        let transactions = self
            .transaction_store
            .list_for_portfolio(portfolio_id)
            .await?;
        let earliest = transactions.iter().map(|t| t.date).min();

        let resolved = resolve_window(query.range, query.start_date, earliest, as_of);
        let window = resolved.window;
        debug!(
            "Charting {} over {}..={} ({:?})",
            portfolio_id, window.start, window.end, query.interval
        );

        let mut warnings: Vec<String> = resolved_window_warning(&resolved).into_iter().collect();

        let timeline = replay_transactions(&transactions, window);
        let symbols = timeline.symbols();
        if symbols.is_empty() {
            return Ok(ChartSeries {
                portfolio_id: portfolio.id,
                base_currency: portfolio.base_currency,
                interval: query.interval,
                normalized: query.normalized,
                approximate_fx: false,
                window_fallback: resolved.fallback_applied,
                warnings,
                points: Vec::new(),
            });
        }

        let fetch_start = window.start - Duration::days(PRICE_SEED_LOOKBACK_DAYS);
        let series_service = PriceSeriesService::new(Arc::clone(&self.provider));
        let prices = series_service
            .fetch_series(&symbols, fetch_start, window.end)
            .await?;
        warnings.extend(prices.warnings.iter().cloned());

        let currencies: HashMap<String, String> = transactions
            .iter()
            .map(|t| (t.symbol.clone(), t.currency.clone()))
            .collect();
        let fx = FxService::new(Arc::clone(&self.provider));
        let snapshot = fx
            .snapshot_if_needed(&portfolio.base_currency, currencies.values())
            .await?;
        let approximate_fx = snapshot.map(|s| s.approximate).unwrap_or(false);
        let spot_rate = snapshot.map(|s| s.rate).unwrap_or(Decimal::ONE);

        let daily = reconstruct_daily_values(
            &timeline,
            &prices,
            &currencies,
            &portfolio.base_currency,
            &self.conversion,
            spot_rate,
            window,
        );
        let resampled = resample(&daily, query.interval, window.start);
        let points = to_chart_points(&resampled, query.normalized);

        Ok(ChartSeries {
            portfolio_id: portfolio.id,
            base_currency: portfolio.base_currency,
            interval: query.interval,
            normalized: query.normalized,
            approximate_fx,
            window_fallback: resolved.fallback_applied,
            warnings,
            points,
        })
    }

    /// Build a benchmark index series over the same kind of window, for
    /// overlaying on a portfolio chart.
    pub async fn benchmark_chart(
        &self,
        benchmark_key: &str,
        query: ChartQuery,
    ) -> Result<BenchmarkSeries> {
        self.benchmark_chart_as_of(benchmark_key, query, Utc::now().date_naive())
            .await
    }

    pub async fn benchmark_chart_as_of(
        &self,
        benchmark_key: &str,
        query: ChartQuery,
        as_of: NaiveDate,
    ) -> Result<BenchmarkSeries> {
        let bench = benchmark_for_key(benchmark_key)
            .ok_or_else(|| Error::Validation(format!("Unknown benchmark '{}'", benchmark_key)))?;

        let resolved = resolve_window(query.range, query.start_date, None, as_of);
        let window = resolved.window;

        let quotes = self
            .provider
            .daily_close_series(bench.symbol, window.start, window.end)
            .await?;
        let daily: Vec<ValuationPoint> = quotes
            .into_iter()
            .map(|q| ValuationPoint {
                date: q.date,
                value: q.close,
            })
            .collect();
        let resampled = resample(&daily, query.interval, window.start);
        let points = to_chart_points(&resampled, query.normalized);

        Ok(BenchmarkSeries {
            symbol: bench.symbol.to_string(),
            name: bench.name.to_string(),
            interval: query.interval,
            normalized: query.normalized,
            points,
        })
    }
}

fn resolved_window_warning(resolved: &crate::portfolio::window::ResolvedWindow) -> Option<String> {
    resolved.fallback_applied.then(|| {
        format!(
            "Requested window was invalid; charted {} to {} instead",
            resolved.window.start, resolved.window.end
        )
    })
}

fn to_chart_points(points: &[ValuationPoint], normalized: bool) -> Vec<ChartPoint> {
    if normalized {
        let returns = normalize_returns(points);
        points
            .iter()
            .zip(returns)
            .map(|(point, normalized)| ChartPoint {
                date: point.date,
                value: point.value,
                return_percent: Some(normalized.return_percent),
            })
            .collect()
    } else {
        points
            .iter()
            .map(|point| ChartPoint {
                date: point.date,
                value: point.value,
                return_percent: None,
            })
            .collect()
    }
}
