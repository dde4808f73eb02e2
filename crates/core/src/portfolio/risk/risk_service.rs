//! Portfolio risk analysis over a trailing one-year window.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Months, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use stockfolio_market_data::MarketDataProvider;

use crate::constants::{benchmark_for_key, RISK_FREE_RATE_ANNUAL, TRADING_DAYS_PER_YEAR};
use crate::errors::Result;
use crate::fx::{ConversionTable, FxService};
use crate::market_data::{PriceSeriesService, PriceSeriesSet};
use crate::transactions::{PortfolioStore, TransactionSide, TransactionStore};

use super::statistics::{
    annualize_daily_std, daily_returns, max_drawdown, mean, pearson_correlation,
    sample_covariance, sample_std_dev,
};
use super::{BenchmarkComparison, RiskAnalysis, RiskMetrics, RiskReport};

pub struct RiskService {
    portfolio_store: Arc<dyn PortfolioStore>,
    transaction_store: Arc<dyn TransactionStore>,
    provider: Arc<dyn MarketDataProvider>,
    conversion: ConversionTable,
}

impl RiskService {
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

    /// Analyze risk over the trailing year ending today.
    pub async fn analyze(&self, portfolio_id: &str, benchmark_key: Option<&str>) -> Result<RiskReport> {
        self.analyze_as_of(portfolio_id, benchmark_key, Utc::now().date_naive())
            .await
    }

    /// Analyze risk over the trailing year ending `as_of`.
    ///
    /// All held symbols (and the benchmark, when one is requested) are
    /// aligned on their common trading dates before any statistic is
    /// computed. A symbol whose series could not be fetched is excluded
    /// with a warning rather than sinking the request; a data-less
    /// benchmark is dropped the same way, leaving `beta` and `benchmark`
    /// absent. Fewer than two common dates across the remaining symbols
    /// yields [`RiskReport::InsufficientHistory`].
    pub async fn analyze_as_of(
        &self,
        portfolio_id: &str,
        benchmark_key: Option<&str>,
        as_of: NaiveDate,
    ) -> Result<RiskReport> {
        let portfolio = self.portfolio_store.get_portfolio(portfolio_id).await?;
        let transactions = self
            .transaction_store
            .list_for_portfolio(portfolio_id)
            .await?;

        let mut quantities: HashMap<String, Decimal> = HashMap::new();
        let mut currencies: HashMap<String, String> = HashMap::new();
        for tx in &transactions {
            *quantities.entry(tx.symbol.clone()).or_insert(Decimal::ZERO) += match tx.side {
                TransactionSide::Buy => tx.quantity,
                TransactionSide::Sell => -tx.quantity,
            };
            currencies.insert(tx.symbol.clone(), tx.currency.clone());
        }
        quantities.retain(|_, qty| *qty > Decimal::ZERO);

        let mut symbols: Vec<String> = quantities.keys().cloned().collect();
        symbols.sort();

        if symbols.is_empty() {
            return Ok(RiskReport::Analyzed(RiskAnalysis {
                metrics: RiskMetrics {
                    volatility: Decimal::ZERO,
                    max_drawdown: Decimal::ZERO,
                    sharpe_ratio: Decimal::ZERO,
                    correlation_matrix: HashMap::new(),
                    beta: None,
                },
                benchmark: None,
                approximate_fx: false,
                warnings: Vec::new(),
            }));
        }

        let benchmark = benchmark_key.and_then(benchmark_for_key);
        let mut warnings = Vec::new();
        if benchmark_key.is_some() && benchmark.is_none() {
            warnings.push(format!(
                "Unknown benchmark '{}'; analyzing without one",
                benchmark_key.unwrap_or_default()
            ));
        }

        let start = as_of
            .checked_sub_months(Months::new(12))
            .unwrap_or(as_of);
        let mut fetch_symbols = symbols.clone();
        if let Some(bench) = &benchmark {
            fetch_symbols.push(bench.symbol.to_string());
        }
        let series_service = PriceSeriesService::new(Arc::clone(&self.provider));
        let prices = series_service.fetch_series(&fetch_symbols, start, as_of).await?;
        warnings.extend(prices.warnings.iter().cloned());

        // A failed fetch degrades to an empty series upstream. Empty series
        // are excluded from the date intersection here so one dead symbol
        // does not empty it for the rest of the portfolio.
        let has_data = |symbol: &str| {
            prices
                .series_for(symbol)
                .map(|series| !series.is_empty())
                .unwrap_or(false)
        };
        let (active, dropped): (Vec<String>, Vec<String>) =
            symbols.into_iter().partition(|s| has_data(s));
        for symbol in &dropped {
            warnings.push(format!(
                "Excluding {} from risk analysis: no price history in the window",
                symbol
            ));
        }
        if active.is_empty() {
            return Ok(RiskReport::InsufficientHistory {
                message: "No held symbol has price history in the trailing year".to_string(),
            });
        }
        let benchmark = benchmark.filter(|bench| {
            if has_data(bench.symbol) {
                true
            } else {
                warnings.push(format!(
                    "Benchmark {} has no price history in the window; analyzing without one",
                    bench.symbol
                ));
                false
            }
        });

        // Every statistic runs over the dates the remaining series share,
        // benchmark included, so returns line up index by index.
        let mut required: Vec<String> = active.clone();
        if let Some(bench) = &benchmark {
            required.push(bench.symbol.to_string());
        }
        let common_dates = common_dates(&prices, &required);
        debug!(
            "{} common trading dates across {} series",
            common_dates.len(),
            required.len()
        );
        if common_dates.len() < 2 {
            return Ok(RiskReport::InsufficientHistory {
                message: format!(
                    "Only {} overlapping trading days in the trailing year; at least 2 are required",
                    common_dates.len()
                ),
            });
        }

        let aligned: HashMap<&str, Vec<Decimal>> = required
            .iter()
            .map(|symbol| {
                let series = prices.series_for(symbol);
                let levels: Vec<Decimal> = common_dates
                    .iter()
                    .filter_map(|d| series.and_then(|s| s.get(d)).copied())
                    .collect();
                (symbol.as_str(), levels)
            })
            .collect();
        let returns: HashMap<&str, Vec<Decimal>> = aligned
            .iter()
            .map(|(symbol, levels)| (*symbol, daily_returns(levels)))
            .collect();

        let fx = FxService::new(Arc::clone(&self.provider));
        let snapshot = fx
            .snapshot_if_needed(&portfolio.base_currency, currencies.values())
            .await?;
        let approximate_fx = snapshot.map(|s| s.approximate).unwrap_or(false);
        let spot_rate = snapshot.map(|s| s.rate).unwrap_or(Decimal::ONE);

        // End-of-window weights: last aligned close times quantity, in the
        // base currency.
        let mut weights: HashMap<&str, Decimal> = HashMap::new();
        let mut total_value = Decimal::ZERO;
        for symbol in &active {
            let Some(last_close) = aligned.get(symbol.as_str()).and_then(|l| l.last()) else {
                continue;
            };
            let currency = currencies
                .get(symbol)
                .map(String::as_str)
                .unwrap_or(portfolio.base_currency.as_str());
            let value = self.conversion.convert(
                quantities[symbol] * *last_close,
                &portfolio.base_currency,
                currency,
                spot_rate,
            );
            weights.insert(symbol.as_str(), value);
            total_value += value;
        }
        if total_value > Decimal::ZERO {
            for value in weights.values_mut() {
                *value /= total_value;
            }
        }

        let steps = common_dates.len() - 1;
        let portfolio_returns: Vec<Decimal> = (0..steps)
            .map(|i| {
                active
                    .iter()
                    .map(|symbol| {
                        let weight = weights.get(symbol.as_str()).copied().unwrap_or(Decimal::ZERO);
                        let r = returns
                            .get(symbol.as_str())
                            .and_then(|r| r.get(i))
                            .copied()
                            .unwrap_or(Decimal::ZERO);
                        weight * r
                    })
                    .sum()
            })
            .collect();

        let volatility = annualize_daily_std(sample_std_dev(&portfolio_returns));
        let drawdown = max_drawdown(&value_index(&portfolio_returns));
        let sharpe = sharpe_ratio(&portfolio_returns);
        let correlation_matrix = correlation_matrix(&active, &returns);

        let (beta, benchmark_comparison) = match &benchmark {
            Some(bench) => {
                let bench_returns = &returns[bench.symbol];
                let bench_levels = &aligned[bench.symbol];
                let bench_variance = sample_covariance(bench_returns, bench_returns);
                let beta = if bench_variance.is_zero() {
                    Decimal::ZERO
                } else {
                    sample_covariance(&portfolio_returns, bench_returns) / bench_variance
                };
                let comparison = BenchmarkComparison {
                    symbol: bench.symbol.to_string(),
                    name: bench.name.to_string(),
                    volatility: annualize_daily_std(sample_std_dev(bench_returns)),
                    // Benchmark drawdown runs on its own price levels.
                    max_drawdown: max_drawdown(bench_levels),
                    sharpe_ratio: sharpe_ratio(bench_returns),
                };
                (Some(beta), Some(comparison))
            }
            None => (None, None),
        };

        Ok(RiskReport::Analyzed(RiskAnalysis {
            metrics: RiskMetrics {
                volatility,
                max_drawdown: drawdown,
                sharpe_ratio: sharpe,
                correlation_matrix,
                beta,
            },
            benchmark: benchmark_comparison,
            approximate_fx,
            warnings,
        }))
    }
}

/// Dates present in every series, ascending.
fn common_dates(prices: &PriceSeriesSet, symbols: &[String]) -> Vec<NaiveDate> {
    let mut iter = symbols.iter();
    let Some(first) = iter.next().and_then(|s| prices.series_for(s)) else {
        return Vec::new();
    };
    let mut dates: Vec<NaiveDate> = first.keys().copied().collect();
    for symbol in iter {
        match prices.series_for(symbol) {
            Some(series) => dates.retain(|d| series.contains_key(d)),
            None => return Vec::new(),
        }
    }
    dates
}

/// Compounded value index starting at 100.
fn value_index(returns: &[Decimal]) -> Vec<Decimal> {
    let mut index = Vec::with_capacity(returns.len() + 1);
    let mut level = Decimal::ONE_HUNDRED;
    index.push(level);
    for r in returns {
        level *= Decimal::ONE + *r;
        index.push(level);
    }
    index
}

/// Annualized Sharpe ratio of excess daily returns; zero when the excess
/// returns have no variance.
fn sharpe_ratio(returns: &[Decimal]) -> Decimal {
    let rf_daily = RISK_FREE_RATE_ANNUAL / Decimal::from(TRADING_DAYS_PER_YEAR);
    let excess: Vec<Decimal> = returns.iter().map(|r| *r - rf_daily).collect();
    let std = sample_std_dev(&excess);
    if std.is_zero() {
        return Decimal::ZERO;
    }
    annualize_daily_std(mean(&excess) / std)
}

/// Symmetric correlation matrix with a unit diagonal.
fn correlation_matrix(
    symbols: &[String],
    returns: &HashMap<&str, Vec<Decimal>>,
) -> HashMap<String, HashMap<String, Decimal>> {
    let mut matrix: HashMap<String, HashMap<String, Decimal>> = symbols
        .iter()
        .map(|s| (s.clone(), HashMap::new()))
        .collect();
    for (i, a) in symbols.iter().enumerate() {
        if let Some(row) = matrix.get_mut(a) {
            row.insert(a.clone(), Decimal::ONE);
        }
        for b in symbols.iter().skip(i + 1) {
            let corr = pearson_correlation(&returns[a.as_str()], &returns[b.as_str()]);
            if let Some(row) = matrix.get_mut(a) {
                row.insert(b.clone(), corr);
            }
            if let Some(row) = matrix.get_mut(b) {
                row.insert(a.clone(), corr);
            }
        }
    }
    matrix
}
