//! Shared in-memory fakes for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use stockfolio_market_data::{
    DailyQuote, MarketDataError, MarketDataProvider, SearchResult, SpotQuote,
};

use crate::assets::{AssetMeta, AssetStore};
use crate::errors::{Error, Result};
use crate::transactions::{PortfolioMeta, PortfolioStore, TransactionEvent, TransactionStore};

/// Market data provider backed by preloaded maps.
#[derive(Default)]
pub(crate) struct FakeProvider {
    series: HashMap<String, Vec<DailyQuote>>,
    spots: HashMap<String, SpotQuote>,
    failing: Vec<String>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, points: &[(NaiveDate, Decimal)], currency: &str) -> Self {
        let quotes = points
            .iter()
            .map(|(date, close)| DailyQuote::new(*date, *close, currency))
            .collect();
        self.series.insert(symbol.to_string(), quotes);
        self
    }

    pub fn with_spot(mut self, symbol: &str, price: Decimal, currency: &str) -> Self {
        self.spots.insert(
            symbol.to_string(),
            SpotQuote {
                symbol: symbol.to_string(),
                price,
                currency: currency.to_string(),
            },
        );
        self
    }

    pub fn with_failing_symbol(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_string());
        self
    }
}

#[async_trait]
impl MarketDataProvider for FakeProvider {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn daily_close_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> std::result::Result<Vec<DailyQuote>, MarketDataError> {
        if self.failing.iter().any(|s| s == symbol) {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        let quotes: Vec<DailyQuote> = self
            .series
            .get(symbol)
            .map(|quotes| {
                quotes
                    .iter()
                    .filter(|q| q.date >= start && q.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if quotes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(quotes)
    }

    async fn spot_quote(&self, symbol: &str) -> std::result::Result<SpotQuote, MarketDataError> {
        if self.failing.iter().any(|s| s == symbol) {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        self.spots
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    async fn search(
        &self,
        _query: &str,
    ) -> std::result::Result<Vec<SearchResult>, MarketDataError> {
        Ok(Vec::new())
    }
}

/// Transaction store returning a fixed log per portfolio.
#[derive(Default)]
pub(crate) struct FakeTransactionStore {
    logs: Mutex<HashMap<String, Vec<TransactionEvent>>>,
}

impl FakeTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(self, portfolio_id: &str, transactions: Vec<TransactionEvent>) -> Self {
        self.logs
            .lock()
            .unwrap()
            .insert(portfolio_id.to_string(), transactions);
        self
    }
}

#[async_trait]
impl TransactionStore for FakeTransactionStore {
    async fn list_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<TransactionEvent>> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .get(portfolio_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub(crate) struct FakePortfolioStore {
    portfolios: Mutex<HashMap<String, PortfolioMeta>>,
}

impl FakePortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_portfolio(self, id: &str, name: &str, base_currency: &str) -> Self {
        self.portfolios.lock().unwrap().insert(
            id.to_string(),
            PortfolioMeta {
                id: id.to_string(),
                name: name.to_string(),
                base_currency: base_currency.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl PortfolioStore for FakePortfolioStore {
    async fn get_portfolio(&self, portfolio_id: &str) -> Result<PortfolioMeta> {
        self.portfolios
            .lock()
            .unwrap()
            .get(portfolio_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Portfolio {} not found", portfolio_id)))
    }
}

#[derive(Default)]
pub(crate) struct FakeAssetStore {
    assets: Mutex<HashMap<String, AssetMeta>>,
}

impl FakeAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(self, asset: AssetMeta) -> Self {
        self.assets
            .lock()
            .unwrap()
            .insert(asset.symbol.clone(), asset);
        self
    }
}

#[async_trait]
impl AssetStore for FakeAssetStore {
    async fn get_asset(&self, symbol: &str) -> Result<Option<AssetMeta>> {
        Ok(self.assets.lock().unwrap().get(symbol).cloned())
    }

    async fn get_assets(&self, symbols: &[String]) -> Result<Vec<AssetMeta>> {
        let assets = self.assets.lock().unwrap();
        Ok(symbols
            .iter()
            .filter_map(|s| assets.get(s).cloned())
            .collect())
    }
}
