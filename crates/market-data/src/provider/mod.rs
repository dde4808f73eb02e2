//! Market data provider trait definitions.

pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{DailyQuote, SearchResult, SpotQuote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// All methods return `MarketDataError` on failure; none of them may
/// panic or abort the surrounding request.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the daily closing-price series for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Provider symbol (e.g., "AAPL", "^GSPC", "005930.KS")
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (inclusive)
    ///
    /// # Returns
    ///
    /// Quotes ordered by date ascending, one per trading day the provider
    /// has data for. Weekends and holidays are simply absent.
    async fn daily_close_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyQuote>, MarketDataError>;

    /// Fetch the current market price for a symbol.
    ///
    /// Also used for FX crosses such as `KRW=X` (USD/KRW).
    async fn spot_quote(&self, symbol: &str) -> Result<SpotQuote, MarketDataError>;

    /// Search for symbols matching the query.
    ///
    /// Default implementation reports the operation as unsupported.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::ProviderError {
            provider: self.id().to_string(),
            message: "search not supported".to_string(),
        })
    }
}
