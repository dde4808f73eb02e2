//! Wire models returned by market data providers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily closing price.
///
/// Providers return only the dates they actually have quotes for; the
/// series is sparse and gap-filling is the consumer's responsibility.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyQuote {
    /// Calendar date of the close
    pub date: NaiveDate,

    /// Closing price (adjusted close when the provider supplies one)
    pub close: Decimal,

    /// Quote currency
    pub currency: String,
}

impl DailyQuote {
    pub fn new(date: NaiveDate, close: Decimal, currency: impl Into<String>) -> Self {
        Self {
            date,
            close,
            currency: currency.into(),
        }
    }
}

/// A current (regular market) price for a symbol.
///
/// Used for present-day valuation and for FX snapshot crosses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: Decimal,
    pub currency: String,
}

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "AAPL", "005930.KS")
    pub symbol: String,

    /// Short display name (e.g., "Apple Inc")
    pub name: String,

    /// Exchange name (e.g., "NASDAQ", "KSC")
    pub exchange: String,

    /// Asset type as reported by the provider (e.g., "EQUITY", "ETF")
    pub asset_type: String,
}

impl SearchResult {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        asset_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            asset_type: asset_type.into(),
        }
    }
}
