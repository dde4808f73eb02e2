//! Yahoo Finance market data provider.
//!
//! Daily history and search go through the `yahoo_finance_api` connector.
//! Spot quotes try the connector first and fall back to the public chart
//! endpoint, which stays reachable when the quote API is rate limited.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use reqwest::header;
use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{DailyQuote, SearchResult, SpotQuote};
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self {
            connector,
            client: reqwest::Client::new(),
        })
    }

    /// Convert a calendar date to the start-of-day timestamp the Yahoo API expects.
    fn date_to_offset_datetime(date: NaiveDate) -> OffsetDateTime {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        OffsetDateTime::from_unix_timestamp(midnight.and_utc().timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Convert a Yahoo quote bar into our daily close model.
    ///
    /// Prefers the adjusted close when present so splits and dividends do not
    /// show up as spurious returns.
    fn yahoo_quote_to_daily(
        yahoo_quote: &yahoo::Quote,
        currency: &str,
    ) -> Result<DailyQuote, MarketDataError> {
        let date = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .map(|ts| ts.date_naive())
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let raw_close = if yahoo_quote.adjclose > 0.0 {
            yahoo_quote.adjclose
        } else {
            yahoo_quote.close
        };

        let close = Decimal::from_f64_retain(raw_close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!("Failed to convert close price {} to Decimal", raw_close),
            }
        })?;

        Ok(DailyQuote::new(date, close, currency))
    }

    /// Fetch a spot price from the public chart endpoint.
    ///
    /// Used when the connector's latest-quote call fails; the chart meta block
    /// carries the regular market price without requiring authentication.
    async fn fetch_spot_from_chart(&self, symbol: &str) -> Result<SpotQuote, MarketDataError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range=1d&interval=1d",
            encode(symbol)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let data: ChartResponse = response.json().await.map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse chart response: {}", e),
            }
        })?;

        let meta = data
            .chart
            .result
            .into_iter()
            .next()
            .map(|r| r.meta)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let price = meta
            .regular_market_price
            .and_then(Decimal::from_f64_retain)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("No market price in chart meta for {}", symbol),
            })?;

        Ok(SpotQuote {
            symbol: symbol.to_string(),
            price,
            currency: meta
                .currency
                .unwrap_or_else(|| currency_for_symbol(symbol).to_string()),
        })
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn daily_close_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyQuote>, MarketDataError> {
        debug!(
            "Fetching daily closes for {} from {} to {} from Yahoo",
            symbol, start, end
        );

        let start_time = Self::date_to_offset_datetime(start);
        // End bound is inclusive; push it to the next midnight.
        let end_time = Self::date_to_offset_datetime(end.succ_opt().unwrap_or(end));

        let response = self
            .connector
            .get_quote_history(symbol, start_time, end_time)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let currency = currency_for_symbol(symbol);

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let quotes: Vec<DailyQuote> = yahoo_quotes
                    .iter()
                    .filter_map(|q| match Self::yahoo_quote_to_daily(q, currency) {
                        Ok(quote) => Some(quote),
                        Err(e) => {
                            warn!("Skipping quote for {} due to conversion error: {:?}", symbol, e);
                            None
                        }
                    })
                    .collect();

                if quotes.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                Ok(quotes)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical quotes returned for '{}' between {} and {}",
                    symbol, start, end
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn spot_quote(&self, symbol: &str) -> Result<SpotQuote, MarketDataError> {
        debug!("Fetching spot quote for {} from Yahoo", symbol);

        match self.connector.get_latest_quotes(symbol, "1d").await {
            Ok(response) => match response.last_quote() {
                Ok(quote) => {
                    let price = Decimal::from_f64_retain(quote.close).ok_or_else(|| {
                        MarketDataError::ValidationFailed {
                            message: format!("Failed to convert spot price {}", quote.close),
                        }
                    })?;
                    Ok(SpotQuote {
                        symbol: symbol.to_string(),
                        price,
                        currency: currency_for_symbol(symbol).to_string(),
                    })
                }
                Err(e) => {
                    debug!("No last quote for {}: {}, trying chart meta", symbol, e);
                    self.fetch_spot_from_chart(symbol).await
                }
            },
            Err(e) => {
                debug!(
                    "Latest-quote fetch failed for {}: {}, trying chart meta",
                    symbol, e
                );
                self.fetch_spot_from_chart(symbol).await
            }
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        debug!("Searching Yahoo for '{}'", query);

        let result = self
            .connector
            .search_ticker(&encode(query))
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let search_results = result
            .quotes
            .iter()
            .filter(|item| !item.symbol.is_empty())
            .map(|item| {
                let name = if item.long_name.is_empty() {
                    &item.short_name
                } else {
                    &item.long_name
                };
                SearchResult::new(&item.symbol, name, &item.exchange, &item.quote_type)
            })
            .collect();

        Ok(search_results)
    }
}

/// Infer the quote currency from the Yahoo symbol convention.
///
/// Korean listings carry a `.KS`/`.KQ` suffix and the KOSPI/KOSDAQ indices
/// start with `^KS`/`^KQ`; everything else this engine handles quotes in USD.
fn currency_for_symbol(symbol: &str) -> &'static str {
    if symbol.ends_with(".KS")
        || symbol.ends_with(".KQ")
        || symbol.starts_with("^KS")
        || symbol.starts_with("^KQ")
    {
        "KRW"
    } else {
        "USD"
    }
}

// Minimal view of the v8 chart response; only the meta block is consumed.

#[derive(Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Vec<ChartResult>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    regular_market_price: Option<f64>,
}
