//! FX snapshot acquisition.
//!
//! One spot rate is fetched per request and reused for every conversion in
//! that request. Historical series are valued with the same snapshot rate;
//! responses carry `approximate` so callers know when a hard-coded fallback
//! rate was used instead of a live quote.

use std::sync::Arc;

use log::{debug, warn};
use rust_decimal::Decimal;
use stockfolio_market_data::MarketDataProvider;

use crate::constants::{DEFAULT_USD_KRW_RATE, USD_KRW_SYMBOL};
use crate::errors::Result;

/// The USD/KRW rate applied to a request, with its provenance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FxSnapshot {
    /// Units of KRW per USD.
    pub rate: Decimal,
    /// True when the live quote was unavailable and the fallback rate is in use.
    pub approximate: bool,
}

impl FxSnapshot {
    pub fn fallback() -> Self {
        Self {
            rate: DEFAULT_USD_KRW_RATE,
            approximate: true,
        }
    }
}

/// Fetches the USD/KRW spot once per request.
pub struct FxService {
    provider: Arc<dyn MarketDataProvider>,
}

impl FxService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Current USD/KRW snapshot.
    ///
    /// Provider failures and non-positive quotes degrade to the fallback
    /// rate; this call never fails the surrounding valuation.
    pub async fn usd_krw_snapshot(&self) -> FxSnapshot {
        match self.provider.spot_quote(USD_KRW_SYMBOL).await {
            Ok(quote) if quote.price > Decimal::ZERO => {
                debug!("USD/KRW spot {}", quote.price);
                FxSnapshot {
                    rate: quote.price,
                    approximate: false,
                }
            }
            Ok(quote) => {
                warn!(
                    "Non-positive USD/KRW spot {}; falling back to default rate",
                    quote.price
                );
                FxSnapshot::fallback()
            }
            Err(e) => {
                warn!("Failed to fetch USD/KRW spot: {}; falling back to default rate", e);
                FxSnapshot::fallback()
            }
        }
    }

    /// Snapshot only when any instrument currency differs from the base;
    /// otherwise skips the network round trip.
    pub async fn snapshot_if_needed(
        &self,
        base_currency: &str,
        instrument_currencies: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Option<FxSnapshot>> {
        let needed = instrument_currencies
            .into_iter()
            .any(|c| c.as_ref() != base_currency);
        if !needed {
            return Ok(None);
        }
        Ok(Some(self.usd_krw_snapshot().await))
    }
}
