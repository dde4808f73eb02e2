//! Stockfolio Market Data Crate
//!
//! Provider-agnostic market data fetching for the analytics engine.
//!
//! The crate exposes three operations through the [`MarketDataProvider`]
//! trait:
//!
//! - daily closing-price series for a symbol and date window
//! - spot quotes (current price, also used for FX crosses like `KRW=X`)
//! - symbol search for instrument discovery
//!
//! Providers never panic and never leak transport errors upward as panics;
//! every failure is a [`MarketDataError`] that callers are free to degrade on.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{DailyQuote, SearchResult, SpotQuote};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
