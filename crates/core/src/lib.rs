//! Stockfolio Core - Portfolio reconstruction and risk analytics.
//!
//! This crate contains the analytics engine: replaying transaction logs into
//! holdings timelines, reconstructing daily valuation series against
//! carried-forward prices, resampling and normalizing those series for
//! charting, and deriving risk statistics (volatility, drawdown, Sharpe,
//! correlation, beta) from aligned daily returns.
//!
//! It is storage-agnostic: portfolios, transactions, and asset metadata are
//! read through traits implemented by the surrounding application.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod market_data;
pub mod portfolio;
pub mod transactions;

// Re-export common types from the portfolio module
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

#[cfg(test)]
pub(crate) mod test_utils;
