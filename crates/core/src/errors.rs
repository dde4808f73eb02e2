//! Core error types for the analytics engine.
//!
//! Storage-specific errors are converted to these types by the surrounding
//! application; the engine itself only knows about the store traits.

use thiserror::Error;

use stockfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics engine.
///
/// Per-symbol market data failures are absorbed inside the services and never
/// surface here; this enum covers the structural failures only.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Store operation failed: {0}")]
    Store(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
