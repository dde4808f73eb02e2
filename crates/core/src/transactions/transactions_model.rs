//! Transaction log and portfolio metadata models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a recorded trade.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionSide {
    Buy,
    Sell,
}

/// A single recorded trade.
///
/// Immutable once recorded; the engine consumes the log read-only and
/// derives everything else from it per request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEvent {
    pub symbol: String,
    pub side: TransactionSide,
    /// Traded quantity, always positive; the sign comes from `side`.
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Currency the trade settled in
    pub currency: String,
    pub date: NaiveDate,
}

impl TransactionEvent {
    /// Quantity delta applied to the holding: positive for BUY, negative for SELL.
    pub fn signed_quantity(&self) -> Decimal {
        match self.side {
            TransactionSide::Buy => self.quantity,
            TransactionSide::Sell => -self.quantity,
        }
    }
}

/// Portfolio metadata owned by the storage layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMeta {
    pub id: String,
    pub name: String,
    pub base_currency: String,
}
