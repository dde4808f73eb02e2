use async_trait::async_trait;

use crate::errors::Result;

use super::{PortfolioMeta, TransactionEvent};

/// Read-only access to the transaction log, implemented by the storage layer.
///
/// Ordering is not guaranteed; consumers sort by date where it matters.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn list_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<TransactionEvent>>;
}

/// Read-only access to portfolio metadata.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn get_portfolio(&self, portfolio_id: &str) -> Result<PortfolioMeta>;
}
