use async_trait::async_trait;

use crate::errors::Result;

use super::AssetMeta;

/// Read-only access to asset metadata, implemented by the storage layer.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Fetch metadata for a single symbol.
    async fn get_asset(&self, symbol: &str) -> Result<Option<AssetMeta>>;

    /// Fetch metadata for many symbols; unknown symbols are simply absent
    /// from the result.
    async fn get_assets(&self, symbols: &[String]) -> Result<Vec<AssetMeta>>;
}
