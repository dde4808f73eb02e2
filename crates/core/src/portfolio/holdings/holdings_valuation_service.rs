//! Current-holdings valuation.
//!
//! Replays the full transaction log into present positions with an
//! average-cost basis, prices them with live spot quotes, and converts the
//! result into the portfolio base currency.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use stockfolio_market_data::MarketDataProvider;

use crate::assets::AssetStore;
use crate::errors::Result;
use crate::fx::{ConversionTable, FxService};
use crate::portfolio::allocation::{attribute_sectors, SectorExposure};
use crate::transactions::{PortfolioStore, TransactionSide, TransactionStore};

use super::{HoldingValuation, PortfolioSummary};

#[derive(Debug, Default)]
struct Position {
    quantity: Decimal,
    cost_basis: Decimal,
    currency: String,
}

impl Position {
    fn average_cost(&self) -> Decimal {
        if self.quantity.is_zero() {
            Decimal::ZERO
        } else {
            self.cost_basis / self.quantity
        }
    }
}

pub struct HoldingsValuationService {
    portfolio_store: Arc<dyn PortfolioStore>,
    transaction_store: Arc<dyn TransactionStore>,
    asset_store: Arc<dyn AssetStore>,
    provider: Arc<dyn MarketDataProvider>,
    conversion: ConversionTable,
}

impl HoldingsValuationService {
    pub fn new(
        portfolio_store: Arc<dyn PortfolioStore>,
        transaction_store: Arc<dyn TransactionStore>,
        asset_store: Arc<dyn AssetStore>,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            portfolio_store,
            transaction_store,
            asset_store,
            provider,
            conversion: ConversionTable::with_default_pairs(),
        }
    }

    /// Value the portfolio's current positions.
    pub async fn summarize(&self, portfolio_id: &str) -> Result<PortfolioSummary> {
        let portfolio = self.portfolio_store.get_portfolio(portfolio_id).await?;
        let transactions = self
            .transaction_store
            .list_for_portfolio(portfolio_id)
            .await?;
        debug!(
            "Valuing {} with {} transactions",
            portfolio_id,
            transactions.len()
        );

        let positions = self.replay_positions(&transactions);
        let open: Vec<(&String, &Position)> = positions
            .iter()
            .filter(|(_, p)| p.quantity > Decimal::ZERO)
            .collect();

        let mut warnings = Vec::new();
        if open.is_empty() {
            return Ok(PortfolioSummary {
                portfolio_id: portfolio.id,
                base_currency: portfolio.base_currency,
                total_value: Decimal::ZERO,
                total_cost_basis: Decimal::ZERO,
                total_gain_loss: Decimal::ZERO,
                holdings: Vec::new(),
                sector_allocation: Default::default(),
                approximate_fx: false,
                warnings,
            });
        }

        let symbols: Vec<String> = open.iter().map(|(s, _)| (*s).clone()).collect();
        let assets = self.asset_store.get_assets(&symbols).await?;
        let asset_by_symbol: HashMap<&str, _> =
            assets.iter().map(|a| (a.symbol.as_str(), a)).collect();

        let quotes = self.fetch_spot_quotes(&symbols).await;

        let fx = FxService::new(Arc::clone(&self.provider));
        let currencies: Vec<&str> = open.iter().map(|(_, p)| p.currency.as_str()).collect();
        let snapshot = fx
            .snapshot_if_needed(&portfolio.base_currency, currencies)
            .await?;
        let approximate_fx = snapshot.map(|s| s.approximate).unwrap_or(false);
        let spot_rate = snapshot.map(|s| s.rate).unwrap_or(Decimal::ONE);

        let mut holdings = Vec::with_capacity(open.len());
        let mut exposures = Vec::with_capacity(open.len());
        for (symbol, position) in open {
            let asset = asset_by_symbol.get(symbol.as_str());
            let average_cost = position.average_cost();

            // A dead quote falls back to the average cost so the position
            // still shows up with a sane value.
            let current_price = match quotes.get(symbol.as_str()) {
                Some(price) => *price,
                None => {
                    warnings.push(format!(
                        "No live quote for {}; valued at average cost",
                        symbol
                    ));
                    average_cost
                }
            };

            let market_value = self.conversion.convert(
                position.quantity * current_price,
                &portfolio.base_currency,
                &position.currency,
                spot_rate,
            );
            let cost_basis = self.conversion.convert(
                position.cost_basis,
                &portfolio.base_currency,
                &position.currency,
                spot_rate,
            );
            let gain_loss = market_value - cost_basis;
            let gain_loss_percent = if cost_basis.is_zero() {
                Decimal::ZERO
            } else {
                (gain_loss / cost_basis * Decimal::ONE_HUNDRED).round_dp(2)
            };

            exposures.push(SectorExposure {
                market_value,
                sector: asset.and_then(|a| a.sector.clone()),
                sector_weights: asset
                    .map(|a| a.sector_weights.clone())
                    .unwrap_or_default(),
            });
            holdings.push(HoldingValuation {
                symbol: symbol.clone(),
                name: asset
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| symbol.clone()),
                quantity: position.quantity,
                average_cost,
                current_price,
                currency: position.currency.clone(),
                market_value,
                cost_basis,
                gain_loss,
                gain_loss_percent,
                sector: asset.and_then(|a| a.sector.clone()),
            });
        }

        holdings.sort_by(|a, b| b.market_value.cmp(&a.market_value));
        let total_value: Decimal = holdings.iter().map(|h| h.market_value).sum();
        let total_cost_basis: Decimal = holdings.iter().map(|h| h.cost_basis).sum();
        let sector_allocation = attribute_sectors(&exposures);

        Ok(PortfolioSummary {
            portfolio_id: portfolio.id,
            base_currency: portfolio.base_currency,
            total_value,
            total_cost_basis,
            total_gain_loss: total_value - total_cost_basis,
            holdings,
            sector_allocation,
            approximate_fx,
            warnings,
        })
    }

    /// Average-cost replay of the full log. Sells remove quantity at the
    /// running average cost; a position sold to zero resets its basis.
    fn replay_positions(
        &self,
        transactions: &[crate::transactions::TransactionEvent],
    ) -> HashMap<String, Position> {
        let mut sorted: Vec<_> = transactions.iter().collect();
        sorted.sort_by_key(|t| t.date);

        let mut positions: HashMap<String, Position> = HashMap::new();
        for tx in sorted {
            let position = positions.entry(tx.symbol.clone()).or_default();
            position.currency = tx.currency.clone();
            match tx.side {
                TransactionSide::Buy => {
                    position.cost_basis += tx.quantity * tx.unit_price;
                    position.quantity += tx.quantity;
                }
                TransactionSide::Sell => {
                    let average = position.average_cost();
                    position.cost_basis -= tx.quantity * average;
                    position.quantity -= tx.quantity;
                    if position.quantity <= Decimal::ZERO {
                        position.cost_basis = Decimal::ZERO;
                    }
                }
            }
        }
        positions
    }

    async fn fetch_spot_quotes(&self, symbols: &[String]) -> HashMap<String, Decimal> {
        let fetches = symbols.iter().map(|symbol| {
            let provider = Arc::clone(&self.provider);
            let symbol = symbol.clone();
            async move {
                let result = provider.spot_quote(&symbol).await;
                (symbol, result)
            }
        });

        let mut quotes = HashMap::new();
        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(quote) if quote.price > Decimal::ZERO => {
                    quotes.insert(symbol, quote.price);
                }
                Ok(_) => warn!("Non-positive spot quote for {}", symbol),
                Err(e) => warn!("Spot quote fetch failed for {}: {}", symbol, e),
            }
        }
        quotes
    }
}
