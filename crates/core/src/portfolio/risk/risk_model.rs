use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Core risk metrics of the portfolio over the analysis window.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Annualized volatility of daily portfolio returns.
    pub volatility: Decimal,
    /// Maximum drawdown over the compounded value index, non-positive.
    pub max_drawdown: Decimal,
    /// Annualized Sharpe ratio of excess returns.
    pub sharpe_ratio: Decimal,
    /// Symmetric pairwise return correlations between held symbols.
    pub correlation_matrix: HashMap<String, HashMap<String, Decimal>>,
    /// Portfolio beta versus the benchmark; absent when no benchmark was
    /// requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<Decimal>,
}

/// Risk metrics of the benchmark itself, for side-by-side display.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub symbol: String,
    pub name: String,
    pub volatility: Decimal,
    pub max_drawdown: Decimal,
    pub sharpe_ratio: Decimal,
}

/// Full risk analysis for one portfolio.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub metrics: RiskMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkComparison>,
    pub approximate_fx: bool,
    pub warnings: Vec<String>,
}

/// Outcome of a risk request. A window with too little overlapping history
/// is reported as such instead of producing meaningless numbers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RiskReport {
    Analyzed(RiskAnalysis),
    InsufficientHistory { message: String },
}
