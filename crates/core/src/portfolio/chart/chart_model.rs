use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::series::ReportingInterval;
use crate::portfolio::window::ChartRange;

/// Parameters of a chart request.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    /// Named lookback range; ignored when `start_date` is set.
    pub range: Option<ChartRange>,
    /// Explicit window start, overriding `range`.
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub interval: ReportingInterval,
    /// Rebase the series to percentage returns.
    #[serde(default)]
    pub normalized: bool,
}

/// One output point. `return_percent` is present only on normalized charts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_percent: Option<Decimal>,
}

/// Reconstructed portfolio value chart.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub portfolio_id: String,
    pub base_currency: String,
    pub interval: ReportingInterval,
    pub normalized: bool,
    /// True when conversions used the fallback FX rate.
    pub approximate_fx: bool,
    /// True when the requested window was invalid and the trailing-year
    /// default was substituted.
    pub window_fallback: bool,
    pub warnings: Vec<String>,
    pub points: Vec<ChartPoint>,
}

/// Benchmark index series shaped like a portfolio chart for overlay.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSeries {
    pub symbol: String,
    pub name: String,
    pub interval: ReportingInterval,
    pub normalized: bool,
    pub points: Vec<ChartPoint>,
}
