//! Shared constants for the analytics engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// sqrt(252), used when the exact Decimal square root is unavailable.
pub const SQRT_TRADING_DAYS_APPROX: Decimal = dec!(15.874507866);

/// Annual risk-free rate applied in Sharpe ratio calculations.
pub const RISK_FREE_RATE_ANNUAL: Decimal = dec!(0.0414);

/// Fallback USD/KRW rate applied when the FX spot quote cannot be fetched.
/// Results computed with it carry an `approximate_fx` flag.
pub const DEFAULT_USD_KRW_RATE: Decimal = dec!(1350);

/// Yahoo symbol for the USD/KRW cross.
pub const USD_KRW_SYMBOL: &str = "KRW=X";

/// Decimal places for percentage values in API-facing results.
pub const PERCENT_PRECISION: u32 = 2;

/// Sector bucket for instruments with no sector information.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Metadata for a supported benchmark index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchmarkMeta {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Benchmark indices selectable for risk comparison, keyed by API name.
pub fn benchmark_for_key(key: &str) -> Option<BenchmarkMeta> {
    match key {
        "sp500" => Some(BenchmarkMeta {
            symbol: "^GSPC",
            name: "S&P 500",
        }),
        "dowjones" => Some(BenchmarkMeta {
            symbol: "^DJI",
            name: "Dow Jones Industrial Average",
        }),
        "nasdaq" => Some(BenchmarkMeta {
            symbol: "^IXIC",
            name: "Nasdaq Composite",
        }),
        "kospi" => Some(BenchmarkMeta {
            symbol: "^KS11",
            name: "KOSPI",
        }),
        "kosdaq" => Some(BenchmarkMeta {
            symbol: "^KQ11",
            name: "KOSDAQ",
        }),
        _ => None,
    }
}
