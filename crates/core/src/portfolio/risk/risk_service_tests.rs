use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::test_utils::{FakePortfolioStore, FakeProvider, FakeTransactionStore};
use crate::transactions::{TransactionEvent, TransactionSide};

use super::{RiskReport, RiskService};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn as_of() -> NaiveDate {
    date(2024, 6, 15)
}

fn buy(symbol: &str, qty: Decimal, currency: &str) -> TransactionEvent {
    TransactionEvent {
        symbol: symbol.to_string(),
        side: TransactionSide::Buy,
        quantity: qty,
        unit_price: dec!(100),
        currency: currency.to_string(),
        date: date(2023, 7, 1),
    }
}

fn service(transactions: Vec<TransactionEvent>, provider: FakeProvider) -> RiskService {
    let portfolios = FakePortfolioStore::new().with_portfolio("p1", "Main", "USD");
    let store = FakeTransactionStore::new().with_log("p1", transactions);
    RiskService::new(Arc::new(portfolios), Arc::new(store), Arc::new(provider))
}

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}

#[tokio::test]
async fn test_empty_portfolio_reports_zero_metrics() {
    let svc = service(vec![], FakeProvider::new());
    let report = svc.analyze_as_of("p1", None, as_of()).await.unwrap();

    let RiskReport::Analyzed(analysis) = report else {
        panic!("expected analyzed report");
    };
    assert_eq!(analysis.metrics.volatility, Decimal::ZERO);
    assert_eq!(analysis.metrics.max_drawdown, Decimal::ZERO);
    assert!(analysis.metrics.beta.is_none());
    assert!(analysis.benchmark.is_none());
    assert!(analysis.metrics.correlation_matrix.is_empty());
}

#[tokio::test]
async fn test_insufficient_overlap_is_reported() {
    // Disjoint trading dates leave no common history.
    let provider = FakeProvider::new()
        .with_series("AAPL", &[(date(2024, 1, 2), dec!(100))], "USD")
        .with_series("MSFT", &[(date(2024, 1, 3), dec!(300))], "USD");
    let svc = service(
        vec![buy("AAPL", dec!(1), "USD"), buy("MSFT", dec!(1), "USD")],
        provider,
    );

    let report = svc.analyze_as_of("p1", None, as_of()).await.unwrap();
    assert!(matches!(report, RiskReport::InsufficientHistory { .. }));
}

#[tokio::test]
async fn test_single_holding_metrics() {
    let provider = FakeProvider::new().with_series(
        "AAPL",
        &[
            (date(2024, 1, 2), dec!(100)),
            (date(2024, 1, 3), dec!(110)),
            (date(2024, 1, 4), dec!(99)),
        ],
        "USD",
    );
    let svc = service(vec![buy("AAPL", dec!(10), "USD")], provider);

    let report = svc.analyze_as_of("p1", None, as_of()).await.unwrap();
    let RiskReport::Analyzed(analysis) = report else {
        panic!("expected analyzed report");
    };

    // Returns are +10% and -10%: std √0.02, annualized by √252.
    assert_close(analysis.metrics.volatility, dec!(2.24499), dec!(0.0001));
    // Value index [100, 110, 99]: worst decline is 110 -> 99.
    assert_close(analysis.metrics.max_drawdown, dec!(-0.1), dec!(0.0000001));
    assert_close(analysis.metrics.sharpe_ratio, dec!(-0.018441), dec!(0.0001));
    assert_eq!(
        analysis.metrics.correlation_matrix["AAPL"]["AAPL"],
        Decimal::ONE
    );
    assert!(analysis.metrics.beta.is_none());
}

#[tokio::test]
async fn test_correlation_matrix_is_symmetric_with_unit_diagonal() {
    let provider = FakeProvider::new()
        .with_series(
            "AAPL",
            &[
                (date(2024, 1, 2), dec!(100)),
                (date(2024, 1, 3), dec!(101)),
                (date(2024, 1, 4), dec!(98)),
                (date(2024, 1, 5), dec!(103)),
            ],
            "USD",
        )
        .with_series(
            "MSFT",
            &[
                (date(2024, 1, 2), dec!(300)),
                (date(2024, 1, 3), dec!(306)),
                (date(2024, 1, 4), dec!(297)),
                (date(2024, 1, 5), dec!(300)),
            ],
            "USD",
        );
    let svc = service(
        vec![buy("AAPL", dec!(1), "USD"), buy("MSFT", dec!(1), "USD")],
        provider,
    );

    let report = svc.analyze_as_of("p1", None, as_of()).await.unwrap();
    let RiskReport::Analyzed(analysis) = report else {
        panic!("expected analyzed report");
    };
    let matrix = &analysis.metrics.correlation_matrix;
    assert_eq!(matrix["AAPL"]["AAPL"], Decimal::ONE);
    assert_eq!(matrix["MSFT"]["MSFT"], Decimal::ONE);
    assert_eq!(matrix["AAPL"]["MSFT"], matrix["MSFT"]["AAPL"]);
    assert!(matrix["AAPL"]["MSFT"].abs() <= Decimal::ONE);
}

#[tokio::test]
async fn test_beta_of_benchmark_tracking_portfolio_is_one() {
    // AAPL moves exactly with the index, so beta must come out 1.
    let provider = FakeProvider::new()
        .with_series(
            "AAPL",
            &[
                (date(2024, 1, 2), dec!(100)),
                (date(2024, 1, 3), dec!(110)),
                (date(2024, 1, 4), dec!(99)),
            ],
            "USD",
        )
        .with_series(
            "^GSPC",
            &[
                (date(2024, 1, 2), dec!(200)),
                (date(2024, 1, 3), dec!(220)),
                (date(2024, 1, 4), dec!(198)),
            ],
            "USD",
        );
    let svc = service(vec![buy("AAPL", dec!(5), "USD")], provider);

    let report = svc
        .analyze_as_of("p1", Some("sp500"), as_of())
        .await
        .unwrap();
    let RiskReport::Analyzed(analysis) = report else {
        panic!("expected analyzed report");
    };
    assert_close(analysis.metrics.beta.unwrap(), Decimal::ONE, dec!(0.000001));

    let bench = analysis.benchmark.unwrap();
    assert_eq!(bench.symbol, "^GSPC");
    assert_eq!(bench.name, "S&P 500");
    // Benchmark drawdown runs on its price levels: 220 -> 198.
    assert_close(bench.max_drawdown, dec!(-0.1), dec!(0.0000001));
}

#[tokio::test]
async fn test_failed_symbol_is_excluded_not_fatal() {
    // One dead ticker must not empty the date intersection for the rest.
    let provider = FakeProvider::new()
        .with_series(
            "AAPL",
            &[
                (date(2024, 1, 2), dec!(100)),
                (date(2024, 1, 3), dec!(110)),
                (date(2024, 1, 4), dec!(99)),
            ],
            "USD",
        )
        .with_failing_symbol("BOGUS");
    let svc = service(
        vec![buy("AAPL", dec!(10), "USD"), buy("BOGUS", dec!(1), "USD")],
        provider,
    );

    let report = svc.analyze_as_of("p1", None, as_of()).await.unwrap();
    let RiskReport::Analyzed(analysis) = report else {
        panic!("expected analyzed report");
    };
    // Metrics come from AAPL alone.
    assert_close(analysis.metrics.volatility, dec!(2.24499), dec!(0.0001));
    assert!(analysis.metrics.correlation_matrix.contains_key("AAPL"));
    assert!(!analysis.metrics.correlation_matrix.contains_key("BOGUS"));
    assert!(analysis.warnings.iter().any(|w| w.contains("BOGUS")));
}

#[tokio::test]
async fn test_failed_benchmark_fetch_drops_benchmark_only() {
    let provider = FakeProvider::new()
        .with_series(
            "AAPL",
            &[
                (date(2024, 1, 2), dec!(100)),
                (date(2024, 1, 3), dec!(110)),
                (date(2024, 1, 4), dec!(99)),
            ],
            "USD",
        )
        .with_failing_symbol("^GSPC");
    let svc = service(vec![buy("AAPL", dec!(10), "USD")], provider);

    let report = svc
        .analyze_as_of("p1", Some("sp500"), as_of())
        .await
        .unwrap();
    let RiskReport::Analyzed(analysis) = report else {
        panic!("expected analyzed report");
    };
    assert_close(analysis.metrics.volatility, dec!(2.24499), dec!(0.0001));
    assert!(analysis.metrics.beta.is_none());
    assert!(analysis.benchmark.is_none());
    assert!(analysis.warnings.iter().any(|w| w.contains("^GSPC")));
}

#[tokio::test]
async fn test_all_symbols_failing_is_insufficient_history() {
    let provider = FakeProvider::new()
        .with_failing_symbol("AAPL")
        .with_failing_symbol("MSFT");
    let svc = service(
        vec![buy("AAPL", dec!(1), "USD"), buy("MSFT", dec!(1), "USD")],
        provider,
    );

    let report = svc.analyze_as_of("p1", None, as_of()).await.unwrap();
    assert!(matches!(report, RiskReport::InsufficientHistory { .. }));
}

#[tokio::test]
async fn test_unknown_benchmark_key_degrades_with_warning() {
    let provider = FakeProvider::new().with_series(
        "AAPL",
        &[(date(2024, 1, 2), dec!(100)), (date(2024, 1, 3), dec!(101))],
        "USD",
    );
    let svc = service(vec![buy("AAPL", dec!(1), "USD")], provider);

    let report = svc
        .analyze_as_of("p1", Some("ftse"), as_of())
        .await
        .unwrap();
    let RiskReport::Analyzed(analysis) = report else {
        panic!("expected analyzed report");
    };
    assert!(analysis.metrics.beta.is_none());
    assert!(analysis.benchmark.is_none());
    assert!(analysis.warnings.iter().any(|w| w.contains("ftse")));
}

#[tokio::test]
async fn test_absent_beta_and_benchmark_are_omitted_from_json() {
    let svc = service(vec![], FakeProvider::new());
    let report = svc.analyze_as_of("p1", None, as_of()).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    let metrics = &json["metrics"];
    assert!(metrics.get("beta").is_none());
    assert!(json.get("benchmark").is_none());
}
