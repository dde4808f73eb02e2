pub mod risk_model;
pub mod risk_service;
pub mod statistics;

pub use risk_model::{BenchmarkComparison, RiskAnalysis, RiskMetrics, RiskReport};
pub use risk_service::RiskService;

#[cfg(test)]
mod risk_service_tests;
