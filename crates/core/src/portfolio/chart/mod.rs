pub mod chart_model;
pub mod chart_service;

pub use chart_model::{BenchmarkSeries, ChartPoint, ChartQuery, ChartSeries};
pub use chart_service::ChartService;
