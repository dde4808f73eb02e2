pub mod price_series_service;

pub use price_series_service::{PriceSeries, PriceSeriesService, PriceSeriesSet};
