pub mod normalizer;
pub mod resampler;

pub use normalizer::{normalize_returns, NormalizedPoint};
pub use resampler::{resample, ReportingInterval};

#[cfg(test)]
mod resampler_tests;
