pub mod allocation;
pub mod chart;
pub mod holdings;
pub mod risk;
pub mod series;
pub mod valuation;
pub mod window;

pub use window::{ChartRange, DateWindow, ResolvedWindow};
