pub mod valuation_model;
pub mod valuation_reconstructor;

pub use valuation_model::{ReplayState, ValuationPoint};
pub use valuation_reconstructor::reconstruct_daily_values;
