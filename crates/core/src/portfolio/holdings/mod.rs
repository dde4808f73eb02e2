pub mod holdings_model;
pub mod holdings_replay;
pub mod holdings_valuation_service;

pub use holdings_model::*;
pub use holdings_replay::replay_transactions;
pub use holdings_valuation_service::HoldingsValuationService;
