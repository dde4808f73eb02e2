pub mod conversion;
pub mod fx_service;

pub use conversion::{ConversionTable, CurrencyFactor};
pub use fx_service::{FxService, FxSnapshot};
