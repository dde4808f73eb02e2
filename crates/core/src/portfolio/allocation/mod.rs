pub mod sector_attribution;

pub use sector_attribution::{attribute_sectors, SectorExposure};
