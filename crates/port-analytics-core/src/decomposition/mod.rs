pub mod exposure;
pub mod holdings;

pub use exposure::{aggregate_sectors, assign_sectors, SectorExposure};
pub use holdings::{resolve_portfolio, ResolvedPortfolio};
