pub mod error;
pub mod sectors;
pub mod types;

#[cfg(feature = "decomposition")]
pub mod decomposition;

#[cfg(feature = "returns")]
pub mod returns;

#[cfg(feature = "attribution")]
pub mod attribution;

pub use error::PortAnalyticsError;
pub use types::*;

/// Standard result type for all portfolio-analytics operations
pub type PortAnalyticsResult<T> = Result<T, PortAnalyticsError>;
