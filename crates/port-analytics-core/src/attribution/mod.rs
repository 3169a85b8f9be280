pub mod brinson;
pub mod pipeline;
pub mod sector_series;

pub use brinson::{brinson_hood_beebower, AttributionRow, BhbAttribution};
pub use pipeline::{compute_attribution, AttributionPipelineInput, AttributionReport};
pub use sector_series::{build_sector_series, SectorSeries};
