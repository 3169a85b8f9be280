use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Returns expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Portfolio weights expressed as fractions of total allocation (0..1).
pub type Weight = Decimal;

/// Asset class of a portfolio position as reported by the brokerage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Stock,
    Etf,
}

/// One holding in the raw portfolio, direct stock or ETF wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub name: String,
    pub position_value: Money,
    pub asset_class: AssetClass,
    #[serde(default)]
    pub subcategory: String,
}

/// One constituent of an ETF, as reported in its holdings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtfConstituent {
    pub ticker: String,
    pub name: String,
    /// Fraction of the ETF's value in this constituent (0..1). Weights
    /// across an ETF need not sum to 1; residual cash and derivatives
    /// commonly leave a gap.
    pub weight: Weight,
    /// Raw sector label from the data provider, if reported.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cusip: Option<String>,
}

/// Dollar exposure to one stock after ETF look-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAllocation {
    pub ticker: String,
    pub name: String,
    pub allocation: Money,
    pub port_weight: Weight,
}

/// Dollar exposure to one GICS sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAllocation {
    pub sector: String,
    pub allocation: Money,
    pub port_weight: Weight,
}

/// A stock's sector assignment together with its portfolio-wide weight.
/// The weight is the stock's share of the whole portfolio, not its share
/// within the sector; sector weights therefore sum to 1 across sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSectorWeight {
    pub ticker: String,
    pub sector: String,
    pub weight: Weight,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
