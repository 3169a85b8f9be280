use rust_decimal::Decimal;
use serde::Deserialize;

use port_analytics_core::{AssetClass, Position};

/// One row of a brokerage activity-export CSV. Column names follow the
/// statement format: Symbol, Description, PositionValue, AssetClass,
/// SubCategory.
#[derive(Debug, Deserialize)]
struct BrokerageRecord {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "PositionValue")]
    position_value: Decimal,
    #[serde(rename = "AssetClass")]
    asset_class: String,
    #[serde(rename = "SubCategory", default)]
    subcategory: String,
}

/// Load portfolio positions from a brokerage CSV export.
pub fn read_portfolio_csv(path: &str) -> Result<Vec<Position>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("Failed to open portfolio '{}': {}", path, e))?;

    let mut positions = Vec::new();
    for record in reader.deserialize() {
        let record: BrokerageRecord =
            record.map_err(|e| format!("Malformed portfolio row in '{}': {}", path, e))?;
        positions.push(Position {
            ticker: record.symbol,
            name: record.description,
            position_value: record.position_value,
            asset_class: if record.asset_class.eq_ignore_ascii_case("ETF") {
                AssetClass::Etf
            } else {
                AssetClass::Stock
            },
            subcategory: record.subcategory,
        });
    }

    if positions.is_empty() {
        return Err(format!("Portfolio '{}' contains no positions", path).into());
    }
    Ok(positions)
}
