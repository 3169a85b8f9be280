use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::sectors;
use crate::types::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Sector-level roll-up of a stock allocation table, sorted by sector name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorExposure {
    pub rows: Vec<SectorAllocation>,
    pub total_allocation: Money,
}

// ---------------------------------------------------------------------------
// Sector aggregation
// ---------------------------------------------------------------------------

/// Roll stock allocations up to canonical GICS sectors.
///
/// `sector_lookup` maps tickers to raw provider sector labels; a ticker
/// missing from it, or carrying an unrecognized label, lands in the
/// Unknown/Unmapped bucket rather than being dropped or raising. Weights
/// are recomputed as each sector's share of the total allocation.
pub fn aggregate_sectors(
    stocks: &[StockAllocation],
    sector_lookup: &HashMap<String, String>,
) -> SectorExposure {
    let mut by_sector: BTreeMap<&str, Money> = BTreeMap::new();
    for row in stocks {
        let raw = sector_lookup.get(&row.ticker).map(String::as_str);
        let sector = sectors::map_to_gics(raw.unwrap_or(""));
        *by_sector.entry(sector).or_default() += row.allocation;
    }

    let total_allocation: Money = by_sector.values().copied().sum();
    let rows = by_sector
        .into_iter()
        .map(|(sector, allocation)| SectorAllocation {
            sector: sector.to_string(),
            allocation,
            port_weight: if total_allocation.is_zero() {
                Money::ZERO
            } else {
                allocation / total_allocation
            },
        })
        .collect();

    SectorExposure {
        rows,
        total_allocation,
    }
}

/// Pair each stock with its canonical sector, keeping the portfolio-wide
/// weight. This is the stock-level table the sector time-series builder
/// consumes; weights sum to 1 across the whole table, not per sector.
pub fn assign_sectors(
    stocks: &[StockAllocation],
    sector_lookup: &HashMap<String, String>,
) -> Vec<StockSectorWeight> {
    stocks
        .iter()
        .map(|row| {
            let raw = sector_lookup.get(&row.ticker).map(String::as_str);
            StockSectorWeight {
                ticker: row.ticker.clone(),
                sector: sectors::map_to_gics(raw.unwrap_or("")).to_string(),
                weight: row.port_weight,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
