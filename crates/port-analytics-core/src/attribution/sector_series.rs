use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::returns::ReturnTable;
use crate::types::StockSectorWeight;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-date, per-sector values keyed date-first for joining on a date grid.
pub type SectorSeriesMap = BTreeMap<NaiveDate, BTreeMap<String, Decimal>>;

/// Sector weights and weighted sector returns on one date grid.
///
/// Returns are weighted contributions using each stock's portfolio-wide
/// weight, so weights sum to 1 across sectors per date and the weighted
/// sector return is the sector's contribution to the portfolio return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorSeries {
    pub weights: SectorSeriesMap,
    pub returns: SectorSeriesMap,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Join per-period stock returns with sector assignments to build the two
/// series the attribution engine consumes.
///
/// For every date on the return grid:
/// `weights[sector] = sum of assigned stock weights` (constant across
/// dates) and `returns[sector] = sum of weight * return` over the stocks
/// whose return is defined that date. A return-table ticker with no
/// assignment is excluded from both sums, which can leave the weight
/// total below 1; callers see that through the weight series itself.
pub fn build_sector_series(
    returns: &ReturnTable,
    assignments: &[StockSectorWeight],
) -> SectorSeries {
    let mut weights = SectorSeriesMap::new();
    let mut sector_returns = SectorSeriesMap::new();

    for (date, row) in returns {
        let w = weights.entry(*date).or_default();
        let r = sector_returns.entry(*date).or_default();
        for a in assignments {
            *w.entry(a.sector.clone()).or_default() += a.weight;
            let entry = r.entry(a.sector.clone()).or_default();
            if let Some(Some(ret)) = row.get(&a.ticker) {
                *entry += a.weight * ret;
            }
        }
    }

    SectorSeries {
        weights,
        returns: sector_returns,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
