use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::sector_series::SectorSeries;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One period of Brinson-Hood-Beebower attribution, summed across sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRow {
    pub date: NaiveDate,
    pub allocation_effect: Decimal,
    pub selection_effect: Decimal,
    pub total_active_return: Decimal,
    /// Sum of Wp * Rp across sectors; allows callers to verify
    /// total_active_return == portfolio_return - benchmark_return.
    pub portfolio_return: Decimal,
    /// Sum of Wb * Rb across sectors.
    pub benchmark_return: Decimal,
}

/// Attribution rows plus any alignment diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BhbAttribution {
    pub rows: Vec<AttributionRow>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// BHB decomposition
// ---------------------------------------------------------------------------

/// Two-factor Brinson-Hood-Beebower decomposition of active return.
///
/// Portfolio and benchmark series are outer-joined on (date, sector);
/// a side missing a sector or a date is filled with zero weight and
/// return, since an unheld sector is an economic fact rather than an
/// error. Per sector: allocation = (Wp - Wb) * Rb and
/// selection = Wp * (Rp - Rb); the engine sums both across sectors per
/// date. Misaligned date grids or sector sets are reported as warnings
/// so silent weight leakage stays discoverable.
pub fn brinson_hood_beebower(portfolio: &SectorSeries, benchmark: &SectorSeries) -> BhbAttribution {
    let mut warnings = Vec::new();

    let dates: BTreeSet<NaiveDate> = portfolio
        .weights
        .keys()
        .chain(benchmark.weights.keys())
        .copied()
        .collect();
    if portfolio.weights.len() != dates.len() || benchmark.weights.len() != dates.len() {
        warnings.push(format!(
            "portfolio covers {} dates, benchmark {}; missing dates zero-filled",
            portfolio.weights.len(),
            benchmark.weights.len()
        ));
    }

    let empty: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut sector_mismatch: Option<NaiveDate> = None;
    let mut rows = Vec::with_capacity(dates.len());

    for date in dates {
        let pw = portfolio.weights.get(&date).unwrap_or(&empty);
        let pr = portfolio.returns.get(&date).unwrap_or(&empty);
        let bw = benchmark.weights.get(&date).unwrap_or(&empty);
        let br = benchmark.returns.get(&date).unwrap_or(&empty);

        let sectors: BTreeSet<&str> = pw
            .keys()
            .chain(bw.keys())
            .map(String::as_str)
            .collect();
        if sector_mismatch.is_none() && (pw.len() != sectors.len() || bw.len() != sectors.len()) {
            sector_mismatch = Some(date);
        }

        let mut allocation_effect = Decimal::ZERO;
        let mut selection_effect = Decimal::ZERO;
        let mut portfolio_return = Decimal::ZERO;
        let mut benchmark_return = Decimal::ZERO;

        for sector in sectors {
            let wp = pw.get(sector).copied().unwrap_or_default();
            let rp = pr.get(sector).copied().unwrap_or_default();
            let wb = bw.get(sector).copied().unwrap_or_default();
            let rb = br.get(sector).copied().unwrap_or_default();

            allocation_effect += (wp - wb) * rb;
            selection_effect += wp * (rp - rb);
            portfolio_return += wp * rp;
            benchmark_return += wb * rb;
        }

        rows.push(AttributionRow {
            date,
            allocation_effect,
            selection_effect,
            total_active_return: allocation_effect + selection_effect,
            portfolio_return,
            benchmark_return,
        });
    }

    if let Some(date) = sector_mismatch {
        warnings.push(format!(
            "portfolio and benchmark sector sets differ (first at {}); missing side zero-filled",
            date
        ));
    }

    BhbAttribution { rows, warnings }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
