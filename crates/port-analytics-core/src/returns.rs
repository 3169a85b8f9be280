use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::error::PortAnalyticsError;
use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Wide price table: one row per date, closing price per ticker.
pub type PriceTable = BTreeMap<NaiveDate, BTreeMap<String, Money>>;

/// Per-period simple returns on the same date grid as the source prices.
///
/// `None` marks a present-but-undefined observation: the first row of the
/// series, or any date where the current or prior price is missing. Rows
/// are kept rather than dropped so every ticker shares one date index.
pub type ReturnTable = BTreeMap<NaiveDate, BTreeMap<String, Option<Rate>>>;

/// Reporting frequency for aggregated returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Monthly,
    Annual,
}

impl FromStr for Frequency {
    type Err = PortAnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "monthly" => Ok(Frequency::Monthly),
            "annual" | "annually" => Ok(Frequency::Annual),
            _ => Err(PortAnalyticsError::InvalidFrequency {
                token: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Period returns
// ---------------------------------------------------------------------------

/// Compute per-period simple returns `p[t]/p[t-1] - 1` from a wide price
/// table. "Previous" means the previous row of the date index, whatever
/// calendar gap separates the two rows. Every output row carries an entry
/// for every ticker seen anywhere in the table; undefined observations
/// are `None`.
pub fn compute_returns(prices: &PriceTable) -> ReturnTable {
    let tickers: BTreeSet<&str> = prices
        .values()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut out = ReturnTable::new();
    let mut prev: Option<&BTreeMap<String, Money>> = None;
    for (date, row) in prices {
        let mut out_row = BTreeMap::new();
        for &ticker in &tickers {
            let ret = match (prev.and_then(|p| p.get(ticker)), row.get(ticker)) {
                (Some(p0), Some(p1)) if !p0.is_zero() => Some(p1 / p0 - Decimal::ONE),
                _ => None,
            };
            out_row.insert(ticker.to_string(), ret);
        }
        out.insert(*date, out_row);
        prev = Some(row);
    }
    out
}

// ---------------------------------------------------------------------------
// Frequency aggregation
// ---------------------------------------------------------------------------

/// Compound per-period returns up to the target reporting frequency.
///
/// Daily is the identity transform. Monthly and annual windows compound
/// `prod(1 + r) - 1` over the defined observations in the window, labelled
/// by the calendar period-end date. Undefined observations are skipped;
/// a window with no defined observation at all stays undefined.
pub fn aggregate_returns(returns: &ReturnTable, frequency: Frequency) -> ReturnTable {
    if frequency == Frequency::Daily {
        return returns.clone();
    }

    let mut grouped: BTreeMap<NaiveDate, Vec<&BTreeMap<String, Option<Rate>>>> = BTreeMap::new();
    for (date, row) in returns {
        let label = match frequency {
            Frequency::Monthly => month_end(*date),
            Frequency::Annual => year_end(*date),
            Frequency::Daily => *date,
        };
        grouped.entry(label).or_default().push(row);
    }

    let tickers: BTreeSet<&str> = returns
        .values()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut out = ReturnTable::new();
    for (label, rows) in grouped {
        let mut out_row = BTreeMap::new();
        for &ticker in &tickers {
            let mut growth = Decimal::ONE;
            let mut defined = false;
            for row in &rows {
                if let Some(Some(r)) = row.get(ticker) {
                    growth *= Decimal::ONE + r;
                    defined = true;
                }
            }
            out_row.insert(
                ticker.to_string(),
                if defined { Some(growth - Decimal::ONE) } else { None },
            );
        }
        out.insert(label, out_row);
    }
    out
}

fn month_end(date: NaiveDate) -> NaiveDate {
    let (y, m) = (date.year(), date.month());
    let first_of_next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

fn year_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
