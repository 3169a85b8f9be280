use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::PortAnalyticsError;
use crate::types::*;
use crate::PortAnalyticsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Flat stock-level allocation table produced by ETF look-through.
///
/// Tickers are unique; exposure to the same stock through several ETFs
/// (or an ETF plus a direct position) is summed into one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPortfolio {
    pub rows: Vec<StockAllocation>,
    pub total_allocation: Money,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Look-through resolution
// ---------------------------------------------------------------------------

/// Resolve a mixed ETF/stock portfolio into stock-level dollar allocations.
///
/// A position whose ticker appears as a key in `etf_holdings` is treated
/// as an ETF and expanded into `position_value * constituent_weight` rows;
/// every other position passes through unchanged. Constituent weights are
/// not renormalized: an ETF whose holdings sum below 1 (residual cash,
/// derivatives) under-allocates, which is a fact of the source data.
///
/// Rows are combined by ticker. When the same ticker arrives under two
/// different names the first-seen name is kept and a diagnostic warning
/// is recorded rather than fragmenting the exposure into two rows.
pub fn resolve_portfolio(
    positions: &[Position],
    etf_holdings: &HashMap<String, Vec<EtfConstituent>>,
) -> PortAnalyticsResult<ResolvedPortfolio> {
    if positions.is_empty() {
        return Err(PortAnalyticsError::EmptyPortfolio(
            "position list is empty".into(),
        ));
    }

    let mut warnings = Vec::new();
    let mut emitted: Vec<(String, String, Money)> = Vec::new();

    for pos in positions {
        match etf_holdings.get(&pos.ticker) {
            Some(constituents) if constituents.is_empty() => {
                warnings.push(format!(
                    "ETF {} has an empty holdings table; position of {} contributes nothing",
                    pos.ticker, pos.position_value
                ));
            }
            Some(constituents) => {
                let weight_sum: Decimal = constituents.iter().map(|c| c.weight).sum();
                if weight_sum > Decimal::ONE {
                    warnings.push(format!(
                        "ETF {} constituent weights sum to {} (> 1)",
                        pos.ticker, weight_sum
                    ));
                }
                for c in constituents {
                    if c.weight < Decimal::ZERO {
                        return Err(PortAnalyticsError::InvalidInput {
                            field: format!("etf_holdings[{}]", pos.ticker),
                            reason: format!(
                                "negative constituent weight {} for {}",
                                c.weight, c.ticker
                            ),
                        });
                    }
                    emitted.push((
                        c.ticker.clone(),
                        c.name.clone(),
                        pos.position_value * c.weight,
                    ));
                }
            }
            None => {
                emitted.push((pos.ticker.clone(), pos.name.clone(), pos.position_value));
            }
        }
    }

    // Combine by ticker, preserving first-seen order and first-seen name.
    let mut rows: Vec<StockAllocation> = Vec::new();
    let mut by_ticker: HashMap<String, usize> = HashMap::new();
    for (ticker, name, allocation) in emitted {
        match by_ticker.get(&ticker) {
            Some(&i) => {
                if rows[i].name != name {
                    warnings.push(format!(
                        "ticker {} seen as both '{}' and '{}'; keeping the first",
                        ticker, rows[i].name, name
                    ));
                }
                rows[i].allocation += allocation;
            }
            None => {
                by_ticker.insert(ticker.clone(), rows.len());
                rows.push(StockAllocation {
                    ticker,
                    name,
                    allocation,
                    port_weight: Decimal::ZERO,
                });
            }
        }
    }

    let total_allocation: Money = rows.iter().map(|r| r.allocation).sum();
    if total_allocation.is_zero() {
        return Err(PortAnalyticsError::EmptyPortfolio(
            "total allocation is zero".into(),
        ));
    }

    for row in &mut rows {
        row.port_weight = row.allocation / total_allocation;
    }

    Ok(ResolvedPortfolio {
        rows,
        total_allocation,
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
