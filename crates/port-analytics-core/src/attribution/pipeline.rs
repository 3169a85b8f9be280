use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use crate::decomposition::{aggregate_sectors, assign_sectors, resolve_portfolio};
use crate::error::PortAnalyticsError;
use crate::returns::{aggregate_returns, compute_returns, Frequency, PriceTable};
use crate::types::*;
use crate::PortAnalyticsResult;

use super::brinson::{brinson_hood_beebower, AttributionRow};
use super::sector_series::build_sector_series;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the attribution pipeline needs, fully materialized up front.
///
/// The engine performs no I/O: holdings, sector labels, and prices are
/// immutable reference tables supplied by the caller. The benchmark is a
/// position list like the portfolio, typically one pseudo-position in a
/// benchmark ETF such as SPY.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionPipelineInput {
    pub portfolio: Vec<Position>,
    pub benchmark: Vec<Position>,
    pub etf_holdings: HashMap<String, Vec<EtfConstituent>>,
    pub sector_lookup: HashMap<String, String>,
    pub prices: PriceTable,
    pub frequency: Frequency,
}

/// Sector exposures for both sides plus per-date attribution rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionReport {
    pub portfolio_sectors: Vec<SectorAllocation>,
    pub benchmark_sectors: Vec<SectorAllocation>,
    pub rows: Vec<AttributionRow>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full look-through attribution pipeline: resolve both position
/// lists to stock level, assign sectors, aggregate price returns to the
/// reporting frequency, build sector series for each side, and decompose
/// the active return per period.
pub fn compute_attribution(
    input: &AttributionPipelineInput,
) -> PortAnalyticsResult<ComputationOutput<AttributionReport>> {
    let start = Instant::now();

    if input.prices.is_empty() {
        return Err(PortAnalyticsError::MissingReferenceData {
            source_name: "price table".into(),
        });
    }
    for pos in input.portfolio.iter().chain(input.benchmark.iter()) {
        if pos.asset_class == AssetClass::Etf && !input.etf_holdings.contains_key(&pos.ticker) {
            return Err(PortAnalyticsError::MissingReferenceData {
                source_name: format!("ETF holdings for {}", pos.ticker),
            });
        }
    }

    let mut warnings = Vec::new();

    let portfolio = resolve_portfolio(&input.portfolio, &input.etf_holdings)?;
    let benchmark = resolve_portfolio(&input.benchmark, &input.etf_holdings)?;
    warnings.extend(portfolio.warnings.iter().cloned());
    warnings.extend(
        benchmark
            .warnings
            .iter()
            .map(|w| format!("benchmark: {}", w)),
    );

    let port_assigned = assign_sectors(&portfolio.rows, &input.sector_lookup);
    let bench_assigned = assign_sectors(&benchmark.rows, &input.sector_lookup);

    let period_returns = aggregate_returns(&compute_returns(&input.prices), input.frequency);

    let port_series = build_sector_series(&period_returns, &port_assigned);
    let bench_series = build_sector_series(&period_returns, &bench_assigned);

    let attribution = brinson_hood_beebower(&port_series, &bench_series);
    warnings.extend(attribution.warnings.iter().cloned());

    let report = AttributionReport {
        portfolio_sectors: aggregate_sectors(&portfolio.rows, &input.sector_lookup).rows,
        benchmark_sectors: aggregate_sectors(&benchmark.rows, &input.sector_lookup).rows,
        rows: attribution.rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Brinson-Hood-Beebower sector attribution with ETF look-through",
        &serde_json::json!({
            "frequency": input.frequency,
            "portfolio_positions": input.portfolio.len(),
            "benchmark_positions": input.benchmark.len(),
            "price_dates": input.prices.len(),
        }),
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn stock(ticker: &str, value: Decimal) -> Position {
        Position {
            ticker: ticker.into(),
            name: format!("{} Inc", ticker),
            position_value: value,
            asset_class: AssetClass::Stock,
            subcategory: String::new(),
        }
    }

    fn etf_position(ticker: &str, value: Decimal) -> Position {
        Position {
            ticker: ticker.into(),
            name: format!("{} Fund", ticker),
            position_value: value,
            asset_class: AssetClass::Etf,
            subcategory: "ETF".into(),
        }
    }

    fn prices_for(days: &[(u32, &[(&str, Decimal)])]) -> PriceTable {
        days.iter()
            .map(|(day, quotes)| {
                (
                    d(2025, 1, *day),
                    quotes
                        .iter()
                        .map(|(t, p)| (t.to_string(), *p))
                        .collect::<BTreeMap<_, _>>(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_price_table_rejected() {
        let input = AttributionPipelineInput {
            portfolio: vec![stock("AAA", dec!(1000))],
            benchmark: vec![stock("BBB", dec!(1000))],
            etf_holdings: HashMap::new(),
            sector_lookup: HashMap::new(),
            prices: PriceTable::new(),
            frequency: Frequency::Daily,
        };
        assert!(matches!(
            compute_attribution(&input),
            Err(PortAnalyticsError::MissingReferenceData { .. })
        ));
    }

    #[test]
    fn test_declared_etf_without_holdings_rejected() {
        let input = AttributionPipelineInput {
            portfolio: vec![stock("AAA", dec!(1000))],
            benchmark: vec![etf_position("SPY", dec!(100))],
            etf_holdings: HashMap::new(),
            sector_lookup: HashMap::new(),
            prices: prices_for(&[(2, &[("AAA", dec!(100))])]),
            frequency: Frequency::Daily,
        };
        let err = compute_attribution(&input).unwrap_err();
        assert!(err.to_string().contains("SPY"));
    }

    #[test]
    fn test_single_stock_vs_single_stock() {
        // Portfolio 100% AAA, benchmark 100% BBB, both Technology:
        // allocation is zero every date, selection = R_AAA - R_BBB.
        let input = AttributionPipelineInput {
            portfolio: vec![stock("AAA", dec!(1000))],
            benchmark: vec![stock("BBB", dec!(500))],
            etf_holdings: HashMap::new(),
            sector_lookup: HashMap::from([
                ("AAA".to_string(), "Technology".to_string()),
                ("BBB".to_string(), "Technology".to_string()),
            ]),
            prices: prices_for(&[
                (2, &[("AAA", dec!(100)), ("BBB", dec!(50))]),
                (3, &[("AAA", dec!(110)), ("BBB", dec!(51))]),
                (4, &[("AAA", dec!(99)), ("BBB", dec!(51))]),
            ]),
            frequency: Frequency::Daily,
        };
        let out = compute_attribution(&input).unwrap();
        let report = &out.result;

        assert_eq!(report.portfolio_sectors.len(), 1);
        assert_eq!(report.portfolio_sectors[0].sector, "Information Technology");
        assert_eq!(report.portfolio_sectors[0].port_weight, Decimal::ONE);

        // First date is the undefined seed row; effects are zero there
        assert_eq!(report.rows.len(), 3);
        for row in &report.rows {
            assert_eq!(row.allocation_effect, Decimal::ZERO);
        }
        // Day 2: R_AAA = 0.10, R_BBB = 0.02
        assert_eq!(report.rows[1].selection_effect, dec!(0.08));
        // Day 3: R_AAA = -0.10, R_BBB = 0
        assert_eq!(report.rows[2].selection_effect, dec!(-0.10));
    }

    #[test]
    fn test_etf_benchmark_look_through() {
        let holdings = HashMap::from([(
            "BENCH".to_string(),
            vec![
                EtfConstituent {
                    ticker: "AAA".into(),
                    name: "AAA Inc".into(),
                    weight: dec!(0.6),
                    sector: Some("Technology".into()),
                    cusip: None,
                },
                EtfConstituent {
                    ticker: "BBB".into(),
                    name: "BBB Inc".into(),
                    weight: dec!(0.4),
                    sector: Some("Energy".into()),
                    cusip: None,
                },
            ],
        )]);
        let input = AttributionPipelineInput {
            portfolio: vec![stock("AAA", dec!(1000))],
            benchmark: vec![etf_position("BENCH", dec!(100))],
            etf_holdings: holdings,
            sector_lookup: HashMap::from([
                ("AAA".to_string(), "Technology".to_string()),
                ("BBB".to_string(), "Energy".to_string()),
            ]),
            prices: prices_for(&[
                (2, &[("AAA", dec!(100)), ("BBB", dec!(200))]),
                (3, &[("AAA", dec!(105)), ("BBB", dec!(202))]),
            ]),
            frequency: Frequency::Daily,
        };
        let out = compute_attribution(&input).unwrap();
        let report = &out.result;

        assert_eq!(report.benchmark_sectors.len(), 2);
        let bench_tech = report
            .benchmark_sectors
            .iter()
            .find(|r| r.sector == "Information Technology")
            .unwrap();
        assert_eq!(bench_tech.port_weight, dec!(0.6));

        // Sector sets differ (portfolio has no Energy), so a diagnostic
        // must surface.
        assert!(out.warnings.iter().any(|w| w.contains("sector sets")));

        // Day 2 active return conservation: Rp - Rb
        let row = &report.rows[1];
        assert_eq!(
            row.total_active_return,
            row.portfolio_return - row.benchmark_return
        );
    }

    #[test]
    fn test_unknown_sector_flows_through_not_error() {
        let input = AttributionPipelineInput {
            portfolio: vec![stock("AAA", dec!(1000))],
            benchmark: vec![stock("AAA", dec!(1000))],
            etf_holdings: HashMap::new(),
            sector_lookup: HashMap::new(), // AAA absent from the lookup
            prices: prices_for(&[
                (2, &[("AAA", dec!(100))]),
                (3, &[("AAA", dec!(101))]),
            ]),
            frequency: Frequency::Daily,
        };
        let out = compute_attribution(&input).unwrap();
        let report = &out.result;

        assert_eq!(report.portfolio_sectors[0].sector, "Unknown/Unmapped");
        assert_eq!(report.portfolio_sectors[0].port_weight, Decimal::ONE);
        // Identical sides: all effects zero
        for row in &report.rows {
            assert_eq!(row.total_active_return, Decimal::ZERO);
        }
    }

    #[test]
    fn test_monthly_frequency_collapses_dates() {
        let prices = PriceTable::from([
            (
                d(2025, 1, 2),
                BTreeMap::from([("AAA".to_string(), dec!(100))]),
            ),
            (
                d(2025, 1, 3),
                BTreeMap::from([("AAA".to_string(), dec!(102))]),
            ),
            (
                d(2025, 2, 3),
                BTreeMap::from([("AAA".to_string(), dec!(104))]),
            ),
        ]);
        let input = AttributionPipelineInput {
            portfolio: vec![stock("AAA", dec!(1000))],
            benchmark: vec![stock("AAA", dec!(1000))],
            etf_holdings: HashMap::new(),
            sector_lookup: HashMap::from([("AAA".to_string(), "Energy".to_string())]),
            prices,
            frequency: Frequency::Monthly,
        };
        let out = compute_attribution(&input).unwrap();

        let dates: Vec<NaiveDate> = out.result.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2025, 1, 31), d(2025, 2, 28)]);
    }

    #[test]
    fn test_envelope_carries_methodology_and_warnings() {
        let input = AttributionPipelineInput {
            portfolio: vec![stock("AAA", dec!(1000))],
            benchmark: vec![stock("AAA", dec!(1000))],
            etf_holdings: HashMap::new(),
            sector_lookup: HashMap::new(),
            prices: prices_for(&[(2, &[("AAA", dec!(100))])]),
            frequency: Frequency::Daily,
        };
        let out = compute_attribution(&input).unwrap();
        assert!(out.methodology.contains("Brinson-Hood-Beebower"));
        assert!(out.assumptions.get("frequency").is_some());
    }
}
