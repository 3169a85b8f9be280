use clap::Args;
use serde_json::Value;
use std::collections::HashMap;

use port_analytics_core::decomposition::{aggregate_sectors, resolve_portfolio};
use port_analytics_core::EtfConstituent;

use crate::input;

/// Arguments for stock-level look-through decomposition
#[derive(Args)]
pub struct DecomposeArgs {
    /// Path to portfolio CSV (brokerage export)
    #[arg(long)]
    pub portfolio: String,

    /// Path to ETF holdings JSON: { etf_ticker: [constituents...] }
    #[arg(long)]
    pub holdings: String,
}

/// Arguments for sector-level exposure
#[derive(Args)]
pub struct SectorsArgs {
    /// Path to portfolio CSV (brokerage export)
    #[arg(long)]
    pub portfolio: String,

    /// Path to ETF holdings JSON: { etf_ticker: [constituents...] }
    #[arg(long)]
    pub holdings: String,

    /// Path to sector lookup JSON: { ticker: raw_sector_label }
    #[arg(long)]
    pub sectors: String,
}

pub fn run_decompose(args: DecomposeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let positions = input::portfolio::read_portfolio_csv(&args.portfolio)?;
    let holdings: HashMap<String, Vec<EtfConstituent>> = input::file::read_json(&args.holdings)?;

    let resolved = resolve_portfolio(&positions, &holdings)?;
    Ok(serde_json::to_value(resolved)?)
}

pub fn run_sectors(args: SectorsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let positions = input::portfolio::read_portfolio_csv(&args.portfolio)?;
    let holdings: HashMap<String, Vec<EtfConstituent>> = input::file::read_json(&args.holdings)?;
    let sector_lookup: HashMap<String, String> = input::file::read_json(&args.sectors)?;

    let resolved = resolve_portfolio(&positions, &holdings)?;
    let exposure = aggregate_sectors(&resolved.rows, &sector_lookup);

    Ok(serde_json::json!({
        "result": exposure,
        "warnings": resolved.warnings,
    }))
}
