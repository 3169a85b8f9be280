use clap::Args;
use serde_json::Value;

use port_analytics_core::returns::{aggregate_returns, compute_returns, Frequency, PriceTable};

use crate::input;

/// Arguments for return computation and frequency aggregation
#[derive(Args)]
pub struct ReturnsArgs {
    /// Path to wide price table JSON: { date: { ticker: close } }
    #[arg(long)]
    pub prices: String,

    /// Reporting frequency: daily, monthly, or annual
    #[arg(long, default_value = "monthly")]
    pub frequency: String,
}

pub fn run_returns(args: ReturnsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prices: PriceTable = input::file::read_json(&args.prices)?;
    let frequency: Frequency = args.frequency.parse()?;

    let aggregated = aggregate_returns(&compute_returns(&prices), frequency);
    Ok(serde_json::to_value(aggregated)?)
}
