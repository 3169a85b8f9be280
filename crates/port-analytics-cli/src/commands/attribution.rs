use clap::Args;
use serde_json::Value;

use port_analytics_core::attribution::{compute_attribution, AttributionPipelineInput};

use crate::input;

/// Arguments for full Brinson-Hood-Beebower attribution
#[derive(Args)]
pub struct AttributionArgs {
    /// Path to JSON input file (positions, holdings, sector lookup, prices)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_attribution(args: AttributionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pipeline_input: AttributionPipelineInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for attribution".into());
    };
    let result = compute_attribution(&pipeline_input)?;
    Ok(serde_json::to_value(result)?)
}
