mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::attribution::AttributionArgs;
use commands::decomposition::{DecomposeArgs, SectorsArgs};
use commands::returns::ReturnsArgs;

/// Portfolio look-through decomposition and performance attribution
#[derive(Parser)]
#[command(
    name = "porta",
    version,
    about = "Portfolio look-through decomposition and Brinson attribution",
    long_about = "Resolves a mixed ETF/stock portfolio into stock-level and \
                  sector-level exposure and decomposes active return versus a \
                  benchmark into allocation and selection effects, with decimal \
                  precision. All inputs are local files; no network access."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a portfolio into stock-level allocations (ETF look-through)
    Decompose(DecomposeArgs),
    /// Roll a portfolio up to GICS sector exposure
    Sectors(SectorsArgs),
    /// Compute period returns from prices and aggregate to a frequency
    Returns(ReturnsArgs),
    /// Run full Brinson-Hood-Beebower attribution against a benchmark
    Attribution(AttributionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Decompose(args) => commands::decomposition::run_decompose(args),
        Commands::Sectors(args) => commands::decomposition::run_sectors(args),
        Commands::Returns(args) => commands::returns::run_returns(args),
        Commands::Attribution(args) => commands::attribution::run_attribution(args),
        Commands::Version => {
            println!("porta {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
