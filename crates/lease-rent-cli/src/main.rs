mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{OptimizeArgs, ProjectArgs, ReportArgs};
use commands::development::CostsArgs;
use commands::sensitivity::SensitivityArgs;

/// Ground-lease rent optimization
#[derive(Parser)]
#[command(
    name = "lro",
    version,
    about = "Ground-lease rent optimization and cash-flow analysis",
    long_about = "A CLI for analysing build-and-lease developments with decimal precision. \
                  Finds the highest annual rent that keeps the project NPV non-negative, \
                  projects year-by-year cash-flow schedules, itemises development costs, \
                  and runs one-way sensitivity sweeps."
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
    /// Find the highest annual rent with a non-negative NPV
    Optimize(OptimizeArgs),
    /// Project the cash-flow schedule for a candidate annual rent
    Project(ProjectArgs),
    /// Itemise total development cost from site parameters
    Costs(CostsArgs),
    /// Re-run the optimization across a sweep of one lease term
    Sensitivity(SensitivityArgs),
    /// Build the timestamped export report (inputs, analysis, schedule)
    Report(ReportArgs),
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
        Commands::Optimize(args) => commands::analysis::run_optimize(args),
        Commands::Project(args) => commands::analysis::run_project(args),
        Commands::Costs(args) => commands::development::run_costs(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Report(args) => commands::analysis::run_report(args),
        Commands::Version => {
            println!("lro {}", env!("CARGO_PKG_VERSION"));
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
