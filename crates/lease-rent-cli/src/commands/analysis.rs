use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lease_rent_core::analysis::optimize_rent;
use lease_rent_core::development::calculate_development_costs;
use lease_rent_core::projection::{project_rent_schedule, LeaseTerms};
use lease_rent_core::report::build_report;
use lease_rent_core::types::Currency;

use crate::input;

/// Lease-term flags shared by the analysis subcommands.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TermsFlags {
    /// Contract duration in years
    #[arg(long)]
    pub contract_duration: Option<u32>,

    /// Rent-free years at the start of the contract (default 0)
    #[arg(long)]
    pub grace_period: Option<u32>,

    /// Years between rent escalations after the grace period (default 1)
    #[arg(long)]
    pub increase_interval: Option<u32>,

    /// Escalation percentage at each interval boundary, e.g. 10 for 10% (default 0)
    #[arg(long)]
    pub increase_rate: Option<Decimal>,

    /// Annual discount rate percentage, e.g. 7 for 7%
    #[arg(long)]
    pub cap_rate: Option<Decimal>,

    /// Total upfront development cost in currency units
    #[arg(long)]
    pub development_cost: Option<Decimal>,
}

/// Arguments for the breakeven-rent optimization
#[derive(Args)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub terms: TermsFlags,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a single-rent cash-flow projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Candidate annual rent to project
    #[arg(long)]
    pub annual_rent: Decimal,

    #[command(flatten)]
    pub terms: TermsFlags,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the export report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub terms: TermsFlags,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_optimize(args: OptimizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.input, &args.terms)?;
    let result = optimize_rent(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.input, &args.terms)?;
    // The projector reads total_development_cost as given; derive it here
    // when site parameters were supplied in the input file.
    let terms = with_resolved_cost(terms)?;
    let result = project_rent_schedule(args.annual_rent, &terms);
    Ok(serde_json::to_value(result)?)
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.input, &args.terms)?;
    let report = build_report(&terms)?;
    Ok(serde_json::to_value(report)?)
}

/// Resolve lease terms from an input file, piped stdin, or individual flags,
/// in that order.
fn resolve_terms(
    input: &Option<String>,
    flags: &TermsFlags,
) -> Result<LeaseTerms, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        return input::file::read_document(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    Ok(LeaseTerms {
        contract_duration_years: flags
            .contract_duration
            .ok_or("--contract-duration is required (or provide --input)")?,
        grace_period_years: flags.grace_period.unwrap_or(0),
        rent_increase_interval_years: flags.increase_interval.unwrap_or(1),
        rent_increase_rate_pct: flags.increase_rate.unwrap_or(Decimal::ZERO),
        capitalization_rate_pct: flags
            .cap_rate
            .ok_or("--cap-rate is required (or provide --input)")?,
        total_development_cost: flags
            .development_cost
            .ok_or("--development-cost is required (or provide --input)")?,
        development_input: None,
        currency: Currency::default(),
    })
}

fn with_resolved_cost(mut terms: LeaseTerms) -> Result<LeaseTerms, Box<dyn std::error::Error>> {
    if let Some(ref dev_input) = terms.development_input {
        let costs = calculate_development_costs(dev_input)?;
        terms.total_development_cost = costs.result.total_development_cost;
    }
    Ok(terms)
}
