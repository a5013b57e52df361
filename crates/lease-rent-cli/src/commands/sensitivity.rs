use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lease_rent_core::projection::LeaseTerms;
use lease_rent_core::sensitivity::{self, SensitivityInput, SweepParameter};

use crate::input;

/// Arguments for a one-way sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Lease term to sweep: contract_duration_years, grace_period_years,
    /// rent_increase_interval_years, rent_increase_rate_pct,
    /// capitalization_rate_pct, or total_development_cost
    #[arg(long)]
    pub parameter: String,

    /// Comma-separated values to test (e.g. "5,6,7,8")
    #[arg(long, conflicts_with = "range")]
    pub values: Option<String>,

    /// Sweep range in min:max:step form (e.g. "5:9:0.5")
    #[arg(long)]
    pub range: Option<String>,

    /// Path to JSON or YAML file with the base lease terms
    #[arg(long)]
    pub base: Option<String>,
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base: LeaseTerms = if let Some(ref path) = args.base {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--base file (or piped stdin terms) is required for sensitivity".into());
    };

    let parameter = parse_parameter(&args.parameter)?;

    let values = match (&args.values, &args.range) {
        (Some(list), _) => parse_value_list(list)?,
        (None, Some(range)) => expand_range(range)?,
        (None, None) => return Err("Provide either --values or --range".into()),
    };

    let result = sensitivity::run_sensitivity(&SensitivityInput {
        base,
        parameter,
        values,
    })?;
    Ok(serde_json::to_value(result)?)
}

fn parse_parameter(name: &str) -> Result<SweepParameter, Box<dyn std::error::Error>> {
    serde_json::from_value(Value::String(name.to_string())).map_err(|_| {
        format!(
            "Unknown parameter '{name}'. Available: contract_duration_years, \
             grace_period_years, rent_increase_interval_years, rent_increase_rate_pct, \
             capitalization_rate_pct, total_development_cost"
        )
        .into()
    })
}

fn parse_value_list(list: &str) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    let mut values = Vec::new();
    for part in list.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        values.push(
            trimmed
                .parse()
                .map_err(|_| format!("Invalid sweep value '{trimmed}'"))?,
        );
    }
    if values.is_empty() {
        return Err("--values contained no usable numbers".into());
    }
    Ok(values)
}

/// Expand a min:max:step spec into the inclusive value list.
fn expand_range(spec: &str) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Range must be min:max:step, got '{spec}'").into());
    }
    let min: Decimal = parts[0].parse()?;
    let max: Decimal = parts[1].parse()?;
    let step: Decimal = parts[2].parse()?;

    if step <= Decimal::ZERO {
        return Err("Range step must be positive".into());
    }
    if min > max {
        return Err("Range min must not exceed max".into());
    }

    let mut values = Vec::new();
    let mut current = min;
    while current <= max {
        values.push(current);
        current += step;
    }
    if values.is_empty() {
        values.push(min);
    }
    Ok(values)
}
