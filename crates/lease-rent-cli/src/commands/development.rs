use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lease_rent_core::development::{calculate_development_costs, DevelopmentCostInput};

use crate::input;

/// Arguments for the development cost build-up
#[derive(Args)]
pub struct CostsArgs {
    /// Land plot area in square metres
    #[arg(long)]
    pub land_area: Option<Decimal>,

    /// Buildable floor area as a multiple of the land area (FAR)
    #[arg(long)]
    pub building_factor: Option<Decimal>,

    /// Share of the plot covered by buildings, e.g. 60 for 60%
    #[arg(long)]
    pub building_ratio: Option<Decimal>,

    /// Construction cost per square metre of buildable area
    #[arg(long)]
    pub construction_cost: Option<Decimal>,

    /// Landscaping cost per square metre of uncovered area (default 0)
    #[arg(long)]
    pub landscaping_cost: Option<Decimal>,

    /// Infrastructure cost per square metre of land (default 0)
    #[arg(long)]
    pub infrastructure_cost: Option<Decimal>,

    /// Design fees as a percentage of basic costs (default 0)
    #[arg(long)]
    pub design_ratio: Option<Decimal>,

    /// Supervision fees as a percentage of basic costs (default 0)
    #[arg(long)]
    pub supervision_ratio: Option<Decimal>,

    /// Contingency allowance as a percentage of basic costs (default 0)
    #[arg(long)]
    pub contingency_ratio: Option<Decimal>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_costs(args: CostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cost_input: DevelopmentCostInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DevelopmentCostInput {
            land_area_sqm: args
                .land_area
                .ok_or("--land-area is required (or provide --input)")?,
            building_factor: args
                .building_factor
                .ok_or("--building-factor is required (or provide --input)")?,
            building_ratio_pct: args
                .building_ratio
                .ok_or("--building-ratio is required (or provide --input)")?,
            construction_cost_per_sqm: args
                .construction_cost
                .ok_or("--construction-cost is required (or provide --input)")?,
            landscaping_cost_per_sqm: args.landscaping_cost.unwrap_or(Decimal::ZERO),
            infrastructure_cost_per_sqm: args.infrastructure_cost.unwrap_or(Decimal::ZERO),
            design_cost_ratio_pct: args.design_ratio.unwrap_or(Decimal::ZERO),
            supervision_cost_ratio_pct: args.supervision_ratio.unwrap_or(Decimal::ZERO),
            contingency_cost_ratio_pct: args.contingency_ratio.unwrap_or(Decimal::ZERO),
        }
    };

    let result = calculate_development_costs(&cost_input)?;
    Ok(serde_json::to_value(result)?)
}
