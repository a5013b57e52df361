use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

#[napi]
pub fn optimize_rent(input_json: String) -> NapiResult<String> {
    let terms: lease_rent_core::projection::LeaseTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lease_rent_core::analysis::optimize_rent(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_schedule(annual_rent: String, terms_json: String) -> NapiResult<String> {
    let rent: rust_decimal::Decimal = annual_rent.parse().map_err(to_napi_error)?;
    let terms: lease_rent_core::projection::LeaseTerms =
        serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let output = lease_rent_core::projection::project_rent_schedule(rent, &terms);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Development costs
// ---------------------------------------------------------------------------

#[napi]
pub fn development_costs(input_json: String) -> NapiResult<String> {
    let input: lease_rent_core::development::DevelopmentCostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lease_rent_core::development::calculate_development_costs(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity & report
// ---------------------------------------------------------------------------

#[napi]
pub fn run_sensitivity(input_json: String) -> NapiResult<String> {
    let input: lease_rent_core::sensitivity::SensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lease_rent_core::sensitivity::run_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_report(terms_json: String) -> NapiResult<String> {
    let terms: lease_rent_core::projection::LeaseTerms =
        serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let report = lease_rent_core::report::build_report(&terms).map_err(to_napi_error)?;
    lease_rent_core::report::to_json_string(&report).map_err(to_napi_error)
}
