use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{optimize_rent, LeaseAnalysisOutput};
use crate::projection::LeaseTerms;
use crate::types::ComputationOutput;
use crate::LeaseRentResult;

/// Self-contained export document: the echoed inputs plus the full analysis,
/// stamped with its generation time. The consumer chooses the wire format;
/// `to_json_string` covers the common case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseReport {
    pub generated_at: DateTime<Utc>,
    pub inputs: LeaseTerms,
    pub analysis: ComputationOutput<LeaseAnalysisOutput>,
}

/// Run the full optimization and package it for export.
pub fn build_report(terms: &LeaseTerms) -> LeaseRentResult<LeaseReport> {
    Ok(LeaseReport {
        generated_at: Utc::now(),
        inputs: terms.clone(),
        analysis: optimize_rent(terms)?,
    })
}

/// Serialize a report as pretty-printed JSON.
pub fn to_json_string(report: &LeaseReport) -> LeaseRentResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
