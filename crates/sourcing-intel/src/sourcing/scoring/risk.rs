//! Sourcing risk (0-100, higher is worse).
//!
//! Risk points run opposite to the quality-oriented scores and only meet them in the
//! recommendation tiers.

use serde::{Deserialize, Serialize};

use super::super::domain::Cooperative;
use super::primitives::{band_score, clamp, threshold_step, BandTable, ThresholdTable};
use super::effective_quality_score;

pub const FINANCIAL_RISK_TABLE: ThresholdTable = ThresholdTable::below(
    &[(100_000.0, 25.0), (300_000.0, 15.0), (500_000.0, 8.0)],
    2.0,
);

pub const QUALITY_RISK_TABLE: ThresholdTable =
    ThresholdTable::below(&[(60.0, 20.0), (75.0, 12.0), (85.0, 6.0)], 2.0);

pub const EXPERIENCE_RISK_TABLE: ThresholdTable =
    ThresholdTable::below(&[(2.0, 15.0), (5.0, 8.0)], 0.0);

pub const CUSTOMS_RISK_TABLE: ThresholdTable =
    ThresholdTable::above(&[(3.0, 10.0), (0.0, 5.0)], 0.0);

pub const ALTITUDE_RISK_BANDS: BandTable =
    BandTable::new(&[(1_000.0, 2_000.0, 2.0), (800.0, 2_200.0, 6.0)], 12.0);

pub const RESPONSE_RISK_TABLE: ThresholdTable =
    ThresholdTable::above(&[(72.0, 8.0), (48.0, 4.0)], 0.0);

pub const MISSED_MEETING_RISK_TABLE: ThresholdTable =
    ThresholdTable::above(&[(2.0, 7.0), (0.0, 3.0)], 0.0);

/// Assumed response time when none has been measured.
const UNMEASURED_RESPONSE_HOURS: f64 = super::communication::UNMEASURED_RESPONSE_HOURS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub financial_risk: f64,
    pub quality_risk: f64,
    pub delivery_risk: f64,
    pub geographic_risk: f64,
    pub communication_risk: f64,
    /// Human-readable justification; never feeds back into the numbers.
    pub risk_factors: Vec<String>,
}

fn step_score(value: f64, table: &ThresholdTable) -> (f64, Option<usize>) {
    match threshold_step(value, table) {
        Some(index) => (table.steps[index].1, Some(index)),
        None => (table.baseline, None),
    }
}

pub fn calculate_sourcing_risk(cooperative: &Cooperative) -> RiskAssessment {
    let financial = &cooperative.financial_data;
    let export = &cooperative.export_readiness;
    let metrics = &cooperative.communication_metrics;
    let mut risk_factors = Vec::new();

    let annual_revenue = financial.annual_revenue_usd.unwrap_or(0.0);
    let (financial_risk, revenue_step) = step_score(annual_revenue, &FINANCIAL_RISK_TABLE);
    match revenue_step {
        Some(0) => risk_factors.push("Low annual revenue (<$100k)".to_string()),
        Some(1) => risk_factors.push("Moderate annual revenue ($100k-$300k)".to_string()),
        _ => {}
    }

    let quality_score = effective_quality_score(cooperative);
    let (quality_risk, quality_step) = step_score(quality_score, &QUALITY_RISK_TABLE);
    match quality_step {
        Some(0) => risk_factors.push("Low quality score (<60)".to_string()),
        Some(1) => risk_factors.push("Moderate quality score (60-75)".to_string()),
        _ => {}
    }

    let export_years = export.export_experience_years.unwrap_or(0.0);
    let (experience_risk, experience_step) = step_score(export_years, &EXPERIENCE_RISK_TABLE);
    if experience_step == Some(0) {
        risk_factors.push("Limited export experience (<2 years)".to_string());
    }

    let customs_issues = export.customs_clearance_issues_count.unwrap_or(0);
    let (customs_risk, customs_step) = step_score(f64::from(customs_issues), &CUSTOMS_RISK_TABLE);
    if customs_step == Some(0) {
        risk_factors.push(format!("Multiple customs issues ({customs_issues})"));
    }
    let delivery_risk = experience_risk + customs_risk;

    let altitude = cooperative.altitude_m.unwrap_or(0.0);
    let geographic_risk = band_score(altitude, &ALTITUDE_RISK_BANDS);
    if geographic_risk == ALTITUDE_RISK_BANDS.outside {
        risk_factors.push("Extreme altitude (logistics challenges)".to_string());
    }

    let response_hours = metrics
        .avg_email_response_time_hours
        .unwrap_or(UNMEASURED_RESPONSE_HOURS);
    let (response_risk, response_step) = step_score(response_hours, &RESPONSE_RISK_TABLE);
    if response_step == Some(0) {
        risk_factors.push("Slow response time (>72h)".to_string());
    }

    let missed_meetings = metrics.missed_meetings_count.unwrap_or(0);
    let (meeting_risk, meeting_step) =
        step_score(f64::from(missed_meetings), &MISSED_MEETING_RISK_TABLE);
    if meeting_step == Some(0) {
        risk_factors.push(format!("Multiple missed meetings ({missed_meetings})"));
    }
    let communication_risk = response_risk + meeting_risk;

    let total =
        financial_risk + quality_risk + delivery_risk + geographic_risk + communication_risk;

    RiskAssessment {
        risk_score: clamp(total, 0.0, 100.0),
        financial_risk,
        quality_risk,
        delivery_risk,
        geographic_risk,
        communication_risk,
        risk_factors,
    }
}
