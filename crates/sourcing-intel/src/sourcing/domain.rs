use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::scoring::Recommendation;

/// Identifier wrapper for cooperatives.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CooperativeId(pub u64);

impl fmt::Display for CooperativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The sourcing-side entity under analysis.
///
/// Every nested attribute group may be missing, `null` or malformed in stored records; all of
/// these deserialize to the group's empty default so the assessors never see a hole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooperative {
    pub id: CooperativeId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub altitude_m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub certifications: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quality_score: Option<f64>,
    #[serde(default, deserialize_with = "group_or_default")]
    pub operational_data: OperationalData,
    #[serde(default, deserialize_with = "group_or_default")]
    pub export_readiness: ExportReadinessData,
    #[serde(default, deserialize_with = "group_or_default")]
    pub financial_data: FinancialData,
    #[serde(default, deserialize_with = "group_or_default")]
    pub communication_metrics: CommunicationMetrics,
    #[serde(default, deserialize_with = "group_or_default")]
    pub digital_footprint: DigitalFootprint,
    #[serde(default, deserialize_with = "lenient_scores")]
    pub sourcing_scores: Option<SourcingScores>,
}

impl Cooperative {
    pub fn new(id: CooperativeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationalData {
    #[serde(deserialize_with = "lenient_count")]
    pub farmer_count: Option<u32>,
    #[serde(deserialize_with = "lenient_number")]
    pub storage_capacity_kg: Option<f64>,
    #[serde(deserialize_with = "lenient_flag")]
    pub has_wet_mill: Option<bool>,
    #[serde(deserialize_with = "lenient_flag")]
    pub has_dry_mill: Option<bool>,
}

/// Raw export preparedness facts, as collected. Not the computed readiness check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportReadinessData {
    #[serde(deserialize_with = "lenient_text")]
    pub export_license_number: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub export_license_expiry: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub senasa_registered: Option<bool>,
    #[serde(deserialize_with = "lenient_count")]
    pub customs_clearance_issues_count: Option<u32>,
    #[serde(deserialize_with = "lenient_flag")]
    pub has_document_coordinator: Option<bool>,
    #[serde(deserialize_with = "lenient_number")]
    pub export_experience_years: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub containers_exported_lifetime: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialData {
    #[serde(deserialize_with = "lenient_number")]
    pub annual_revenue_usd: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub export_volume_kg_last_year: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub avg_price_achieved_usd_per_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunicationMetrics {
    #[serde(deserialize_with = "lenient_number")]
    pub avg_email_response_time_hours: Option<f64>,
    #[serde(deserialize_with = "lenient_languages")]
    pub languages_spoken: Vec<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub whatsapp_business: Option<bool>,
    #[serde(deserialize_with = "lenient_flag")]
    pub provides_photos_regularly: Option<bool>,
    #[serde(deserialize_with = "lenient_flag")]
    pub provides_cupping_scores: Option<bool>,
    #[serde(deserialize_with = "lenient_count")]
    pub missed_meetings_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalFootprint {
    #[serde(deserialize_with = "lenient_text")]
    pub facebook_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub instagram_url: Option<String>,
}

/// Coffee-growing region; looked up by exact name from a cooperative's `region` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_group")]
    pub elevation_range: Option<ElevationRange>,
    #[serde(default, deserialize_with = "lenient_group")]
    pub climate_data: Option<ClimateData>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub soil_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_group")]
    pub economic_data: Option<EconomicData>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub harvest_season: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cooperatives_count: Option<u32>,
}

impl Region {
    /// Regional FOB price, ignoring zero or non-finite placeholders.
    pub fn avg_fob_price(&self) -> Option<f64> {
        self.economic_data
            .as_ref()
            .and_then(|data| data.avg_fob_price)
            .filter(|price| price.is_finite() && *price > 0.0)
    }
}

fn default_country() -> String {
    "Peru".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationRange {
    #[serde(deserialize_with = "lenient_number")]
    pub min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub max: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub avg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateData {
    #[serde(deserialize_with = "lenient_number")]
    pub temperature_avg_c: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub rainfall_mm_annual: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub humidity_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicData {
    #[serde(deserialize_with = "lenient_number")]
    pub avg_fob_price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub export_volume_kg: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub price_trend: Option<String>,
}

/// Composite result written back onto the cooperative after each analysis.
///
/// Overwritten on every run; the version tag lets readers reject records written under a
/// different key layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcingScores {
    pub schema_version: u8,
    pub supply_capacity_score: f64,
    pub quality_track_record_score: f64,
    pub export_readiness_score: f64,
    pub price_competitiveness_score: f64,
    pub communication_quality_score: f64,
    pub total_score: f64,
    pub risk_score: f64,
    pub recommendation: Recommendation,
}

impl SourcingScores {
    pub const SCHEMA_VERSION: u8 = 1;
}

/// True when an optional free-text field carries a non-blank value.
pub(crate) fn has_text(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false)
}

// Enrichment fields of the wrong JSON shape read as missing.

fn group_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(lenient_group(deserializer)?.unwrap_or_default())
}

fn lenient_group<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn lenient_scores<'de, D>(deserializer: D) -> Result<Option<SourcingScores>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_group(deserializer)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .filter(|number| number.is_finite()))
}

/// Counts accept any JSON number; the cast truncates fractions and saturates at both ends.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(|number| number as u32))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_languages<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let languages = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(language) => Some(language),
                _ => None,
            })
            .collect(),
        Value::String(language) => vec![language],
        _ => Vec::new(),
    };
    Ok(languages)
}
