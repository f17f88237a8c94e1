//! Region-level growing-conditions intelligence and the built-in Peru catalog.

mod catalog;

pub use catalog::peru_regions;

use serde::Serialize;

use crate::sourcing::domain::{ElevationRange, Region};
use crate::sourcing::scoring::{band_score, BandTable};

/// Midpoint of the elevation range, in metres.
pub const ELEVATION_BANDS: BandTable = BandTable::new(
    &[
        (1_200.0, 2_000.0, 30.0),
        (1_000.0, 2_200.0, 25.0),
        (800.0, 2_400.0, 20.0),
    ],
    10.0,
);

pub const TEMPERATURE_BANDS: BandTable =
    BandTable::new(&[(18.0, 22.0, 20.0), (16.0, 24.0, 15.0), (14.0, 26.0, 10.0)], 5.0);

pub const RAINFALL_BANDS: BandTable = BandTable::new(
    &[
        (1_500.0, 2_500.0, 20.0),
        (1_200.0, 3_000.0, 15.0),
        (1_000.0, 3_500.0, 10.0),
    ],
    5.0,
);

/// Read model served for a single region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionIntelligence {
    pub name: String,
    pub country: String,
    pub elevation_range: Option<ElevationRange>,
    pub avg_temperature_c: Option<f64>,
    pub rainfall_mm_annual: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub soil_type: Option<String>,
    pub avg_fob_price: Option<f64>,
    pub export_volume_kg: Option<f64>,
    pub price_trend: Option<String>,
    pub harvest_season: Option<String>,
    pub cooperatives_count: Option<u32>,
    pub growing_conditions_score: f64,
}

impl RegionIntelligence {
    pub fn from_region(region: &Region) -> Self {
        let climate = region.climate_data.clone().unwrap_or_default();
        let economic = region.economic_data.clone().unwrap_or_default();

        Self {
            name: region.name.clone(),
            country: region.country.clone(),
            elevation_range: region.elevation_range.clone(),
            avg_temperature_c: climate.temperature_avg_c,
            rainfall_mm_annual: climate.rainfall_mm_annual,
            humidity_pct: climate.humidity_pct,
            soil_type: region.soil_type.clone(),
            avg_fob_price: region.avg_fob_price(),
            export_volume_kg: economic.export_volume_kg,
            price_trend: economic.price_trend,
            harvest_season: region.harvest_season.clone(),
            cooperatives_count: region.cooperatives_count,
            growing_conditions_score: growing_conditions_score(region),
        }
    }
}

/// Listing entry for the region index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub name: String,
    pub country: String,
    pub harvest_season: Option<String>,
    pub cooperatives_count: Option<u32>,
    pub growing_conditions_score: f64,
}

impl RegionSummary {
    pub fn from_region(region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            country: region.country.clone(),
            harvest_season: region.harvest_season.clone(),
            cooperatives_count: region.cooperatives_count,
            growing_conditions_score: growing_conditions_score(region),
        }
    }
}

/// Score in `[0, 100]`: elevation 30, temperature 20, rainfall 20, soil 30.
///
/// Each factor contributes nothing when its input is missing.
pub fn growing_conditions_score(region: &Region) -> f64 {
    let climate = region.climate_data.as_ref();
    let score = elevation_points(region.elevation_range.as_ref())
        + climate
            .and_then(|data| data.temperature_avg_c)
            .map(temperature_points)
            .unwrap_or(0.0)
        + climate
            .and_then(|data| data.rainfall_mm_annual)
            .map(rainfall_points)
            .unwrap_or(0.0)
        + region.soil_type.as_deref().map(soil_points).unwrap_or(0.0);

    (score * 100.0).round() / 100.0
}

fn elevation_points(range: Option<&ElevationRange>) -> f64 {
    let Some((min, max)) = range.and_then(|range| range.min.zip(range.max)) else {
        return 0.0;
    };
    band_score((min + max) / 2.0, &ELEVATION_BANDS)
}

fn temperature_points(celsius: f64) -> f64 {
    band_score(celsius, &TEMPERATURE_BANDS)
}

fn rainfall_points(millimetres: f64) -> f64 {
    band_score(millimetres, &RAINFALL_BANDS)
}

fn soil_points(soil_type: &str) -> f64 {
    let soil = soil_type.to_lowercase();
    if ["volcanic", "loam", "rich"].iter().any(|term| soil.contains(term)) {
        30.0
    } else if ["clay", "sandy loam"].iter().any(|term| soil.contains(term)) {
        25.0
    } else if soil.contains("sandy") {
        15.0
    } else {
        20.0
    }
}
