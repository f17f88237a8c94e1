use serde::{Deserialize, Serialize};

use super::super::domain::Cooperative;
use super::primitives::{clamp, threshold_score, ThresholdTable};

pub const VOLUME_TABLE: ThresholdTable = ThresholdTable::at_least(
    &[
        (100_000.0, 30.0),
        (50_000.0, 25.0),
        (25_000.0, 20.0),
        (10_000.0, 15.0),
    ],
    5.0,
);

pub const FARMER_COUNT_TABLE: ThresholdTable = ThresholdTable::at_least(
    &[(500.0, 20.0), (200.0, 17.0), (100.0, 14.0), (50.0, 10.0)],
    5.0,
);

pub const STORAGE_TABLE: ThresholdTable = ThresholdTable::at_least(
    &[
        (200_000.0, 20.0),
        (100_000.0, 17.0),
        (50_000.0, 14.0),
        (25_000.0, 10.0),
    ],
    5.0,
);

pub const EXPERIENCE_TABLE: ThresholdTable = ThresholdTable::at_least(
    &[(10.0, 15.0), (5.0, 12.0), (3.0, 9.0), (1.0, 6.0)],
    2.0,
);

pub const WET_MILL_POINTS: f64 = 8.0;
pub const DRY_MILL_POINTS: f64 = 7.0;

/// Operational scale assessment (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyCapacityCheck {
    pub score: f64,
    pub volume_score: f64,
    pub farmer_count_score: f64,
    pub storage_score: f64,
    pub processing_score: f64,
    pub experience_score: f64,
    pub details: SupplyCapacityDetails,
}

/// Raw inputs echoed back, after defaults were applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyCapacityDetails {
    pub volume_kg: f64,
    pub farmer_count: u32,
    pub storage_capacity_kg: f64,
    pub has_wet_mill: bool,
    pub has_dry_mill: bool,
    pub export_experience_years: f64,
}

pub fn check_supply_capacity(cooperative: &Cooperative) -> SupplyCapacityCheck {
    let operational = &cooperative.operational_data;

    let volume_kg = cooperative
        .financial_data
        .export_volume_kg_last_year
        .unwrap_or(0.0);
    let farmer_count = operational.farmer_count.unwrap_or(0);
    let storage_capacity_kg = operational.storage_capacity_kg.unwrap_or(0.0);
    let has_wet_mill = operational.has_wet_mill.unwrap_or(false);
    let has_dry_mill = operational.has_dry_mill.unwrap_or(false);
    let export_experience_years = cooperative
        .export_readiness
        .export_experience_years
        .unwrap_or(0.0);

    let volume_score = threshold_score(volume_kg, &VOLUME_TABLE);
    let farmer_count_score = threshold_score(f64::from(farmer_count), &FARMER_COUNT_TABLE);
    let storage_score = threshold_score(storage_capacity_kg, &STORAGE_TABLE);

    let mut processing_score = 0.0;
    if has_wet_mill {
        processing_score += WET_MILL_POINTS;
    }
    if has_dry_mill {
        processing_score += DRY_MILL_POINTS;
    }

    let experience_score = threshold_score(export_experience_years, &EXPERIENCE_TABLE);

    let total =
        volume_score + farmer_count_score + storage_score + processing_score + experience_score;

    SupplyCapacityCheck {
        score: clamp(total, 0.0, 100.0),
        volume_score,
        farmer_count_score,
        storage_score,
        processing_score,
        experience_score,
        details: SupplyCapacityDetails {
            volume_kg,
            farmer_count,
            storage_capacity_kg,
            has_wet_mill,
            has_dry_mill,
            export_experience_years,
        },
    }
}
