use crate::sourcing::domain::{ClimateData, EconomicData, ElevationRange, Region};

struct RegionSeed {
    name: &'static str,
    elevation_m: (f64, f64, f64),
    temperature_avg_c: f64,
    rainfall_mm_annual: f64,
    humidity_pct: f64,
    soil_type: &'static str,
    avg_fob_price: f64,
    export_volume_kg: f64,
    price_trend: &'static str,
    harvest_season: &'static str,
    cooperatives_count: u32,
}

const PERU_REGIONS: &[RegionSeed] = &[
    RegionSeed {
        name: "Cajamarca",
        elevation_m: (1200.0, 2100.0, 1650.0),
        temperature_avg_c: 18.5,
        rainfall_mm_annual: 1200.0,
        humidity_pct: 75.0,
        soil_type: "Volcanic, well-drained",
        avg_fob_price: 5.30,
        export_volume_kg: 60_000_000.0,
        price_trend: "stable",
        harvest_season: "April - September",
        cooperatives_count: 85,
    },
    RegionSeed {
        name: "Junín",
        elevation_m: (1000.0, 1800.0, 1400.0),
        temperature_avg_c: 20.0,
        rainfall_mm_annual: 1500.0,
        humidity_pct: 80.0,
        soil_type: "Clay loam, fertile",
        avg_fob_price: 5.10,
        export_volume_kg: 40_000_000.0,
        price_trend: "stable",
        harvest_season: "May - September",
        cooperatives_count: 62,
    },
    RegionSeed {
        name: "San Martín",
        elevation_m: (800.0, 1500.0, 1150.0),
        temperature_avg_c: 24.0,
        rainfall_mm_annual: 2000.0,
        humidity_pct: 85.0,
        soil_type: "Loamy, high organic matter",
        avg_fob_price: 4.90,
        export_volume_kg: 36_000_000.0,
        price_trend: "increasing",
        harvest_season: "April - August",
        cooperatives_count: 78,
    },
    RegionSeed {
        name: "Cusco",
        elevation_m: (1500.0, 2200.0, 1850.0),
        temperature_avg_c: 17.0,
        rainfall_mm_annual: 1400.0,
        humidity_pct: 70.0,
        soil_type: "Volcanic, well-drained",
        avg_fob_price: 5.60,
        export_volume_kg: 30_000_000.0,
        price_trend: "increasing",
        harvest_season: "May - October",
        cooperatives_count: 45,
    },
    RegionSeed {
        name: "Amazonas",
        elevation_m: (1200.0, 2100.0, 1650.0),
        temperature_avg_c: 19.0,
        rainfall_mm_annual: 1600.0,
        humidity_pct: 78.0,
        soil_type: "Rich, well-drained",
        avg_fob_price: 5.50,
        export_volume_kg: 16_000_000.0,
        price_trend: "stable",
        harvest_season: "April - September",
        cooperatives_count: 32,
    },
    RegionSeed {
        name: "Puno",
        elevation_m: (1300.0, 2000.0, 1650.0),
        temperature_avg_c: 16.5,
        rainfall_mm_annual: 1100.0,
        humidity_pct: 65.0,
        soil_type: "Well-drained, moderate fertility",
        avg_fob_price: 5.70,
        export_volume_kg: 10_000_000.0,
        price_trend: "stable",
        harvest_season: "April - August",
        cooperatives_count: 24,
    },
];

/// The six main Peruvian coffee regions with climate and FOB reference data.
pub fn peru_regions() -> Vec<Region> {
    PERU_REGIONS.iter().map(RegionSeed::to_region).collect()
}

impl RegionSeed {
    fn to_region(&self) -> Region {
        let (min, max, avg) = self.elevation_m;
        Region {
            name: self.name.to_string(),
            country: "Peru".to_string(),
            elevation_range: Some(ElevationRange {
                min: Some(min),
                max: Some(max),
                avg: Some(avg),
            }),
            climate_data: Some(ClimateData {
                temperature_avg_c: Some(self.temperature_avg_c),
                rainfall_mm_annual: Some(self.rainfall_mm_annual),
                humidity_pct: Some(self.humidity_pct),
            }),
            soil_type: Some(self.soil_type.to_string()),
            economic_data: Some(EconomicData {
                avg_fob_price: Some(self.avg_fob_price),
                export_volume_kg: Some(self.export_volume_kg),
                price_trend: Some(self.price_trend.to_string()),
            }),
            harvest_season: Some(self.harvest_season.to_string()),
            cooperatives_count: Some(self.cooperatives_count),
        }
    }
}
