use serde::{Deserialize, Serialize};

use super::super::domain::Cooperative;
use super::super::price_feed::{BenchmarkSource, ResolvedBenchmark};
use super::primitives::clamp;

/// Score reported when either side of the comparison is missing.
pub const NEUTRAL_PRICE_SCORE: f64 = 50.0;

/// Points lost per percent of deviation from the benchmark, in either direction.
pub const DEVIATION_PENALTY_PER_PCT: f64 = 2.0;

/// Comparison of the cooperative's achieved price against a market reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBenchmark {
    pub cooperative_price: Option<f64>,
    pub regional_benchmark: Option<f64>,
    pub difference_pct: Option<f64>,
    pub score: f64,
    pub details: PriceBenchmarkDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBenchmarkDetails {
    pub benchmark_source: Option<BenchmarkSource>,
    pub quality_adjusted: Option<f64>,
}

pub fn benchmark_pricing(
    cooperative: &Cooperative,
    benchmark: Option<ResolvedBenchmark>,
) -> PriceBenchmark {
    let cooperative_price = cooperative
        .financial_data
        .avg_price_achieved_usd_per_kg
        .filter(|price| price.is_finite() && *price > 0.0);
    let reference = benchmark.filter(|resolved| resolved.price > 0.0);

    let (difference_pct, score) = match (cooperative_price, reference) {
        (Some(price), Some(resolved)) => {
            let difference_pct = (price - resolved.price) / resolved.price * 100.0;
            let score = clamp(
                100.0 - difference_pct.abs() * DEVIATION_PENALTY_PER_PCT,
                0.0,
                100.0,
            );
            (Some(difference_pct), score)
        }
        _ => (None, NEUTRAL_PRICE_SCORE),
    };

    PriceBenchmark {
        cooperative_price,
        regional_benchmark: reference.map(|resolved| resolved.price),
        difference_pct,
        score,
        details: PriceBenchmarkDetails {
            benchmark_source: reference.map(|resolved| resolved.source),
            quality_adjusted: cooperative.quality_score,
        },
    }
}
