mod communication;
mod export;
mod pricing;
mod primitives;
mod recommendation;
mod risk;
mod supply;

pub use communication::{assess_communication_quality, CommunicationQuality};
pub use export::{
    check_export_readiness, parse_certifications, ExportReadinessCheck, ExportReadinessDetails,
};
pub use pricing::{benchmark_pricing, PriceBenchmark, PriceBenchmarkDetails, NEUTRAL_PRICE_SCORE};
pub use primitives::{
    band_score, clamp, threshold_score, threshold_step, weighted_sum, BandTable, Bound,
    ThresholdTable,
};
pub use recommendation::{recommend, Recommendation};
pub use risk::{calculate_sourcing_risk, RiskAssessment};
pub use supply::{check_supply_capacity, SupplyCapacityCheck, SupplyCapacityDetails};

/// Score tables exposed for inspection and tests.
pub mod tables {
    pub use super::communication::{MEETING_RELIABILITY_TABLE, RESPONSE_TIME_TABLE};
    pub use super::export::{CERTIFICATION_TABLE, CUSTOMS_HISTORY_TABLE};
    pub use super::risk::{
        ALTITUDE_RISK_BANDS, CUSTOMS_RISK_TABLE, EXPERIENCE_RISK_TABLE, FINANCIAL_RISK_TABLE,
        MISSED_MEETING_RISK_TABLE, QUALITY_RISK_TABLE, RESPONSE_RISK_TABLE,
    };
    pub use super::supply::{EXPERIENCE_TABLE, FARMER_COUNT_TABLE, STORAGE_TABLE, VOLUME_TABLE};
}

use serde::{Deserialize, Serialize};

use super::domain::{Cooperative, CooperativeId, SourcingScores};
use super::price_feed::ResolvedBenchmark;

/// Quality track record assumed when the cooperative has not been cupped yet.
pub const DEFAULT_QUALITY_SCORE: f64 = 50.0;

/// Quality score fed to the composite and the risk ladder.
///
/// A stored `0.0` means "not cupped yet" and takes the default like a missing value.
pub fn effective_quality_score(cooperative: &Cooperative) -> f64 {
    cooperative
        .quality_score
        .filter(|score| *score != 0.0)
        .unwrap_or(DEFAULT_QUALITY_SCORE)
}

/// Weights of the composite total; they sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeWeights {
    pub supply_capacity: f64,
    pub quality: f64,
    pub export_readiness: f64,
    pub price: f64,
    pub communication: f64,
}

impl CompositeWeights {
    pub fn total(&self) -> f64 {
        self.supply_capacity
            + self.quality
            + self.export_readiness
            + self.price
            + self.communication
    }
}

pub const COMPOSITE_WEIGHTS: CompositeWeights = CompositeWeights {
    supply_capacity: 0.30,
    quality: 0.25,
    export_readiness: 0.20,
    price: 0.15,
    communication: 0.10,
};

/// Component scores feeding the weighted total, all on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub supply_capacity: f64,
    pub quality_track_record: f64,
    pub export_readiness: f64,
    pub price_competitiveness: f64,
    pub communication_quality: f64,
}

pub fn composite_score(components: &ComponentScores, weights: &CompositeWeights) -> f64 {
    let total = weighted_sum(&[
        (components.supply_capacity, weights.supply_capacity),
        (components.quality_track_record, weights.quality),
        (components.export_readiness, weights.export_readiness),
        (components.price_competitiveness, weights.price),
        (components.communication_quality, weights.communication),
    ]);
    clamp(total, 0.0, 100.0)
}

/// Full sourcing verdict for one cooperative, with every component's breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcingAnalysis {
    pub cooperative_id: CooperativeId,
    pub cooperative_name: String,
    pub supply_capacity: SupplyCapacityCheck,
    pub export_readiness: ExportReadinessCheck,
    pub communication: CommunicationQuality,
    pub communication_score: f64,
    pub price_benchmark: PriceBenchmark,
    pub risk_assessment: RiskAssessment,
    pub quality_track_record_score: f64,
    pub total_score: f64,
    pub recommendation: Recommendation,
}

impl SourcingAnalysis {
    /// Flat record persisted onto the cooperative.
    pub fn scores(&self) -> SourcingScores {
        SourcingScores {
            schema_version: SourcingScores::SCHEMA_VERSION,
            supply_capacity_score: self.supply_capacity.score,
            quality_track_record_score: self.quality_track_record_score,
            export_readiness_score: self.export_readiness.score,
            price_competitiveness_score: self.price_benchmark.score,
            communication_quality_score: self.communication_score,
            total_score: self.total_score,
            risk_score: self.risk_assessment.risk_score,
            recommendation: self.recommendation,
        }
    }
}

/// Stateless engine running the five assessors and the recommendation policy.
#[derive(Debug, Clone)]
pub struct SourcingEngine {
    weights: CompositeWeights,
}

impl Default for SourcingEngine {
    fn default() -> Self {
        Self::new(COMPOSITE_WEIGHTS)
    }
}

impl SourcingEngine {
    pub fn new(weights: CompositeWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CompositeWeights {
        &self.weights
    }

    pub fn score(
        &self,
        cooperative: &Cooperative,
        benchmark: Option<ResolvedBenchmark>,
    ) -> SourcingAnalysis {
        let supply_capacity = check_supply_capacity(cooperative);
        let export_readiness = check_export_readiness(cooperative);
        let communication = assess_communication_quality(cooperative);
        let price_benchmark = benchmark_pricing(cooperative, benchmark);
        let risk_assessment = calculate_sourcing_risk(cooperative);
        let quality_track_record_score = effective_quality_score(cooperative);

        let total_score = composite_score(
            &ComponentScores {
                supply_capacity: supply_capacity.score,
                quality_track_record: quality_track_record_score,
                export_readiness: export_readiness.score,
                price_competitiveness: price_benchmark.score,
                communication_quality: communication.score,
            },
            &self.weights,
        );
        let recommendation = recommend(total_score, risk_assessment.risk_score);

        SourcingAnalysis {
            cooperative_id: cooperative.id,
            cooperative_name: cooperative.name.clone(),
            communication_score: communication.score,
            supply_capacity,
            export_readiness,
            communication,
            price_benchmark,
            risk_assessment,
            quality_track_record_score,
            total_score,
            recommendation,
        }
    }
}
