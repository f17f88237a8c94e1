//! Cooperative sourcing scoring and risk engine.
//!
//! Five independent assessors (supply capacity, export readiness, communication quality,
//! price benchmark, risk) turn a cooperative's partially populated records into bounded
//! scores. [`SourcingAnalyzer`] combines them into a weighted total and a recommendation tier,
//! then writes the flat [`SourcingScores`] record back through the repository.

pub mod dataset;
pub mod domain;
pub mod price_feed;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use dataset::{DatasetError, SourcingDataset};
pub use domain::{
    ClimateData, CommunicationMetrics, Cooperative, CooperativeId, DigitalFootprint,
    EconomicData, ElevationRange, ExportReadinessData, FinancialData, OperationalData, Region,
    SourcingScores,
};
pub use price_feed::{
    resolve_benchmark, BenchmarkSource, FallbackPrice, PriceFeed, PriceFeedError,
    PriceFeedSnapshot, ResolvedBenchmark, StaticPriceFeed,
};
pub use repository::{CooperativeRepository, RepositoryError, ScoreSnapshot};
pub use router::sourcing_router;
pub use scoring::{
    CommunicationQuality, CompositeWeights, ExportReadinessCheck, PriceBenchmark, Recommendation,
    RiskAssessment, SourcingAnalysis, SourcingEngine, SupplyCapacityCheck, COMPOSITE_WEIGHTS,
    DEFAULT_QUALITY_SCORE,
};
pub use service::{BatchFailure, BatchSummary, SourcingAnalyzer, SourcingServiceError};
