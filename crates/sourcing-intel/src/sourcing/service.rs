use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SourcingConfig;
use crate::regions::{RegionIntelligence, RegionSummary};

use super::domain::{Cooperative, CooperativeId, Region};
use super::price_feed::{resolve_benchmark, PriceFeed};
use super::repository::{CooperativeRepository, RepositoryError, ScoreSnapshot};
use super::scoring::{SourcingAnalysis, SourcingEngine};

/// Orchestrator loading cooperatives, scoring them, and persisting the composite result.
pub struct SourcingAnalyzer<R, P> {
    repository: Arc<R>,
    price_feed: Arc<P>,
    engine: Arc<SourcingEngine>,
    config: SourcingConfig,
}

impl<R, P> SourcingAnalyzer<R, P>
where
    R: CooperativeRepository + 'static,
    P: PriceFeed + 'static,
{
    pub fn new(repository: Arc<R>, price_feed: Arc<P>, config: SourcingConfig) -> Self {
        Self {
            repository,
            price_feed,
            engine: Arc::new(SourcingEngine::default()),
            config,
        }
    }

    pub fn config(&self) -> &SourcingConfig {
        &self.config
    }

    /// Score a cooperative against an optional region without touching storage.
    pub fn assess(&self, cooperative: &Cooperative, region: Option<&Region>) -> SourcingAnalysis {
        let benchmark = resolve_benchmark(
            region,
            self.price_feed.as_ref(),
            self.config.fallback_fob_usd_per_kg,
        );
        let analysis = self.engine.score(cooperative, benchmark);

        debug!(
            cooperative_id = %cooperative.id,
            supply_capacity = analysis.supply_capacity.score,
            quality = analysis.quality_track_record_score,
            export_readiness = analysis.export_readiness.score,
            price = analysis.price_benchmark.score,
            communication = analysis.communication_score,
            risk = analysis.risk_assessment.risk_score,
            "component scores computed"
        );

        analysis
    }

    /// Fresh analysis of a stored cooperative; the result overwrites its `sourcing_scores`.
    pub fn analyze(&self, id: CooperativeId) -> Result<SourcingAnalysis, SourcingServiceError> {
        let cooperative = self
            .repository
            .fetch(id)?
            .ok_or(SourcingServiceError::CooperativeNotFound(id))?;

        let region = self.lookup_region(&cooperative);
        let analysis = self.assess(&cooperative, region.as_ref());

        self.repository.commit_scores(
            id,
            ScoreSnapshot {
                cooperative_id: id,
                computed_at: Utc::now(),
                scores: analysis.scores(),
            },
        )?;

        info!(
            cooperative_id = %id,
            total_score = analysis.total_score,
            risk_score = analysis.risk_assessment.risk_score,
            recommendation = %analysis.recommendation,
            "sourcing analysis stored"
        );

        Ok(analysis)
    }

    /// Batch job: analyze every stored cooperative, carrying on past individual failures.
    pub fn analyze_all(&self) -> Result<BatchSummary, SourcingServiceError> {
        let ids = self.repository.list_ids()?;
        let mut summary = BatchSummary::default();

        for id in ids {
            match self.analyze(id) {
                Ok(_) => summary.analyzed += 1,
                Err(error) => {
                    warn!(cooperative_id = %id, %error, "sourcing analysis failed");
                    summary.failed.push(BatchFailure {
                        cooperative_id: id,
                        error: error.to_string(),
                    });
                }
            }
        }

        info!(
            analyzed = summary.analyzed,
            failed = summary.failed.len(),
            "sourcing batch finished"
        );
        Ok(summary)
    }

    pub fn history(&self, id: CooperativeId) -> Result<Vec<ScoreSnapshot>, SourcingServiceError> {
        if self.repository.fetch(id)?.is_none() {
            return Err(SourcingServiceError::CooperativeNotFound(id));
        }
        Ok(self.repository.history(id)?)
    }

    pub fn region_intelligence(
        &self,
        name: &str,
    ) -> Result<RegionIntelligence, SourcingServiceError> {
        let region = self
            .repository
            .find_region(name)?
            .ok_or_else(|| SourcingServiceError::RegionNotFound(name.to_string()))?;
        Ok(RegionIntelligence::from_region(&region))
    }

    pub fn regions(&self) -> Result<Vec<RegionSummary>, SourcingServiceError> {
        let regions = self.repository.list_regions()?;
        Ok(regions.iter().map(RegionSummary::from_region).collect())
    }

    fn lookup_region(&self, cooperative: &Cooperative) -> Option<Region> {
        let name = cooperative.region.as_deref()?;
        match self.repository.find_region(name) {
            Ok(region) => region,
            Err(error) => {
                warn!(
                    cooperative_id = %cooperative.id,
                    region = name,
                    %error,
                    "region lookup failed"
                );
                None
            }
        }
    }
}

/// Outcome of [`SourcingAnalyzer::analyze_all`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub analyzed: usize,
    pub failed: Vec<BatchFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub cooperative_id: CooperativeId,
    pub error: String,
}

/// Error raised by the sourcing analyzer.
#[derive(Debug, thiserror::Error)]
pub enum SourcingServiceError {
    #[error("cooperative {0} not found")]
    CooperativeNotFound(CooperativeId),
    #[error("region '{0}' not found")]
    RegionNotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SourcingServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SourcingServiceError::CooperativeNotFound(_)
                | SourcingServiceError::RegionNotFound(_)
                | SourcingServiceError::Repository(RepositoryError::NotFound)
        )
    }
}
