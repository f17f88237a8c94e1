use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Cooperative, CooperativeId, Region, SourcingScores};

/// One entry of the append-only score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub cooperative_id: CooperativeId,
    pub computed_at: DateTime<Utc>,
    pub scores: SourcingScores,
}

/// Storage abstraction so the analyzer can be exercised in isolation.
pub trait CooperativeRepository: Send + Sync {
    fn fetch(&self, id: CooperativeId) -> Result<Option<Cooperative>, RepositoryError>;
    fn find_region(&self, name: &str) -> Result<Option<Region>, RepositoryError>;
    /// Every known region, ordered by name.
    fn list_regions(&self) -> Result<Vec<Region>, RepositoryError>;
    fn list_ids(&self) -> Result<Vec<CooperativeId>, RepositoryError>;

    /// Overwrites the cooperative's `sourcing_scores` and appends `snapshot` to its history
    /// as one write. Either both happen or neither does.
    fn commit_scores(
        &self,
        id: CooperativeId,
        snapshot: ScoreSnapshot,
    ) -> Result<(), RepositoryError>;

    /// Snapshots oldest first.
    fn history(&self, id: CooperativeId) -> Result<Vec<ScoreSnapshot>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
