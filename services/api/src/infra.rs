use metrics_exporter_prometheus::PrometheusHandle;
use sourcing_intel::regions::peru_regions;
use sourcing_intel::sourcing::{
    Cooperative, CooperativeId, CooperativeRepository, Region, RepositoryError, ScoreSnapshot,
    SourcingDataset,
};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store standing in for the cooperative database.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCooperativeRepository {
    cooperatives: Arc<Mutex<BTreeMap<CooperativeId, Cooperative>>>,
    regions: Arc<Mutex<BTreeMap<String, Region>>>,
    history: Arc<Mutex<BTreeMap<CooperativeId, Vec<ScoreSnapshot>>>>,
}

impl InMemoryCooperativeRepository {
    pub(crate) fn seeded(
        cooperatives: impl IntoIterator<Item = Cooperative>,
        regions: impl IntoIterator<Item = Region>,
    ) -> Self {
        let cooperatives = cooperatives
            .into_iter()
            .map(|cooperative| (cooperative.id, cooperative))
            .collect();
        let regions = regions
            .into_iter()
            .map(|region| (region.name.clone(), region))
            .collect();

        Self {
            cooperatives: Arc::new(Mutex::new(cooperatives)),
            regions: Arc::new(Mutex::new(regions)),
            history: Arc::default(),
        }
    }

    /// Regions from the dataset replace catalog entries with the same name.
    pub(crate) fn from_dataset(dataset: SourcingDataset) -> Self {
        let regions = peru_regions().into_iter().chain(dataset.regions);
        Self::seeded(dataset.cooperatives, regions)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store lock poisoned".to_string()))
}

impl CooperativeRepository for InMemoryCooperativeRepository {
    fn fetch(&self, id: CooperativeId) -> Result<Option<Cooperative>, RepositoryError> {
        Ok(lock(&self.cooperatives)?.get(&id).cloned())
    }

    fn find_region(&self, name: &str) -> Result<Option<Region>, RepositoryError> {
        Ok(lock(&self.regions)?.get(name).cloned())
    }

    fn list_regions(&self) -> Result<Vec<Region>, RepositoryError> {
        Ok(lock(&self.regions)?.values().cloned().collect())
    }

    fn list_ids(&self) -> Result<Vec<CooperativeId>, RepositoryError> {
        Ok(lock(&self.cooperatives)?.keys().copied().collect())
    }

    fn commit_scores(
        &self,
        id: CooperativeId,
        snapshot: ScoreSnapshot,
    ) -> Result<(), RepositoryError> {
        let mut cooperatives = lock(&self.cooperatives)?;
        let mut history = lock(&self.history)?;
        let cooperative = cooperatives.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        cooperative.sourcing_scores = Some(snapshot.scores.clone());
        history.entry(id).or_default().push(snapshot);
        Ok(())
    }

    fn history(&self, id: CooperativeId) -> Result<Vec<ScoreSnapshot>, RepositoryError> {
        Ok(lock(&self.history)?.get(&id).cloned().unwrap_or_default())
    }
}
