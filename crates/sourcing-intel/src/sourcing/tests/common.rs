use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::SourcingConfig;
use crate::regions::peru_regions;
use crate::sourcing::domain::{
    CommunicationMetrics, Cooperative, CooperativeId, DigitalFootprint, ExportReadinessData,
    FinancialData, OperationalData, Region,
};
use crate::sourcing::price_feed::{PriceFeed, PriceFeedError, PriceFeedSnapshot};
use crate::sourcing::repository::{CooperativeRepository, RepositoryError, ScoreSnapshot};
use crate::sourcing::service::SourcingAnalyzer;
use crate::sourcing::StaticPriceFeed;

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn empty_cooperative() -> Cooperative {
    Cooperative::new(CooperativeId(1), "Cooperativa Sin Datos")
}

pub(super) fn high_volume_cooperative() -> Cooperative {
    Cooperative {
        operational_data: OperationalData {
            farmer_count: Some(500),
            storage_capacity_kg: Some(200_000.0),
            has_wet_mill: Some(true),
            has_dry_mill: Some(true),
        },
        export_readiness: ExportReadinessData {
            export_experience_years: Some(10.0),
            ..ExportReadinessData::default()
        },
        financial_data: FinancialData {
            export_volume_kg_last_year: Some(100_000.0),
            ..FinancialData::default()
        },
        ..Cooperative::new(CooperativeId(2), "Central Norte")
    }
}

pub(super) fn export_ready_cooperative() -> Cooperative {
    Cooperative {
        certifications: Some("Organic, Fair Trade, Rainforest Alliance".to_string()),
        export_readiness: ExportReadinessData {
            export_license_number: Some("X".to_string()),
            export_license_expiry: Some("2026-12-31".to_string()),
            senasa_registered: Some(true),
            customs_clearance_issues_count: Some(0),
            has_document_coordinator: Some(true),
            ..ExportReadinessData::default()
        },
        ..Cooperative::new(CooperativeId(3), "Exportadora Andina")
    }
}

pub(super) fn low_risk_cooperative() -> Cooperative {
    Cooperative {
        quality_score: Some(88.0),
        altitude_m: Some(1500.0),
        financial_data: FinancialData {
            annual_revenue_usd: Some(600_000.0),
            ..FinancialData::default()
        },
        export_readiness: ExportReadinessData {
            export_experience_years: Some(8.0),
            customs_clearance_issues_count: Some(0),
            ..ExportReadinessData::default()
        },
        communication_metrics: CommunicationMetrics {
            avg_email_response_time_hours: Some(18.0),
            missed_meetings_count: Some(0),
            ..CommunicationMetrics::default()
        },
        ..Cooperative::new(CooperativeId(4), "Valle Seguro")
    }
}

/// Maxes every assessor; priced exactly at the Cajamarca FOB benchmark.
pub(super) fn high_performer() -> Cooperative {
    Cooperative {
        region: Some("Cajamarca".to_string()),
        altitude_m: Some(1500.0),
        certifications: Some("Organic, Fair Trade, Rainforest Alliance".to_string()),
        website: Some("https://cenfrocafe.example".to_string()),
        quality_score: Some(90.0),
        operational_data: OperationalData {
            farmer_count: Some(2300),
            storage_capacity_kg: Some(400_000.0),
            has_wet_mill: Some(true),
            has_dry_mill: Some(true),
        },
        export_readiness: ExportReadinessData {
            export_license_number: Some("EXP-2024-0117".to_string()),
            export_license_expiry: Some("2027-03-31".to_string()),
            senasa_registered: Some(true),
            customs_clearance_issues_count: Some(0),
            has_document_coordinator: Some(true),
            export_experience_years: Some(15.0),
            containers_exported_lifetime: Some(240),
        },
        financial_data: FinancialData {
            annual_revenue_usd: Some(2_500_000.0),
            export_volume_kg_last_year: Some(450_000.0),
            avg_price_achieved_usd_per_kg: Some(5.30),
        },
        communication_metrics: CommunicationMetrics {
            avg_email_response_time_hours: Some(12.0),
            languages_spoken: vec![
                "Spanish".to_string(),
                "English".to_string(),
                "German".to_string(),
            ],
            whatsapp_business: Some(true),
            provides_photos_regularly: Some(true),
            provides_cupping_scores: Some(true),
            missed_meetings_count: Some(0),
        },
        digital_footprint: DigitalFootprint {
            facebook_url: Some("https://facebook.com/cenfrocafe".to_string()),
            instagram_url: Some("https://instagram.com/cenfrocafe".to_string()),
        },
        ..Cooperative::new(CooperativeId(10), "Cenfrocafe")
    }
}

pub(super) fn region(name: &str) -> Region {
    peru_regions()
        .into_iter()
        .find(|region| region.name == name)
        .expect("catalog region")
}

pub(super) fn priced_cooperative(price: f64) -> Cooperative {
    Cooperative {
        financial_data: FinancialData {
            avg_price_achieved_usd_per_kg: Some(price),
            ..FinancialData::default()
        },
        ..empty_cooperative()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) cooperatives: Arc<Mutex<BTreeMap<CooperativeId, Cooperative>>>,
    pub(super) regions: Arc<Mutex<BTreeMap<String, Region>>>,
    pub(super) history: Arc<Mutex<BTreeMap<CooperativeId, Vec<ScoreSnapshot>>>>,
    pub(super) failing_commits: Arc<Mutex<HashSet<CooperativeId>>>,
    pub(super) region_lookup_offline: bool,
}

impl MemoryRepository {
    pub(super) fn seeded(cooperatives: Vec<Cooperative>, regions: Vec<Region>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.cooperatives.lock().expect("repository mutex poisoned");
            for cooperative in cooperatives {
                guard.insert(cooperative.id, cooperative);
            }
        }
        {
            let mut guard = repository.regions.lock().expect("repository mutex poisoned");
            for region in regions {
                guard.insert(region.name.clone(), region);
            }
        }
        repository
    }

    pub(super) fn stored(&self, id: CooperativeId) -> Cooperative {
        self.cooperatives
            .lock()
            .expect("repository mutex poisoned")
            .get(&id)
            .cloned()
            .expect("cooperative stored")
    }

    pub(super) fn fail_commits_for(&self, id: CooperativeId) {
        self.failing_commits
            .lock()
            .expect("repository mutex poisoned")
            .insert(id);
    }
}

impl CooperativeRepository for MemoryRepository {
    fn fetch(&self, id: CooperativeId) -> Result<Option<Cooperative>, RepositoryError> {
        let guard = self.cooperatives.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_region(&self, name: &str) -> Result<Option<Region>, RepositoryError> {
        if self.region_lookup_offline {
            return Err(RepositoryError::Unavailable("region table offline".to_string()));
        }
        let guard = self.regions.lock().expect("repository mutex poisoned");
        Ok(guard.get(name).cloned())
    }

    fn list_regions(&self) -> Result<Vec<Region>, RepositoryError> {
        let guard = self.regions.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn list_ids(&self) -> Result<Vec<CooperativeId>, RepositoryError> {
        let guard = self.cooperatives.lock().expect("repository mutex poisoned");
        Ok(guard.keys().copied().collect())
    }

    fn commit_scores(
        &self,
        id: CooperativeId,
        snapshot: ScoreSnapshot,
    ) -> Result<(), RepositoryError> {
        if self
            .failing_commits
            .lock()
            .expect("repository mutex poisoned")
            .contains(&id)
        {
            return Err(RepositoryError::Unavailable("write rejected".to_string()));
        }

        let mut cooperatives = self.cooperatives.lock().expect("repository mutex poisoned");
        let cooperative = cooperatives.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        cooperative.sourcing_scores = Some(snapshot.scores.clone());
        self.history
            .lock()
            .expect("repository mutex poisoned")
            .entry(id)
            .or_default()
            .push(snapshot);
        Ok(())
    }

    fn history(&self, id: CooperativeId) -> Result<Vec<ScoreSnapshot>, RepositoryError> {
        let guard = self.history.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl CooperativeRepository for UnavailableRepository {
    fn fetch(&self, _id: CooperativeId) -> Result<Option<Cooperative>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_region(&self, _name: &str) -> Result<Option<Region>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_regions(&self) -> Result<Vec<Region>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_ids(&self) -> Result<Vec<CooperativeId>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn commit_scores(
        &self,
        _id: CooperativeId,
        _snapshot: ScoreSnapshot,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _id: CooperativeId) -> Result<Vec<ScoreSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Live feed reporting a fixed Peru FOB average.
pub(super) struct FixedPriceFeed(pub(super) f64);

impl PriceFeed for FixedPriceFeed {
    fn current_prices(&self) -> Result<PriceFeedSnapshot, PriceFeedError> {
        Ok(PriceFeedSnapshot {
            source: "test".to_string(),
            available: true,
            peru_fob_avg_usd_per_kg: Some(self.0),
            fallback_prices: BTreeMap::new(),
            note: None,
        })
    }
}

pub(super) struct FailingPriceFeed;

impl PriceFeed for FailingPriceFeed {
    fn current_prices(&self) -> Result<PriceFeedSnapshot, PriceFeedError> {
        Err(PriceFeedError::Unavailable("quota exceeded".to_string()))
    }
}

pub(super) fn build_analyzer(
    repository: MemoryRepository,
) -> (
    SourcingAnalyzer<MemoryRepository, StaticPriceFeed>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(repository);
    let analyzer = SourcingAnalyzer::new(
        repository.clone(),
        Arc::new(StaticPriceFeed),
        SourcingConfig::default(),
    );
    (analyzer, repository)
}

pub(super) fn seeded_analyzer() -> (
    SourcingAnalyzer<MemoryRepository, StaticPriceFeed>,
    Arc<MemoryRepository>,
) {
    build_analyzer(MemoryRepository::seeded(
        vec![
            empty_cooperative(),
            high_volume_cooperative(),
            low_risk_cooperative(),
            high_performer(),
        ],
        peru_regions(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
