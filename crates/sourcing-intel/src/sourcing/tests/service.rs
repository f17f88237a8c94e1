use std::sync::Arc;

use super::common::*;
use crate::config::SourcingConfig;
use crate::sourcing::domain::CooperativeId;
use crate::sourcing::price_feed::BenchmarkSource;
use crate::sourcing::scoring::Recommendation;
use crate::sourcing::{SourcingAnalyzer, SourcingServiceError};

#[test]
fn analyze_persists_scores_for_high_performer() {
    let (analyzer, repository) = seeded_analyzer();

    let analysis = analyzer.analyze(CooperativeId(10)).expect("analysis");

    assert_eq!(analysis.cooperative_name, "Cenfrocafe");
    assert_eq!(analysis.supply_capacity.score, 100.0);
    assert_eq!(analysis.export_readiness.score, 100.0);
    assert_eq!(analysis.communication_score, 100.0);
    assert_eq!(analysis.price_benchmark.score, 100.0);
    assert_eq!(
        analysis.price_benchmark.details.benchmark_source,
        Some(BenchmarkSource::Region)
    );
    assert_eq!(analysis.risk_assessment.risk_score, 6.0);
    assert_close(analysis.total_score, 97.5);
    assert_eq!(analysis.recommendation, Recommendation::HighlyRecommended);

    let stored = repository.stored(CooperativeId(10));
    assert_eq!(stored.sourcing_scores, Some(analysis.scores()));
}

#[test]
fn analyze_reports_missing_cooperative() {
    let (analyzer, _) = seeded_analyzer();

    match analyzer.analyze(CooperativeId(404)) {
        Err(SourcingServiceError::CooperativeNotFound(CooperativeId(404))) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn repeated_analysis_is_idempotent_and_appends_history() {
    let (analyzer, repository) = seeded_analyzer();

    analyzer.analyze(CooperativeId(2)).expect("first run");
    let first = repository.stored(CooperativeId(2)).sourcing_scores;
    analyzer.analyze(CooperativeId(2)).expect("second run");
    let second = repository.stored(CooperativeId(2)).sourcing_scores;

    assert!(first.is_some());
    assert_eq!(first, second);

    let history = analyzer.history(CooperativeId(2)).expect("history");
    assert_eq!(history.len(), 2);
    assert!(history[0].computed_at <= history[1].computed_at);
    assert_eq!(history[0].scores, history[1].scores);
}

#[test]
fn unknown_region_falls_back_to_configured_price() {
    let mut cooperative = priced_cooperative(5.15);
    cooperative.region = Some("Atlantis".to_string());
    let (analyzer, _) = build_analyzer(MemoryRepository::seeded(vec![cooperative], Vec::new()));

    let analysis = analyzer.analyze(CooperativeId(1)).expect("analysis");

    assert_eq!(analysis.price_benchmark.regional_benchmark, Some(5.10));
    assert_eq!(
        analysis.price_benchmark.details.benchmark_source,
        Some(BenchmarkSource::Fallback)
    );
    assert_close(analysis.price_benchmark.score, 100.0 - (0.05 / 5.10 * 100.0) * 2.0);
}

#[test]
fn region_lookup_failure_is_not_fatal() {
    let mut repository = MemoryRepository::seeded(vec![high_performer()], Vec::new());
    repository.region_lookup_offline = true;
    let (analyzer, _) = build_analyzer(repository);

    let analysis = analyzer.analyze(CooperativeId(10)).expect("analysis");

    assert_eq!(
        analysis.price_benchmark.details.benchmark_source,
        Some(BenchmarkSource::Fallback)
    );
}

#[test]
fn assess_does_not_touch_storage() {
    let (analyzer, repository) = seeded_analyzer();
    let cooperative = repository.stored(CooperativeId(10));
    let cajamarca = region("Cajamarca");

    let analysis = analyzer.assess(&cooperative, Some(&cajamarca));

    assert_eq!(analysis.recommendation, Recommendation::HighlyRecommended);
    assert!(repository.stored(CooperativeId(10)).sourcing_scores.is_none());
    assert!(analyzer.history(CooperativeId(10)).expect("history").is_empty());
}

#[test]
fn live_feed_price_is_used_without_region() {
    let repository = Arc::new(MemoryRepository::seeded(
        vec![priced_cooperative(4.0)],
        Vec::new(),
    ));
    let analyzer = SourcingAnalyzer::new(
        repository,
        Arc::new(FixedPriceFeed(5.0)),
        SourcingConfig::with_fallback_price(6.0),
    );

    let analysis = analyzer.analyze(CooperativeId(1)).expect("analysis");

    assert_eq!(analysis.price_benchmark.regional_benchmark, Some(5.0));
    assert_close(analysis.price_benchmark.score, 60.0);
}

#[test]
fn analyze_all_continues_past_failures() {
    let repository = MemoryRepository::seeded(
        vec![empty_cooperative(), high_volume_cooperative(), high_performer()],
        Vec::new(),
    );
    repository.fail_commits_for(CooperativeId(2));
    let (analyzer, repository) = build_analyzer(repository);

    let summary = analyzer.analyze_all().expect("batch runs");

    assert_eq!(summary.analyzed, 2);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].cooperative_id, CooperativeId(2));
    assert!(repository.stored(CooperativeId(1)).sourcing_scores.is_some());
    assert!(repository.stored(CooperativeId(2)).sourcing_scores.is_none());
    assert!(repository.stored(CooperativeId(10)).sourcing_scores.is_some());
}

#[test]
fn repository_outage_propagates() {
    let analyzer = SourcingAnalyzer::new(
        Arc::new(UnavailableRepository),
        Arc::new(FailingPriceFeed),
        SourcingConfig::default(),
    );

    assert!(matches!(
        analyzer.analyze(CooperativeId(1)),
        Err(SourcingServiceError::Repository(_))
    ));
    assert!(matches!(
        analyzer.analyze_all(),
        Err(SourcingServiceError::Repository(_))
    ));
}

#[test]
fn history_of_unknown_cooperative_is_not_found() {
    let (analyzer, _) = seeded_analyzer();

    let error = analyzer.history(CooperativeId(77)).expect_err("missing");

    assert!(error.is_not_found());
}

#[test]
fn region_intelligence_scores_catalog_region() {
    let (analyzer, _) = seeded_analyzer();

    let intelligence = analyzer.region_intelligence("Junín").expect("region");

    assert_eq!(intelligence.growing_conditions_score, 100.0);
    assert_eq!(intelligence.avg_fob_price, Some(5.10));
    assert!(matches!(
        analyzer.region_intelligence("Lima"),
        Err(SourcingServiceError::RegionNotFound(_))
    ));
}

#[test]
fn regions_are_listed_by_name_with_scores() {
    let (analyzer, _) = seeded_analyzer();

    let regions = analyzer.regions().expect("regions");

    let names: Vec<&str> = regions.iter().map(|region| region.name.as_str()).collect();
    assert_eq!(
        names,
        ["Amazonas", "Cajamarca", "Cusco", "Junín", "Puno", "San Martín"]
    );
    assert_eq!(regions[1].growing_conditions_score, 95.0);
    assert_eq!(regions[4].growing_conditions_score, 75.0);
}

#[test]
fn region_listing_surfaces_outage() {
    let analyzer = SourcingAnalyzer::new(
        Arc::new(UnavailableRepository),
        Arc::new(FailingPriceFeed),
        SourcingConfig::default(),
    );

    assert!(matches!(
        analyzer.regions(),
        Err(SourcingServiceError::Repository(_))
    ));
}
