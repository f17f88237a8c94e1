use super::common::*;
use crate::sourcing::domain::{EconomicData, Region};
use crate::sourcing::price_feed::{
    resolve_benchmark, BenchmarkSource, PriceFeed, ResolvedBenchmark, StaticPriceFeed,
};
use crate::sourcing::scoring::benchmark_pricing;

#[test]
fn missing_cooperative_price_is_neutral() {
    let benchmark = resolve_benchmark(None, &StaticPriceFeed, 5.10);
    let result = benchmark_pricing(&empty_cooperative(), benchmark);

    assert_eq!(result.score, 50.0);
    assert_eq!(result.cooperative_price, None);
    assert_eq!(result.difference_pct, None);
    assert_eq!(result.regional_benchmark, Some(5.10));
    assert_eq!(
        result.details.benchmark_source,
        Some(BenchmarkSource::Fallback)
    );
}

#[test]
fn missing_benchmark_is_neutral() {
    let result = benchmark_pricing(&priced_cooperative(5.0), None);

    assert_eq!(result.score, 50.0);
    assert_eq!(result.regional_benchmark, None);
    assert_eq!(result.difference_pct, None);
}

#[test]
fn deviation_is_penalized_in_both_directions() {
    let reference = Some(ResolvedBenchmark {
        price: 5.0,
        source: BenchmarkSource::Region,
    });

    let above = benchmark_pricing(&priced_cooperative(6.0), reference);
    let below = benchmark_pricing(&priced_cooperative(4.0), reference);

    assert_close(above.difference_pct.expect("difference"), 20.0);
    assert_close(above.score, 60.0);
    assert_close(below.difference_pct.expect("difference"), -20.0);
    assert_close(below.score, 60.0);
}

#[test]
fn large_deviation_floors_at_zero() {
    let reference = Some(ResolvedBenchmark {
        price: 5.0,
        source: BenchmarkSource::Region,
    });

    assert_eq!(benchmark_pricing(&priced_cooperative(9.0), reference).score, 0.0);
}

#[test]
fn zero_cooperative_price_counts_as_missing() {
    let reference = Some(ResolvedBenchmark {
        price: 5.0,
        source: BenchmarkSource::Region,
    });
    let result = benchmark_pricing(&priced_cooperative(0.0), reference);

    assert_eq!(result.score, 50.0);
    assert_eq!(result.cooperative_price, None);
}

#[test]
fn region_price_wins_over_feed_and_fallback() {
    let cajamarca = region("Cajamarca");

    let resolved = resolve_benchmark(Some(&cajamarca), &FixedPriceFeed(4.0), 5.10)
        .expect("benchmark resolved");

    assert_eq!(resolved.price, 5.30);
    assert_eq!(resolved.source, BenchmarkSource::Region);
}

#[test]
fn zero_region_price_falls_through_to_live_feed() {
    let region = Region {
        name: "Piura".to_string(),
        economic_data: Some(EconomicData {
            avg_fob_price: Some(0.0),
            ..EconomicData::default()
        }),
        ..Region::default()
    };

    let resolved =
        resolve_benchmark(Some(&region), &FixedPriceFeed(4.70), 5.10).expect("benchmark");

    assert_eq!(resolved.price, 4.70);
    assert_eq!(resolved.source, BenchmarkSource::PriceFeed);
}

#[test]
fn feed_failure_uses_configured_fallback() {
    let resolved = resolve_benchmark(None, &FailingPriceFeed, 5.10).expect("fallback");

    assert_eq!(resolved.price, 5.10);
    assert_eq!(resolved.source, BenchmarkSource::Fallback);

    let result = benchmark_pricing(&priced_cooperative(5.05), Some(resolved));
    assert_close(result.score, 100.0 - (0.05 / 5.10 * 100.0) * 2.0);
}

#[test]
fn static_feed_reports_reference_prices_only() {
    let snapshot = StaticPriceFeed.current_prices().expect("stub snapshot");

    assert!(!snapshot.available);
    assert_eq!(snapshot.live_fob(), None);
    assert_eq!(snapshot.fallback_prices["peru_fob_benchmark"].price, 4.85);
    assert_eq!(snapshot.fallback_prices["arabica_mild"].unit, "USD/lb");
}
