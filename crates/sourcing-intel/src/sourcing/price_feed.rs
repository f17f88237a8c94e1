use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::Region;

/// Market-data collaborator consulted when a region carries no FOB price of its own.
pub trait PriceFeed: Send + Sync {
    fn current_prices(&self) -> Result<PriceFeedSnapshot, PriceFeedError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFeedSnapshot {
    pub source: String,
    pub available: bool,
    pub peru_fob_avg_usd_per_kg: Option<f64>,
    #[serde(default)]
    pub fallback_prices: BTreeMap<String, FallbackPrice>,
    #[serde(default)]
    pub note: Option<String>,
}

impl PriceFeedSnapshot {
    /// Live Peru FOB average, if the feed reported a usable one.
    pub fn live_fob(&self) -> Option<f64> {
        if !self.available {
            return None;
        }
        self.peru_fob_avg_usd_per_kg
            .filter(|price| price.is_finite() && *price > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPrice {
    pub price: f64,
    pub unit: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PriceFeedError {
    #[error("price feed unavailable: {0}")]
    Unavailable(String),
    #[error("price feed returned malformed data: {0}")]
    Malformed(String),
}

/// ICO composite stub used until a licensed market-data source is wired in.
///
/// Never reports a live FOB value, so benchmark resolution always falls through to the
/// configured fallback price.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceFeed;

impl PriceFeed for StaticPriceFeed {
    fn current_prices(&self) -> Result<PriceFeedSnapshot, PriceFeedError> {
        let mut fallback_prices = BTreeMap::new();
        fallback_prices.insert(
            "arabica_mild".to_string(),
            FallbackPrice {
                price: 2.10,
                unit: "USD/lb".to_string(),
            },
        );
        fallback_prices.insert(
            "peru_fob_benchmark".to_string(),
            FallbackPrice {
                price: 4.85,
                unit: "USD/kg".to_string(),
            },
        );

        Ok(PriceFeedSnapshot {
            source: "ICO".to_string(),
            available: false,
            peru_fob_avg_usd_per_kg: None,
            fallback_prices,
            note: Some(
                "ICO composite prices require a subscription; showing reference values"
                    .to_string(),
            ),
        })
    }
}

/// Where the price used for comparison came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkSource {
    Region,
    PriceFeed,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBenchmark {
    pub price: f64,
    pub source: BenchmarkSource,
}

/// Picks the benchmark price: region FOB, then the live feed, then `fallback`.
///
/// A non-positive `fallback` resolves to `None`, which the price assessor scores as neutral.
pub fn resolve_benchmark<P>(
    region: Option<&Region>,
    feed: &P,
    fallback: f64,
) -> Option<ResolvedBenchmark>
where
    P: PriceFeed + ?Sized,
{
    if let Some(price) = region.and_then(Region::avg_fob_price) {
        return Some(ResolvedBenchmark {
            price,
            source: BenchmarkSource::Region,
        });
    }

    match feed.current_prices() {
        Ok(snapshot) => {
            if let Some(price) = snapshot.live_fob() {
                return Some(ResolvedBenchmark {
                    price,
                    source: BenchmarkSource::PriceFeed,
                });
            }
        }
        Err(error) => {
            warn!(%error, "price feed failed; using configured fallback benchmark");
        }
    }

    (fallback.is_finite() && fallback > 0.0).then_some(ResolvedBenchmark {
        price: fallback,
        source: BenchmarkSource::Fallback,
    })
}
