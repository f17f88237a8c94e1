use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete sourcing verdict derived from the composite total and the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "HIGHLY RECOMMENDED")]
    HighlyRecommended,
    #[serde(rename = "RECOMMENDED")]
    Recommended,
    #[serde(rename = "CONSIDER WITH CAUTION")]
    ConsiderWithCaution,
    #[serde(rename = "NOT RECOMMENDED")]
    NotRecommended,
    #[serde(rename = "MONITOR CLOSELY")]
    MonitorClosely,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "HIGHLY RECOMMENDED",
            Recommendation::Recommended => "RECOMMENDED",
            Recommendation::ConsiderWithCaution => "CONSIDER WITH CAUTION",
            Recommendation::NotRecommended => "NOT RECOMMENDED",
            Recommendation::MonitorClosely => "MONITOR CLOSELY",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tiers are checked in order and the first match wins; the ranges overlap, so the order is
/// part of the contract.
pub fn recommend(total_score: f64, risk_score: f64) -> Recommendation {
    if total_score >= 80.0 && risk_score < 30.0 {
        return Recommendation::HighlyRecommended;
    }

    if total_score >= 70.0 && risk_score < 40.0 {
        return Recommendation::Recommended;
    }

    if total_score >= 60.0 && risk_score < 50.0 {
        return Recommendation::ConsiderWithCaution;
    }

    if total_score < 60.0 || risk_score >= 60.0 {
        return Recommendation::NotRecommended;
    }

    Recommendation::MonitorClosely
}
