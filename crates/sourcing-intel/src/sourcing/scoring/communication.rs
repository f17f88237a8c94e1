use serde::{Deserialize, Serialize};

use super::super::domain::{has_text, Cooperative};
use super::primitives::{clamp, threshold_score, ThresholdTable};

/// Assumed response time when none has been measured; lands on the slowest band.
pub const UNMEASURED_RESPONSE_HOURS: f64 = 999.0;

pub const RESPONSE_TIME_TABLE: ThresholdTable =
    ThresholdTable::at_most(&[(24.0, 25.0), (48.0, 20.0), (72.0, 10.0)], 5.0);

pub const MEETING_RELIABILITY_TABLE: ThresholdTable =
    ThresholdTable::at_most(&[(0.0, 15.0), (1.0, 12.0), (3.0, 8.0)], 3.0);

pub const ENGLISH_POINTS: f64 = 15.0;
pub const GERMAN_POINTS: f64 = 10.0;
/// Flat credit when neither buyer language is spoken (Spanish-only operations).
pub const SPANISH_ONLY_POINTS: f64 = 5.0;

pub const WEBSITE_POINTS: f64 = 8.0;
pub const SOCIAL_CHANNEL_POINTS: f64 = 4.0;
pub const PHOTO_POINTS: f64 = 8.0;
pub const CUPPING_SCORE_POINTS: f64 = 7.0;

/// Responsiveness and digital presence (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationQuality {
    pub score: f64,
    pub response_time_score: f64,
    pub language_score: f64,
    pub digital_presence_score: f64,
    pub documentation_score: f64,
    pub meeting_reliability_score: f64,
}

fn speaks(languages: &[String], language: &str) -> bool {
    languages
        .iter()
        .any(|spoken| spoken.trim().eq_ignore_ascii_case(language))
}

pub fn assess_communication_quality(cooperative: &Cooperative) -> CommunicationQuality {
    let metrics = &cooperative.communication_metrics;
    let footprint = &cooperative.digital_footprint;

    let response_hours = metrics
        .avg_email_response_time_hours
        .unwrap_or(UNMEASURED_RESPONSE_HOURS);
    let response_time_score = threshold_score(response_hours, &RESPONSE_TIME_TABLE);

    let mut language_score = 0.0;
    if speaks(&metrics.languages_spoken, "english") {
        language_score += ENGLISH_POINTS;
    }
    if speaks(&metrics.languages_spoken, "german") {
        language_score += GERMAN_POINTS;
    }
    if language_score == 0.0 {
        language_score = SPANISH_ONLY_POINTS;
    }

    let mut digital_presence_score = 0.0;
    if has_text(&cooperative.website) {
        digital_presence_score += WEBSITE_POINTS;
    }
    if has_text(&footprint.facebook_url) {
        digital_presence_score += SOCIAL_CHANNEL_POINTS;
    }
    if has_text(&footprint.instagram_url) {
        digital_presence_score += SOCIAL_CHANNEL_POINTS;
    }
    if metrics.whatsapp_business.unwrap_or(false) {
        digital_presence_score += SOCIAL_CHANNEL_POINTS;
    }

    let mut documentation_score = 0.0;
    if metrics.provides_photos_regularly.unwrap_or(false) {
        documentation_score += PHOTO_POINTS;
    }
    if metrics.provides_cupping_scores.unwrap_or(false) {
        documentation_score += CUPPING_SCORE_POINTS;
    }

    let missed_meetings = metrics.missed_meetings_count.unwrap_or(0);
    let meeting_reliability_score =
        threshold_score(f64::from(missed_meetings), &MEETING_RELIABILITY_TABLE);

    let total = response_time_score
        + language_score
        + digital_presence_score
        + documentation_score
        + meeting_reliability_score;

    CommunicationQuality {
        score: clamp(total, 0.0, 100.0),
        response_time_score,
        language_score,
        digital_presence_score,
        documentation_score,
        meeting_reliability_score,
    }
}
