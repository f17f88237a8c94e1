use serde::{Deserialize, Serialize};

use super::super::domain::{has_text, Cooperative};
use super::primitives::{clamp, threshold_score, ThresholdTable};

pub const LICENSE_POINTS: f64 = 25.0;
pub const SENASA_POINTS: f64 = 25.0;
pub const DOCUMENT_COORDINATOR_POINTS: f64 = 10.0;

pub const CERTIFICATION_TABLE: ThresholdTable =
    ThresholdTable::at_least(&[(3.0, 25.0), (2.0, 20.0), (1.0, 15.0)], 5.0);

pub const CUSTOMS_HISTORY_TABLE: ThresholdTable =
    ThresholdTable::at_most(&[(0.0, 15.0), (2.0, 10.0), (5.0, 5.0)], 0.0);

/// Legal and logistics export preparedness (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReadinessCheck {
    pub score: f64,
    pub license_valid: bool,
    pub senasa_registered: bool,
    pub certifications_score: f64,
    pub customs_history_score: f64,
    pub document_coordinator: bool,
    pub details: ExportReadinessDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReadinessDetails {
    pub export_license: Option<String>,
    pub senasa_registered: bool,
    pub certifications: Vec<String>,
    pub customs_issues: u32,
    pub has_document_coordinator: bool,
    pub containers_exported: u32,
}

/// Split a comma-separated certification list into trimmed, lowercased names.
pub fn parse_certifications(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

pub fn check_export_readiness(cooperative: &Cooperative) -> ExportReadinessCheck {
    let export = &cooperative.export_readiness;

    // Presence only: the expiry date is not compared against today.
    let license_valid =
        has_text(&export.export_license_number) && has_text(&export.export_license_expiry);
    let license_score = if license_valid { LICENSE_POINTS } else { 0.0 };

    let senasa_registered = export.senasa_registered.unwrap_or(false);
    let senasa_score = if senasa_registered { SENASA_POINTS } else { 0.0 };

    let certifications = parse_certifications(cooperative.certifications.as_deref());
    let certifications_score = threshold_score(certifications.len() as f64, &CERTIFICATION_TABLE);

    let customs_issues = export.customs_clearance_issues_count.unwrap_or(0);
    let customs_history_score =
        threshold_score(f64::from(customs_issues), &CUSTOMS_HISTORY_TABLE);

    let document_coordinator = export.has_document_coordinator.unwrap_or(false);
    let coordinator_score = if document_coordinator {
        DOCUMENT_COORDINATOR_POINTS
    } else {
        0.0
    };

    let total = license_score
        + senasa_score
        + certifications_score
        + customs_history_score
        + coordinator_score;

    ExportReadinessCheck {
        score: clamp(total, 0.0, 100.0),
        license_valid,
        senasa_registered,
        certifications_score,
        customs_history_score,
        document_coordinator,
        details: ExportReadinessDetails {
            export_license: export.export_license_number.clone(),
            senasa_registered,
            certifications,
            customs_issues,
            has_document_coordinator: document_coordinator,
            containers_exported: export.containers_exported_lifetime.unwrap_or(0),
        },
    }
}
