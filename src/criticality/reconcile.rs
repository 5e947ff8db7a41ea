//! Reconciliation of heuristic estimates against `criticality_score` output
//!
//! The external tool emits a CSV keyed by repository identity with a
//! fractional criticality metric in [0, 1]. Where an authoritative score
//! exists for a resolved repository, it replaces the star-tier estimate for
//! every package sharing that repository; everything else keeps its
//! heuristic value. A missing or unreadable source is a recoverable
//! condition, not an error.

use crate::models::{Criticality, PackageAssessment};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct CriticalityRow {
    repo: String,
    criticality_score: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Load the tool's CSV output into a map from lowercased repository identity
/// to a score rescaled onto the [0, 10] domain of the heuristic estimates.
///
/// Duplicate identities: last write wins, in file order. Rows the CSV reader
/// cannot decode are skipped.
pub fn load_authoritative(path: &Path) -> Result<HashMap<String, f64>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read criticality output: {}", path.display()))?;

    let mut scores = HashMap::new();
    for row in reader.deserialize::<CriticalityRow>() {
        let Ok(row) = row else {
            debug!("Skipping undecodable criticality row");
            continue;
        };
        scores.insert(row.repo.to_lowercase(), round2(row.criticality_score * 10.0));
    }

    info!(
        "Loaded {} authoritative criticality scores from {}",
        scores.len(),
        path.display()
    );
    Ok(scores)
}

/// Replace heuristic estimates with authoritative scores where the resolved
/// repository identity (matched case-insensitively) appears in the map.
///
/// Idempotent: applying the same map twice leaves the assessments unchanged.
pub fn reconcile(assessments: &mut [PackageAssessment], authoritative: &HashMap<String, f64>) {
    if authoritative.is_empty() {
        return;
    }

    let mut upgraded = 0usize;
    for assessment in assessments.iter_mut() {
        let Some(full_name) = assessment.repo.full_name.as_deref() else {
            continue;
        };
        if let Some(&score) = authoritative.get(&full_name.to_lowercase()) {
            assessment.criticality = Criticality::authoritative(score);
            upgraded += 1;
        }
    }

    info!("Reconciled {} package criticality values", upgraded);
}
