//! Core data models for platscore
//!
//! These models are used throughout the codebase for representing
//! input packages, resolved repositories, and scoring results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A package row from the input spreadsheet.
///
/// Raw metric values are whatever scale the upstream analysis tooling
/// produced; normalization to [0, 10] happens in the scoring module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    /// CVE Analysis Safety
    pub cve_safety: f64,
    /// Static Code Analysis Status
    pub static_analysis: f64,
    /// Dynamic Program Analysis Status
    pub dynamic_analysis: f64,
    /// Code Coverage
    pub code_coverage: f64,
}

/// Upstream repository identity resolved from the search API.
///
/// All fields are absent together when the lookup failed or found nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRepository {
    pub full_name: Option<String>,
    pub url: Option<String>,
    pub stars: Option<u64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ResolvedRepository {
    /// The all-absent value used for failed or empty lookups.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.full_name.is_some()
    }
}

/// Where a criticality value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriticalitySource {
    /// Star-tier estimate from the resolved repository.
    Heuristic,
    /// Rescaled score from the external criticality tool.
    Authoritative,
}

impl std::fmt::Display for CriticalitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriticalitySource::Heuristic => write!(f, "heuristic"),
            CriticalitySource::Authoritative => write!(f, "authoritative"),
        }
    }
}

/// A criticality value on the [0, 10] scale.
///
/// Starts as a heuristic estimate and may be upgraded once during
/// reconciliation; it is never downgraded back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criticality {
    pub score: f64,
    pub source: CriticalitySource,
}

impl Criticality {
    pub fn heuristic(score: f64) -> Self {
        Self {
            score,
            source: CriticalitySource::Heuristic,
        }
    }

    pub fn authoritative(score: f64) -> Self {
        Self {
            score,
            source: CriticalitySource::Authoritative,
        }
    }
}

/// Per-package outcome of repository resolution and criticality estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageAssessment {
    pub package: String,
    pub repo: ResolvedRepository,
    pub criticality: Criticality,
}

/// Metric values after min-max normalization to [0, 10].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    pub cve_safety: f64,
    pub static_analysis: f64,
    pub dynamic_analysis: f64,
    pub code_coverage: f64,
}

/// A fully scored package: raw input, normalized metrics, assessment,
/// and the weighted composite security score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPackage {
    pub record: PackageRecord,
    pub normalized: NormalizedMetrics,
    pub assessment: PackageAssessment,
    pub security_score: f64,
}

/// Platform-level aggregates over composite scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSummary {
    /// Mean over all packages.
    pub mean: f64,
    /// Mean over packages with criticality >= 8.0; None when no package qualifies.
    pub critical_mean: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Counters and extremes from the repository search phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Unique base keys looked up (cache hits excluded).
    pub unique_lookups: usize,
    /// Lookups that produced a repository with a star count.
    pub succeeded: usize,
    /// Lookups that errored or found nothing.
    pub failed: usize,
    /// (full_name, stars) of the most-starred resolved repository.
    pub most_starred: Option<(String, u64)>,
    /// (full_name, stars) of the least-starred resolved repository.
    pub least_starred: Option<(String, u64)>,
}
