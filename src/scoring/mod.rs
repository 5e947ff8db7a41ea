//! Composite security scoring
//!
//! # Formula
//!
//! ```text
//! score = 0.30 × criticality
//!       + 0.25 × cve_safety(norm)
//!       + 0.15 × static_analysis(norm)
//!       + 0.15 × dynamic_analysis(norm)
//!       + 0.15 × code_coverage(norm)
//! ```
//!
//! Raw metrics are min-max normalized to [0, 10] across the whole platform
//! before weighting; criticality already lives on that scale. Values are
//! rounded to two decimals at each published step.

use crate::models::{
    NormalizedMetrics, PackageAssessment, PackageRecord, PlatformSummary, ScoredPackage,
};

pub const WEIGHT_CRITICALITY: f64 = 0.30;
pub const WEIGHT_CVE_SAFETY: f64 = 0.25;
pub const WEIGHT_STATIC: f64 = 0.15;
pub const WEIGHT_DYNAMIC: f64 = 0.15;
pub const WEIGHT_COVERAGE: f64 = 0.15;

/// Packages with criticality at or above this are "critical" for the
/// platform aggregate.
pub const CRITICAL_THRESHOLD: f64 = 8.0;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Min-max normalize a column onto [0, 10], rounded to two decimals.
/// A constant column normalizes to all zeros.
pub fn normalize_column(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !(max > min) {
        return vec![0.0; values.len()];
    }

    values
        .iter()
        .map(|&v| round2((v - min) / (max - min) * 10.0))
        .collect()
}

/// Weighted composite over a criticality value and normalized metrics.
pub fn composite(criticality: f64, metrics: &NormalizedMetrics) -> f64 {
    round2(
        WEIGHT_CRITICALITY * criticality
            + WEIGHT_CVE_SAFETY * metrics.cve_safety
            + WEIGHT_STATIC * metrics.static_analysis
            + WEIGHT_DYNAMIC * metrics.dynamic_analysis
            + WEIGHT_COVERAGE * metrics.code_coverage,
    )
}

/// Normalize each metric column across the platform and compute the
/// composite score per package. `records` and `assessments` are
/// index-aligned, as produced by the pipeline.
pub fn score_packages(
    records: &[PackageRecord],
    assessments: &[PackageAssessment],
) -> Vec<ScoredPackage> {
    debug_assert_eq!(records.len(), assessments.len());

    let cve = normalize_column(&records.iter().map(|r| r.cve_safety).collect::<Vec<_>>());
    let stat = normalize_column(&records.iter().map(|r| r.static_analysis).collect::<Vec<_>>());
    let dynamic =
        normalize_column(&records.iter().map(|r| r.dynamic_analysis).collect::<Vec<_>>());
    let coverage =
        normalize_column(&records.iter().map(|r| r.code_coverage).collect::<Vec<_>>());

    records
        .iter()
        .zip(assessments)
        .enumerate()
        .map(|(i, (record, assessment))| {
            let normalized = NormalizedMetrics {
                cve_safety: cve[i],
                static_analysis: stat[i],
                dynamic_analysis: dynamic[i],
                code_coverage: coverage[i],
            };
            ScoredPackage {
                record: record.clone(),
                normalized,
                security_score: composite(assessment.criticality.score, &normalized),
                assessment: assessment.clone(),
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| round2(sum / count as f64))
}

/// Platform-level aggregates over the composite scores.
pub fn summarize(packages: &[ScoredPackage]) -> Option<PlatformSummary> {
    let overall = mean(packages.iter().map(|p| p.security_score))?;

    let critical_mean = mean(
        packages
            .iter()
            .filter(|p| p.assessment.criticality.score >= CRITICAL_THRESHOLD)
            .map(|p| p.security_score),
    );

    let min = packages
        .iter()
        .map(|p| p.security_score)
        .fold(f64::INFINITY, f64::min);
    let max = packages
        .iter()
        .map(|p| p.security_score)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(PlatformSummary {
        mean: overall,
        critical_mean,
        min: round2(min),
        max: round2(max),
    })
}
