//! Three-sheet xlsx report writer
//!
//! Sheet 1: per-package raw metrics, normalized metrics, resolved repository
//! and criticality, composite score. Sheet 2: platform aggregates. Sheet 3:
//! repository search statistics.

use crate::models::{PlatformSummary, ScoredPackage, SearchStats};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

const NOT_AVAILABLE: &str = "N/A";

fn write_header(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

fn write_detailed_sheet(
    sheet: &mut Worksheet,
    packages: &[ScoredPackage],
    header_format: &Format,
) -> Result<()> {
    sheet.set_name("Detailed Scores")?;
    write_header(
        sheet,
        &[
            "Package Name",
            "CVE Analysis Safety",
            "Static Code Analysis Status",
            "Dynamic Program Analysis Status",
            "Code Coverage",
            "CVE Analysis Safety (Norm)",
            "Static Code Analysis Status (Norm)",
            "Dynamic Program Analysis Status (Norm)",
            "Code Coverage (Norm)",
            "Repository",
            "Repository URL",
            "Stars",
            "Last Updated",
            "Criticality",
            "Criticality Source",
            "Security Score",
        ],
        header_format,
    )?;

    for (i, package) in packages.iter().enumerate() {
        let row = (i + 1) as u32;
        let record = &package.record;
        let repo = &package.assessment.repo;

        sheet.write_string(row, 0, record.name.as_str())?;
        sheet.write_number(row, 1, record.cve_safety)?;
        sheet.write_number(row, 2, record.static_analysis)?;
        sheet.write_number(row, 3, record.dynamic_analysis)?;
        sheet.write_number(row, 4, record.code_coverage)?;
        sheet.write_number(row, 5, package.normalized.cve_safety)?;
        sheet.write_number(row, 6, package.normalized.static_analysis)?;
        sheet.write_number(row, 7, package.normalized.dynamic_analysis)?;
        sheet.write_number(row, 8, package.normalized.code_coverage)?;
        sheet.write_string(row, 9, repo.full_name.as_deref().unwrap_or(NOT_AVAILABLE))?;
        sheet.write_string(row, 10, repo.url.as_deref().unwrap_or(NOT_AVAILABLE))?;
        match repo.stars {
            Some(stars) => sheet.write_number(row, 11, stars as f64)?,
            None => sheet.write_string(row, 11, NOT_AVAILABLE)?,
        };
        match repo.last_updated {
            Some(updated) => sheet.write_string(row, 12, updated.to_rfc3339())?,
            None => sheet.write_string(row, 12, NOT_AVAILABLE)?,
        };
        sheet.write_number(row, 13, package.assessment.criticality.score)?;
        sheet.write_string(row, 14, package.assessment.criticality.source.to_string())?;
        sheet.write_number(row, 15, package.security_score)?;
    }

    Ok(())
}

fn write_aggregates_sheet(
    sheet: &mut Worksheet,
    summary: &PlatformSummary,
    header_format: &Format,
) -> Result<()> {
    sheet.set_name("Platform Aggregates")?;
    write_header(sheet, &["Aggregate", "Score"], header_format)?;

    sheet.write_string(1, 0, "Platform mean score")?;
    sheet.write_number(1, 1, summary.mean)?;

    sheet.write_string(2, 0, "Mean of critical packages (C >= 8)")?;
    match summary.critical_mean {
        Some(value) => sheet.write_number(2, 1, value)?,
        None => sheet.write_string(2, 1, NOT_AVAILABLE)?,
    };

    sheet.write_string(3, 0, "Minimum score (weakest package)")?;
    sheet.write_number(3, 1, summary.min)?;

    sheet.write_string(4, 0, "Maximum score (strongest package)")?;
    sheet.write_number(4, 1, summary.max)?;

    Ok(())
}

fn write_stats_sheet(
    sheet: &mut Worksheet,
    stats: &SearchStats,
    header_format: &Format,
) -> Result<()> {
    sheet.set_name("Search Statistics")?;
    write_header(sheet, &["Metric", "Value"], header_format)?;

    sheet.write_string(1, 0, "Unique packages searched")?;
    sheet.write_number(1, 1, stats.unique_lookups as f64)?;

    sheet.write_string(2, 0, "Successful lookups")?;
    sheet.write_number(2, 1, stats.succeeded as f64)?;

    sheet.write_string(3, 0, "Failed lookups")?;
    sheet.write_number(3, 1, stats.failed as f64)?;

    sheet.write_string(4, 0, "Most-starred repository")?;
    sheet.write_string(
        4,
        1,
        stats
            .most_starred
            .as_ref()
            .map(|(name, _)| name.as_str())
            .unwrap_or(NOT_AVAILABLE),
    )?;

    sheet.write_string(5, 0, "Least-starred repository")?;
    sheet.write_string(
        5,
        1,
        stats
            .least_starred
            .as_ref()
            .map(|(name, _)| name.as_str())
            .unwrap_or(NOT_AVAILABLE),
    )?;

    sheet.write_string(6, 0, "Maximum stars")?;
    match stats.most_starred.as_ref() {
        Some((_, stars)) => sheet.write_number(6, 1, *stars as f64)?,
        None => sheet.write_string(6, 1, NOT_AVAILABLE)?,
    };

    sheet.write_string(7, 0, "Minimum stars")?;
    match stats.least_starred.as_ref() {
        Some((_, stars)) => sheet.write_number(7, 1, *stars as f64)?,
        None => sheet.write_string(7, 1, NOT_AVAILABLE)?,
    };

    Ok(())
}

/// Write the full report workbook to `path`.
pub fn write_report(
    path: &Path,
    packages: &[ScoredPackage],
    summary: &PlatformSummary,
    stats: &SearchStats,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    write_detailed_sheet(workbook.add_worksheet(), packages, &header_format)?;
    write_aggregates_sheet(workbook.add_worksheet(), summary, &header_format)?;
    write_stats_sheet(workbook.add_worksheet(), stats, &header_format)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Criticality, NormalizedMetrics, PackageAssessment, PackageRecord, ResolvedRepository,
    };

    fn sample_packages() -> Vec<ScoredPackage> {
        vec![ScoredPackage {
            record: PackageRecord {
                name: "busybox".to_string(),
                cve_safety: 4.0,
                static_analysis: 1.0,
                dynamic_analysis: 0.0,
                code_coverage: 55.0,
            },
            normalized: NormalizedMetrics {
                cve_safety: 10.0,
                static_analysis: 5.0,
                dynamic_analysis: 0.0,
                code_coverage: 7.5,
            },
            assessment: PackageAssessment {
                package: "busybox".to_string(),
                repo: ResolvedRepository {
                    full_name: Some("mirror/busybox".to_string()),
                    url: Some("https://github.com/mirror/busybox".to_string()),
                    stars: Some(800),
                    last_updated: None,
                },
                criticality: Criticality::heuristic(7.0),
            },
            security_score: 6.11,
        }]
    }

    #[test]
    fn test_write_report_produces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let summary = PlatformSummary {
            mean: 6.11,
            critical_mean: None,
            min: 6.11,
            max: 6.11,
        };
        let stats = SearchStats {
            unique_lookups: 1,
            succeeded: 1,
            failed: 0,
            most_starred: Some(("mirror/busybox".to_string(), 800)),
            least_starred: Some(("mirror/busybox".to_string(), 800)),
        };

        write_report(&path, &sample_packages(), &summary, &stats).unwrap();
        assert!(path.exists());
        assert!(path.metadata().unwrap().len() > 0);
    }
}
