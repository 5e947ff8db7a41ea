//! Package metrics spreadsheet reader
//!
//! Reads PackageRecord rows from the named worksheet. Malformed rows (empty
//! package name, non-numeric metric cells) are skipped with a warning rather
//! than aborting the run.

use crate::models::PackageRecord;
use anyhow::{bail, Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;
use tracing::{debug, warn};

pub const COL_PACKAGE_NAME: &str = "Package Name";
pub const COL_CVE_SAFETY: &str = "CVE Analysis Safety";
pub const COL_STATIC: &str = "Static Code Analysis Status";
pub const COL_DYNAMIC: &str = "Dynamic Program Analysis Status";
pub const COL_COVERAGE: &str = "Code Coverage";

/// Column positions located from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: usize,
    cve_safety: usize,
    static_analysis: usize,
    dynamic_analysis: usize,
    code_coverage: usize,
}

fn cell_text(cell: &Data) -> Option<&str> {
    match cell {
        Data::String(s) => Some(s.trim()),
        _ => None,
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn header_indices(header: &[Data]) -> Result<Columns> {
    let find = |wanted: &str| -> Result<usize> {
        header
            .iter()
            .position(|cell| cell_text(cell) == Some(wanted))
            .with_context(|| format!("Input sheet is missing column '{wanted}'"))
    };

    Ok(Columns {
        name: find(COL_PACKAGE_NAME)?,
        cve_safety: find(COL_CVE_SAFETY)?,
        static_analysis: find(COL_STATIC)?,
        dynamic_analysis: find(COL_DYNAMIC)?,
        code_coverage: find(COL_COVERAGE)?,
    })
}

fn record_from_row(row: &[Data], columns: &Columns) -> Option<PackageRecord> {
    let name = cell_text(row.get(columns.name)?)?;
    if name.is_empty() {
        return None;
    }

    Some(PackageRecord {
        name: name.to_string(),
        cve_safety: cell_number(row.get(columns.cve_safety)?)?,
        static_analysis: cell_number(row.get(columns.static_analysis)?)?,
        dynamic_analysis: cell_number(row.get(columns.dynamic_analysis)?)?,
        code_coverage: cell_number(row.get(columns.code_coverage)?)?,
    })
}

/// Load package rows from `path`. When `sheet` is None the first worksheet
/// is used.
pub fn load_packages(path: &Path, sheet: Option<&str>) -> Result<Vec<PackageRecord>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open input spreadsheet: {}", path.display()))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .context("Input spreadsheet has no worksheets")?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read worksheet '{sheet_name}'"))?;

    let mut rows = range.rows();
    let header = rows.next().context("Input worksheet is empty")?;
    let columns = header_indices(header)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        match record_from_row(row, &columns) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} unparseable rows in '{}'", skipped, sheet_name);
    }
    debug!("Loaded {} packages from '{}'", records.len(), sheet_name);

    if records.is_empty() {
        bail!("No usable package rows in worksheet '{sheet_name}'");
    }

    Ok(records)
}
