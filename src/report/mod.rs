//! Input and output artifacts
//!
//! - `input` — package metrics from the platform analysis spreadsheet
//! - `workbook` — three-sheet xlsx report
//! - `chart` — score distribution histogram (PNG)
//! - `repo_list` — YAML repository manifest for the criticality tool

pub mod chart;
pub mod input;
pub mod repo_list;
pub mod workbook;

pub use chart::render_histogram;
pub use input::load_packages;
pub use repo_list::write_manifest;
pub use workbook::write_report;
