//! Repository manifest for the criticality tool
//!
//! A declarative YAML list of the unique resolved repository identities:
//!
//! ```yaml
//! repos:
//! - repo: mirror/busybox
//! - repo: raspberrypi/linux
//! ```

use crate::models::PackageAssessment;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct RepoManifest {
    repos: Vec<RepoEntry>,
}

#[derive(Serialize)]
struct RepoEntry {
    repo: String,
}

fn unique_repos(assessments: &[PackageAssessment]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut repos = Vec::new();
    for assessment in assessments {
        if let Some(full_name) = assessment.repo.full_name.as_deref() {
            if seen.insert(full_name.to_string()) {
                repos.push(full_name.to_string());
            }
        }
    }
    repos
}

/// Write the manifest of unique resolved repositories, in first-seen order.
/// Returns the number of repositories written.
pub fn write_manifest(path: &Path, assessments: &[PackageAssessment]) -> Result<usize> {
    let repos = unique_repos(assessments);
    let manifest = RepoManifest {
        repos: repos.iter().map(|r| RepoEntry { repo: r.clone() }).collect(),
    };

    let yaml = serde_yaml::to_string(&manifest).context("Failed to serialize repo manifest")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write repo manifest: {}", path.display()))?;

    info!("Wrote {} repositories to {}", repos.len(), path.display());
    Ok(repos.len())
}
