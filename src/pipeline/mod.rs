//! Sequential assessment pipeline
//!
//! Walks the package list once, resolving each unique base key through the
//! search client exactly once and fanning the resulting (repository,
//! estimate) pair out to every package that shares the key. A fixed delay is
//! enforced after every real search call to respect the endpoint's rate
//! limit; cache hits skip both the call and the delay.

use crate::criticality::{estimate_from_stars, EstimateOutcome};
use crate::github::{resolve, SearchClient};
use crate::models::{
    Criticality, PackageAssessment, PackageRecord, ResolvedRepository, SearchStats,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// The leading token of a package name, before its first `-`. Variant
/// packages (foo-dev, foo-utils, foo-dbg) share one upstream lookup.
pub fn base_key(name: &str) -> &str {
    name.split('-').next().unwrap_or(name)
}

#[derive(Clone)]
struct CacheEntry {
    repo: ResolvedRepository,
    score: f64,
}

/// Single-pass orchestrator owning the per-base-key lookup cache.
pub struct Pipeline<'a> {
    client: &'a dyn SearchClient,
    delay: Duration,
    cache: HashMap<String, CacheEntry>,
    succeeded: usize,
    failed: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(client: &'a dyn SearchClient, delay: Duration) -> Self {
        Self {
            client,
            delay,
            cache: HashMap::new(),
            succeeded: 0,
            failed: 0,
        }
    }

    /// Assess every package in input order. Output is index-aligned with
    /// `packages`.
    pub fn assess(&mut self, packages: &[PackageRecord]) -> Vec<PackageAssessment> {
        let mut assessments = Vec::with_capacity(packages.len());
        for package in packages {
            assessments.push(self.assess_one(&package.name));
        }
        assessments
    }

    /// Assess a single package, consulting the cache first.
    pub fn assess_one(&mut self, package: &str) -> PackageAssessment {
        let key = base_key(package);

        if let Some(entry) = self.cache.get(key) {
            debug!("'{}' served from cache ('{}')", package, key);
            return PackageAssessment {
                package: package.to_string(),
                repo: entry.repo.clone(),
                criticality: Criticality::heuristic(entry.score),
            };
        }

        let (repo, _outcome) = resolve(self.client, key);
        let (score, estimate) = estimate_from_stars(repo.stars);
        match estimate {
            EstimateOutcome::Success => self.succeeded += 1,
            EstimateOutcome::Failure => self.failed += 1,
        }

        self.cache.insert(
            key.to_string(),
            CacheEntry {
                repo: repo.clone(),
                score,
            },
        );

        // Rate-limit courtesy pause, only after a real search call.
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        PackageAssessment {
            package: package.to_string(),
            repo,
            criticality: Criticality::heuristic(score),
        }
    }

    /// Counters and star extremes over the unique lookups performed so far.
    pub fn stats(&self) -> SearchStats {
        let resolved = self
            .cache
            .values()
            .filter_map(|e| Some((e.repo.full_name.clone()?, e.repo.stars?)));

        let most_starred = resolved.clone().max_by_key(|(_, stars)| *stars);
        let least_starred = resolved.min_by_key(|(_, stars)| *stars);

        SearchStats {
            unique_lookups: self.cache.len(),
            succeeded: self.succeeded,
            failed: self.failed,
            most_starred,
            least_starred,
        }
    }
}
