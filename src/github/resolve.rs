//! Candidate selection and lookup resolution
//!
//! Selection is a pure scan over the candidates in the order the search
//! endpoint returned them: the first candidate whose name or description
//! mentions an embedded-ecosystem keyword wins; otherwise the endpoint's own
//! top-ranked result is used as a fallback.

use crate::github::{RepoCandidate, SearchClient};
use crate::models::ResolvedRepository;
use tracing::{info, warn};

/// Domain terms identifying embedded-Linux / BSP ecosystems. A candidate
/// mentioning any of these is preferred over better-starred generic hits.
pub const RELEVANCE_VOCABULARY: &[&str] = &[
    "raspberry",
    "yocto",
    "openembedded",
    "meta",
    "agl",
    "embedded",
    "linux",
];

/// Result of scanning a candidate page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// A candidate mentioned a vocabulary keyword.
    Matched(&'a RepoCandidate),
    /// No keyword hit; the endpoint's top result.
    Fallback(&'a RepoCandidate),
    /// Empty candidate page.
    None,
}

/// How a lookup concluded, for logging and search statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Matched,
    Fallback,
    NotFound,
    Error,
}

/// Scan `candidates` in order and pick the first whose name or description
/// contains (case-insensitively) any vocabulary token, falling back to the
/// first candidate when nothing matches.
pub fn select_candidate<'a>(
    candidates: &'a [RepoCandidate],
    vocabulary: &[&str],
) -> Selection<'a> {
    for candidate in candidates {
        let name = candidate.name.as_deref().unwrap_or("").to_lowercase();
        let description = candidate
            .description
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        if vocabulary
            .iter()
            .any(|kw| name.contains(kw) || description.contains(kw))
        {
            return Selection::Matched(candidate);
        }
    }

    match candidates.first() {
        Some(first) => Selection::Fallback(first),
        None => Selection::None,
    }
}

fn to_resolved(candidate: &RepoCandidate) -> ResolvedRepository {
    ResolvedRepository {
        full_name: Some(candidate.full_name.clone()),
        url: Some(candidate.html_url.clone()),
        stars: Some(candidate.stargazers_count),
        last_updated: candidate.updated_at,
    }
}

/// Resolve a search term to a repository identity.
///
/// Exactly one search attempt; every failure mode degrades to the all-absent
/// repository so the caller can continue with the next package.
pub fn resolve(client: &dyn SearchClient, query: &str) -> (ResolvedRepository, LookupOutcome) {
    let candidates = match client.search(query) {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("'{}' search failed: {}", query, e);
            return (ResolvedRepository::absent(), LookupOutcome::Error);
        }
    };

    match select_candidate(&candidates, RELEVANCE_VOCABULARY) {
        Selection::Matched(candidate) => {
            info!(
                "'{}' matched {} ({} stars)",
                query, candidate.full_name, candidate.stargazers_count
            );
            (to_resolved(candidate), LookupOutcome::Matched)
        }
        Selection::Fallback(candidate) => {
            info!(
                "'{}' no keyword match, falling back to top result {} ({} stars)",
                query, candidate.full_name, candidate.stargazers_count
            );
            (to_resolved(candidate), LookupOutcome::Fallback)
        }
        Selection::None => {
            info!("'{}' no repositories found", query);
            (ResolvedRepository::absent(), LookupOutcome::NotFound)
        }
    }
}
