//! GitHub repository search and resolution
//!
//! This module finds the most plausible upstream project for a bare package
//! name: one search call against the GitHub search API, then a keyword-based
//! relevance scan over the returned candidates.
//!
//! The HTTP client lives behind the [`SearchClient`] trait so the resolution
//! logic can be unit tested with a stub instead of a live network dependency.

mod client;
mod resolve;

pub use client::{GithubClient, RepoCandidate, SearchClient};
pub use resolve::{
    resolve, select_candidate, LookupOutcome, Selection, RELEVANCE_VOCABULARY,
};

use thiserror::Error;

/// Errors from a single repository search attempt.
///
/// None of these are fatal to the pipeline; the resolver maps them to an
/// all-absent result and processing continues with the next package.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search returned HTTP {status}")]
    Status { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed search response: {0}")]
    Decode(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
