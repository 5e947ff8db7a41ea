//! GitHub search API client — sync HTTP via ureq (no tokio needed)

use crate::github::{SearchError, SearchResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

const SEARCH_URL: &str = "https://api.github.com/search/repositories";
const USER_AGENT: &str = concat!("platscore/", env!("CARGO_PKG_VERSION"));

/// Results page size. The relevance scan only ever needs the top few
/// candidates, so a small page keeps search quota usage down.
const PER_PAGE: u8 = 5;

/// A repository candidate from a search results page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoCandidate {
    pub full_name: String,
    pub html_url: String,
    pub stargazers_count: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepoCandidate>,
}

/// Abstraction over the repository search endpoint.
///
/// An `Ok` with an empty vector means the search succeeded but matched
/// nothing; transport and HTTP failures come back as [`SearchError`].
pub trait SearchClient {
    fn search(&self, query: &str) -> SearchResult<Vec<RepoCandidate>>;
}

/// Live client against api.github.com.
pub struct GithubClient {
    agent: ureq::Agent,
    token: String,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // We handle status codes ourselves
        .timeout_global(Some(std::time::Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            agent: make_agent(),
            token: token.into(),
        }
    }
}

impl SearchClient for GithubClient {
    fn search(&self, query: &str) -> SearchResult<Vec<RepoCandidate>> {
        // The `+` qualifier separators must not be percent-encoded, so the
        // query string is assembled by hand rather than via query params.
        let url = format!("{SEARCH_URL}?q={query}+in:name,description&per_page={PER_PAGE}");
        debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(SearchError::Status { status });
        }

        let body: SearchResponse = response
            .into_body()
            .read_json()
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(body.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_deserialization() {
        let json = r#"{
            "full_name": "raspberrypi/linux",
            "html_url": "https://github.com/raspberrypi/linux",
            "stargazers_count": 12000,
            "updated_at": "2026-01-15T12:00:00Z",
            "name": "linux",
            "description": "Kernel source tree for Raspberry Pi products"
        }"#;
        let c: RepoCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(c.full_name, "raspberrypi/linux");
        assert_eq!(c.stargazers_count, 12000);
        assert!(c.updated_at.is_some());
    }

    #[test]
    fn test_candidate_optional_fields_default() {
        // Search items frequently carry null name/description.
        let json = r#"{
            "full_name": "foo/bar",
            "html_url": "https://github.com/foo/bar",
            "stargazers_count": 3
        }"#;
        let c: RepoCandidate = serde_json::from_str(json).unwrap();
        assert!(c.name.is_none());
        assert!(c.description.is_none());
        assert!(c.updated_at.is_none());
    }

    #[test]
    fn test_response_missing_items_is_empty() {
        let body: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
    }
}
