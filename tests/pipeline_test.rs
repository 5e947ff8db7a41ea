//! End-to-end pipeline tests
//!
//! These drive the library pipeline with a stub search client: resolution,
//! caching, criticality estimation, reconciliation, scoring, and report
//! artifacts — no live network dependency.

use platscore::criticality::reconcile;
use platscore::github::{RepoCandidate, SearchClient, SearchError, SearchResult};
use platscore::models::{CriticalitySource, PackageRecord};
use platscore::pipeline::Pipeline;
use platscore::report;
use platscore::scoring;

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

/// Canned response for one base key.
enum Canned {
    Page(Vec<RepoCandidate>),
    Http(u16),
}

struct StubClient {
    responses: HashMap<String, Canned>,
    calls: RefCell<Vec<String>>,
}

impl StubClient {
    fn new(responses: HashMap<String, Canned>) -> Self {
        Self {
            responses,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SearchClient for StubClient {
    fn search(&self, query: &str) -> SearchResult<Vec<RepoCandidate>> {
        self.calls.borrow_mut().push(query.to_string());
        match self.responses.get(query) {
            Some(Canned::Page(items)) => Ok(items.clone()),
            Some(Canned::Http(status)) => Err(SearchError::Status { status: *status }),
            None => Ok(vec![]),
        }
    }
}

fn candidate(full_name: &str, description: &str, stars: u64) -> RepoCandidate {
    RepoCandidate {
        full_name: full_name.to_string(),
        html_url: format!("https://github.com/{full_name}"),
        stargazers_count: stars,
        updated_at: None,
        name: full_name.rsplit('/').next().map(String::from),
        description: Some(description.to_string()),
    }
}

fn record(name: &str, metrics: [f64; 4]) -> PackageRecord {
    PackageRecord {
        name: name.to_string(),
        cve_safety: metrics[0],
        static_analysis: metrics[1],
        dynamic_analysis: metrics[2],
        code_coverage: metrics[3],
    }
}

#[test]
fn shared_base_key_resolves_once_with_identical_results() {
    let client = StubClient::new(HashMap::from([(
        "foo".to_string(),
        Canned::Page(vec![candidate("upstream/foo", "embedded linux daemon", 12_000)]),
    )]));
    let mut pipeline = Pipeline::new(&client, Duration::ZERO);

    let packages = [
        record("foo-dev", [1.0; 4]),
        record("foo-utils", [2.0; 4]),
    ];
    let assessments = pipeline.assess(&packages);

    assert_eq!(client.calls(), vec!["foo"]);
    assert_eq!(assessments[0].criticality.score, 10.0);
    assert_eq!(assessments[1].criticality.score, 10.0);
    assert_eq!(assessments[0].repo, assessments[1].repo);
    assert_eq!(
        assessments[0].repo.full_name.as_deref(),
        Some("upstream/foo")
    );
    assert_ne!(assessments[0].package, assessments[1].package);
}

#[test]
fn http_error_degrades_to_neutral_criticality() {
    let client = StubClient::new(HashMap::from([("bar".to_string(), Canned::Http(403))]));
    let mut pipeline = Pipeline::new(&client, Duration::ZERO);

    let assessments = pipeline.assess(&[record("bar-libs", [0.0; 4])]);

    let assessment = &assessments[0];
    assert!(assessment.repo.full_name.is_none());
    assert!(assessment.repo.url.is_none());
    assert!(assessment.repo.stars.is_none());
    assert!(assessment.repo.last_updated.is_none());
    assert_eq!(assessment.criticality.score, 6.0);

    let stats = pipeline.stats();
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.succeeded, 0);
}

#[test]
fn no_vocabulary_hit_falls_back_to_top_result() {
    let client = StubClient::new(HashMap::from([(
        "widget".to_string(),
        Canned::Page(vec![
            candidate("one/widget", "a web dashboard", 50),
            candidate("two/widget", "a game engine", 9_000),
            candidate("three/widget", "an orm", 120),
        ]),
    )]));
    let mut pipeline = Pipeline::new(&client, Duration::ZERO);

    let assessments = pipeline.assess(&[record("widget", [0.0; 4])]);

    // Endpoint ordering wins: the first result, not the best-starred one.
    assert_eq!(assessments[0].repo.full_name.as_deref(), Some("one/widget"));
    assert_eq!(assessments[0].criticality.score, 5.0);
}

#[test]
fn authoritative_score_overrides_heuristic_for_all_sharing_packages() {
    let client = StubClient::new(HashMap::from([(
        "busybox".to_string(),
        Canned::Page(vec![candidate("Mirror/BusyBox", "embedded linux toolbox", 800)]),
    )]));
    let mut pipeline = Pipeline::new(&client, Duration::ZERO);

    let packages = [
        record("busybox", [1.0; 4]),
        record("busybox-udhcpc", [1.0; 4]),
    ];
    let mut assessments = pipeline.assess(&packages);
    assert_eq!(assessments[0].criticality.score, 7.0);

    let authoritative = HashMap::from([("mirror/busybox".to_string(), 8.5)]);
    reconcile(&mut assessments, &authoritative);

    for assessment in &assessments {
        assert_eq!(assessment.criticality.score, 8.5);
        assert_eq!(assessment.criticality.source, CriticalitySource::Authoritative);
    }

    // Idempotent: a second application changes nothing.
    let once = assessments.clone();
    reconcile(&mut assessments, &authoritative);
    assert_eq!(assessments, once);
}

#[test]
fn reconciled_criticality_flows_into_the_composite_score() {
    let client = StubClient::new(HashMap::from([(
        "busybox".to_string(),
        Canned::Page(vec![candidate("mirror/busybox", "embedded linux toolbox", 800)]),
    )]));
    let mut pipeline = Pipeline::new(&client, Duration::ZERO);

    let packages = [record("busybox", [3.0; 4])];
    let mut assessments = pipeline.assess(&packages);
    reconcile(
        &mut assessments,
        &HashMap::from([("mirror/busybox".to_string(), 8.5)]),
    );

    let scored = scoring::score_packages(&packages, &assessments);
    // Single package: every normalized metric collapses to 0, so the
    // composite is the criticality weight alone.
    assert_eq!(scored[0].security_score, 2.55);
}

#[test]
fn full_run_produces_report_artifacts() {
    let client = StubClient::new(HashMap::from([
        (
            "alpha".to_string(),
            Canned::Page(vec![candidate("up/alpha", "yocto layer", 20_000)]),
        ),
        ("beta".to_string(), Canned::Http(500)),
    ]));
    let mut pipeline = Pipeline::new(&client, Duration::ZERO);

    let packages = [
        record("alpha", [4.0, 1.0, 0.0, 80.0]),
        record("alpha-dev", [2.0, 0.0, 1.0, 40.0]),
        record("beta", [0.0, 1.0, 0.5, 10.0]),
    ];
    let assessments = pipeline.assess(&packages);
    let stats = pipeline.stats();
    assert_eq!(stats.unique_lookups, 2);

    let scored = scoring::score_packages(&packages, &assessments);
    let summary = scoring::summarize(&scored).unwrap();
    assert!(summary.min <= summary.mean && summary.mean <= summary.max);
    // alpha resolved to 20k stars -> criticality 10 -> critical mean exists.
    assert!(summary.critical_mean.is_some());

    let dir = tempfile::tempdir().unwrap();

    let manifest = dir.path().join("repos.yml");
    let repo_count = report::write_manifest(&manifest, &assessments).unwrap();
    assert_eq!(repo_count, 1);
    let yaml = std::fs::read_to_string(&manifest).unwrap();
    assert!(yaml.contains("repo: up/alpha"));

    let workbook = dir.path().join("report.xlsx");
    report::write_report(&workbook, &scored, &summary, &stats).unwrap();
    assert!(workbook.metadata().unwrap().len() > 0);
}
