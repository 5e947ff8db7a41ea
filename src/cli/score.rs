//! Score command — the full scoring pipeline
//!
//! 1. Load package rows from the input spreadsheet       (report::input)
//! 2. Resolve repositories and estimate criticality      (pipeline)
//! 3. Write the repository manifest                      (report::repo_list)
//! 4. Run the criticality tool and reconcile             (criticality)
//! 5. Normalize, weight, aggregate                       (scoring)
//! 6. Write the histogram and the report workbook        (report)

use crate::config::UserConfig;
use crate::criticality::{load_authoritative, reconcile, CriticalityTool};
use crate::github::GithubClient;
use crate::pipeline::Pipeline;
use crate::report;
use crate::scoring;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub struct ScoreArgs {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub output: PathBuf,
    pub chart: PathBuf,
    pub repo_list: PathBuf,
    pub criticality_csv: PathBuf,
    pub delay_ms: u64,
    pub run_external: bool,
    pub token: Option<String>,
}

fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid template")
        .progress_chars("█▓▒░  ")
}

fn resolve_token(arg: Option<String>) -> Result<String> {
    if let Some(token) = arg {
        return Ok(token);
    }

    let config = UserConfig::load()?;
    config
        .github_token()
        .map(str::to_string)
        .context(
            "No GitHub token configured. Set GITHUB_TOKEN, pass --token, or run \
             `platscore init` and add one to the config file. Create a token at \
             https://github.com/settings/tokens (no scopes needed).",
        )
}

pub fn run(args: ScoreArgs) -> Result<()> {
    let token = resolve_token(args.token)?;

    let records = report::load_packages(&args.input, args.sheet.as_deref())?;
    println!(
        "{} Scoring {} packages from {}\n",
        style("»").bold(),
        style(records.len()).cyan(),
        style(args.input.display()).cyan()
    );

    // Phase 1: repository resolution + criticality estimation
    let client = GithubClient::new(&token);
    let mut pipeline = Pipeline::new(&client, Duration::from_millis(args.delay_ms));

    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(create_bar_style());
    let mut assessments = Vec::with_capacity(records.len());
    for record in &records {
        bar.set_message(record.name.clone());
        assessments.push(pipeline.assess_one(&record.name));
        bar.inc(1);
    }
    bar.finish_and_clear();

    let stats = pipeline.stats();
    println!(
        "{} Resolved {} unique projects ({} lookups succeeded, {} failed)",
        style("✓").green(),
        style(stats.unique_lookups).cyan(),
        stats.succeeded,
        stats.failed
    );

    // Phase 2: authoritative reconciliation, best-effort throughout
    match report::write_manifest(&args.repo_list, &assessments) {
        Ok(repo_count) => {
            if args.run_external && repo_count > 0 {
                if let Err(e) =
                    CriticalityTool::default().run(&args.repo_list, &token, &args.criticality_csv)
                {
                    warn!("Criticality tool failed ({e}); continuing with star-tier estimates");
                }
            }
        }
        Err(e) => warn!("Could not write repository manifest: {e}"),
    }

    match load_authoritative(&args.criticality_csv) {
        Ok(authoritative) => reconcile(&mut assessments, &authoritative),
        Err(e) => warn!("No authoritative criticality scores ({e}); keeping star-tier estimates"),
    }

    // Phase 3: scoring and artifacts
    let scored = scoring::score_packages(&records, &assessments);
    let summary = scoring::summarize(&scored).context("No packages to score")?;

    if let Err(e) = report::render_histogram(&args.chart, &scored, &summary) {
        warn!("Could not render histogram: {e}");
    }
    report::write_report(&args.output, &scored, &summary, &stats)?;

    println!(
        "\n{} Platform mean score: {}",
        style("✓").green(),
        style(format!("{:.2}", summary.mean)).bold()
    );
    match summary.critical_mean {
        Some(critical_mean) => println!(
            "{} Critical packages (C >= 8) mean: {}",
            style("✓").green(),
            style(format!("{critical_mean:.2}")).bold()
        ),
        None => println!("{} No packages with criticality >= 8", style("·").dim()),
    }
    println!(
        "{} Weakest {:.2} / strongest {:.2}",
        style("✓").green(),
        summary.min,
        summary.max
    );
    println!(
        "\nReport: {}\nChart:  {}",
        style(args.output.display()).cyan(),
        style(args.chart.display()).cyan()
    );

    Ok(())
}
