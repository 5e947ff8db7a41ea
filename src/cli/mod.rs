//! CLI command definitions and handlers

mod init;
mod score;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// platscore - Composite security scoring for platform images
#[derive(Parser, Debug)]
#[command(name = "platscore")]
#[command(
    version,
    about = "Composite security scoring for packages in embedded Linux platform images",
    long_about = "platscore combines locally-measured quality metrics (CVE exposure, static and \
dynamic analysis status, code coverage) with a criticality factor estimated from each \
package's upstream GitHub repository popularity, optionally reconciled against the OSSF \
criticality_score tool.\n\n\
Output: a three-sheet xlsx report, a score-distribution histogram, and a YAML repository \
manifest.",
    after_help = "\
Examples:
  platscore score packages.xlsx                      Score with default outputs
  platscore score packages.xlsx --sheet image-data   Pick the input worksheet
  platscore score packages.xlsx --external off       Skip the criticality tool
  platscore score packages.xlsx --delay-ms 2000      Slower search pacing
  platscore init                                     Create the user config file

The GitHub token is read from --token, $GITHUB_TOKEN, a local .env file, or
~/.config/platscore/config.toml."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score all packages in an input spreadsheet
    Score {
        /// Path to the package analysis spreadsheet (xlsx)
        input: PathBuf,

        /// Input worksheet name (default: first worksheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Output report path
        #[arg(long, short = 'o', default_value = "security-scores.xlsx")]
        output: PathBuf,

        /// Histogram image path
        #[arg(long, default_value = "score-distribution.png")]
        chart: PathBuf,

        /// Repository manifest path (input to the criticality tool)
        #[arg(long, default_value = "criticality-repos.yml")]
        repo_list: PathBuf,

        /// Criticality tool output path (CSV)
        #[arg(long, default_value = "criticality-scores.csv")]
        criticality_csv: PathBuf,

        /// Pause between search API calls, in milliseconds
        #[arg(long, default_value = "1000")]
        delay_ms: u64,

        /// Control the external criticality tool: on (default), off
        #[arg(long, default_value = "on", value_parser = ["on", "off"])]
        external: String,

        /// GitHub API token (overrides the config file)
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Create the user config file with example settings
    Init,
}

/// Dispatch a parsed CLI invocation
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Score {
            input,
            sheet,
            output,
            chart,
            repo_list,
            criticality_csv,
            delay_ms,
            external,
            token,
        } => score::run(score::ScoreArgs {
            input,
            sheet,
            output,
            chart,
            repo_list,
            criticality_csv,
            delay_ms,
            run_external: external == "on",
            token,
        }),
        Commands::Init => init::run(),
    }
}
