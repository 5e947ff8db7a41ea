//! External `criticality_score` tool invocation
//!
//! The OSSF tool is fed the YAML repository manifest and asked for CSV
//! output. Invocation failure is reported to the caller, which logs it and
//! continues with heuristic estimates only.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Default invocation, matching the tool's documented module entry point.
const DEFAULT_COMMAND: &[&str] = &["python3", "-m", "criticality_score.run"];

/// Runner for the authoritative criticality scorer.
pub struct CriticalityTool {
    command: Vec<String>,
}

impl Default for CriticalityTool {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CriticalityTool {
    /// Override the executable and leading arguments, e.g. a wrapper script.
    pub fn with_command(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Run the tool against `manifest`, writing CSV scores to `output`.
    pub fn run(&self, manifest: &Path, token: &str, output: &Path) -> Result<()> {
        let Some((program, leading_args)) = self.command.split_first() else {
            bail!("Empty criticality tool command");
        };

        debug!("Running {} {:?}", program, leading_args);

        let status = Command::new(program)
            .args(leading_args)
            .arg(format!("--input={}", manifest.display()))
            .arg(format!("--github_token={token}"))
            .arg("--output_format=csv")
            .arg(format!("--output={}", output.display()))
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to launch criticality tool '{program}'"))?;

        if !status.success() {
            bail!("Criticality tool exited with {status}");
        }

        info!("Criticality scores written to {}", output.display());
        Ok(())
    }
}
