//! User-level configuration for platscore
//!
//! Supports loading the GitHub token from:
//! - Environment variables (highest priority)
//! - A local `.env` file
//! - ~/.config/platscore/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Token for the GitHub search API
    pub token: Option<String>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest), including a local `.env` file
    /// 2. User config (~/.config/platscore/config.toml)
    pub fn load() -> Result<Self> {
        // A `.env` next to the input data is the common setup on build hosts.
        dotenvy::dotenv().ok();

        let mut config = UserConfig::default();

        if let Some(file_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| toml::from_str::<UserConfig>(&content).ok())
        {
            config.merge(file_config);
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            config.github.token = Some(token);
        }

        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("platscore").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
    }

    /// Get the GitHub token, if configured
    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# platscore User Configuration

[github]
# Token for the GitHub search API.
# Create one at: https://github.com/settings/tokens (no scopes needed)
# token = "ghp_..."
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}
