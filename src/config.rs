//! Configuration support for branch-pulse.
//!
//! Settings are layered: built-in defaults, then the YAML config file
//! (`branch-pulse.config.yml`), then environment variables (optionally from
//! a `.env` file), then command-line flags. The merged result is validated
//! once into [`Settings`].

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::cache::DEFAULT_CACHE_CAPACITY;
use crate::adapters::outbound::network::GitLabClient;
use crate::adapters::outbound::persistence::DEFAULT_REGISTRY_PATH;
use crate::application::use_cases::{
    FetchOptions, DEFAULT_CACHE_TTL, DEFAULT_MAX_CONCURRENT_FETCHES,
};
use crate::shared::Result;

const CONFIG_FILENAME: &str = "branch-pulse.config.yml";

/// GitLab instance used when none is configured
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Branches evaluated for projects that configure none
pub const DEFAULT_BRANCHES: [&str; 3] = ["develop", "staging", "main"];

/// Longest accepted cache lifetime (one week)
pub const MAX_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

pub const ENV_GITLAB_URL: &str = "GITLAB_URL";
pub const ENV_PRIVATE_TOKEN: &str = "GITLAB_PRIVATE_TOKEN";
pub const ENV_DEFAULT_BRANCHES: &str = "DEFAULT_BRANCHES";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub gitlab_url: Option<String>,
    pub default_branches: Option<Vec<String>>,
    pub primary_branch: Option<String>,
    pub integration_branch: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub cache_capacity: Option<usize>,
    pub max_concurrent_fetches: Option<usize>,
    pub registry_path: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref branches) = config.default_branches {
        if let Some(i) = branches.iter().position(|b| b.trim().is_empty()) {
            bail!(
                "Invalid config: default_branches[{}] must not be empty.\n\n\
                 💡 Hint: List branch names, e.g. [develop, staging, main].",
                i
            );
        }
    }
    for (field, value) in [
        ("primary_branch", &config.primary_branch),
        ("integration_branch", &config.integration_branch),
    ] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n💡 Hint: Remove the field to use the default.",
                field
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Splits a comma-separated branch list, dropping blanks
pub fn parse_branch_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// Values read from the process environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub gitlab_url: Option<String>,
    pub private_token: Option<String>,
    pub default_branches: Option<Vec<String>>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the environment layer from an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            gitlab_url: non_blank(ENV_GITLAB_URL),
            private_token: non_blank(ENV_PRIVATE_TOKEN),
            default_branches: non_blank(ENV_DEFAULT_BRANCHES)
                .map(|raw| parse_branch_list(&raw))
                .filter(|b| !b.is_empty()),
        }
    }
}

/// Values given on the command line; these win over every other layer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOverrides {
    pub gitlab_url: Option<String>,
    pub registry_path: Option<PathBuf>,
    pub max_concurrent_fetches: Option<usize>,
    pub cache_ttl_secs: Option<u64>,
}

/// Fully resolved and validated runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub gitlab_url: String,
    pub private_token: Option<String>,
    pub default_branches: Vec<String>,
    pub primary_branch: String,
    pub integration_branch: String,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub max_concurrent_fetches: usize,
    pub registry_path: PathBuf,
    pub request_timeout: Duration,
}

impl Settings {
    /// Merges the layers and validates the result
    pub fn resolve(
        file: Option<ConfigFile>,
        env: EnvConfig,
        cli: CliOverrides,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();
        let fetch_defaults = FetchOptions::default();

        let settings = Self {
            gitlab_url: cli
                .gitlab_url
                .or(env.gitlab_url)
                .or(file.gitlab_url)
                .unwrap_or_else(|| DEFAULT_GITLAB_URL.to_string()),
            private_token: env.private_token,
            default_branches: env
                .default_branches
                .or(file.default_branches)
                .unwrap_or_else(|| DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect())
                .into_iter()
                .map(|b| b.trim().to_string())
                .collect(),
            primary_branch: file
                .primary_branch
                .map(|b| b.trim().to_string())
                .unwrap_or(fetch_defaults.primary_branch),
            integration_branch: file
                .integration_branch
                .map(|b| b.trim().to_string())
                .unwrap_or(fetch_defaults.integration_branch),
            cache_ttl: cli
                .cache_ttl_secs
                .or(file.cache_ttl_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CACHE_TTL),
            cache_capacity: file.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY),
            max_concurrent_fetches: cli
                .max_concurrent_fetches
                .or(file.max_concurrent_fetches)
                .unwrap_or(DEFAULT_MAX_CONCURRENT_FETCHES),
            registry_path: cli
                .registry_path
                .or(file.registry_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_PATH)),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs
                    .unwrap_or(GitLabClient::DEFAULT_TIMEOUT_SECONDS),
            ),
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.default_branches.is_empty() {
            bail!(
                "Invalid settings: the default branch list is empty.\n\n\
                 💡 Hint: Set DEFAULT_BRANCHES (e.g. develop,staging,main) or default_branches in {}.",
                CONFIG_FILENAME
            );
        }
        if self.cache_ttl > Duration::from_secs(MAX_CACHE_TTL_SECS) {
            bail!(
                "Invalid settings: cache_ttl_secs is {} but must be at most {}.\n\n\
                 💡 Hint: Use `branch-pulse cache clear` to refresh projects instead of a very long TTL.",
                self.cache_ttl.as_secs(),
                MAX_CACHE_TTL_SECS
            );
        }
        if self.cache_capacity == 0 {
            bail!("Invalid settings: cache_capacity must be at least 1.");
        }
        if self.max_concurrent_fetches == 0 {
            bail!("Invalid settings: max_concurrent_fetches must be at least 1.");
        }
        if self.request_timeout.is_zero() {
            bail!("Invalid settings: request_timeout_secs must be at least 1.");
        }
        Ok(())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            primary_branch: self.primary_branch.clone(),
            integration_branch: self.integration_branch.clone(),
            cache_ttl: self.cache_ttl,
        }
    }
}
