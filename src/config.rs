//! TOML configuration for ScrubLens.
//!
//! The top-level [`AppConfig`] is deserialized from `scrublens.toml`.
//! API keys are referenced via environment variables so they never live in
//! the file itself.
//!
//! # Example `scrublens.toml`
//!
//! ```toml
//! [provider]
//! model = "claude"
//! api_key = "${ANTHROPIC_API_KEY}"
//!
//! [analysis]
//! default_mode = "vulnerability-scan"
//!
//! [history]
//! enabled = true
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrubLensError};

/// AI provider configuration (`[provider]` section).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Model label: `"claude"`, `"openai"`, or `"custom"`.
    pub model: String,
    /// API key, usually `"${ANTHROPIC_API_KEY}"`.
    pub api_key: String,
    /// Optional model-name override (e.g., `"claude-3-haiku-20240307"`).
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Analysis defaults (`[analysis]` section).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Mode used when `--mode` is not given on the command line.
    pub default_mode: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_mode: "vulnerability-scan".to_string(),
        }
    }
}

/// Analysis history configuration (`[history]` section).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HistoryConfig {
    /// Whether completed analyses are recorded.
    #[serde(default)]
    pub enabled: bool,
    /// Optional database path; defaults to the data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Top-level application configuration deserialized from `scrublens.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// AI provider settings.
    pub provider: ProviderConfig,
    /// Analysis defaults.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Optional history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load and parse the configuration from a TOML file at the given path.
    ///
    /// Before parsing, `${VAR}` and `$VAR` placeholders in the TOML text are
    /// replaced with the corresponding environment variable values. An error
    /// is returned if a referenced variable is not set.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = substitute_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Replace `${VAR_NAME}` and `$VAR_NAME` placeholders with environment
/// variable values.
///
/// Returns an error containing the variable name if the variable is not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    // Match ${VAR_NAME} (braces form)
    let re_braces = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    // Match $VAR_NAME (no braces, uppercase + underscore only to avoid false positives)
    let re_bare = Regex::new(r"\$([A-Z_][A-Z0-9_]*)").unwrap();

    let mut result = input.to_string();

    // First pass: ${VAR} form
    for cap in re_braces.captures_iter(input) {
        let var_name = &cap[1];
        let value = std::env::var(var_name)
            .map_err(|_| ScrubLensError::ConfigEnvVar(var_name.to_string()))?;
        result = result.replace(&cap[0], &value);
    }

    // Second pass: $VAR form on the already-substituted string
    let intermediate = result.clone();
    for cap in re_bare.captures_iter(&intermediate) {
        let full_match = &cap[0];
        let var_name = &cap[1];
        let value = std::env::var(var_name)
            .map_err(|_| ScrubLensError::ConfigEnvVar(var_name.to_string()))?;
        result = result.replace(full_match, &value);
    }

    Ok(result)
}
