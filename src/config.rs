//! Application configuration and credential loading.
//!
//! Settings come from the environment (optionally seeded from a `.env`
//! file). The access token may be supplied directly via `GITHUB_TOKEN` or
//! read from the first line of a plaintext token file.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Base URL of the GitHub REST API.
    #[serde(default = "default_api_url")]
    pub github_api_url: String,

    /// Personal access token. When unset, `token_file` is consulted.
    pub github_token: Option<String>,

    /// Plaintext file whose first line holds the access token.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// Per-request timeout in seconds. A hung call should not hang the tool.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_file() -> PathBuf {
    PathBuf::from("token.txt")
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_api_url: default_api_url(),
            github_token: None,
            token_file: default_token_file(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Resolves the API credential: the environment takes precedence, then
    /// the token file's first line, trimmed. A missing or empty credential
    /// is an error rather than an empty Authorization header.
    pub fn resolve_token(&self) -> anyhow::Result<String> {
        if let Some(token) = &self.github_token {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }

        let contents = fs::read_to_string(&self.token_file).with_context(|| {
            format!(
                "missing credential: set GITHUB_TOKEN or provide a token file at {}",
                self.token_file.display()
            )
        })?;

        let token = contents.lines().next().unwrap_or("").trim();
        if token.is_empty() {
            bail!(
                "missing credential: token file {} is empty",
                self.token_file.display()
            );
        }

        Ok(token.to_string())
    }
}
