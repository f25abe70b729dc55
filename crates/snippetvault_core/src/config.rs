//! Configuration loading from environment variables.

use crate::constants::SNIPPET_COLLECTION;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for SnippetVault.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the remote document store API.
    pub store_url: String,
    /// Document collection name holding snippets.
    pub collection: String,
    /// Per-request timeout in seconds for store calls.
    pub request_timeout_secs: u64,
    /// Directory holding per-user preference files.
    pub prefs_dir: String,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE (standard)
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    // Fallback to current directory if available
    std::env::current_dir().ok()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            store_url: env::var("SNIPPETVAULT_STORE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8985".to_string()),
            collection: env::var("SNIPPETVAULT_COLLECTION")
                .unwrap_or_else(|_| SNIPPET_COLLECTION.to_string()),
            request_timeout_secs: env::var("SNIPPETVAULT_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            prefs_dir: env::var("SNIPPETVAULT_DATA_DIR")
                .map(expand_tilde)
                .unwrap_or_else(|_| {
                    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                    home.join(".config")
                        .join("snippetvault")
                        .to_string_lossy()
                        .to_string()
                }),
        }
    }
}
