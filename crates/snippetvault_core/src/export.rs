//! Backup export and import of snippet collections.

use crate::constants::BACKUP_FILE_PREFIX;
use crate::error::VaultError;
use crate::models::draft::SnippetDraft;
use crate::models::snippet::Snippet;
use chrono::{DateTime, Utc};

/// Serialize a collection as a pretty-printed backup document.
///
/// The top level is a JSON array of snippet objects in the legacy camelCase
/// shape; re-importing the result round-trips through the normalizer.
///
/// # Errors
/// Serialization failures only.
pub fn export_snippets(snippets: &[Snippet]) -> Result<String, VaultError> {
    Ok(serde_json::to_string_pretty(snippets)?)
}

/// Backup filename for the given instant: `snippetvault-backup-<ISO-date>.json`.
pub fn backup_filename(now: DateTime<Utc>) -> String {
    format!("{}{}.json", BACKUP_FILE_PREFIX, now.format("%Y-%m-%d"))
}

/// Parse an import document into permissive drafts.
///
/// Accepts any JSON array of objects shaped like the snippet data model;
/// partial objects are fine, the normalizer fills the gaps.
///
/// # Errors
/// [`VaultError::InvalidInput`] when the document is not valid JSON or not
/// an array of snippet-like objects.
pub fn import_snippets(json: &str) -> Result<Vec<SnippetDraft>, VaultError> {
    serde_json::from_str(json).map_err(|_| VaultError::InvalidInput("Invalid JSON file".into()))
}
