//! Canonical snippet record shared by the store gateway and view engine.

use crate::constants::UNCATEGORIZED;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A user-authored code record with metadata.
///
/// Field names serialize in camelCase so documents round-trip unchanged
/// against the legacy JSON shape used by the remote store and backup files.
/// Timestamps stay as ISO-8601 strings on the record; callers needing an
/// instant go through [`Snippet::created_instant`] / [`Snippet::updated_instant`],
/// which treat unparseable values as the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Store-assigned identity; empty until first persisted.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Legacy singular category, kept equal to `categories[0]`.
    #[serde(default)]
    pub category: String,
    /// Never empty after normalization; defaults to `["Uncategorized"]`.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub language: String,
    /// Primary code body; cleared when `snippets` is in use.
    #[serde(default)]
    pub code: String,
    /// Sub-entries for snippets bundling multiple code blocks.
    #[serde(default)]
    pub snippets: Vec<SubSnippet>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    /// Owner identity; stamped by the gateway, never user-edited.
    #[serde(default)]
    pub user_id: String,
}

/// One code block inside a multi-block snippet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSnippet {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
}

impl Snippet {
    /// Creation instant, or the epoch when the stamp does not parse.
    pub fn created_instant(&self) -> DateTime<Utc> {
        parse_instant(&self.created_at)
    }

    /// Last-update instant, or the epoch when the stamp does not parse.
    pub fn updated_instant(&self) -> DateTime<Utc> {
        parse_instant(&self.updated_at)
    }

    /// Category membership test with legacy singular fallback.
    ///
    /// # Returns
    /// `true` when `categories` contains `name`, or, for records predating
    /// the multi-category shape, when the singular `category` equals it.
    pub fn in_category(&self, name: &str) -> bool {
        if !self.categories.is_empty() {
            return self.categories.iter().any(|c| c == name);
        }
        !self.category.is_empty() && self.category == name
    }

    /// Removes `name` from this snippet's categories for a cascade delete.
    ///
    /// An emptied set resets to `["Uncategorized"]` and the legacy singular
    /// field is recomputed as the new first entry.
    ///
    /// # Returns
    /// `true` when the record changed and needs to be persisted.
    pub fn strip_category(&mut self, name: &str) -> bool {
        if !self.categories.is_empty() {
            if !self.categories.iter().any(|c| c == name) {
                return false;
            }
            self.categories.retain(|c| c != name);
            if self.categories.is_empty() {
                self.categories.push(UNCATEGORIZED.to_string());
            }
            self.category = self.categories[0].clone();
            return true;
        }
        if self.category == name {
            self.category = UNCATEGORIZED.to_string();
            self.categories = vec![UNCATEGORIZED.to_string()];
            return true;
        }
        false
    }
}

/// Current time as the ISO-8601 stamp format used on the wire.
pub fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 stamp, treating failures as the earliest instant.
///
/// Date-only stamps (`2024-01-01`) are accepted as midnight UTC.
pub fn parse_instant(stamp: &str) -> DateTime<Utc> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(stamp) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(stamp, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Utc.from_utc_datetime(&midnight);
        }
    }
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}
