//! Per-user persistence of category order and filter defaults.
//!
//! Explicit persistence adapter: callers load a [`Prefs`] value at session
//! start and save it after category or filter-default changes. Files are
//! keyed by user id, survive reloads, and are deliberately not synced
//! across devices.

use crate::category::CategoryState;
use crate::error::VaultError;
use crate::view::Filters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Preferences persisted per user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prefs {
    pub categories: CategoryState,
    pub filters: Filters,
}

/// Filesystem-backed preference storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    dir: PathBuf,
}

impl PrefsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load preferences for a user, falling back to defaults.
    ///
    /// Missing or unreadable files yield [`Prefs::default`] rather than an
    /// error: stale or corrupt local state must never block a session.
    pub fn load(&self, user_id: &str) -> Prefs {
        let path = self.path_for(user_id);
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(user_id, error = %err, "corrupt preferences file, using defaults");
                Prefs::default()
            }),
            Err(_) => Prefs::default(),
        }
    }

    /// Persist preferences for a user.
    ///
    /// Writes to a sibling temp file and renames over the target so a crash
    /// mid-write cannot leave a truncated document behind.
    ///
    /// # Errors
    /// Directory creation, write, or rename failures.
    pub fn save(&self, user_id: &str, prefs: &Prefs) -> Result<(), VaultError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(user_id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(prefs)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        // Same key scheme as the legacy local storage: categories-<uid>.
        self.dir.join(format!("categories-{}.json", safe_key(user_id)))
    }
}

/// Restrict user-id-derived filename parts to a safe character set.
fn safe_key(user_id: &str) -> String {
    user_id
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns true when a preferences file exists for the user.
pub fn has_prefs(dir: &Path, user_id: &str) -> bool {
    PrefsStore::new(dir).path_for(user_id).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::SortKey;
    use tempfile::TempDir;

    #[test]
    fn load_returns_defaults_when_file_is_missing() {
        let dir = TempDir::new().expect("temp dir");
        let store = PrefsStore::new(dir.path());
        let prefs = store.load("nobody");
        assert_eq!(prefs, Prefs::default());
        assert_eq!(prefs.categories.active, "All");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().expect("temp dir");
        let store = PrefsStore::new(dir.path());

        let mut prefs = Prefs::default();
        prefs.categories.add("Temp");
        prefs.filters.sort_by = SortKey::Alphabetical;
        prefs.filters.language = "rust".to_string();
        store.save("user-1", &prefs).expect("save");

        let loaded = store.load("user-1");
        assert_eq!(loaded, prefs);
        assert!(has_prefs(dir.path(), "user-1"));
    }

    #[test]
    fn prefs_are_isolated_per_user() {
        let dir = TempDir::new().expect("temp dir");
        let store = PrefsStore::new(dir.path());

        let mut prefs = Prefs::default();
        prefs.categories.add("OnlyForA");
        store.save("user-a", &prefs).expect("save");

        assert!(store.load("user-b").categories.order.iter().all(|c| c != "OnlyForA"));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let store = PrefsStore::new(dir.path());
        std::fs::write(dir.path().join("categories-user-1.json"), b"{ not json").expect("write");
        assert_eq!(store.load("user-1"), Prefs::default());
    }

    #[test]
    fn hostile_user_ids_stay_inside_the_directory() {
        let dir = TempDir::new().expect("temp dir");
        let store = PrefsStore::new(dir.path());
        store.save("../../etc/passwd", &Prefs::default()).expect("save");
        assert!(has_prefs(dir.path(), "../../etc/passwd"));
    }
}
