//! The sync engine: local collection state, mutations, and derived views.
//!
//! The remote store is the source of truth. Every mutation persists first
//! and then re-lists the owner's collection, so whatever the store returns
//! last is what the user sees. The one optimistic path is the favorite
//! toggle, which flips locally before the write and rolls back on failure.

use crate::store::{DocumentStore, SnippetGateway, StoreError};
use chrono::Utc;
use snippetvault_core::category::{AddOutcome, CategoryState};
use snippetvault_core::detection::detect_language;
use snippetvault_core::export::{backup_filename, export_snippets, import_snippets};
use snippetvault_core::models::draft::SnippetDraft;
use snippetvault_core::models::snippet::Snippet;
use snippetvault_core::prefs::Prefs;
use snippetvault_core::view::{derive_view, Filters};
use snippetvault_core::VaultError;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// Per-item record of a category-deletion cascade.
///
/// Each affected snippet is persisted independently; a failed update leaves
/// that document on its old categories and does not abort the rest.
#[derive(Debug, Clone, Default)]
pub struct CascadeReport {
    pub removed: String,
    /// Ids whose rewritten categories were persisted.
    pub updated: Vec<String>,
    /// Ids whose update failed, with the store's error text.
    pub failed: Vec<(String, String)>,
}

/// An exported backup: suggested filename plus the document body.
#[derive(Debug, Clone)]
pub struct Backup {
    pub filename: String,
    pub json: String,
}

/// Client-side engine owning one user's snippet collection.
#[derive(Debug)]
pub struct VaultEngine<S> {
    gateway: SnippetGateway<S>,
    user_id: String,
    snippets: Vec<Snippet>,
    categories: CategoryState,
    search: String,
    filters: Filters,
    /// Bumped by [`teardown`](Self::teardown); fetches started under an
    /// older epoch are dropped when they land.
    epoch: u64,
}

impl<S: DocumentStore> VaultEngine<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self {
            gateway: SnippetGateway::new(store),
            user_id: user_id.into(),
            snippets: Vec::new(),
            categories: CategoryState::default(),
            search: String::new(),
            filters: Filters::default(),
            epoch: 0,
        }
    }

    /// Build an engine seeded with previously persisted preferences.
    pub fn with_prefs(store: S, user_id: impl Into<String>, prefs: Prefs) -> Self {
        let mut engine = Self::new(store, user_id);
        engine.categories = prefs.categories;
        engine.filters = prefs.filters;
        engine
    }

    /// Raw collection, unfiltered and unsorted.
    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn category_state(&self) -> &CategoryState {
        &self.categories
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Snapshot of the state the preferences store persists.
    pub fn prefs(&self) -> Prefs {
        Prefs {
            categories: self.categories.clone(),
            filters: self.filters.clone(),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    /// Select the active category tab. Not validated against the order;
    /// an unknown name simply derives an empty view.
    pub fn set_active_category(&mut self, name: impl Into<String>) {
        self.categories.active = name.into();
    }

    pub fn add_category(&mut self, name: &str) -> AddOutcome {
        self.categories.add(name)
    }

    pub fn reorder_categories(&mut self, order: Vec<String>) {
        self.categories.reorder(order);
    }

    /// The filtered, sorted list for the current category/search/filters.
    pub fn view(&self) -> Vec<Snippet> {
        derive_view(&self.snippets, &self.categories.active, &self.search, &self.filters)
    }

    pub fn favorite_count(&self) -> usize {
        self.snippets.iter().filter(|s| s.is_favorite).count()
    }

    /// Re-list the owner's collection from the store.
    ///
    /// Authoritative: on success the local collection is replaced wholesale;
    /// on a read error it is cleared so stale data is never shown as
    /// current, and the error surfaces.
    pub async fn refresh(&mut self) -> Result<(), EngineError> {
        let epoch = self.epoch;
        let result = self.gateway.list_by_owner(&self.user_id).await;
        self.apply_fetch(epoch, result)
    }

    /// Apply a fetch result started under `epoch`, dropping stale ones.
    fn apply_fetch(
        &mut self,
        epoch: u64,
        result: Result<Vec<Snippet>, StoreError>,
    ) -> Result<(), EngineError> {
        if epoch != self.epoch {
            debug!("dropping snippet fetch from a torn-down epoch");
            return Ok(());
        }
        match result {
            Ok(snippets) => {
                self.snippets = snippets;
                Ok(())
            }
            Err(err) => {
                self.snippets.clear();
                Err(err.into())
            }
        }
    }

    /// Persist a draft: create when it carries no id, update otherwise.
    ///
    /// Normalizes first, auto-detects the language when the draft left it
    /// blank, materializes any unknown categories, and finishes with an
    /// unconditional refresh so the store's view of the write wins.
    pub async fn save(&mut self, draft: SnippetDraft) -> Result<(), EngineError> {
        let mut snippet = draft.normalize();
        if snippet.language.is_empty() {
            let source = if !snippet.code.is_empty() {
                snippet.code.as_str()
            } else {
                snippet.snippets.first().map(|s| s.code.as_str()).unwrap_or("")
            };
            if !source.is_empty() {
                snippet.language = detect_language(source).to_string();
            }
        }

        let added = self.categories.ensure_known(&snippet.categories);
        for name in &added {
            info!(category = %name, "materialized category from snippet save");
        }

        if snippet.id.is_empty() {
            self.gateway.create(&snippet, &self.user_id).await?;
        } else {
            self.gateway.update(&snippet.id, &snippet, &self.user_id).await?;
        }
        self.refresh().await
    }

    /// Delete a snippet and re-list.
    pub async fn delete(&mut self, id: &str) -> Result<(), EngineError> {
        self.gateway.remove(id, &self.user_id).await?;
        self.refresh().await
    }

    /// Flip a snippet's favorite flag, optimistically.
    ///
    /// The local flag flips before the write so the UI reads the new state
    /// immediately; a write failure rolls the flip back and surfaces the
    /// error. A successful write still re-lists, so the store's answer is
    /// what ultimately sticks.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<(), EngineError> {
        let index = self
            .snippets
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| VaultError::InvalidInput(format!("unknown snippet id '{}'", id)))?;

        self.snippets[index].is_favorite = !self.snippets[index].is_favorite;
        let updated = self.snippets[index].clone();

        if let Err(err) = self.gateway.update(id, &updated, &self.user_id).await {
            self.snippets[index].is_favorite = !self.snippets[index].is_favorite;
            warn!(id, error = %err, "favorite toggle failed, rolled back");
            return Err(err.into());
        }
        self.refresh().await
    }

    /// Delete a category and persist the cascade, best effort.
    ///
    /// The rewritten snippets are updated one by one; failures are recorded
    /// in the report and logged, and do not stop the remaining updates. The
    /// closing refresh shows whichever documents actually changed.
    ///
    /// # Errors
    /// Protected or unknown names fail up front with the state unchanged.
    pub async fn delete_category(&mut self, name: &str) -> Result<CascadeReport, EngineError> {
        let plan = self.categories.delete(name, &self.snippets)?;
        let mut report = CascadeReport {
            removed: plan.removed,
            ..CascadeReport::default()
        };

        for rewrite in &plan.rewrites {
            match self.gateway.update(&rewrite.id, rewrite, &self.user_id).await {
                Ok(()) => report.updated.push(rewrite.id.clone()),
                Err(err) => {
                    warn!(id = %rewrite.id, error = %err, "cascade update failed");
                    report.failed.push((rewrite.id.clone(), err.to_string()));
                }
            }
        }

        if let Err(err) = self.refresh().await {
            warn!(error = %err, "refresh after category deletion failed");
        }
        Ok(report)
    }

    /// Import a backup document: one create per entry, then a refresh.
    ///
    /// Entries are normalized drafts; ids from the document are discarded so
    /// imports never overwrite existing snippets.
    ///
    /// # Returns
    /// The number of snippets created.
    pub async fn import(&mut self, json: &str) -> Result<usize, EngineError> {
        let drafts = import_snippets(json)?;
        let mut created = 0;
        for draft in drafts {
            let mut snippet = draft.normalize();
            snippet.id = String::new();
            self.categories.ensure_known(&snippet.categories);
            self.gateway.create(&snippet, &self.user_id).await?;
            created += 1;
        }
        self.refresh().await?;
        Ok(created)
    }

    /// Export the current collection as a dated backup document.
    pub fn export(&self) -> Result<Backup, EngineError> {
        Ok(Backup {
            filename: backup_filename(Utc::now()),
            json: export_snippets(&self.snippets)?,
        })
    }

    /// Invalidate the engine at sign-out: the collection empties and any
    /// in-flight fetch from before this call is dropped when it lands.
    pub fn teardown(&mut self) {
        self.epoch += 1;
        self.snippets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use snippetvault_core::constants::BACKUP_FILE_PREFIX;
    use snippetvault_core::view::SortKey;

    fn draft(title: &str) -> SnippetDraft {
        SnippetDraft {
            title: Some(title.to_string()),
            code: Some("echo hi".to_string()),
            language: Some("bash".to_string()),
            ..Default::default()
        }
    }

    fn engine(store: &MemoryStore) -> VaultEngine<MemoryStore> {
        VaultEngine::new(store.clone(), "u1")
    }

    #[tokio::test]
    async fn save_creates_then_lists_only_the_owners_snippets() {
        let store = MemoryStore::new();
        store.seed_raw(
            "foreign",
            serde_json::json!({"userId": "u2", "title": "not mine"}),
        );
        let mut engine = engine(&store);

        engine.save(draft("mine")).await.expect("save");
        assert_eq!(engine.snippets().len(), 1);
        assert_eq!(engine.snippets()[0].title, "mine");
        assert!(!engine.snippets()[0].id.is_empty());
    }

    #[tokio::test]
    async fn save_with_an_id_updates_in_place() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.save(draft("before")).await.expect("create");

        let mut edited = SnippetDraft::from(&engine.snippets()[0]);
        edited.title = Some("after".to_string());
        engine.save(edited).await.expect("update");

        assert_eq!(engine.snippets().len(), 1);
        assert_eq!(engine.snippets()[0].title, "after");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn save_detects_language_when_the_draft_leaves_it_blank() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let mut d = draft("js");
        d.language = None;
        d.code = Some("const x = 1;\nlet y = 2;\nfunction hi() { return x; }".to_string());
        engine.save(d).await.expect("save");
        assert_eq!(engine.snippets()[0].language, "javascript");
    }

    #[tokio::test]
    async fn save_materializes_unknown_categories() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let mut d = draft("t");
        d.categories = Some(vec!["Kubernetes".to_string()]);
        engine.save(d).await.expect("save");
        assert!(engine.category_state().contains("Kubernetes"));
    }

    #[tokio::test]
    async fn delete_removes_the_snippet() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.save(draft("t")).await.expect("save");
        let id = engine.snippets()[0].id.clone();

        engine.delete(&id).await.expect("delete");
        assert!(engine.snippets().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn toggle_favorite_persists_and_counts() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.save(draft("t")).await.expect("save");
        let id = engine.snippets()[0].id.clone();

        engine.toggle_favorite(&id).await.expect("toggle");
        assert!(engine.snippets()[0].is_favorite);
        assert_eq!(engine.favorite_count(), 1);
        let doc = store.raw_doc(&id).expect("stored");
        assert_eq!(doc["isFavorite"], true);
    }

    #[tokio::test]
    async fn toggle_favorite_rolls_back_on_write_failure() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.save(draft("t")).await.expect("save");
        let id = engine.snippets()[0].id.clone();

        store.fail_writes_for(&id);
        let err = engine.toggle_favorite(&id).await.expect_err("must fail");
        assert!(matches!(err, EngineError::Store(_)));
        assert!(!engine.snippets()[0].is_favorite);
        assert_eq!(engine.favorite_count(), 0);
    }

    #[tokio::test]
    async fn refresh_failure_clears_the_collection() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.save(draft("t")).await.expect("save");
        assert_eq!(engine.snippets().len(), 1);

        store.set_fail_reads(true);
        engine.refresh().await.expect_err("read failure");
        assert!(engine.snippets().is_empty());
    }

    #[tokio::test]
    async fn fetches_from_a_torn_down_epoch_are_dropped() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.save(draft("t")).await.expect("save");
        let stale = vec![engine.snippets()[0].clone()];

        let epoch_before = engine.epoch;
        engine.teardown();
        assert!(engine.snippets().is_empty());

        engine
            .apply_fetch(epoch_before, Ok(stale))
            .expect("stale apply is a no-op");
        assert!(engine.snippets().is_empty());

        engine.refresh().await.expect("fresh refresh");
        assert_eq!(engine.snippets().len(), 1);
    }

    #[tokio::test]
    async fn delete_category_cascade_survives_a_partial_failure() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);

        let mut a = draft("a");
        a.categories = Some(vec!["Temp".to_string(), "Work".to_string()]);
        let mut b = draft("b");
        b.categories = Some(vec!["Temp".to_string()]);
        engine.save(a).await.expect("save a");
        engine.save(b).await.expect("save b");

        let stuck = engine
            .snippets()
            .iter()
            .find(|s| s.title == "b")
            .expect("b")
            .id
            .clone();
        store.fail_writes_for(&stuck);

        let report = engine.delete_category("Temp").await.expect("cascade");
        assert_eq!(report.removed, "Temp");
        assert_eq!(report.updated.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, stuck);
        assert!(!engine.category_state().contains("Temp"));

        // The failed document keeps its old categories in the re-listed view.
        let b = engine.snippets().iter().find(|s| s.id == stuck).expect("b");
        assert!(b.categories.contains(&"Temp".to_string()));
        let a = engine.snippets().iter().find(|s| s.title == "a").expect("a");
        assert_eq!(a.categories, vec!["Work".to_string()]);
    }

    #[tokio::test]
    async fn delete_category_rejects_protected_names_up_front() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.save(draft("t")).await.expect("save");

        let err = engine.delete_category("All").await.expect_err("protected");
        assert!(matches!(
            err,
            EngineError::Vault(VaultError::ProtectedCategory(_))
        ));
        assert!(engine.category_state().contains("All"));
    }

    #[tokio::test]
    async fn import_creates_fresh_documents_and_export_round_trips() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);

        let created = engine
            .import(r#"[{"title":"one","categories":["CMD"]},{"title":"two"}]"#)
            .await
            .expect("import");
        assert_eq!(created, 2);
        assert_eq!(engine.snippets().len(), 2);
        assert!(engine.category_state().contains("CMD"));

        let backup = engine.export().expect("export");
        assert!(backup.filename.starts_with(BACKUP_FILE_PREFIX));
        assert!(backup.filename.ends_with(".json"));
        let reparsed: Vec<serde_json::Value> =
            serde_json::from_str(&backup.json).expect("valid json");
        assert_eq!(reparsed.len(), 2);
    }

    #[tokio::test]
    async fn import_rejects_malformed_documents_without_writes() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let err = engine.import("not json").await.expect_err("reject");
        assert!(matches!(
            err,
            EngineError::Vault(VaultError::InvalidInput(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn view_reflects_category_search_and_sort_state() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);

        let mut a = draft("alpha");
        a.categories = Some(vec!["Work".to_string()]);
        a.description = Some("deploy script".to_string());
        let mut b = draft("beta");
        b.categories = Some(vec!["General".to_string()]);
        engine.save(a).await.expect("save a");
        engine.save(b).await.expect("save b");

        engine.set_active_category("Work");
        assert_eq!(engine.view().len(), 1);
        assert_eq!(engine.view()[0].title, "alpha");

        engine.set_active_category("All");
        engine.set_search("deploy");
        assert_eq!(engine.view().len(), 1);

        engine.set_search("");
        engine.set_filters(Filters {
            sort_by: SortKey::Alphabetical,
            ..Filters::default()
        });
        let view = engine.view();
        let titles: Vec<&str> = view.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn prefs_snapshot_round_trips_through_with_prefs() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.add_category("Scratch");
        engine.set_filters(Filters {
            language: "rust".to_string(),
            ..Filters::default()
        });

        let restored = VaultEngine::with_prefs(store, "u1", engine.prefs());
        assert!(restored.category_state().contains("Scratch"));
        assert_eq!(restored.filters().language, "rust");
    }
}
