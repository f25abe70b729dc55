//! Remote document store capability and the snippet gateway on top of it.
//!
//! The [`DocumentStore`] trait is the raw capability: four independent
//! operations, each one network round trip, no cross-call atomicity. The
//! [`SnippetGateway`] owns the snippet-specific concerns: owner-gated
//! listing, payload sanitization, and timestamp/owner stamping.

/// HTTP-backed store implementation.
pub mod http;
/// In-process store implementation for tests and offline use.
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use snippetvault_core::models::draft::SnippetDraft;
use snippetvault_core::models::snippet::{now_stamp, Snippet};
use snippetvault_core::sanitize::sanitize;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Store request failed: {0}")]
    Request(String),

    #[error("Store returned a malformed response: {0}")]
    Malformed(String),
}

/// A document plus its store-assigned identity.
#[derive(Debug, Clone)]
pub struct StoredDoc {
    pub id: String,
    pub doc: Value,
}

/// Remote per-user document store capability.
///
/// The only query shape the engine needs is exact-equality on the owner
/// field; sorting and filtering happen client-side. Deleting an id that is
/// already absent is success, not an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List all documents whose owner field equals `user_id`.
    async fn query_by_owner(&self, user_id: &str) -> Result<Vec<StoredDoc>, StoreError>;

    /// Insert a document and return its newly assigned id.
    async fn insert(&self, doc: Value) -> Result<String, StoreError>;

    /// Replace the document stored under `id`.
    async fn update(&self, id: &str, doc: Value) -> Result<(), StoreError>;

    /// Delete the document stored under `id`, absent ids included.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Per-user snippet CRUD over a raw document store.
#[derive(Debug, Clone)]
pub struct SnippetGateway<S> {
    store: S,
}

impl<S: DocumentStore> SnippetGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List the owner's snippets, migrating each document at read time.
    ///
    /// Documents that cannot be interpreted as snippet drafts are skipped
    /// with a warning rather than failing the whole listing.
    ///
    /// # Errors
    /// [`StoreError::NotAuthenticated`] for an empty `user_id` before any
    /// network call; store errors otherwise. No internal retry.
    pub async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Snippet>, StoreError> {
        if user_id.is_empty() {
            return Err(StoreError::NotAuthenticated);
        }
        let docs = self.store.query_by_owner(user_id).await?;
        let mut snippets = Vec::with_capacity(docs.len());
        for stored in docs {
            match serde_json::from_value::<SnippetDraft>(stored.doc) {
                Ok(draft) => {
                    let mut snippet = draft.normalize();
                    snippet.id = stored.id;
                    snippets.push(snippet);
                }
                Err(err) => {
                    warn!(id = %stored.id, error = %err, "skipping malformed snippet document");
                }
            }
        }
        Ok(snippets)
    }

    /// Create a snippet document for `user_id`.
    ///
    /// # Returns
    /// The store-assigned id.
    pub async fn create(&self, snippet: &Snippet, user_id: &str) -> Result<String, StoreError> {
        if user_id.is_empty() {
            return Err(StoreError::NotAuthenticated);
        }
        self.store
            .insert(storage_payload(snippet, user_id))
            .await
    }

    /// Update the snippet stored under `id`.
    ///
    /// Ownership is not re-verified client-side; the store's own rules are
    /// the trust boundary.
    pub async fn update(&self, id: &str, snippet: &Snippet, user_id: &str) -> Result<(), StoreError> {
        if user_id.is_empty() {
            return Err(StoreError::NotAuthenticated);
        }
        self.store.update(id, storage_payload(snippet, user_id)).await
    }

    /// Delete the snippet stored under `id`; no existence check first.
    pub async fn remove(&self, id: &str, user_id: &str) -> Result<(), StoreError> {
        if user_id.is_empty() {
            return Err(StoreError::NotAuthenticated);
        }
        self.store.delete(id).await
    }
}

/// Build the sanitized, stamped payload sent to the store.
///
/// Sanitization strips the identity field at every level; the owner id is
/// stamped, `createdAt` is filled only when absent, and `updatedAt` is
/// refreshed on every write.
fn storage_payload(snippet: &Snippet, user_id: &str) -> Value {
    let raw = serde_json::to_value(snippet).unwrap_or(Value::Null);
    let mut clean = sanitize(&raw);
    if let Some(fields) = clean.as_object_mut() {
        fields.insert("userId".to_string(), Value::String(user_id.to_string()));
        let created_missing = fields
            .get("createdAt")
            .and_then(Value::as_str)
            .map(|s| s.trim().is_empty())
            .unwrap_or(true);
        if created_missing {
            fields.insert("createdAt".to_string(), Value::String(now_stamp()));
        }
        fields.insert("updatedAt".to_string(), Value::String(now_stamp()));
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use snippetvault_core::models::draft::SnippetDraft;

    fn draft(title: &str) -> Snippet {
        SnippetDraft {
            title: Some(title.to_string()),
            code: Some("echo hi".to_string()),
            ..Default::default()
        }
        .normalize()
    }

    #[tokio::test]
    async fn empty_user_id_fails_before_any_store_call() {
        let store = MemoryStore::new();
        let gateway = SnippetGateway::new(store.clone());
        assert!(matches!(
            gateway.list_by_owner("").await,
            Err(StoreError::NotAuthenticated)
        ));
        assert!(matches!(
            gateway.create(&draft("t"), "").await,
            Err(StoreError::NotAuthenticated)
        ));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn create_stamps_owner_and_strips_identity() {
        let store = MemoryStore::new();
        let gateway = SnippetGateway::new(store.clone());

        let mut snippet = draft("t");
        snippet.id = "client-made-up".to_string();
        let id = gateway.create(&snippet, "u1").await.expect("create");
        assert_ne!(id, "client-made-up");

        let doc = store.raw_doc(&id).expect("stored");
        assert!(doc.get("id").is_none());
        assert_eq!(doc["userId"], "u1");
        assert!(doc["createdAt"].as_str().map(|s| !s.is_empty()).unwrap_or(false));
    }

    #[tokio::test]
    async fn listing_filters_by_owner_and_assigns_store_ids() {
        let store = MemoryStore::new();
        let gateway = SnippetGateway::new(store.clone());
        gateway.create(&draft("mine"), "u1").await.expect("create");
        gateway.create(&draft("theirs"), "u2").await.expect("create");

        let mine = gateway.list_by_owner("u1").await.expect("list");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "mine");
        assert!(!mine[0].id.is_empty());
    }

    #[tokio::test]
    async fn listing_skips_malformed_documents() {
        let store = MemoryStore::new();
        store.seed_raw("bad", serde_json::json!({"userId": "u1", "tags": 17}));
        let gateway = SnippetGateway::new(store.clone());
        gateway.create(&draft("good"), "u1").await.expect("create");

        let listed = gateway.list_by_owner("u1").await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "good");
    }

    #[tokio::test]
    async fn removing_an_absent_id_is_success() {
        let store = MemoryStore::new();
        let gateway = SnippetGateway::new(store);
        gateway.remove("ghost", "u1").await.expect("remove");
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_but_not_created_at() {
        let store = MemoryStore::new();
        let gateway = SnippetGateway::new(store.clone());

        let mut snippet = draft("t");
        snippet.created_at = "2024-01-01T00:00:00.000Z".to_string();
        let id = gateway.create(&snippet, "u1").await.expect("create");

        let listed = gateway.list_by_owner("u1").await.expect("list");
        gateway.update(&id, &listed[0], "u1").await.expect("update");

        let doc = store.raw_doc(&id).expect("stored");
        assert_eq!(doc["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_ne!(doc["updatedAt"], "2024-01-01T00:00:00.000Z");
    }
}
