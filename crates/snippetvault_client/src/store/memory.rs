//! In-memory document store for tests and offline development.
//!
//! Single-process only: no persistence and no cross-process visibility.
//! Failure injection switches let tests exercise the engine's rollback and
//! partial-failure paths deterministically.

use super::{DocumentStore, StoreError, StoredDoc};
use async_trait::async_trait;
use serde_json::Value;
use snippetvault_core::constants::OWNER_FIELD;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    docs: Mutex<BTreeMap<String, Value>>,
    failing_ids: Mutex<HashSet<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// In-memory [`DocumentStore`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

fn unpoison<'a, T>(result: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>) -> MutexGuard<'a, T> {
    result.unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        unpoison(self.inner.docs.lock()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw stored document, exactly as persisted.
    pub fn raw_doc(&self, id: &str) -> Option<Value> {
        unpoison(self.inner.docs.lock()).get(id).cloned()
    }

    /// Insert a document under a fixed id, bypassing sanitization.
    pub fn seed_raw(&self, id: &str, doc: Value) {
        unpoison(self.inner.docs.lock()).insert(id.to_string(), doc);
    }

    /// Make every read fail until cleared.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write (insert/update/delete) fail until cleared.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make writes against one specific id fail until cleared.
    pub fn fail_writes_for(&self, id: &str) {
        unpoison(self.inner.failing_ids.lock()).insert(id.to_string());
    }

    fn check_write(&self, id: &str) -> Result<(), StoreError> {
        if self.inner.fail_writes.load(Ordering::SeqCst)
            || unpoison(self.inner.failing_ids.lock()).contains(id)
        {
            return Err(StoreError::Request(format!("injected write failure for '{}'", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query_by_owner(&self, user_id: &str) -> Result<Vec<StoredDoc>, StoreError> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Request("injected read failure".to_string()));
        }
        let docs = unpoison(self.inner.docs.lock());
        Ok(docs
            .iter()
            .filter(|(_, doc)| doc.get(OWNER_FIELD).and_then(Value::as_str) == Some(user_id))
            .map(|(id, doc)| StoredDoc {
                id: id.clone(),
                doc: doc.clone(),
            })
            .collect())
    }

    async fn insert(&self, doc: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.check_write(&id)?;
        unpoison(self.inner.docs.lock()).insert(id.clone(), doc);
        Ok(id)
    }

    async fn update(&self, id: &str, doc: Value) -> Result<(), StoreError> {
        self.check_write(id)?;
        unpoison(self.inner.docs.lock()).insert(id.to_string(), doc);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_write(id)?;
        // Absent ids delete successfully, matching the store contract.
        unpoison(self.inner.docs.lock()).remove(id);
        Ok(())
    }
}
