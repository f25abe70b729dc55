//! HTTP-backed document store client.
//!
//! Talks to a collection-style JSON REST API: documents live under
//! `<base>/<collection>`, listing filters on the owner field as a query
//! parameter, and the store assigns ids on insert. Each operation is a
//! single request; retries are the caller's decision.

use super::{DocumentStore, StoreError, StoredDoc};
use async_trait::async_trait;
use serde_json::Value;
use snippetvault_core::constants::OWNER_FIELD;
use snippetvault_core::Config;
use std::time::Duration;

/// Remote store client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
}

impl HttpStore {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Client construction failures (TLS backend, invalid timeout).
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| StoreError::Request(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.store_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    fn doc_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.collection, id)
    }
}

/// Extract a useful error message from a failed response body.
fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

async fn ensure_success(res: reqwest::Response, action: &str) -> Result<reqwest::Response, StoreError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(StoreError::Request(format!(
        "{} ({}): {}",
        action,
        status.as_u16(),
        error_message_for_response(status, &body)
    )))
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn query_by_owner(&self, user_id: &str) -> Result<Vec<StoredDoc>, StoreError> {
        let res = self
            .client
            .get(self.collection_url())
            .query(&[(OWNER_FIELD, user_id)])
            .send()
            .await
            .map_err(|err| StoreError::Request(err.to_string()))?;
        let res = ensure_success(res, "list snippets").await?;
        let docs: Vec<Value> = res
            .json()
            .await
            .map_err(|err| StoreError::Malformed(err.to_string()))?;

        docs.into_iter()
            .map(|mut doc| {
                let id = doc
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        StoreError::Malformed("listed document without an id".to_string())
                    })?;
                if let Some(fields) = doc.as_object_mut() {
                    fields.remove("id");
                }
                Ok(StoredDoc { id, doc })
            })
            .collect()
    }

    async fn insert(&self, doc: Value) -> Result<String, StoreError> {
        let res = self
            .client
            .post(self.collection_url())
            .json(&doc)
            .send()
            .await
            .map_err(|err| StoreError::Request(err.to_string()))?;
        let res = ensure_success(res, "create snippet").await?;
        let body: Value = res
            .json()
            .await
            .map_err(|err| StoreError::Malformed(err.to_string()))?;
        body.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Malformed("create response without an id".to_string()))
    }

    async fn update(&self, id: &str, doc: Value) -> Result<(), StoreError> {
        let res = self
            .client
            .put(self.doc_url(id))
            .json(&doc)
            .send()
            .await
            .map_err(|err| StoreError::Request(err.to_string()))?;
        ensure_success(res, "update snippet").await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let res = self
            .client
            .delete(self.doc_url(id))
            .send()
            .await
            .map_err(|err| StoreError::Request(err.to_string()))?;
        // Deleting an already-absent document is success by contract.
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        ensure_success(res, "delete snippet").await?;
        Ok(())
    }
}
