//! HTTP client for a remote document store service
//!
//! Talks to a REST front of a vector database exposing two endpoints:
//!
//! - `POST {base}/collections/{collection}/documents` — insert one document
//! - `POST {base}/collections/{collection}/query` — answer one question
//!
//! Embedding, indexing, and ranking all happen service-side; this client
//! only moves JSON.

use super::{Document, DocumentStore};
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote document store client
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    answer: String,
}

impl RemoteStore {
    /// Build a client from store configuration.
    ///
    /// The API key is read from the environment variable named in
    /// `config.api_key_env`; an empty variable name means no auth header.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let api_key = if config.api_key_env.is_empty() {
            None
        } else {
            Some(std::env::var(&config.api_key_env).map_err(|_| {
                Error::Config(format!(
                    "Store API key environment variable '{}' is not set",
                    config.api_key_env
                ))
            })?)
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Store(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            api_key,
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}/collections/{}/{}",
            self.base_url, self.collection, suffix
        )
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(url);
        if let Some(ref key) = self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }
        builder
    }
}

#[async_trait]
impl DocumentStore for RemoteStore {
    async fn insert(&self, document: Document) -> Result<()> {
        let url = self.url("documents");
        tracing::debug!(document_id = %document.id, %url, "Inserting document into remote store");

        let response = self
            .request(&url)
            .json(&document)
            .send()
            .await
            .map_err(|e| Error::Write(format!("insert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Write(format!("insert failed: HTTP {status}: {body}")));
        }

        Ok(())
    }

    async fn query(&self, text: &str) -> Result<String> {
        let url = self.url("query");
        tracing::debug!(%url, "Querying remote store");

        let response = self
            .request(&url)
            .json(&QueryRequest { text })
            .send()
            .await
            .map_err(|e| Error::Query(format!("query request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Query(format!("query failed: HTTP {status}: {body}")));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::Query(format!("malformed query response: {}", e)))?;

        Ok(parsed.answer)
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;

    fn test_config() -> StoreConfig {
        StoreConfig {
            backend: StoreBackend::Remote,
            endpoint: "http://127.0.0.1:6333/".to_string(),
            api_key_env: String::new(),
            collection: "notes".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_from_config_without_key() {
        let store = RemoteStore::from_config(&test_config()).unwrap();
        assert_eq!(store.name(), "remote");
        assert!(store.api_key.is_none());
    }

    #[test]
    fn test_url_building_strips_trailing_slash() {
        let store = RemoteStore::from_config(&test_config()).unwrap();
        assert_eq!(
            store.url("query"),
            "http://127.0.0.1:6333/collections/notes/query"
        );
    }

    #[test]
    fn test_missing_key_env_is_config_error() {
        let mut config = test_config();
        config.api_key_env = "JOTTER_TEST_KEY_THAT_DOES_NOT_EXIST".to_string();
        let result = RemoteStore::from_config(&config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_insert_unreachable_is_write_error() {
        // Port 9 (discard) is not listening; the request fails fast
        let mut config = test_config();
        config.endpoint = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 1;
        let store = RemoteStore::from_config(&config).unwrap();

        let result = store.insert(Document::from_text("note")).await;
        assert!(matches!(result, Err(Error::Write(_))));
    }

    #[tokio::test]
    async fn test_query_unreachable_is_query_error() {
        let mut config = test_config();
        config.endpoint = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 1;
        let store = RemoteStore::from_config(&config).unwrap();

        let result = store.query("Who is Tuana?").await;
        assert!(matches!(result, Err(Error::Query(_))));
    }
}
