//! Document store contract and backends
//!
//! The store is an external collaborator: Jotter only needs "insert a
//! document" and "answer a question from stored documents". Indexing,
//! embedding, and ranking are the backend's business.

mod memory;
mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// An opaque unit of text handed to the store.
///
/// Ownership transfers to the store on insertion; the router does not
/// retain a reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    /// Identifier assigned at construction
    pub id: Uuid,
    /// Document text
    pub text: String,
    /// Optional string-valued metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document from plain text with a fresh ID and no metadata
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Pluggable document store interface.
///
/// Insertion mutates the store's persisted collection; queries are
/// read-only. Implementations must be safe under concurrent readers
/// while writing — the router issues independent queries in parallel.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document into the collection.
    ///
    /// No deduplication: inserting the same text twice produces two
    /// distinct documents.
    async fn insert(&self, document: Document) -> Result<()>;

    /// Answer a question from stored documents, returning a synthesized
    /// natural-language answer.
    async fn query(&self, text: &str) -> Result<String>;

    /// Human-readable backend name (used in logs).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text() {
        let doc = Document::from_text("Tuana is DevRel at LlamaIndex.");
        assert_eq!(doc.text, "Tuana is DevRel at LlamaIndex.");
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_documents_get_distinct_ids() {
        let a = Document::from_text("same text");
        let b = Document::from_text("same text");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_with_metadata() {
        let doc = Document::from_text("note").with_metadata("source", "chat");
        assert_eq!(doc.metadata.get("source").map(String::as_str), Some("chat"));
    }
}
