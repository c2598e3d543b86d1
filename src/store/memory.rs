//! In-process document store
//!
//! Keeps documents in a `tokio::sync::RwLock<Vec<_>>` and answers queries
//! by keyword overlap against stored text. Good enough for tests, the CLI
//! chat loop, and development without a running vector database; anything
//! that needs real semantic retrieval should use [`RemoteStore`].
//!
//! [`RemoteStore`]: super::RemoteStore

use super::{Document, DocumentStore};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Words carrying no retrieval signal, skipped when scoring
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "be", "for", "how", "in", "is", "it", "of", "on", "or", "that",
    "the", "to", "was", "what", "when", "where", "which", "who", "why",
];

/// In-memory document store with keyword-overlap retrieval
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// All document IDs in insertion order
    pub async fn document_ids(&self) -> Vec<Uuid> {
        self.documents.read().await.iter().map(|d| d.id).collect()
    }

    /// Lowercased content words of `text`, stopwords removed
    fn terms(text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .collect()
    }

    /// Count of query terms appearing in the document
    fn score(query_terms: &HashSet<String>, doc: &Document) -> usize {
        let doc_terms = Self::terms(&doc.text);
        query_terms.iter().filter(|t| doc_terms.contains(*t)).count()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, document: Document) -> Result<()> {
        tracing::debug!(document_id = %document.id, "Inserting document into memory store");
        self.documents.write().await.push(document);
        Ok(())
    }

    async fn query(&self, text: &str) -> Result<String> {
        let query_terms = Self::terms(text);
        if query_terms.is_empty() {
            return Err(Error::Query(format!("query has no content words: '{text}'")));
        }

        let documents = self.documents.read().await;

        // Best-scoring document wins; ties go to the earlier insertion
        let mut best: Option<(usize, &Document)> = None;
        for doc in documents.iter() {
            let score = Self::score(&query_terms, doc);
            if score > 0 && best.map_or(true, |(s, _)| score > s) {
                best = Some((score, doc));
            }
        }

        match best {
            Some((score, doc)) => {
                tracing::debug!(document_id = %doc.id, score, "Answering query from memory store");
                Ok(doc.text.clone())
            }
            None => Err(Error::Query(format!(
                "no stored document matches '{text}'"
            ))),
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}
