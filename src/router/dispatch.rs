//! Batch dispatch over classified actions
//!
//! `route` is a single pass: classify, then walk the batch in order.
//! The oracle call is the only decision point; everything afterwards is
//! deterministic given the batch. Failures scoped to one action or one
//! query become outcome entries and never abort their siblings — only a
//! classification failure aborts the invocation.

use super::types::{Action, ActionOutcome, QueryOutcome, RunOutcome};
use crate::config::RouterConfig;
use crate::error::{Error, Result};
use crate::oracle::ClassificationOracle;
use crate::store::{Document, DocumentStore};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Routes utterances to the document store via the classification oracle.
///
/// Both collaborators are injected, so tests can substitute doubles for
/// either. The router holds no other state; every `route` call is
/// independent.
pub struct IntentRouter {
    oracle: Arc<dyn ClassificationOracle>,
    store: Arc<dyn DocumentStore>,
    config: RouterConfig,
}

impl IntentRouter {
    /// Create a router with default configuration
    pub fn new(oracle: Arc<dyn ClassificationOracle>, store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(oracle, store, RouterConfig::default())
    }

    /// Create a router with explicit configuration
    pub fn with_config(
        oracle: Arc<dyn ClassificationOracle>,
        store: Arc<dyn DocumentStore>,
        config: RouterConfig,
    ) -> Self {
        Self {
            oracle,
            store,
            config,
        }
    }

    /// Route one utterance: classify it, dispatch every resulting action
    /// in batch order, and return the ordered per-action outcomes.
    ///
    /// Returns `Err` only when classification fails; in that case no
    /// action has been attempted. An empty batch yields an empty
    /// [`RunOutcome`] without touching the store.
    pub async fn route(&self, utterance: &str) -> Result<RunOutcome> {
        let batch = self.oracle.classify(utterance).await?;

        tracing::info!(
            oracle = self.oracle.name(),
            store = self.store.name(),
            actions = batch.len(),
            "Dispatching classified batch"
        );

        let mut outcomes = Vec::with_capacity(batch.len());
        for action in batch.actions {
            let outcome = match action {
                Action::SaveToDocs { statement } => self.dispatch_save(statement).await,
                Action::Ask { queries } => self.dispatch_ask(queries).await,
            };
            outcomes.push(outcome);
        }

        Ok(RunOutcome { outcomes })
    }

    /// Insert one document built from the statement. Exactly one insert
    /// attempt per save action; no deduplication against prior saves.
    async fn dispatch_save(&self, statement: String) -> ActionOutcome {
        let document = Document::from_text(&statement);
        let document_id = document.id;

        match self.with_timeout(self.store.insert(document)).await {
            Ok(()) => {
                tracing::info!(%document_id, "Statement saved");
                ActionOutcome::Saved {
                    document_id,
                    statement,
                }
            }
            Err(e) => {
                tracing::warn!(%document_id, error = %e, "Statement save failed");
                ActionOutcome::WriteFailed {
                    statement,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Run every query of one ask action, collecting outcomes by index.
    /// Queries are independent, so they run concurrently unless the
    /// configuration says otherwise.
    async fn dispatch_ask(&self, queries: Vec<String>) -> ActionOutcome {
        let results = if self.config.parallel_queries {
            join_all(queries.into_iter().map(|q| self.run_query(q))).await
        } else {
            let mut results = Vec::with_capacity(queries.len());
            for query in queries {
                results.push(self.run_query(query).await);
            }
            results
        };

        ActionOutcome::Asked { results }
    }

    /// One semantic query against the store. Failures stay scoped to
    /// this query.
    async fn run_query(&self, query: String) -> QueryOutcome {
        match self.with_timeout(self.store.query(&query)).await {
            Ok(answer) => QueryOutcome::Answered { query, answer },
            Err(e) => {
                tracing::warn!(%query, error = %e, "Query failed");
                QueryOutcome::QueryFailed {
                    query,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Bound one store round-trip by the configured operation timeout
    async fn with_timeout<T>(
        &self,
        op: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        let limit = Duration::from_secs(self.config.op_timeout_secs);
        match tokio::time::timeout(limit, op).await {
            Ok(result) => result,
            Err(_) => Err(Error::Store(format!(
                "store operation timed out after {}s",
                self.config.op_timeout_secs
            ))),
        }
    }
}
