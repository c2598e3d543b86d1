//! Action and outcome types for the intent router

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One discrete request derived from a user utterance.
///
/// The classification oracle produces these; the router dispatches them.
/// A tagged enum keeps dispatch exhaustive: adding a new action kind is a
/// compile error everywhere it is not handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Persist a piece of text to the document store
    SaveToDocs {
        /// The statement to store, as extracted by the oracle
        statement: String,
    },
    /// Answer one or more independent questions from stored documents
    Ask {
        /// Questions in the order the oracle produced them
        queries: Vec<String>,
    },
}

/// Ordered batch of actions classified from a single utterance.
///
/// May be empty (the utterance required no action) or contain multiple
/// heterogeneous actions. Order reflects oracle output order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionBatch {
    pub actions: Vec<Action>,
}

impl ActionBatch {
    /// Create an empty batch
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

impl From<Vec<Action>> for ActionBatch {
    fn from(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

/// Result of one query within an ask action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The store answered the query
    Answered {
        /// The query as submitted
        query: String,
        /// Synthesized natural-language answer
        answer: String,
    },
    /// The query failed; sibling queries are unaffected
    QueryFailed {
        query: String,
        reason: String,
    },
}

impl QueryOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::QueryFailed { .. })
    }
}

/// Result of dispatching one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A statement was persisted as a new document
    Saved {
        /// ID assigned to the inserted document
        document_id: Uuid,
        statement: String,
    },
    /// The insertion failed; remaining actions still run
    WriteFailed {
        statement: String,
        reason: String,
    },
    /// Per-query results of an ask action, in query order
    Asked {
        results: Vec<QueryOutcome>,
    },
}

/// Ordered collection of per-action results from one routing invocation.
///
/// Outcome order matches batch order. An empty batch yields an empty
/// outcome, which is a valid no-op result rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub outcomes: Vec<ActionOutcome>,
}

impl RunOutcome {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether any action or query in the run failed
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| match o {
            ActionOutcome::WriteFailed { .. } => true,
            ActionOutcome::Asked { results } => results.iter().any(QueryOutcome::is_failure),
            ActionOutcome::Saved { .. } => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_batch_parses_from_oracle_json() {
        let json = r#"[
            {"kind": "save_to_docs", "statement": "the meeting is on Friday"},
            {"kind": "ask", "queries": ["Who is Tuana?", "Who is Kacper?"]}
        ]"#;
        let batch: ActionBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.actions[0],
            Action::SaveToDocs {
                statement: "the meeting is on Friday".to_string()
            }
        );
        assert_eq!(
            batch.actions[1],
            Action::Ask {
                queries: vec!["Who is Tuana?".to_string(), "Who is Kacper?".to_string()]
            }
        );
    }

    #[test]
    fn test_empty_batch_parses() {
        let batch: ActionBatch = serde_json::from_str("[]").unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"[{"kind": "delete_everything", "target": "*"}]"#;
        let result: std::result::Result<ActionBatch, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_outcome_has_failures() {
        let ok = RunOutcome {
            outcomes: vec![ActionOutcome::Asked {
                results: vec![QueryOutcome::Answered {
                    query: "q".into(),
                    answer: "a".into(),
                }],
            }],
        };
        assert!(!ok.has_failures());

        let mixed = RunOutcome {
            outcomes: vec![ActionOutcome::Asked {
                results: vec![
                    QueryOutcome::QueryFailed {
                        query: "q1".into(),
                        reason: "timeout".into(),
                    },
                    QueryOutcome::Answered {
                        query: "q2".into(),
                        answer: "a".into(),
                    },
                ],
            }],
        };
        assert!(mixed.has_failures());
    }

    #[test]
    fn test_outcome_serializes_with_tags() {
        let outcome = ActionOutcome::WriteFailed {
            statement: "s".into(),
            reason: "store unavailable".into(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains(r#""outcome":"write_failed""#));
    }
}
