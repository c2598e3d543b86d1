//! Classification oracle contract and backends
//!
//! The oracle is the single decision point of a routing invocation: it
//! turns free text into a structured [`ActionBatch`]. Everything after it
//! is deterministic dispatch.

mod openai;

pub use openai::OpenAiOracle;

use crate::error::Result;
use crate::router::ActionBatch;
use async_trait::async_trait;

/// Pluggable classification interface.
///
/// Implementations map one utterance to an ordered batch of actions. A
/// failed model call or unparseable output must surface as
/// [`Error::Classification`](crate::Error::Classification); an empty batch
/// is a valid result, not an error.
#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    /// Classify an utterance into zero or more actions.
    async fn classify(&self, utterance: &str) -> Result<ActionBatch>;

    /// Human-readable backend name (used in logs).
    fn name(&self) -> &str;
}
