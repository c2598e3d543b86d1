//! Intent routing core
//!
//! One utterance in, one ordered batch of typed actions out of the
//! oracle, one outcome per action out of the dispatcher.

mod dispatch;
mod types;

pub use dispatch::IntentRouter;
pub use types::{Action, ActionBatch, ActionOutcome, QueryOutcome, RunOutcome};
