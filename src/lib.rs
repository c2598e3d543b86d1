//! Jotter - a query-or-write assistant core
//!
//! Jotter routes a natural-language utterance to a document store: it asks
//! a classification oracle whether the user wants to *save* a statement or
//! *ask* one or more questions, then dispatches each resulting action and
//! collects the outcomes.
//!
//! ## Architecture
//!
//! ```text
//!  utterance ──▶ ┌──────────────────────┐
//!                │   Intent Router      │
//!                │                      │        ┌─────────────────────┐
//!                │  1. classify ────────┼───────▶│ Classification      │
//!                │                      │◀───────┤ Oracle (LLM)        │
//!                │  2. dispatch batch   │ batch  └─────────────────────┘
//!                │     ├─ SaveToDocs ───┼───────▶┌─────────────────────┐
//!                │     └─ Ask ──────────┼───────▶│ Document Store      │
//!                │                      │answers │ (vector database)   │
//!                └──────────┬───────────┘        └─────────────────────┘
//!                           ▼
//!                      RunOutcome (ordered per-action results)
//! ```
//!
//! Both collaborators sit behind traits ([`oracle::ClassificationOracle`],
//! [`store::DocumentStore`]) and are injected into the router, so either
//! can be replaced by a test double or a different backend.
//!
//! ## Modules
//!
//! - [`router`]: action types and the routing/dispatch core
//! - [`oracle`]: classification oracle contract and the OpenAI-compatible backend
//! - [`store`]: document store contract, in-memory and remote backends
//! - [`config`]: configuration management

pub mod config;
pub mod error;
pub mod oracle;
pub mod router;
pub mod store;

pub use config::JotterConfig;
pub use error::{Error, Result};
pub use router::IntentRouter;
