#![deny(unsafe_code)]
//! # causal-engine
//!
//! The self-referential feedback loop: answer a query from accumulated
//! history, derive a commitment from the answer, and fold it back into
//! the history that future queries will read.
//!
//! ## Architecture
//!
//! ```text
//! evolve(query)
//!   ├─ Read + Respond   ContextEngine::answer      (reads Store)
//!   ├─ Derive           Agent::derive_commitment
//!   ├─ Write            Store::put(id, {query, response, timestamp})
//!   └─ Done             Confirmation { commitment_id, .. }
//! ```
//!
//! Ownership runs one way: the [`EvolutionEngine`] owns the store, the
//! [`ContextEngine`] shares it read-only, and the [`Agent`] shares the
//! context engine.
//!
//! ## Key Types
//!
//! - [`EvolutionEngine`] — Bootstraps the loop and runs evolve cycles
//! - [`ContextEngine`] — Selects relevant records and produces a [`Response`]
//! - [`Agent`] — Derives commitment ids via a [`CommitmentIdScheme`]
//! - [`RelevanceSelector`] / [`ResponseGenerator`] — Pluggable capabilities
//! - [`EngineConfig`] — Bootstrap record and id scheme settings

pub mod agent;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod generator;
pub mod relevance;
pub mod types;

pub use agent::{Agent, CommitmentIdScheme};
pub use config::{EngineConfig, SelectorKind, BOOTSTRAP_ID, DEFAULT_ID_PREFIX};
pub use context::ContextEngine;
pub use engine::EvolutionEngine;
pub use error::{ConstructionError, ContextError, EvolutionError};
pub use generator::{CountingGenerator, FailingGenerator, ResponseGenerator};
pub use relevance::{FullSnapshotSelector, KeywordSelector, RelevanceSelector};
pub use types::{CommitmentPayload, Confirmation, CyclePhase, Response};

pub use causal_store::{Payload, Record, Store};
