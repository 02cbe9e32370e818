use crate::error::ContextError;
use crate::generator::{CountingGenerator, ResponseGenerator};
use crate::relevance::{FullSnapshotSelector, RelevanceSelector};
use crate::types::Response;
use causal_store::{Record, Store};
use std::sync::Arc;
use tracing::debug;

/// Present-moment query processor ("trunk").
///
/// Reads the shared [`Store`] on every call; nothing is cached between
/// calls and the store is never written.
pub struct ContextEngine {
    store: Arc<Store>,
    selector: Box<dyn RelevanceSelector>,
    generator: Box<dyn ResponseGenerator>,
}

impl ContextEngine {
    pub fn new(
        store: Arc<Store>,
        selector: Box<dyn RelevanceSelector>,
        generator: Box<dyn ResponseGenerator>,
    ) -> Self {
        Self {
            store,
            selector,
            generator,
        }
    }

    /// Full-snapshot selection with the counting generator.
    pub fn with_defaults(store: Arc<Store>) -> Self {
        Self::new(
            store,
            Box::new(FullSnapshotSelector),
            Box::new(CountingGenerator::new()),
        )
    }

    /// Records relevant to `query`, drawn from the store as it is now.
    pub fn select_relevant(&self, query: &str) -> Result<Vec<Record>, ContextError> {
        let snapshot = self.store.snapshot();
        let total = snapshot.len();
        let relevant = self.selector.select(query, snapshot)?;
        debug!(total, relevant = relevant.len(), "relevant records selected");
        Ok(relevant)
    }

    pub fn answer(&self, query: &str) -> Result<Response, ContextError> {
        let relevant = self.select_relevant(query)?;
        let text = self.generator.generate(query, &relevant)?;
        Ok(Response::new(query, text, relevant.len()))
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }
}

impl std::fmt::Debug for ContextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextEngine")
            .field("records", &self.store.len())
            .finish_non_exhaustive()
    }
}
