use crate::error::ContextError;
use causal_store::Record;

/// Produces response text for a query from its relevant records.
pub trait ResponseGenerator: Send + Sync {
    fn generate(&self, query: &str, relevant: &[Record]) -> Result<String, ContextError>;
}

/// Reports how many relevant records were found and echoes the query verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountingGenerator;

impl CountingGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ResponseGenerator for CountingGenerator {
    fn generate(&self, query: &str, relevant: &[Record]) -> Result<String, ContextError> {
        Ok(format!(
            "Found {} relevant records for query: {}",
            relevant.len(),
            query
        ))
    }
}

/// Failing generator for testing error paths.
#[derive(Clone, Debug)]
pub struct FailingGenerator {
    reason: String,
}

impl FailingGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for FailingGenerator {
    fn default() -> Self {
        Self::new("simulated generation failure")
    }
}

impl ResponseGenerator for FailingGenerator {
    fn generate(&self, _query: &str, _relevant: &[Record]) -> Result<String, ContextError> {
        Err(ContextError::Generation(self.reason.clone()))
    }
}
