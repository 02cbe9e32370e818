/// Errors that abort [`EvolutionEngine`](crate::EvolutionEngine) bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
    #[error("invalid commitment id width: {0} (expected 4..=16)")]
    InvalidIdWidth(usize),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the pluggable relevance and generation capabilities.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("relevance selection failed: {0}")]
    Selection(String),
    #[error("response generation failed: {0}")]
    Generation(String),
}

/// Errors from one evolve cycle. None of them leave a partial write behind.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("context error: {0}")]
    Context(#[from] ContextError),
}
