use crate::error::ConstructionError;
use crate::relevance::{FullSnapshotSelector, KeywordSelector, RelevanceSelector};
use serde::{Deserialize, Serialize};

/// Id of the record seeded before the first evolve cycle.
pub const BOOTSTRAP_ID: &str = "CAUSAL-V-0000";

/// Prefix shared by the bootstrap id and every derived commitment id.
pub const DEFAULT_ID_PREFIX: &str = "CAUSAL-V";

/// Which built-in relevance selector the engine wires in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    /// Every record in the store is relevant.
    #[default]
    FullSnapshot,
    /// Records sharing a word with the query.
    Keyword,
}

impl SelectorKind {
    pub fn build(&self) -> Box<dyn RelevanceSelector> {
        match self {
            Self::FullSnapshot => Box::new(FullSnapshotSelector),
            Self::Keyword => Box::new(KeywordSelector::new()),
        }
    }
}

/// Bootstrap and id-scheme configuration for an
/// [`EvolutionEngine`](crate::EvolutionEngine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Id of the seed record.
    pub bootstrap_id: String,
    /// `query` field of the seed record.
    pub bootstrap_query: String,
    /// `response` field of the seed record.
    pub bootstrap_response: String,
    /// Prefix of derived commitment ids.
    pub id_prefix: String,
    /// Hex digits in derived commitment ids (4..=16).
    pub id_width: usize,
    pub selector: SelectorKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bootstrap_id: BOOTSTRAP_ID.into(),
            bootstrap_query: "initial context".into(),
            bootstrap_response: "Ethical baseline established: act with care, keep commitments traceable."
                .into(),
            id_prefix: DEFAULT_ID_PREFIX.into(),
            id_width: 16,
            selector: SelectorKind::FullSnapshot,
        }
    }
}

impl EngineConfig {
    /// Short four-digit ids, matching the width of the bootstrap id.
    ///
    /// Collisions become likely after a few hundred cycles; a colliding
    /// commitment silently replaces the earlier record.
    pub fn compact() -> Self {
        Self {
            id_width: 4,
            ..Self::default()
        }
    }

    pub fn with_selector(mut self, selector: SelectorKind) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_id_width(mut self, width: usize) -> Self {
        self.id_width = width;
        self
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConstructionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.bootstrap_id.trim().is_empty() {
            return Err(ConstructionError::InvalidConfig("empty bootstrap id".into()));
        }
        if self.bootstrap_query.trim().is_empty() {
            return Err(ConstructionError::InvalidConfig(
                "empty bootstrap query".into(),
            ));
        }
        if self.id_prefix.trim().is_empty() {
            return Err(ConstructionError::InvalidConfig("empty id prefix".into()));
        }
        if !(4..=16).contains(&self.id_width) {
            return Err(ConstructionError::InvalidIdWidth(self.id_width));
        }
        Ok(())
    }
}
