use crate::agent::{Agent, CommitmentIdScheme};
use crate::config::EngineConfig;
use crate::context::ContextEngine;
use crate::error::{ConstructionError, EvolutionError};
use crate::generator::{CountingGenerator, ResponseGenerator};
use crate::relevance::RelevanceSelector;
use crate::types::{CommitmentPayload, Confirmation, CyclePhase};
use causal_store::Store;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates the feedback loop and exposes its only entry point, [`evolve`].
///
/// Each `evolve` call runs `Read → Respond → Derive → Write → Done` as one
/// critical section: concurrent callers are serialised, every call sees a
/// consistent snapshot and writes exactly one record.
///
/// [`evolve`]: EvolutionEngine::evolve
pub struct EvolutionEngine {
    config: EngineConfig,
    store: Arc<Store>,
    context: Arc<ContextEngine>,
    agent: Agent,
    /// Completed cycle count. Held for the whole of `evolve`.
    cycle: Mutex<u64>,
}

impl EvolutionEngine {
    /// Bootstrap with the default config and reference capabilities.
    pub fn bootstrap() -> Result<Self, ConstructionError> {
        Self::from_config(EngineConfig::default())
    }

    /// Bootstrap with the selector named in `config` and the counting generator.
    pub fn from_config(config: EngineConfig) -> Result<Self, ConstructionError> {
        let selector = config.selector.build();
        Self::bootstrap_with(config, selector, Box::new(CountingGenerator::new()))
    }

    /// Wire store, context engine and agent, then seed the bootstrap record.
    pub fn bootstrap_with(
        config: EngineConfig,
        selector: Box<dyn RelevanceSelector>,
        generator: Box<dyn ResponseGenerator>,
    ) -> Result<Self, ConstructionError> {
        config.validate()?;
        let scheme = CommitmentIdScheme::new(config.id_prefix.clone(), config.id_width)?;

        let store = Arc::new(Store::new());
        let context = Arc::new(ContextEngine::new(Arc::clone(&store), selector, generator));
        let agent = Agent::new(Arc::clone(&context), scheme);

        let seed = CommitmentPayload::new(
            config.bootstrap_query.clone(),
            config.bootstrap_response.clone(),
            Utc::now(),
        );
        store.put(config.bootstrap_id.clone(), seed.into_payload());
        info!(bootstrap_id = %config.bootstrap_id, "causal loop bootstrapped");

        Ok(Self {
            config,
            store,
            context,
            agent,
            cycle: Mutex::new(0),
        })
    }

    /// Run one full cycle for `query` and confirm the commitment written.
    ///
    /// If the context engine fails, nothing is written and the error is
    /// returned as is.
    pub fn evolve(&self, query: &str) -> Result<Confirmation, EvolutionError> {
        let mut cycle = self.cycle.lock();
        let current = *cycle + 1;

        debug!(cycle = current, phase = %CyclePhase::Read, records = self.store.len(), "cycle started");
        let response = self.context.answer(query)?;
        debug!(
            cycle = current,
            phase = %CyclePhase::Respond,
            relevant = response.relevant_count,
            "response generated"
        );

        let commitment_id = self.agent.derive_commitment(&response);
        debug!(cycle = current, phase = %CyclePhase::Derive, commitment_id = %commitment_id, "commitment derived");

        let payload = CommitmentPayload::new(query, response.text, Utc::now()).into_payload();
        let displaced = self.store.put(commitment_id.clone(), payload);
        let overwrote = displaced.is_some();
        if overwrote {
            warn!(
                cycle = current,
                commitment_id = %commitment_id,
                "commitment id collided; earlier record replaced"
            );
        }
        debug!(cycle = current, phase = %CyclePhase::Write, "commitment written");

        *cycle = current;
        info!(cycle = current, phase = %CyclePhase::Done, commitment_id = %commitment_id, "commitment recorded");

        Ok(Confirmation {
            commitment_id,
            cycle: current,
            overwrote,
        })
    }

    /// Completed cycles.
    pub fn cycles(&self) -> u64 {
        *self.cycle.lock()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn context(&self) -> &Arc<ContextEngine> {
        &self.context
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }
}

impl std::fmt::Debug for EvolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("config", &self.config)
            .field("records", &self.store.len())
            .field("cycles", &self.cycles())
            .finish_non_exhaustive()
    }
}
