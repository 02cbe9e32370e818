//! E2E: a failing capability leaves the store exactly as it was.

use causal_engine::{
    ContextError, EngineConfig, EvolutionEngine, EvolutionError, FailingGenerator,
    FullSnapshotSelector, RelevanceSelector, Record,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fails every call after the first `ok_calls`.
struct FlakySelector {
    ok_calls: usize,
    calls: Arc<AtomicUsize>,
}

impl RelevanceSelector for FlakySelector {
    fn select(&self, _query: &str, snapshot: Vec<Record>) -> Result<Vec<Record>, ContextError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.ok_calls {
            Ok(snapshot)
        } else {
            Err(ContextError::Selection("index unavailable".into()))
        }
    }
}

#[test]
fn generation_failure_commits_nothing() {
    let engine = EvolutionEngine::bootstrap_with(
        EngineConfig::default(),
        Box::new(FullSnapshotSelector),
        Box::new(FailingGenerator::new("model offline")),
    )
    .unwrap();
    let before = engine.store().snapshot();
    let last_modified = engine.store().last_modified();

    for _ in 0..3 {
        let err = engine.evolve("ping").unwrap_err();
        assert!(format!("{}", err).contains("model offline"));
    }

    assert_eq!(engine.store().snapshot(), before);
    assert_eq!(engine.store().last_modified(), last_modified);
    assert_eq!(engine.cycles(), 0);
}

#[test]
fn selection_failure_after_success_keeps_earlier_commits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = EvolutionEngine::bootstrap_with(
        EngineConfig::default(),
        Box::new(FlakySelector {
            ok_calls: 2,
            calls: Arc::clone(&calls),
        }),
        Box::new(causal_engine::CountingGenerator::new()),
    )
    .unwrap();

    engine.evolve("one").unwrap();
    engine.evolve("two").unwrap();
    let result = engine.evolve("three");

    assert!(matches!(
        result,
        Err(EvolutionError::Context(ContextError::Selection(_)))
    ));
    assert_eq!(engine.store().len(), 3);
    assert_eq!(engine.cycles(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
