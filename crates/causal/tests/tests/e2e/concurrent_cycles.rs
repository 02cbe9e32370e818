//! E2E: evolve calls from several threads are serialised into whole cycles.

use causal_engine::EvolutionEngine;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn parallel_callers_each_write_one_record() {
    let engine = Arc::new(EvolutionEngine::bootstrap().unwrap());
    let threads = 8;
    let per_thread = 25;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|i| engine.evolve(&format!("t{}-q{}", t, i)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let confirmations: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let total = threads * per_thread;
    assert_eq!(engine.store().len(), total + 1);
    assert_eq!(engine.cycles(), total as u64);

    let cycles: HashSet<u64> = confirmations.iter().map(|c| c.cycle).collect();
    assert_eq!(cycles.len(), total);
    assert!(cycles.iter().all(|c| (1..=total as u64).contains(c)));
}

#[test]
fn each_cycle_observes_all_prior_writes() {
    let engine = Arc::new(EvolutionEngine::bootstrap().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..10)
                    .map(|i| engine.evolve(&format!("{}:{}", t, i)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for confirmation in handles.into_iter().flat_map(|h| h.join().unwrap()) {
        let record = engine.store().get(&confirmation.commitment_id).unwrap();
        // Cycle n sees the seed plus n - 1 earlier commitments.
        let expected = format!("Found {} relevant records", confirmation.cycle);
        assert!(record.str_field("response").unwrap().starts_with(&expected));
    }
}
