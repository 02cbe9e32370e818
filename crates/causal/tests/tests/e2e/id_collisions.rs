//! E2E: short commitment ids collide, and a collision replaces a record
//! instead of adding one.

use causal_engine::{CommitmentPayload, EngineConfig, EvolutionEngine};

#[test]
fn compact_ids_overwrite_without_growth() {
    // 4 hex digits leave 65536 ids; thousands of cycles all but guarantee repeats.
    let engine = EvolutionEngine::from_config(EngineConfig::compact()).unwrap();
    let mut overwrites = 0;

    for i in 0..3000 {
        let query = format!("q{}", i);
        let before = engine.store().len();
        let c = engine.evolve(&query).unwrap();
        let after = engine.store().len();

        if c.overwrote {
            overwrites += 1;
            assert_eq!(after, before, "cycle {} replaced a record", c.cycle);
            assert!(c.to_string().ends_with("replacing an earlier record"));
        } else {
            assert_eq!(after, before + 1, "cycle {} added a record", c.cycle);
        }

        // The surviving record under the id is always the newest write.
        let record = engine.store().get(&c.commitment_id).unwrap();
        assert_eq!(CommitmentPayload::from_record(&record).unwrap().query, query);
    }

    assert!(overwrites > 0);
    assert_eq!(engine.cycles(), 3000);
    assert_eq!(engine.store().len(), 3001 - overwrites);
}
