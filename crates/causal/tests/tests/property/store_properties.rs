//! Property tests: any sequence of puts leaves the store last-write-wins,
//! complete and monotonically ordered.

use causal_store::{Payload, Store};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ids drawn from a small alphabet so overwrites are frequent.
fn arb_id() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn arb_payload() -> impl Strategy<Value = Payload> {
    prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..4).prop_map(|m| {
        m.into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect::<Payload>()
    })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// `get` always returns the payload of the last `put` for that id.
    #[test]
    fn last_write_wins(ops in prop::collection::vec((arb_id(), arb_payload()), 1..60)) {
        let store = Store::new();
        let mut expected: HashMap<String, Payload> = HashMap::new();

        for (id, payload) in ops {
            store.put(id.clone(), payload.clone());
            expected.insert(id, payload);
        }

        prop_assert_eq!(store.len(), expected.len());
        for (id, payload) in &expected {
            let record = store.get(id).unwrap();
            prop_assert_eq!(&record.payload, payload);
        }
    }

    /// After n distinct-id inserts the snapshot holds exactly n retrievable records.
    #[test]
    fn snapshot_complete(count in 0usize..50) {
        let store = Store::new();
        for i in 0..count {
            store.put(format!("id-{}", i), Payload::new());
        }

        let snapshot = store.snapshot();
        prop_assert_eq!(snapshot.len(), count);
        for record in &snapshot {
            let fetched = store.get(&record.id);
            prop_assert_eq!(fetched.as_ref(), Some(record));
        }
    }

    /// Snapshot order is write order, and creation times never go backwards.
    #[test]
    fn snapshot_monotonic(ids in prop::collection::vec(arb_id(), 1..60)) {
        let store = Store::new();
        for id in &ids {
            store.put(id.clone(), Payload::new());
        }

        let snapshot = store.snapshot();
        for pair in snapshot.windows(2) {
            prop_assert!(pair[0].sequence < pair[1].sequence);
            prop_assert!(pair[0].created_at <= pair[1].created_at);
        }
        let last_modified = store.last_modified();
        prop_assert!(snapshot.iter().all(|r| r.created_at <= last_modified));
    }
}
