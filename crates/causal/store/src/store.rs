use crate::record::{Payload, Record};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::trace;

/// In-memory record keeper for the causal loop.
///
/// Shared between the evolution engine (which owns it through an `Arc`)
/// and the context engine (which only reads it). All operations take
/// `&self`; interior state sits behind a non-poisoning lock, so no
/// operation can fail.
#[derive(Debug)]
pub struct Store {
    state: RwLock<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    records: HashMap<String, Record>,
    last_modified: DateTime<Utc>,
    next_sequence: u64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                records: HashMap::new(),
                last_modified: Utc::now(),
                next_sequence: 0,
            }),
        }
    }

    /// Insert or overwrite the record at `id`, stamped with the current time.
    ///
    /// Returns the record that was displaced, if any.
    pub fn put(&self, id: impl Into<String>, payload: Payload) -> Option<Record> {
        self.put_at(id, payload, Utc::now())
    }

    /// Insert or overwrite the record at `id` as observed at `observed_at`.
    ///
    /// `created_at` is clamped to `last_modified` so a clock that steps
    /// backwards never breaks write monotonicity.
    pub fn put_at(
        &self,
        id: impl Into<String>,
        payload: Payload,
        observed_at: DateTime<Utc>,
    ) -> Option<Record> {
        let id = id.into();
        let mut state = self.state.write();

        let created_at = observed_at.max(state.last_modified);
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.last_modified = created_at;

        let record = Record {
            id: id.clone(),
            payload,
            created_at,
            sequence,
        };
        let displaced = state.records.insert(id, record);
        trace!(
            sequence,
            overwrite = displaced.is_some(),
            "record written"
        );
        displaced
    }

    /// Fetch a record. `None` is the explicit "not found" result.
    pub fn get(&self, id: &str) -> Option<Record> {
        self.state.read().records.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.read().records.contains_key(id)
    }

    /// All held records, ordered by write sequence (oldest write first).
    ///
    /// An overwritten record sits at the position of its latest write.
    pub fn snapshot(&self) -> Vec<Record> {
        let state = self.state.read();
        let mut records: Vec<Record> = state.records.values().cloned().collect();
        records.sort_by_key(|r| r.sequence);
        records
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Time of the latest insertion or overwrite (store creation time if empty).
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.state.read().last_modified
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
