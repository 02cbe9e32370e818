use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque record body. The store never inspects or rewrites it.
pub type Payload = serde_json::Map<String, Value>;

/// One historical entry ("vector") held by a [`Store`](crate::Store).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique within the owning store.
    pub id: String,
    pub payload: Payload,
    /// Set when the record was (last) written.
    pub created_at: DateTime<Utc>,
    /// Write sequence within the owning store. Strictly increasing per write.
    pub sequence: u64,
}

impl Record {
    /// Look up a top-level payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Look up a top-level payload field that holds a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}
