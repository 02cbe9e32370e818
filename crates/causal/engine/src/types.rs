use causal_store::{Payload, Record};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Answer produced by the context engine. Never stored directly; only
/// the commitment derived from it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Query the response answers.
    pub query: String,
    /// Generated text.
    pub text: String,
    /// Number of records the response was built from.
    pub relevant_count: usize,
}

impl Response {
    pub fn new(query: impl Into<String>, text: impl Into<String>, relevant_count: usize) -> Self {
        Self {
            query: query.into(),
            text: text.into(),
            relevant_count,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Typed view of a commitment record's payload: `{query, response, timestamp}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentPayload {
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl CommitmentPayload {
    pub fn new(
        query: impl Into<String>,
        response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            timestamp,
        }
    }

    /// Encode as a store payload. `timestamp` becomes an RFC 3339 string.
    pub fn into_payload(self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("query".into(), Value::String(self.query));
        payload.insert("response".into(), Value::String(self.response));
        payload.insert(
            "timestamp".into(),
            Value::String(self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)),
        );
        payload
    }

    /// Decode from a record. `None` if the payload is not commitment-shaped.
    pub fn from_record(record: &Record) -> Option<Self> {
        serde_json::from_value(Value::Object(record.payload.clone())).ok()
    }
}

/// Phases of one evolve cycle, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CyclePhase {
    Read,
    Respond,
    Derive,
    Write,
    Done,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Respond => write!(f, "respond"),
            Self::Derive => write!(f, "derive"),
            Self::Write => write!(f, "write"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Returned by a completed evolve cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Id of the commitment record just written.
    pub commitment_id: String,
    /// 1-based count of completed cycles on this engine.
    pub cycle: u64,
    /// The derived id collided with an existing record, which was replaced.
    pub overwrote: bool,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commitment {} recorded (cycle {})",
            self.commitment_id, self.cycle
        )?;
        if self.overwrote {
            write!(f, ", replacing an earlier record")?;
        }
        Ok(())
    }
}
