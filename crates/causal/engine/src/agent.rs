use crate::context::ContextEngine;
use crate::error::ConstructionError;
use crate::types::Response;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Format of derived commitment ids: `"{prefix}-{n}"` where `n` is
/// `width` uppercase hex digits.
///
/// `n` is the leading 64 bits of a BLAKE3 digest, masked to `4 * width`
/// bits. Within one agent the digest input always differs (it includes a
/// per-agent counter), so ids collide only when truncated digests do:
/// roughly `k² / 2^(4·width + 1)` over `k` derivations. At the default
/// width of 16 that is negligible; at width 4 it passes 50% near 300.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemeFields")]
pub struct CommitmentIdScheme {
    prefix: String,
    width: usize,
}

/// Unchecked wire form; deserialization goes through [`CommitmentIdScheme::new`].
#[derive(Deserialize)]
struct SchemeFields {
    prefix: String,
    width: usize,
}

impl TryFrom<SchemeFields> for CommitmentIdScheme {
    type Error = ConstructionError;

    fn try_from(fields: SchemeFields) -> Result<Self, Self::Error> {
        Self::new(fields.prefix, fields.width)
    }
}

impl CommitmentIdScheme {
    pub fn new(prefix: impl Into<String>, width: usize) -> Result<Self, ConstructionError> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(ConstructionError::InvalidConfig("empty id prefix".into()));
        }
        if !(4..=16).contains(&width) {
            return Err(ConstructionError::InvalidIdWidth(width));
        }
        Ok(Self { prefix, width })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render an id from a 32-byte digest.
    pub fn format(&self, digest: &[u8; 32]) -> String {
        let mut lead = [0u8; 8];
        lead.copy_from_slice(&digest[..8]);
        let bits = (self.width * 4) as u32;
        let n = u64::from_be_bytes(lead);
        let n = if bits >= 64 { n } else { n & ((1u64 << bits) - 1) };
        format!("{}-{:0width$X}", self.prefix, n, width = self.width)
    }
}

impl Default for CommitmentIdScheme {
    fn default() -> Self {
        Self {
            prefix: crate::config::DEFAULT_ID_PREFIX.into(),
            width: 16,
        }
    }
}

/// Derives future commitments from present responses ("branches").
///
/// Holds the context engine it was wired to; derivation itself only
/// needs the response and the clock.
pub struct Agent {
    context: Arc<ContextEngine>,
    scheme: CommitmentIdScheme,
    derivations: AtomicU64,
}

impl Agent {
    pub fn new(context: Arc<ContextEngine>, scheme: CommitmentIdScheme) -> Self {
        Self {
            context,
            scheme,
            derivations: AtomicU64::new(0),
        }
    }

    /// Derive a fresh commitment id from `response` and the current time.
    pub fn derive_commitment(&self, response: &Response) -> String {
        self.derive_commitment_at(response, Utc::now())
    }

    /// Derive a commitment id as of `at`.
    ///
    /// Digest input: response text, `at` to the nanosecond, and the
    /// agent's derivation counter. Equal inputs on two calls are
    /// impossible within one agent, so repeated responses in the same
    /// clock tick still get distinct digests.
    pub fn derive_commitment_at(&self, response: &Response, at: DateTime<Utc>) -> String {
        let counter = self.derivations.fetch_add(1, Ordering::Relaxed);

        let mut hasher = blake3::Hasher::new();
        hasher.update(response.text.as_bytes());
        hasher.update(&[0]);
        hasher.update(at.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
        hasher.update(&counter.to_le_bytes());

        self.scheme.format(hasher.finalize().as_bytes())
    }

    /// Number of ids derived so far.
    pub fn derivations(&self) -> u64 {
        self.derivations.load(Ordering::Relaxed)
    }

    pub fn scheme(&self) -> &CommitmentIdScheme {
        &self.scheme
    }

    pub fn context(&self) -> &Arc<ContextEngine> {
        &self.context
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("scheme", &self.scheme)
            .field("derivations", &self.derivations())
            .finish_non_exhaustive()
    }
}
