#![deny(unsafe_code)]
//! # causal-store
//!
//! The record history ("roots") of the causal loop.
//!
//! Every evolve cycle reads the whole history through [`Store::snapshot`]
//! and writes exactly one new [`Record`] back through [`Store::put`].
//!
//! ## Guarantees
//!
//! - `put` on an existing id overwrites in place; no prior value is kept.
//! - `created_at` is monotonic non-decreasing across successive writes.
//! - `last_modified` is always >= the `created_at` of every held record.
//! - `snapshot` is ordered by write sequence, oldest write first.
//!
//! ## Key Types
//!
//! - [`Record`] — One stored entry: id, payload, creation time
//! - [`Payload`] — Opaque string-keyed JSON mapping
//! - [`Store`] — Shareable in-memory record keeper

pub mod record;
pub mod store;

pub use record::{Payload, Record};
pub use store::Store;
