//! Identity derivation, override persistence and the override-merge step
//!
//! The one piece of state that outlives a load cycle. Records get a stable
//! identity derived from their natural key; user edits are persisted
//! against that identity and overlaid onto freshly-extracted data on every
//! load, so manual corrections survive re-import.

pub mod identity;
pub mod merge;
pub mod store;

pub use identity::{HasIdentity, normalize_key};
pub use merge::merge_with_overrides;
pub use store::{MemoryOverrideStore, OverrideMap, OverrideStore, SqliteOverrideStore};
