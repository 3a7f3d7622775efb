//! Persistence adapter for the roster.
//!
//! # Responsibility
//! - Expose a key-value text store (`SlotStore`) with SQLite and in-memory
//!   backends.
//! - Encode the whole roster as one JSON document in a named slot.
//!
//! # Invariants
//! - Writes replace the full slot value; there are no partial updates.
//! - Read paths reject malformed persisted data instead of masking it.

pub mod roster_repo;
pub mod slot_store;
