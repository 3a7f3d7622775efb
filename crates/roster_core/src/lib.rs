//! Core domain logic for the student roster.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::RosterConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{
    BandFilter, GpaBand, Student, StudentField, StudentPatch, UnknownBandFilter,
};
pub use repo::roster_repo::{
    RepoError, RepoResult, RosterRepository, SlotRosterRepository, DEFAULT_SLOT_KEY,
};
pub use repo::slot_store::{MemorySlotStore, SlotStore, SqliteSlotStore};
pub use search::normalize::normalize_search_text;
pub use service::roster_service::{
    ActionOutcome, Rejection, RosterService, RosterStats, StudentListQuery,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
