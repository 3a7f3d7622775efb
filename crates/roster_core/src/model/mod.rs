//! Roster domain model.
//!
//! # Responsibility
//! - Define the student record and its GPA classification.
//! - Keep field validation next to the data it guards.
//!
//! # Invariants
//! - Every record is identified by a caller-chosen string id.
//! - Band thresholds live in one place (`GpaBand::from_gpa`).

pub mod student;
