//! Keyword search helpers.
//!
//! # Responsibility
//! - Normalize user keywords and record fields into one comparable form.
//! - Keep matching rules inside core so every front end behaves the same.

pub mod normalize;
