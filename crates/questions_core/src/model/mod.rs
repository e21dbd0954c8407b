//! Read-only value objects materialized from the four entity tables.
//!
//! # Responsibility
//! - Mirror one table row per struct with a one-to-one field mapping.
//! - Keep field names identical to column names.
//!
//! # Invariants
//! - Instances are snapshots; nothing writes them back to storage.
//! - Relations are carried as ids, never as owned child collections.

pub mod question;
pub mod question_follow;
pub mod reply;
pub mod user;
