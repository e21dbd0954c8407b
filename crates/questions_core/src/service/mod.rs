//! Caller-facing query services.
//!
//! # Responsibility
//! - Bundle repositories into one handle for application code.
//! - Keep callers decoupled from per-table repository types.

pub mod questions_service;
