//! Domain model for tracked projects.
//!
//! # Invariants
//! - A project is identified by a caller-chosen, non-empty string id.
//! - Progress percentages never leave the inclusive range `[0, 100]`.

pub mod project;
