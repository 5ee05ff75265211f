//! Record store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed record store the project service depends on.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Write paths call `Project::validate()` before any SQL mutation.
//! - Absence on read is `Ok(None)`, never an error.

pub mod project_repo;
