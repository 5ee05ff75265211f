//! Project use-case services.
//!
//! # Responsibility
//! - Turn raw form submissions into well-formed `Project` records.
//! - Keep front ends decoupled from storage details.

pub mod project_form;
pub mod project_service;
