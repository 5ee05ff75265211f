//! Raw form submission model.
//!
//! Values are kept exactly as submitted; trimming and progress parsing happen
//! in the service.

use std::collections::HashMap;

/// Fields read by project creation, in form order.
pub const CREATE_FIELDS: [&str; 11] = [
    "id",
    "name",
    "developer",
    "complexity",
    "estimation",
    "analysis_progress",
    "development_progress",
    "testing_progress",
    "start_date",
    "end_date",
    "status",
];

/// Fields an edit may overwrite; never includes `id`.
pub const EDITABLE_FIELDS: [&str; 10] = [
    "name",
    "developer",
    "complexity",
    "estimation",
    "analysis_progress",
    "development_progress",
    "testing_progress",
    "start_date",
    "end_date",
    "status",
];

/// Raw string values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    values: HashMap<String, String>,
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated key replaces the earlier value.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Raw value for `field`, or `""` when the field was not submitted.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ProjectForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (field, value) in iter {
            form.insert(field, value);
        }
        form
    }
}
