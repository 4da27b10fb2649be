//! In-memory label schemas.

use std::collections::{HashMap, HashSet};

use posegen_core::labels::LabelSchema;

// ---------------------------------------------------------------------------
// PermissiveSchema
// ---------------------------------------------------------------------------

/// A [`LabelSchema`] that treats every key as categorical and every
/// (key, value) pair as valid.  Useful when a test only exercises matching,
/// not validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveSchema;

impl LabelSchema for PermissiveSchema {
    fn is_numeric_field(&self, _key: &str) -> bool {
        false
    }

    fn is_valid_label(&self, _key: &str, _value: &str) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// TableSchema
// ---------------------------------------------------------------------------

/// A [`LabelSchema`] backed by explicit tables of numeric fields and
/// recognized (key, value) pairs.
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    numeric_fields: HashSet<String>,
    valid_values: HashMap<String, HashSet<String>>,
}

impl TableSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declare `key` as a numeric label field.
    #[must_use]
    pub fn with_numeric_field(mut self, key: &str) -> Self {
        self.numeric_fields.insert(key.to_string());
        self
    }

    /// Builder: declare `value` as a recognized value for the categorical
    /// label `key`.
    #[must_use]
    pub fn with_valid_label(mut self, key: &str, value: &str) -> Self {
        self.valid_values
            .entry(key.to_string())
            .or_default()
            .insert(value.to_string());
        self
    }
}

impl LabelSchema for TableSchema {
    fn is_numeric_field(&self, key: &str) -> bool {
        self.numeric_fields.contains(key)
    }

    fn is_valid_label(&self, key: &str, value: &str) -> bool {
        self.valid_values
            .get(key)
            .is_some_and(|values| values.contains(value))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
