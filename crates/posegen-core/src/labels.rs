//! Label conditions and the collaborator seams.
//!
//! Rules select frames by semantic labels.  This module provides the
//! condition-string parser plus the two traits the generator consumes:
//! [`FrameTrace`] (the recorded frame/label trace) and [`LabelSchema`]
//! (which label keys exist and which values they admit).  Concrete
//! implementations live with the label tooling, not here.

use std::collections::BTreeMap;

use thiserror::Error;

/// Parsed label conditions: label key → required value.
///
/// Ordered so that validation failures and trace queries are reported in a
/// stable key order.
pub type LabelConditions = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// LabelError
// ---------------------------------------------------------------------------

/// Errors from parsing a raw condition string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("malformed label condition token: \"{token}\" (expected key=value)")]
    MalformedToken { token: String },

    #[error("duplicate label key in condition string: \"{key}\"")]
    DuplicateKey { key: String },
}

// ---------------------------------------------------------------------------
// parse_condition_string
// ---------------------------------------------------------------------------

/// Split a raw condition string (`"key1=val1 key2=val2 ..."`) into a map of
/// label conditions.
///
/// Tokens are separated by whitespace.  An empty string yields an empty
/// condition set (a rule that matches every frame).
///
/// # Errors
///
/// Returns [`LabelError::MalformedToken`] for a token without `=` or with
/// an empty key/value, and [`LabelError::DuplicateKey`] when a key appears
/// twice (silently keeping either occurrence would drop a condition).
pub fn parse_condition_string(s: &str) -> Result<LabelConditions, LabelError> {
    let mut conditions = LabelConditions::new();
    for token in s.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            return Err(LabelError::MalformedToken {
                token: token.to_owned(),
            });
        };
        if key.is_empty() || value.is_empty() {
            return Err(LabelError::MalformedToken {
                token: token.to_owned(),
            });
        }
        if conditions.contains_key(key) {
            return Err(LabelError::DuplicateKey {
                key: key.to_owned(),
            });
        }
        conditions.insert(key.to_owned(), value.to_owned());
    }
    Ok(conditions)
}

// ---------------------------------------------------------------------------
// FrameTrace
// ---------------------------------------------------------------------------

/// A recorded trace of per-frame semantic labels.
///
/// The generator never reads label files itself; it asks the trace how many
/// frames exist and whether a frame satisfies a condition set.
pub trait FrameTrace: Send + Sync {
    /// Number of frames in the trace.
    fn frame_count(&self) -> u32;

    /// `true` iff every condition key's label value at `frame` equals the
    /// required value.
    fn labels_match(&self, frame: u32, conditions: &LabelConditions) -> bool;
}

// ---------------------------------------------------------------------------
// LabelSchema
// ---------------------------------------------------------------------------

/// The label schema: which keys are numeric and which (key, value) pairs
/// are recognized.
///
/// Perturbation rules may only be keyed on categorical labels, so rule
/// construction consults this before accepting a condition.
pub trait LabelSchema: Send + Sync {
    /// `true` if `key` denotes a numeric-typed label field.
    fn is_numeric_field(&self, key: &str) -> bool;

    /// `true` if `value` is a recognized value for the label `key`.
    fn is_valid_label(&self, key: &str, value: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
