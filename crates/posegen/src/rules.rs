//! Perturbation rule construction and first-match dispatch.
//!
//! A [`Rule`] pairs a set of label conditions with the sampling parameters
//! to use for frames satisfying them.  Rules live in a [`RuleSet`] in the
//! order they were configured; that order is the match priority — the first
//! rule whose conditions a frame satisfies wins.

use posegen_core::labels::{
    parse_condition_string, FrameTrace, LabelConditions, LabelError, LabelSchema,
};
use posegen_core::params::{ParamsError, PerturbParams};
use thiserror::Error;

// ---------------------------------------------------------------------------
// RuleError
// ---------------------------------------------------------------------------

/// Errors from constructing a [`RuleSet`].  All are construction-time: a
/// generator with an invalid rule is never created.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule {index}: {source}")]
    Label {
        index: usize,
        #[source]
        source: LabelError,
    },

    #[error("rule {index}: poses cannot be generated based on numeric label \"{key}\"")]
    NumericLabelKey { index: usize, key: String },

    #[error("rule {index}: invalid label condition \"{key}\"=\"{value}\"")]
    InvalidLabel {
        index: usize,
        key: String,
        value: String,
    },

    #[error("rule {index}, channel {channel}: {source}")]
    Params {
        index: usize,
        channel: &'static str,
        #[source]
        source: ParamsError,
    },
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// One validated (conditions, parameters) pair.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Label conditions a frame must satisfy for this rule to apply.
    pub conditions: LabelConditions,
    /// Sampling parameters used for matching frames.
    pub params: PerturbParams,
}

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// Ordered collection of perturbation rules.
///
/// Construction validates every rule against the label schema; lookup is a
/// linear scan in stored order because rule order is a defined tie-break,
/// not an implementation artifact.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from raw `(condition_string, params)` pairs.
    ///
    /// Each condition string is parsed into label conditions, every key is
    /// checked to be a categorical (non-numeric) label, every (key, value)
    /// pair is checked against the schema, and every channel's numeric
    /// parameters are validated.  Input order is preserved.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule's [`RuleError`], with its index.
    pub fn new<S: LabelSchema + ?Sized>(
        specs: &[(String, PerturbParams)],
        schema: &S,
    ) -> Result<Self, RuleError> {
        let mut rules = Vec::with_capacity(specs.len());
        for (index, (condition_string, params)) in specs.iter().enumerate() {
            let conditions = parse_condition_string(condition_string)
                .map_err(|source| RuleError::Label { index, source })?;
            for (key, value) in &conditions {
                if schema.is_numeric_field(key) {
                    return Err(RuleError::NumericLabelKey {
                        index,
                        key: key.clone(),
                    });
                }
                if !schema.is_valid_label(key, value) {
                    return Err(RuleError::InvalidLabel {
                        index,
                        key: key.clone(),
                        value: value.clone(),
                    });
                }
            }
            params
                .validate()
                .map_err(|(channel, source)| RuleError::Params {
                    index,
                    channel,
                    source,
                })?;
            rules.push(Rule {
                conditions,
                params: params.clone(),
            });
        }
        Ok(Self { rules })
    }

    /// First rule (in stored order) whose conditions `frame` satisfies.
    pub fn first_match<'a, T: FrameTrace + ?Sized>(
        &'a self,
        frame: u32,
        trace: &T,
    ) -> Option<&'a Rule> {
        self.rules
            .iter()
            .find(|rule| trace.labels_match(frame, &rule.conditions))
    }

    /// All rules, in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use posegen_core::params::RandomParams;
    use posegen_test_utils::params::{gaussian_perturb, mixed_perturb};
    use posegen_test_utils::schema::{PermissiveSchema, TableSchema};
    use posegen_test_utils::trace::TableTrace;

    fn road_schema() -> TableSchema {
        TableSchema::new()
            .with_numeric_field("speed")
            .with_valid_label("road_type", "highway")
            .with_valid_label("road_type", "local")
            .with_valid_label("user_label", "stable")
    }

    #[test]
    fn builds_rules_in_input_order() {
        let specs = vec![
            ("road_type=highway".to_string(), gaussian_perturb(true)),
            ("road_type=local".to_string(), mixed_perturb()),
        ];
        let rules = RuleSet::new(&specs, &road_schema()).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[0].conditions["road_type"], "highway");
        assert_eq!(rules.rules()[1].conditions["road_type"], "local");
    }

    #[test]
    fn empty_spec_list_is_valid() {
        let rules = RuleSet::new(&[], &PermissiveSchema).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn numeric_label_key_is_rejected() {
        let specs = vec![("speed=80".to_string(), gaussian_perturb(false))];
        let err = RuleSet::new(&specs, &road_schema()).unwrap_err();
        match err {
            RuleError::NumericLabelKey { index, key } => {
                assert_eq!(index, 0);
                assert_eq!(key, "speed");
            }
            other => panic!("expected NumericLabelKey, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_label_value_is_rejected() {
        let specs = vec![("road_type=gravel".to_string(), gaussian_perturb(false))];
        let err = RuleSet::new(&specs, &road_schema()).unwrap_err();
        match err {
            RuleError::InvalidLabel { key, value, .. } => {
                assert_eq!(key, "road_type");
                assert_eq!(value, "gravel");
            }
            other => panic!("expected InvalidLabel, got {other:?}"),
        }
    }

    #[test]
    fn malformed_condition_string_is_rejected() {
        let specs = vec![("road_type".to_string(), gaussian_perturb(false))];
        let err = RuleSet::new(&specs, &road_schema()).unwrap_err();
        assert!(matches!(err, RuleError::Label { index: 0, .. }));
    }

    #[test]
    fn failing_rule_index_is_reported() {
        let specs = vec![
            ("road_type=highway".to_string(), gaussian_perturb(true)),
            ("road_type=gravel".to_string(), gaussian_perturb(false)),
        ];
        let err = RuleSet::new(&specs, &road_schema()).unwrap_err();
        assert!(matches!(err, RuleError::InvalidLabel { index: 1, .. }));
    }

    #[test]
    fn invalid_channel_params_are_rejected() {
        let mut params = gaussian_perturb(false);
        params.rotation = RandomParams::gaussian(-4.0, 1.0);
        let specs = vec![("road_type=highway".to_string(), params)];
        let err = RuleSet::new(&specs, &road_schema()).unwrap_err();
        match err {
            RuleError::Params { channel, .. } => assert_eq!(channel, "rotation"),
            other => panic!("expected Params, got {other:?}"),
        }
    }

    #[test]
    fn unknown_distribution_name_passes_construction() {
        // Distribution names are checked at sampling time, not here.
        let mut params = gaussian_perturb(false);
        params.shift.distribution = "poisson".into();
        let specs = vec![("road_type=highway".to_string(), params)];
        assert!(RuleSet::new(&specs, &road_schema()).is_ok());
    }

    #[test]
    fn first_match_respects_priority() {
        let trace = TableTrace::from_rows(&[&[("road_type", "highway"), ("user_label", "stable")]]);
        // Both rules match frame 0; the first configured one must win.
        let specs = vec![
            ("user_label=stable".to_string(), gaussian_perturb(true)),
            ("road_type=highway".to_string(), mixed_perturb()),
        ];
        let rules = RuleSet::new(&specs, &road_schema()).unwrap();
        let matched = rules.first_match(0, &trace).unwrap();
        assert!(matched.conditions.contains_key("user_label"));
    }

    #[test]
    fn first_match_returns_none_without_match() {
        let trace = TableTrace::from_rows(&[&[("road_type", "local")]]);
        let specs = vec![("road_type=highway".to_string(), gaussian_perturb(true))];
        let rules = RuleSet::new(&specs, &road_schema()).unwrap();
        assert!(rules.first_match(0, &trace).is_none());
    }

    #[test]
    fn empty_conditions_match_every_frame() {
        let trace = TableTrace::from_rows(&[&[("road_type", "local")]]);
        let specs = vec![(String::new(), gaussian_perturb(false))];
        let rules = RuleSet::new(&specs, &PermissiveSchema).unwrap();
        assert!(rules.first_match(0, &trace).is_some());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn rule_types_are_send_sync() {
        assert_send_sync::<Rule>();
        assert_send_sync::<RuleSet>();
        assert_send_sync::<RuleError>();
    }
}
