//! Rule-driven, seeded generation of bounded pose perturbations for frame
//! augmentation.
//!
//! `posegen` turns per-frame semantic labels into randomized pose
//! perturbation parameters for a downstream augmentation engine.  For each
//! frame it selects the first matching rule, draws hard-bounded values for
//! every perturbation channel, optionally mirrors alternate poses, and can
//! shuffle the full pose stream under an ordering constraint.
//!
//! # Architecture
//!
//! - [`RuleSet`](rules::RuleSet) — ordered (label conditions, parameters)
//!   pairs; first match wins.
//! - [`PoseGenerator`](generator::PoseGenerator) — owns the rules, sensor
//!   names, and one seeded `ChaCha8Rng`; assembles per-frame pose batches.
//! - [`flatten_and_shuffle`](shuffle::flatten_and_shuffle) — flattens
//!   batches and rejection-reshuffles until the leading pose is unflipped.
//! - [`GeneratorConfig`](config::GeneratorConfig) — TOML configuration.
//!
//! The frame/label trace and the label schema are consumed through the
//! [`FrameTrace`](posegen_core::labels::FrameTrace) and
//! [`LabelSchema`](posegen_core::labels::LabelSchema) traits; this crate
//! performs no file I/O of its own beyond loading its TOML config.
//!
//! # Quick Start
//!
//! ```
//! use posegen::prelude::*;
//!
//! struct AnySchema;
//! impl LabelSchema for AnySchema {
//!     fn is_numeric_field(&self, _key: &str) -> bool {
//!         false
//!     }
//!     fn is_valid_label(&self, _key: &str, _value: &str) -> bool {
//!         true
//!     }
//! }
//!
//! struct TwoFrames;
//! impl FrameTrace for TwoFrames {
//!     fn frame_count(&self) -> u32 {
//!         2
//!     }
//!     fn labels_match(&self, _frame: u32, _conditions: &LabelConditions) -> bool {
//!         true
//!     }
//! }
//!
//! let params = PerturbParams {
//!     shift: RandomParams::gaussian(0.5, 0.34),
//!     rotation: RandomParams::gaussian(4.0, 1.0),
//!     forward: RandomParams::uniform(0.8),
//!     sensor_yaw: RandomParams::gaussian(5.0, 3.0),
//!     sensor_pitch: RandomParams::gaussian(6.0, 3.0),
//!     sensor_roll: RandomParams::gaussian(0.0, 0.0),
//!     flip: true,
//! };
//! let specs = vec![("road_type=highway".to_string(), params)];
//! let mut generator =
//!     PoseGenerator::new(&specs, vec!["center".into()], 42, &AnySchema).unwrap();
//!
//! let poses = generator.generate_shuffled(&[2, 2], &TwoFrames).unwrap();
//! assert_eq!(poses.len(), 4);
//! assert!(!poses[0].flip);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod rules;
pub mod shuffle;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{ConfigError, GeneratorConfig, RuleConfig};
    pub use crate::error::PosegenError;
    pub use crate::generator::{GenerateError, PoseGenerator};
    pub use crate::rules::{Rule, RuleError, RuleSet};
    pub use crate::shuffle::{flatten_and_shuffle, ShuffleError};
    pub use posegen_core::prelude::*;
}
