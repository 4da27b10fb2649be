//! Core vocabulary for rule-driven pose perturbation generation.
//!
//! `posegen-core` provides the building blocks shared by the generator and
//! its collaborators:
//!
//! - [`RandomParams`](params::RandomParams) and
//!   [`PerturbParams`](params::PerturbParams) describe how each perturbation
//!   channel is sampled.
//! - [`RandomParams::sample_bounded`](params::RandomParams::sample_bounded)
//!   draws a hard-bounded value (rejection sampling for gaussian, direct
//!   range construction for uniform).
//! - [`Pose`](pose::Pose) is the emitted perturbation record.
//! - [`FrameTrace`](labels::FrameTrace) and [`LabelSchema`](labels::LabelSchema)
//!   are the seams to the frame/label trace and the label schema; both are
//!   external collaborators this crate never implements itself.
//!
//! All sampling takes an explicit `&mut R: Rng` parameter so that determinism
//! is guaranteed when the same seed is provided.

pub mod labels;
pub mod params;
pub mod pose;
pub mod sample;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::labels::{
        parse_condition_string, FrameTrace, LabelConditions, LabelError, LabelSchema,
    };
    pub use crate::params::{ParamsError, PerturbParams, RandomParams};
    pub use crate::pose::Pose;
    pub use crate::sample::SampleError;
}
