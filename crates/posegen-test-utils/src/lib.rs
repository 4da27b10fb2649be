//! Shared test fixtures for the posegen workspace.
//!
//! Provides deterministic RNG helpers, an in-memory [`TableTrace`]
//! implementing [`FrameTrace`](posegen_core::labels::FrameTrace), table- and
//! permissive [`LabelSchema`](posegen_core::labels::LabelSchema)
//! implementations, and canned perturbation parameter sets.

pub mod params;
pub mod rng;
pub mod schema;
pub mod trace;

pub use params::{gaussian_perturb, mixed_perturb};
pub use rng::seeded_rng;
pub use schema::{PermissiveSchema, TableSchema};
pub use trace::TableTrace;
