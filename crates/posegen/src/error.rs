use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::generator::GenerateError;
pub use crate::rules::RuleError;
pub use crate::shuffle::ShuffleError;
pub use posegen_core::labels::LabelError;
pub use posegen_core::params::ParamsError;
pub use posegen_core::sample::SampleError;

/// Top-level error type for posegen.
#[derive(Debug, Error)]
pub enum PosegenError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
}
