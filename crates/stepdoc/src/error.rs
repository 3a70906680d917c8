//! CLI error types.

use stepdoc_config::ConfigError;
use stepdoc_modules::StepModuleError;
use stepdoc_transform::TransformError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("step {step}: {source}")]
    Step {
        step: usize,
        source: StepModuleError,
    },

    #[error("{0}")]
    Transform(#[from] TransformError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
