//! CLI error types.

use elmark_config::ConfigError;
use elmark_render::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid element tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Render(#[from] RenderError),
}
