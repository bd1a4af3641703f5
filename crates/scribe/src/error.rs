//! CLI error types.

use scribe_config::ConfigError;
use scribe_site::{RenderError, SiteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{failed} of {total} documents failed to render")]
    Failed { failed: usize, total: usize },
}
