//! Site error types.

use std::path::{Path, PathBuf};

use scribe_meta::MetaError;
use scribe_renderer::DirectiveError;

/// Failure to render a single document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Front matter is unterminated or malformed.
    #[error("{}: {source}", path.display())]
    Meta { path: PathBuf, source: MetaError },

    /// A directive could not be expanded.
    #[error("{}: {source}", path.display())]
    Directive {
        path: PathBuf,
        source: DirectiveError,
    },

    /// The source file could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RenderError {
    /// Path of the document that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Meta { path, .. } | Self::Directive { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Failure of a site-level operation (loading partials, writing output).
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// I/O error on a specific path.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Metadata sidecar could not be serialized.
    #[error("Failed to serialize metadata for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
