//! Rendered document.

use std::path::PathBuf;

use chrono::NaiveDate;
use scribe_meta::FrontMatter;
use serde::Serialize;

/// A document after front matter extraction and directive expansion.
///
/// Serializes to the JSON metadata sidecar; the body is written separately.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    /// Path of the source file.
    pub source: PathBuf,
    /// Title from front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Date from front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Full front matter mapping.
    pub front_matter: FrontMatter,
    /// Body with directives expanded, still markdown.
    #[serde(skip)]
    pub body: String,
    /// Non-fatal findings from rendering.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
