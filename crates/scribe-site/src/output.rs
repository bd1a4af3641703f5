//! Writing rendered documents to disk.

use std::path::{Path, PathBuf};

use pulldown_cmark::{Options, Parser, html};

use crate::{BuildReport, RenderedDocument, SiteError, output_stem};

/// Format rendered bodies are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Expanded markdown, for a downstream markdown converter.
    #[default]
    Markdown,
    /// HTML fragment converted with pulldown-cmark.
    Html,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Body text in this format.
    #[must_use]
    pub fn format_body(self, body: &str) -> String {
        match self {
            Self::Markdown => body.to_owned(),
            Self::Html => markdown_to_html(body),
        }
    }
}

/// Convert markdown to an HTML fragment.
///
/// Raw HTML produced by directives (`<img>`) passes through unchanged.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

impl BuildReport {
    /// Write every rendered document under `output_dir`.
    ///
    /// The directory layout below `source_root` is mirrored. Each document
    /// produces `<stem>.md` (or `.html`) and a `<stem>.json` metadata
    /// sidecar. Returns the paths of the written bodies.
    pub fn write(
        &self,
        source_root: &Path,
        output_dir: &Path,
        format: OutputFormat,
    ) -> Result<Vec<PathBuf>, SiteError> {
        let mut written = Vec::with_capacity(self.rendered.len());
        for document in &self.rendered {
            written.push(write_document(document, source_root, output_dir, format)?);
        }
        tracing::info!(count = written.len(), dir = %output_dir.display(), "Output written");
        Ok(written)
    }
}

fn write_document(
    document: &RenderedDocument,
    source_root: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf, SiteError> {
    let relative_dir = document
        .source
        .parent()
        .and_then(|parent| parent.strip_prefix(source_root).ok())
        .unwrap_or(Path::new(""));
    let stem = output_stem(&document.source).unwrap_or("index");
    let target_dir = output_dir.join(relative_dir);

    std::fs::create_dir_all(&target_dir).map_err(|source| SiteError::Io {
        path: target_dir.clone(),
        source,
    })?;

    let body_path = target_dir.join(format!("{stem}.{}", format.extension()));
    write_file(&body_path, &format.format_body(&document.body))?;

    let meta_path = target_dir.join(format!("{stem}.json"));
    let json = serde_json::to_string_pretty(document).map_err(|source| SiteError::Json {
        path: document.source.clone(),
        source,
    })?;
    write_file(&meta_path, &json)?;

    tracing::debug!(source = %document.source.display(), output = %body_path.display(), "Wrote document");
    Ok(body_path)
}

fn write_file(path: &Path, content: &str) -> Result<(), SiteError> {
    std::fs::write(path, content).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
