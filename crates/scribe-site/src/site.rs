//! Single and batch document rendering.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use scribe_meta::Document;
use scribe_renderer::{
    AssetResolver, BodyRenderer, DEFAULT_MAX_PARTIAL_DEPTH, Partials, PrefixResolver,
};

use crate::{RenderError, RenderedDocument};

/// Rendering context shared by every document of a build.
///
/// Partials and the asset resolver are read-only, so documents render in
/// parallel without coordination.
pub struct Site {
    partials: Partials,
    assets: Box<dyn AssetResolver>,
    max_partial_depth: usize,
}

impl Site {
    /// Create a site with the given partials and the default `/images` resolver.
    #[must_use]
    pub fn new(partials: Partials) -> Self {
        Self {
            partials,
            assets: Box::new(PrefixResolver::default()),
            max_partial_depth: DEFAULT_MAX_PARTIAL_DEPTH,
        }
    }

    /// Set the asset resolver used by `image_tag`.
    #[must_use]
    pub fn with_assets<A: AssetResolver + 'static>(mut self, assets: A) -> Self {
        self.assets = Box::new(assets);
        self
    }

    /// Set the maximum partial nesting depth.
    #[must_use]
    pub fn with_max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = depth;
        self
    }

    #[must_use]
    pub fn partials(&self) -> &Partials {
        &self.partials
    }

    /// Render document text that was read from `path`.
    pub fn render_source(&self, path: &Path, text: &str) -> Result<RenderedDocument, RenderError> {
        let document = Document::parse(text).map_err(|source| RenderError::Meta {
            path: path.to_path_buf(),
            source,
        })?;

        let rendered = BodyRenderer::new(&self.partials, self.assets.as_ref())
            .with_max_depth(self.max_partial_depth)
            .render(document.body())
            .map_err(|source| RenderError::Directive {
                path: path.to_path_buf(),
                source,
            })?;

        for warning in &rendered.warnings {
            tracing::debug!(path = %path.display(), "{warning}");
        }

        Ok(RenderedDocument {
            source: path.to_path_buf(),
            title: document.title().map(str::to_owned),
            date: document.date(),
            front_matter: document.front_matter().clone(),
            body: rendered.text,
            warnings: rendered.warnings,
        })
    }

    /// Read and render a document file.
    pub fn render_file(&self, path: &Path) -> Result<RenderedDocument, RenderError> {
        let text = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.render_source(path, &text)
    }

    /// Render a batch of documents in parallel.
    ///
    /// Each document succeeds or fails on its own; output order follows
    /// `paths`.
    pub fn build(&self, paths: &[PathBuf]) -> BuildReport {
        let results: Vec<Result<RenderedDocument, RenderError>> =
            paths.par_iter().map(|path| self.render_file(path)).collect();

        let mut report = BuildReport::default();
        for result in results {
            match result {
                Ok(document) => report.rendered.push(document),
                Err(e) => {
                    tracing::warn!(path = %e.path().display(), error = %e, "Failed to render document");
                    report.failed.push(e);
                }
            }
        }

        tracing::info!(
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            "Build completed"
        );
        report
    }
}

/// Outcome of [`Site::build`].
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Successfully rendered documents.
    pub rendered: Vec<RenderedDocument>,
    /// Documents that failed, with the reason.
    pub failed: Vec<RenderError>,
}

impl BuildReport {
    /// Whether every document rendered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scribe_meta::MetaError;
    use scribe_renderer::DirectiveError;
    use std::fs;

    fn site() -> Site {
        Site::new(Partials::new().with_partial("tutorial_series", "*Part of a series*"))
    }

    #[test]
    fn test_render_source() {
        let text = "---\ntitle: Adding a Feature\ndate: 2013-05-08\n---\n<%= partial 'tutorial_series' %>\n\n<%= image_tag 'foo.png', alt: 'Foo' %>\n";
        let site = site();
        assert!(site.partials().contains("tutorial_series"));
        let doc = site.render_source(Path::new("post.md"), text).unwrap();

        assert_eq!(doc.title.as_deref(), Some("Adding a Feature"));
        assert_eq!(doc.date, chrono::NaiveDate::from_ymd_opt(2013, 5, 8));
        assert_eq!(
            doc.body,
            "*Part of a series*\n\n<img src=\"/images/foo.png\" alt=\"Foo\">\n"
        );
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_render_source_with_custom_assets() {
        let site = Site::new(Partials::new()).with_assets(PrefixResolver::new("/assets/img"));
        let doc = site
            .render_source(Path::new("p.md"), "<%= image_tag 'a.png' %>")
            .unwrap();
        assert_eq!(doc.body, "<img src=\"/assets/img/a.png\">");
    }

    #[test]
    fn test_render_source_meta_error() {
        let result = site().render_source(Path::new("bad.md"), "---\ntitle: x\n");
        match result {
            Err(RenderError::Meta { path, source }) => {
                assert_eq!(path, PathBuf::from("bad.md"));
                assert!(matches!(source, MetaError::Unterminated));
            }
            other => panic!("expected meta error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_source_missing_partial() {
        let result = site().render_source(Path::new("p.md"), "<%= partial 'missing' %>");
        match result {
            Err(RenderError::Directive { source, .. }) => assert_eq!(
                source,
                DirectiveError::MissingPartial {
                    line: 1,
                    name: "missing".to_owned()
                }
            ),
            other => panic!("expected directive error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = site().render_file(&dir.path().join("absent.md"));
        assert!(matches!(result, Err(RenderError::Io { .. })));
    }

    #[test]
    fn test_build_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.md");
        let bad = dir.path().join("bad.md");
        let also_good = dir.path().join("also-good.md");
        fs::write(&good, "---\ntitle: Good\n---\n<%= partial 'tutorial_series' %>").unwrap();
        fs::write(&bad, "<%= partial 'missing' %>").unwrap();
        fs::write(&also_good, "Plain").unwrap();

        let report = site().build(&[good.clone(), bad.clone(), also_good.clone()]);

        assert!(!report.is_success());
        let rendered: Vec<_> = report.rendered.iter().map(|d| d.source.clone()).collect();
        assert_eq!(rendered, vec![good, also_good]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path(), bad.as_path());
    }

    #[test]
    fn test_build_empty() {
        let report = site().build(&[]);
        assert!(report.is_success());
        assert!(report.rendered.is_empty());
    }
}
