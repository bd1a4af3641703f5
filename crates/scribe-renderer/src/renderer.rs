//! Body renderer.
//!
//! Walks a body line by line, expanding directives outside code and passing
//! everything else through byte-for-byte.

use crate::directive::{Directive, ParsedTag, TagError, find_tag, parse_tag};
use crate::fence::{FenceTracker, code_spans};
use crate::{AssetResolver, DirectiveError, PartialSource, html};

/// Default limit on nested partial expansion.
pub const DEFAULT_MAX_PARTIAL_DEPTH: usize = 10;

/// Output of [`BodyRenderer::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBody {
    /// Body with all supported directives expanded.
    pub text: String,
    /// Non-fatal findings, e.g. unsupported directives left in place.
    pub warnings: Vec<String>,
}

/// Expands `partial` and `image_tag` directives in a document body.
///
/// The renderer borrows its collaborators and holds no per-document state,
/// so one instance can render many documents, including from several
/// threads at once.
pub struct BodyRenderer<'a> {
    partials: &'a dyn PartialSource,
    assets: &'a dyn AssetResolver,
    max_depth: usize,
}

impl<'a> BodyRenderer<'a> {
    #[must_use]
    pub fn new(partials: &'a dyn PartialSource, assets: &'a dyn AssetResolver) -> Self {
        Self {
            partials,
            assets,
            max_depth: DEFAULT_MAX_PARTIAL_DEPTH,
        }
    }

    /// Set the maximum partial nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Expand every directive in `body`.
    ///
    /// Partials are rendered before insertion, so the output contains no
    /// supported directive outside code.
    ///
    /// # Errors
    ///
    /// Fails on the first missing partial, missing argument, malformed
    /// directive, or partial nesting past the depth limit.
    pub fn render(&self, body: &str) -> Result<RenderedBody, DirectiveError> {
        let mut warnings = Vec::new();
        let (text, _) = self.render_with_depth(body, 0, &mut warnings)?;
        Ok(RenderedBody { text, warnings })
    }

    fn render_with_depth(
        &self,
        input: &str,
        depth: usize,
        warnings: &mut Vec<String>,
    ) -> Result<(String, FenceTracker), DirectiveError> {
        let mut output = String::with_capacity(input.len());
        let mut fence = FenceTracker::new();

        for (idx, raw) in input.split_inclusive('\n').enumerate() {
            let (line, ending) = split_line_ending(raw);

            // Fence markers and fenced content are verbatim
            if fence.update(line) || fence.in_fence() {
                output.push_str(raw);
                continue;
            }

            self.expand_line(line, idx + 1, depth, &mut fence, warnings, &mut output)?;
            output.push_str(ending);
        }

        Ok((output, fence))
    }

    fn expand_line(
        &self,
        line: &str,
        line_num: usize,
        depth: usize,
        fence: &mut FenceTracker,
        warnings: &mut Vec<String>,
        output: &mut String,
    ) -> Result<(), DirectiveError> {
        let spans = code_spans(line);
        let mut pos = 0;

        while let Some(tag) = find_tag(line, pos) {
            if let Some(span) = spans.iter().find(|span| span.contains(&tag.start)) {
                output.push_str(&line[pos..span.end]);
                pos = span.end;
                continue;
            }

            output.push_str(&line[pos..tag.start]);
            let source = &line[tag.start..tag.end];

            match parse_tag(tag.code) {
                Ok(ParsedTag::Directive(directive)) => {
                    if let Some(open) = self.expand(directive, line_num, depth, warnings, output)? {
                        // A partial left a fence open: the rest is code
                        *fence = open;
                        output.push_str(&line[tag.end..]);
                        return Ok(());
                    }
                }
                Ok(ParsedTag::Unsupported(helper)) => {
                    tracing::debug!(line = line_num, helper = %helper, "Unsupported directive");
                    warnings.push(format!(
                        "line {line_num}: unsupported directive `{helper}` left as-is"
                    ));
                    output.push_str(source);
                }
                Err(TagError::Syntax(message)) => {
                    return Err(DirectiveError::Syntax {
                        line: line_num,
                        message,
                    });
                }
                Err(TagError::MissingArgument {
                    directive,
                    argument,
                }) => {
                    return Err(DirectiveError::MissingAttribute {
                        line: line_num,
                        directive,
                        attribute: argument,
                    });
                }
            }

            pos = tag.end;
        }

        output.push_str(&line[pos..]);
        Ok(())
    }

    /// Expand one directive into `output`.
    ///
    /// Returns the partial's fence state when its content ends inside an
    /// unclosed code fence.
    fn expand(
        &self,
        directive: Directive,
        line_num: usize,
        depth: usize,
        warnings: &mut Vec<String>,
        output: &mut String,
    ) -> Result<Option<FenceTracker>, DirectiveError> {
        tracing::trace!(line = line_num, helper = directive.helper(), "Expanding directive");

        match directive {
            Directive::Partial { name } => {
                if depth >= self.max_depth {
                    return Err(DirectiveError::IncludeDepthExceeded {
                        line: line_num,
                        name,
                        max: self.max_depth,
                    });
                }
                let Some(content) = self.partials.partial(&name) else {
                    return Err(DirectiveError::MissingPartial {
                        line: line_num,
                        name,
                    });
                };
                let (rendered, fence) = self
                    .render_with_depth(content, depth + 1, warnings)
                    .map_err(|source| match source {
                        DirectiveError::IncludeDepthExceeded { name, max, .. } => {
                            DirectiveError::IncludeDepthExceeded {
                                line: line_num,
                                name,
                                max,
                            }
                        }
                        source => DirectiveError::InPartial {
                            line: line_num,
                            name: name.clone(),
                            source: Box::new(source),
                        },
                    })?;
                output.push_str(&rendered);
                Ok(fence.in_fence().then_some(fence))
            }
            Directive::ImageTag { path, attributes } => {
                let src = self.assets.asset_url(&path);
                output.push_str(&html::image_tag(&src, &attributes));
                Ok(None)
            }
        }
    }
}

/// Split a line from `split_inclusive` into content and its line ending.
fn split_line_ending(raw: &str) -> (&str, &str) {
    let content_len = raw
        .strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .map_or(raw.len(), str::len);
    raw.split_at(content_len)
}
