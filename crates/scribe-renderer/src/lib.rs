//! Directive expansion for scribe documents.
//!
//! A document body is markdown with embedded ERB-style directives:
//!
//! - `<%= partial 'tutorial_series' %>` inlines a named fragment
//! - `<%= image_tag 'screens/editor.png', alt: 'Editor' %>` emits an `<img>`
//!
//! [`BodyRenderer`] expands both kinds everywhere except inside fenced code
//! blocks and inline code spans, where the text is kept verbatim. The result
//! is still markdown and is meant for a downstream markdown-to-HTML step.
//!
//! # Example
//!
//! ```
//! use scribe_renderer::{BodyRenderer, Partials, PrefixResolver};
//!
//! let partials = Partials::new().with_partial("banner", "*Part 2 of 3*");
//! let assets = PrefixResolver::new("/images");
//! let renderer = BodyRenderer::new(&partials, &assets);
//!
//! let rendered = renderer
//!     .render("<%= partial 'banner' %>\n<%= image_tag 'a.png', alt: 'A' %>\n")
//!     .unwrap();
//! assert_eq!(rendered.text, "*Part 2 of 3*\n<img src=\"/images/a.png\" alt=\"A\">\n");
//! ```

mod assets;
pub mod directive;
mod error;
mod fence;
mod html;
mod partials;
mod renderer;

pub use assets::{AssetResolver, PrefixResolver};
pub use directive::{Attributes, Directive};
pub use error::DirectiveError;
pub use html::{escape_html, image_tag};
pub use partials::{PartialSource, Partials, normalize_partial_name};
pub use renderer::{BodyRenderer, DEFAULT_MAX_PARTIAL_DEPTH, RenderedBody};
