//! Document loading and batch rendering for scribe.
//!
//! Ties the front matter parser ([`scribe_meta`]) and the directive
//! renderer ([`scribe_renderer`]) to the filesystem:
//!
//! - [`load_partials`] reads `_name.*` partial files into a [`Partials`] collection
//! - [`discover_documents`] finds renderable documents under a source directory
//! - [`Site`] renders one document or a whole batch in parallel
//! - [`BuildReport::write`] writes rendered bodies and JSON metadata sidecars
//!
//! One document failing never stops the others; failures are collected in
//! the [`BuildReport`].

mod discover;
mod document;
mod error;
mod output;
mod partials;
mod site;

pub use discover::{discover_documents, is_document, output_stem};
pub use document::RenderedDocument;
pub use error::{RenderError, SiteError};
pub use output::{OutputFormat, markdown_to_html};
pub use partials::{load_partials, partial_name};
pub use scribe_renderer::{AssetResolver, Partials, PrefixResolver};
pub use site::{BuildReport, Site};
