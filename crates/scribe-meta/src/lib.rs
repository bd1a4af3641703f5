//! Front matter extraction and document metadata for scribe.
//!
//! A source document optionally starts with a YAML block delimited by `---`
//! lines. [`split_front_matter`] separates that block from the body, and
//! [`Document::parse`] additionally pulls out the `title` and `date` keys.
//!
//! # Example
//!
//! ```
//! use scribe_meta::Document;
//!
//! let doc = Document::parse("---\ntitle: Hello\ndate: 2013-05-08\n---\nBody\n").unwrap();
//! assert_eq!(doc.title(), Some("Hello"));
//! assert_eq!(doc.body(), "Body\n");
//! ```

mod document;
mod front_matter;

pub use document::{Document, parse_date};
pub use front_matter::{DELIMITER, FrontMatter, split_front_matter};

/// Error type for front matter operations.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// Opening `---` line without a matching closing line.
    #[error("front matter opened on line 1 is never closed (missing `---`)")]
    Unterminated,

    /// YAML inside the block is malformed or is not a mapping.
    #[error("invalid front matter: {0}")]
    Parse(String),

    /// The `date` key does not start with a `YYYY-MM-DD` calendar date.
    #[error("invalid date in front matter: {0:?}")]
    InvalidDate(String),
}
