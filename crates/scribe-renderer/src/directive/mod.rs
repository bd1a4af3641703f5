//! Directive model and parsing.
//!
//! Directives are ERB output tags (`<%= ... %>`) calling one of two helpers:
//!
//! - `partial 'name'` / `partial "name"` / `partial(:name)`; trailing
//!   options such as `locals: {...}` are accepted and ignored
//! - `image_tag 'path', key: 'value', :key => "value"`
//!
//! Any other helper is unsupported and left in the text untouched.

mod args;
mod parser;

pub use args::Attributes;
pub(crate) use parser::{ParsedTag, TagError, find_tag, parse_tag};

/// Helper name of the partial directive.
pub const PARTIAL: &str = "partial";
/// Helper name of the image directive.
pub const IMAGE_TAG: &str = "image_tag";

/// A recognized directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Inline the named partial.
    Partial { name: String },
    /// Emit an `<img>` for a relative asset path.
    ImageTag { path: String, attributes: Attributes },
}

impl Directive {
    /// Helper name as written in the source.
    #[must_use]
    pub fn helper(&self) -> &'static str {
        match self {
            Self::Partial { .. } => PARTIAL,
            Self::ImageTag { .. } => IMAGE_TAG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_helper_names() {
        let partial = Directive::Partial {
            name: "banner".to_owned(),
        };
        let image = Directive::ImageTag {
            path: "a.png".to_owned(),
            attributes: Attributes::new(),
        };
        assert_eq!(partial.helper(), "partial");
        assert_eq!(image.helper(), "image_tag");
    }
}
