//! Directive expansion errors.

/// Error raised while expanding directives in a body.
///
/// Line numbers are 1-based and refer to the text being expanded. Errors
/// raised inside a partial are wrapped in [`DirectiveError::InPartial`],
/// which carries the line of the including directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// A `partial` directive names a partial that does not exist.
    #[error("line {line}: partial {name:?} not found")]
    MissingPartial { line: usize, name: String },

    /// A directive lacks a required argument.
    #[error("line {line}: `{directive}` requires a {attribute} argument")]
    MissingAttribute {
        line: usize,
        directive: &'static str,
        attribute: &'static str,
    },

    /// Arguments of a known directive could not be parsed.
    #[error("line {line}: malformed directive: {message}")]
    Syntax { line: usize, message: String },

    /// Partials include each other deeper than the configured limit.
    #[error("line {line}: partial {name:?} exceeds maximum nesting depth ({max})")]
    IncludeDepthExceeded {
        line: usize,
        name: String,
        max: usize,
    },

    /// Expanding a partial failed.
    #[error("line {line}: in partial {name:?}: {source}")]
    InPartial {
        line: usize,
        name: String,
        source: Box<DirectiveError>,
    },
}

impl DirectiveError {
    /// Line the error was raised on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::MissingPartial { line, .. }
            | Self::MissingAttribute { line, .. }
            | Self::Syntax { line, .. }
            | Self::IncludeDepthExceeded { line, .. }
            | Self::InPartial { line, .. } => *line,
        }
    }
}
