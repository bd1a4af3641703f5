//! Parsed source document.

use chrono::NaiveDate;

use crate::{FrontMatter, MetaError, split_front_matter};

/// A source document split into metadata and body.
///
/// Built once by [`Document::parse`] and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    front_matter: FrontMatter,
    title: Option<String>,
    date: Option<NaiveDate>,
    body: String,
}

impl Document {
    /// Parse raw document text.
    ///
    /// `title` and `date` are taken from the front matter when present.
    ///
    /// # Errors
    ///
    /// Returns an error for unterminated or malformed front matter, and for
    /// a `date` value that is not a calendar date.
    pub fn parse(input: &str) -> Result<Self, MetaError> {
        let (front_matter, body) = split_front_matter(input)?;
        let title = front_matter.scalar("title");
        let date = front_matter
            .scalar("date")
            .map(|raw| parse_date(&raw))
            .transpose()?;

        Ok(Self {
            title,
            date,
            body: body.to_owned(),
            front_matter,
        })
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    #[must_use]
    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    /// Document text following the front matter block.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Parse a front matter date.
///
/// Accepts a bare `YYYY-MM-DD` date or one followed by a time part
/// (`2013-05-08 10:00 UTC`, `2013-05-08T10:00:00Z`); the time is dropped.
pub fn parse_date(raw: &str) -> Result<NaiveDate, MetaError> {
    const DATE_LEN: usize = "YYYY-MM-DD".len();

    let trimmed = raw.trim();
    let invalid = || MetaError::InvalidDate(trimmed.to_owned());

    let (prefix, rest) = match (trimmed.get(..DATE_LEN), trimmed.get(DATE_LEN..)) {
        (Some(prefix), Some(rest)) => (prefix, rest),
        _ => return Err(invalid()),
    };
    if !(rest.is_empty() || rest.starts_with([' ', 'T', 't'])) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_document_with_front_matter() {
        let input = "---\ntitle: Adding a Feature\ndate: 2013-05-08\n---\n\nIntro paragraph.\n";
        let doc = Document::parse(input).unwrap();

        assert_eq!(doc.title(), Some("Adding a Feature"));
        assert_eq!(doc.date(), NaiveDate::from_ymd_opt(2013, 5, 8));
        assert_eq!(doc.body(), "\nIntro paragraph.\n");
        assert_eq!(doc.front_matter().len(), 2);
    }

    #[test]
    fn test_parse_document_without_front_matter() {
        let input = "Just a body.\n";
        let doc = Document::parse(input).unwrap();

        assert_eq!(doc.title(), None);
        assert_eq!(doc.date(), None);
        assert!(doc.front_matter().is_empty());
        assert_eq!(doc.body(), input);
    }

    #[test]
    fn test_numeric_title() {
        let doc = Document::parse("---\ntitle: 1984\n---\n").unwrap();
        assert_eq!(doc.title(), Some("1984"));
    }

    #[test]
    fn test_invalid_date_is_error() {
        let result = Document::parse("---\ndate: last tuesday\n---\n");
        assert!(matches!(result, Err(MetaError::InvalidDate(v)) if v == "last tuesday"));
    }

    #[test]
    fn test_unterminated_document_is_error() {
        let result = Document::parse("---\ntitle: Oops\n");
        assert!(matches!(result, Err(MetaError::Unterminated)));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2013, 5, 8).unwrap();

        assert_eq!(parse_date("2013-05-08").unwrap(), expected);
        assert_eq!(parse_date(" 2013-05-08 ").unwrap(), expected);
        assert_eq!(parse_date("2013-05-08 10:00 UTC").unwrap(), expected);
        assert_eq!(parse_date("2013-05-08T10:00:00Z").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2013-5-8").is_err());
        assert!(parse_date("2013-05-081").is_err());
        assert!(parse_date("2013-13-01").is_err());
        assert!(parse_date("").is_err());
    }
}
