//! Front matter block parsing.
//!
//! ```text
//! ---
//! title: Adding a feature
//! date: 2013-05-08
//! ---
//! Body text...
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::MetaError;

/// Line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// Metadata mapping extracted from a front matter block.
///
/// Keys are kept sorted so serialization is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    entries: BTreeMap<String, Value>,
}

impl FrontMatter {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the YAML between the delimiters.
    ///
    /// Empty content yields an empty mapping.
    pub fn from_yaml(content: &str) -> Result<Self, MetaError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| MetaError::Parse(format!("Invalid YAML: {e}")))?;

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            _ => {
                return Err(MetaError::Parse(
                    "expected `key: value` pairs".to_owned(),
                ));
            }
        };

        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let key = scalar_to_string(&key)
                .ok_or_else(|| MetaError::Parse(format!("unsupported key: {key:?}")))?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Serialize the mapping back into `key: value` lines.
    ///
    /// Returns an empty string for an empty mapping.
    pub fn to_yaml(&self) -> Result<String, MetaError> {
        if self.entries.is_empty() {
            return Ok(String::new());
        }
        serde_yaml::to_string(&self.entries).map_err(|e| MetaError::Parse(e.to_string()))
    }

    /// Serialize the mapping as a complete delimited block.
    pub fn to_block(&self) -> Result<String, MetaError> {
        Ok(format!("{DELIMITER}\n{}{DELIMITER}\n", self.to_yaml()?))
    }

    /// Raw YAML value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Value for a key rendered as a string, if it is a scalar.
    ///
    /// Strings, numbers and booleans are returned; null and collections are not.
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.entries.get(key).and_then(scalar_to_string)
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Split raw document text into front matter and body.
///
/// Text that does not start with a [`DELIMITER`] line is returned unchanged
/// with an empty mapping.
///
/// # Errors
///
/// Returns [`MetaError::Unterminated`] when the block is opened but never
/// closed, and [`MetaError::Parse`] when its content is not a YAML mapping.
pub fn split_front_matter(input: &str) -> Result<(FrontMatter, &str), MetaError> {
    let Some(after_open) = strip_opening_line(input) else {
        return Ok((FrontMatter::default(), input));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if is_delimiter(line) {
            let front_matter = FrontMatter::from_yaml(&after_open[..offset])?;
            let body = &after_open[offset + line.len()..];
            return Ok((front_matter, body));
        }
        offset += line.len();
    }

    Err(MetaError::Unterminated)
}

/// Returns the text following the opening delimiter line, if present.
fn strip_opening_line(input: &str) -> Option<&str> {
    let (first, rest) = match input.find('\n') {
        Some(idx) => (&input[..idx], &input[idx + 1..]),
        None => (input, ""),
    };
    is_delimiter(first).then_some(rest)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}
