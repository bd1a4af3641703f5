//! Partial lookup.

use std::collections::HashMap;

/// Read-only source of partial contents, keyed by partial name.
///
/// Lookups are shared between documents rendered in parallel, so sources
/// must be `Send + Sync` and must not change during a render.
pub trait PartialSource: Send + Sync {
    /// Raw (unrendered) content of the named partial.
    fn partial(&self, name: &str) -> Option<&str>;
}

/// In-memory partials collection.
///
/// Names are normalized with [`normalize_partial_name`] on insert and
/// lookup, so `shared/_banner` and `shared/banner` are the same partial.
#[derive(Debug, Clone, Default)]
pub struct Partials {
    entries: HashMap<String, String>,
}

impl Partials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a partial, replacing any previous content with the same name.
    pub fn insert(&mut self, name: &str, content: impl Into<String>) {
        self.entries
            .insert(normalize_partial_name(name), content.into());
    }

    /// Builder form of [`Partials::insert`].
    #[must_use]
    pub fn with_partial(mut self, name: &str, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_partial_name(name))
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
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

impl PartialSource for Partials {
    fn partial(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&normalize_partial_name(name))
            .map(String::as_str)
    }
}

/// Canonical form of a partial name.
///
/// Leading `./` and `/` are dropped and a leading underscore on the last
/// path segment (the on-disk partial convention) is removed.
///
/// ```
/// use scribe_renderer::normalize_partial_name;
///
/// assert_eq!(normalize_partial_name("shared/_banner"), "shared/banner");
/// assert_eq!(normalize_partial_name("./banner"), "banner");
/// ```
#[must_use]
pub fn normalize_partial_name(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_prefix("./").unwrap_or(name).trim_start_matches('/');

    match name.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/{}", file.strip_prefix('_').unwrap_or(file)),
        None => name.strip_prefix('_').unwrap_or(name).to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let partials = Partials::new().with_partial("tutorial_series", "Series banner");

        assert_eq!(partials.partial("tutorial_series"), Some("Series banner"));
        assert_eq!(partials.partial("_tutorial_series"), Some("Series banner"));
        assert_eq!(partials.partial("other"), None);
    }

    #[test]
    fn test_insert_underscored_name() {
        let mut partials = Partials::new();
        partials.insert("shared/_footer", "Footer");

        assert!(partials.contains("shared/footer"));
        assert_eq!(partials.names(), vec!["shared/footer"]);
    }

    #[test]
    fn test_insert_replaces() {
        let partials = Partials::new()
            .with_partial("a", "one")
            .with_partial("_a", "two");

        assert_eq!(partials.len(), 1);
        assert_eq!(partials.partial("a"), Some("two"));
    }

    #[test]
    fn test_normalize_keeps_inner_underscores() {
        assert_eq!(normalize_partial_name("_tutorial_series"), "tutorial_series");
        assert_eq!(normalize_partial_name("_dir/_name"), "_dir/name");
        assert_eq!(normalize_partial_name("/shared/name"), "shared/name");
    }
}
