//! Directive attribute sets.

/// Attributes attached to an `image_tag` directive.
///
/// Source order is kept so output is deterministic. Inserting an existing
/// key replaces its value in place.
///
/// # Example
///
/// ```
/// use scribe_renderer::Attributes;
///
/// let attrs: Attributes = [("alt", "Editor"), ("class", "screenshot")].into_iter().collect();
/// assert_eq!(attrs.get("class"), Some("screenshot"));
/// assert_eq!(attrs.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, replacing the value of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate attributes in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut attrs = Attributes::new();
        attrs.insert("class", "wide");
        attrs.insert("alt", "Screenshot");

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["class", "alt"]);
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let mut attrs = Attributes::new();
        attrs.insert("alt", "first");
        attrs.insert("class", "wide");
        attrs.insert("alt", "second");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("alt"), Some("second"));
        assert_eq!(attrs.iter().next(), Some(("alt", "second")));
    }

    #[test]
    fn test_missing_key() {
        let attrs = Attributes::new();
        assert!(attrs.is_empty());
        assert_eq!(attrs.get("alt"), None);
    }
}
