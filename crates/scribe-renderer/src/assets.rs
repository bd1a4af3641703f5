//! Asset path resolution for the `image_tag` directive.

/// Rewrites a relative asset path from a directive into a public URL.
///
/// Implemented by the site layer; the renderer never touches the
/// filesystem, so a resolved URL may point at a file that does not exist.
pub trait AssetResolver: Send + Sync {
    /// Public URL for `path` as written in the directive.
    fn asset_url(&self, path: &str) -> String;
}

impl<F> AssetResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn asset_url(&self, path: &str) -> String {
        self(path)
    }
}

/// Resolver that joins relative paths onto a base URL.
///
/// Paths that are already absolute (`/logo.png`, `https://...`, `data:...`)
/// are returned unchanged.
///
/// # Example
///
/// ```
/// use scribe_renderer::{AssetResolver, PrefixResolver};
///
/// let resolver = PrefixResolver::new("/images/");
/// assert_eq!(resolver.asset_url("foo.png"), "/images/foo.png");
/// assert_eq!(resolver.asset_url("/static/foo.png"), "/static/foo.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixResolver {
    base_url: String,
}

impl PrefixResolver {
    /// Create a resolver for the given base URL (trailing slashes ignored).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        let trimmed_len = base_url.trim_end_matches('/').len();
        base_url.truncate(trimmed_len);
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for PrefixResolver {
    fn default() -> Self {
        Self::new("/images")
    }
}

impl AssetResolver for PrefixResolver {
    fn asset_url(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_owned();
        }
        let relative = path.trim_start_matches("./");
        format!("{}/{relative}", self.base_url)
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || path.starts_with("data:") || path.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_relative_path() {
        let resolver = PrefixResolver::new("/images");
        assert_eq!(resolver.asset_url("foo.png"), "/images/foo.png");
        assert_eq!(
            resolver.asset_url("screens/editor.png"),
            "/images/screens/editor.png"
        );
        assert_eq!(resolver.asset_url("./foo.png"), "/images/foo.png");
    }

    #[test]
    fn test_prefix_trailing_slash_normalized() {
        let resolver = PrefixResolver::new("https://cdn.example.com/assets///");
        assert_eq!(resolver.base_url(), "https://cdn.example.com/assets");
        assert_eq!(
            resolver.asset_url("a.png"),
            "https://cdn.example.com/assets/a.png"
        );
    }

    #[test]
    fn test_absolute_paths_unchanged() {
        let resolver = PrefixResolver::default();
        assert_eq!(resolver.asset_url("/logo.png"), "/logo.png");
        assert_eq!(
            resolver.asset_url("https://example.com/a.png"),
            "https://example.com/a.png"
        );
        assert_eq!(
            resolver.asset_url("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_empty_base_url() {
        let resolver = PrefixResolver::new("");
        assert_eq!(resolver.asset_url("foo.png"), "/foo.png");
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |path: &str| format!("/v2/{path}");
        assert_eq!(resolver.asset_url("foo.png"), "/v2/foo.png");
    }
}
