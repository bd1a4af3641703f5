//! Configuration management for scribe.
//!
//! Parses `scribe.toml` with serde and discovers the file in the current
//! directory or any parent. Relative paths in the file resolve against the
//! directory containing it.
//!
//! ```toml
//! [source]
//! dir = "source"
//! partials_dir = "source/partials"
//!
//! [assets]
//! images_url = "/images"
//!
//! [render]
//! max_partial_depth = 10
//! output_dir = "build"
//! ```
//!
//! CLI settings are applied after loading via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "scribe.toml";

/// Default limit on nested partial expansion.
const DEFAULT_MAX_PARTIAL_DEPTH: usize = 10;

/// Upper bound accepted for `render.max_partial_depth`.
const MAX_PARTIAL_DEPTH_LIMIT: usize = 64;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override document source directory.
    pub source_dir: Option<PathBuf>,
    /// Override partials directory.
    pub partials_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override base URL for images.
    pub images_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source paths as written in TOML.
    source: SourceConfigRaw,
    /// Asset URL configuration.
    pub assets: AssetsConfig,
    /// Render settings as written in TOML.
    render: RenderConfigRaw,

    /// Resolved source configuration (set after loading).
    #[serde(skip)]
    pub source_resolved: SourceConfig,
    /// Resolved render configuration (set after loading).
    #[serde(skip)]
    pub render_resolved: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourceConfigRaw {
    dir: Option<String>,
    partials_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RenderConfigRaw {
    max_partial_depth: Option<usize>,
    output_dir: Option<String>,
}

/// Resolved source directories.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SourceConfig {
    /// Directory containing documents.
    pub dir: PathBuf,
    /// Directory containing `_name.*` partial files.
    pub partials_dir: PathBuf,
}

/// Resolved render settings.
#[derive(Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum nesting of partials inside partials.
    pub max_partial_depth: usize,
    /// Directory rendered documents are written to.
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_partial_depth: DEFAULT_MAX_PARTIAL_DEPTH,
            output_dir: PathBuf::from("build"),
        }
    }
}

/// Asset URL configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Base URL that relative `image_tag` paths are joined onto.
    pub images_url: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            images_url: "/images".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `scribe.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is out of range.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.source_resolved.dir.clone_from(source_dir);
        }
        if let Some(partials_dir) = &settings.partials_dir {
            self.source_resolved.partials_dir.clone_from(partials_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.render_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(images_url) = &settings.images_url {
            self.assets.images_url.clone_from(images_url);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.images_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets.images_url cannot be empty".to_owned(),
            ));
        }

        let depth = self.render_resolved.max_partial_depth;
        if depth == 0 || depth > MAX_PARTIAL_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "render.max_partial_depth must be between 1 and {MAX_PARTIAL_DEPTH_LIMIT}"
            )));
        }

        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let source_dir = base.join("source");
        Self {
            source: SourceConfigRaw::default(),
            assets: AssetsConfig::default(),
            render: RenderConfigRaw::default(),
            source_resolved: SourceConfig {
                partials_dir: source_dir.clone(),
                dir: source_dir,
            },
            render_resolved: RenderConfig {
                max_partial_depth: DEFAULT_MAX_PARTIAL_DEPTH,
                output_dir: base.join("build"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let dir = resolve(self.source.dir.as_deref(), "source");
        let partials_dir = match self.source.partials_dir.as_deref() {
            Some(partials) => config_dir.join(partials),
            None => dir.clone(),
        };
        self.source_resolved = SourceConfig { dir, partials_dir };

        self.render_resolved = RenderConfig {
            max_partial_depth: self
                .render
                .max_partial_depth
                .unwrap_or(DEFAULT_MAX_PARTIAL_DEPTH),
            output_dir: resolve(self.render.output_dir.as_deref(), "build"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/blog"));
        assert_eq!(config.source_resolved.dir, PathBuf::from("/blog/source"));
        assert_eq!(
            config.source_resolved.partials_dir,
            PathBuf::from("/blog/source")
        );
        assert_eq!(config.render_resolved.output_dir, PathBuf::from("/blog/build"));
        assert_eq!(config.render_resolved.max_partial_depth, 10);
        assert_eq!(config.assets.images_url, "/images");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.assets.images_url, "/images");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[source]
dir = "posts"
partials_dir = "shared/partials"

[assets]
images_url = "https://cdn.example.com/img"

[render]
max_partial_depth = 4
output_dir = "out"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.source_resolved,
            SourceConfig {
                dir: PathBuf::from("/project/posts"),
                partials_dir: PathBuf::from("/project/shared/partials"),
            }
        );
        assert_eq!(
            config.render_resolved,
            RenderConfig {
                max_partial_depth: 4,
                output_dir: PathBuf::from("/project/out"),
            }
        );
        assert_eq!(config.assets.images_url, "https://cdn.example.com/img");
    }

    #[test]
    fn test_partials_dir_defaults_to_source_dir() {
        let toml = r#"
[source]
dir = "posts"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.source_resolved.partials_dir,
            PathBuf::from("/project/posts")
        );
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[render]\nmax_partial_depth = \"deep\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_depth_bounds() {
        let mut config = Config::default_with_base(Path::new("/blog"));

        config.render_resolved.max_partial_depth = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.render_resolved.max_partial_depth = 65;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.render_resolved.max_partial_depth = 64;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_images_url() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        config.assets.images_url = "  ".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("images_url"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/posts")),
            images_url: Some("/assets".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.source_resolved.dir,
            PathBuf::from("/elsewhere/posts")
        );
        assert_eq!(config.assets.images_url, "/assets");
        // Unchanged
        assert_eq!(
            config.source_resolved.partials_dir,
            PathBuf::from("/blog/source")
        );
        assert_eq!(config.render_resolved.output_dir, PathBuf::from("/blog/build"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        std::fs::write(&path, "[render]\noutput_dir = \"public\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.render_resolved.output_dir, dir.path().join("public"));
        assert_eq!(config.source_resolved.dir, dir.path().join("source"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_rejects_invalid_depth() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        std::fs::write(&path, "[render]\nmax_partial_depth = 0\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
