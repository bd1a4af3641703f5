//! Loading partials from disk.

use std::path::Path;

use scribe_renderer::Partials;
use walkdir::WalkDir;

use crate::SiteError;

/// Load every partial file under `dir`.
///
/// Partial files are named with a leading underscore. The partial name is
/// the path relative to `dir` without the underscore and without any
/// extension: `shared/_banner.html.erb` becomes `shared/banner`.
///
/// A missing directory yields an empty collection.
pub fn load_partials(dir: &Path) -> Result<Partials, SiteError> {
    let mut partials = Partials::new();

    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "Partials directory not found");
        return Ok(partials);
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let Some(name) = partial_name(relative) else {
            continue;
        };

        let content = std::fs::read_to_string(entry.path()).map_err(|source| SiteError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        tracing::debug!(name = %name, path = %entry.path().display(), "Loaded partial");
        partials.insert(&name, content);
    }

    tracing::debug!(count = partials.len(), "Partials loaded");
    Ok(partials)
}

/// Partial name for a path relative to the partials directory.
///
/// Returns `None` for files that are not partials (no leading underscore).
#[must_use]
pub fn partial_name(relative: &Path) -> Option<String> {
    let file_name = relative.file_name()?.to_str()?;
    let stem = file_name.strip_prefix('_')?;
    let stem = stem.split('.').next().filter(|s| !s.is_empty())?;

    let mut segments: Vec<&str> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    segments.push(stem);

    Some(segments.join("/"))
}
