//! Document discovery.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::SiteError;

/// Extensions of renderable documents (last extension only).
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "erb"];

/// Find renderable documents under `dir`, sorted by path.
///
/// Hidden entries and partial files (leading underscore) are skipped.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut documents = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_document(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    tracing::debug!(dir = %dir.display(), count = documents.len(), "Documents discovered");
    Ok(documents)
}

/// Whether a path names a renderable document.
#[must_use]
pub fn is_document(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if file_name.starts_with('_') {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// File name up to the first dot: `2013-05-08-post.html.md.erb` → `2013-05-08-post`.
#[must_use]
pub fn output_stem(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    file_name.split('.').next().filter(|s| !s.is_empty())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
