//! Corpus file discovery.
//!
//! Uses the `ignore` crate so a corpus directory can carry a `.keelignore`
//! (gitignore syntax) to hide drafts, and `globset` to select document files
//! by name. The walk is not recursive: only files directly under the root
//! are documents.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::error::SearchError;

/// File-name patterns treated as policy documents.
pub const DOCUMENT_GLOBS: &[&str] = &["*.txt", "*.md"];

/// Per-directory ignore file honored during the walk.
pub const IGNORE_FILENAME: &str = ".keelignore";

/// Compile file-name patterns into a [`GlobSet`].
///
/// # Errors
///
/// Returns [`SearchError::Corpus`] for an invalid pattern.
pub fn compile_globs(patterns: &[&str]) -> Result<GlobSet, SearchError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| SearchError::Corpus(format!("invalid glob pattern: {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| SearchError::Corpus(format!("invalid glob set: {e}")))
}

/// Build a walker over the immediate children of `root`.
///
/// Hidden files are skipped and `.keelignore` is honored; `.gitignore` only
/// applies inside a git repository.
#[must_use]
pub fn build_walker(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder
        .max_depth(Some(1))
        .hidden(true)
        .add_custom_ignore_filename(IGNORE_FILENAME);
    builder.build()
}

/// Document files directly under `root`, sorted by path.
///
/// # Errors
///
/// Returns [`SearchError::Corpus`] when `root` is not a directory or the walk
/// fails.
pub fn document_paths(root: &Path) -> Result<Vec<PathBuf>, SearchError> {
    if !root.is_dir() {
        return Err(SearchError::Corpus(format!(
            "corpus directory not found: {}",
            root.display()
        )));
    }

    let matcher = compile_globs(DOCUMENT_GLOBS)?;
    let mut paths = Vec::new();
    for entry in build_walker(root) {
        let entry = entry.map_err(|e| SearchError::Corpus(e.to_string()))?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}
