//! Policy corpus loading: documents on disk → passages.

use std::path::Path;

use keel_core::passages::DocumentPassage;

use crate::error::SearchError;
use crate::walk::document_paths;

/// Load every document directly under `dir` and split it into passages.
///
/// Documents are visited in path order, so passage order (and therefore
/// retrieval tie-breaks) is stable across runs.
///
/// # Errors
///
/// - [`SearchError::Corpus`] if `dir` is missing.
/// - [`SearchError::Io`] if a document cannot be read as UTF-8.
pub fn load_corpus(dir: &Path) -> Result<Vec<DocumentPassage>, SearchError> {
    let paths = document_paths(dir)?;
    let mut passages = Vec::new();

    for path in &paths {
        let text = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.clone(),
            source,
        })?;
        let document_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let citation = title_from_stem(&document_id);

        let before = passages.len();
        passages.extend(document_passages(&document_id, &citation, &text));
        tracing::debug!(
            document = %document_id,
            passages = passages.len() - before,
            "loaded policy document"
        );
    }

    tracing::debug!(
        documents = paths.len(),
        passages = passages.len(),
        dir = %dir.display(),
        "policy corpus loaded"
    );
    Ok(passages)
}

/// Split one document into blank-line separated passages.
///
/// A document with no non-blank paragraph yields a single empty passage so
/// it stays attributable.
#[must_use]
pub fn document_passages(document_id: &str, citation: &str, text: &str) -> Vec<DocumentPassage> {
    let paragraphs = split_paragraphs(text);
    if paragraphs.is_empty() {
        return vec![DocumentPassage::new(document_id, 0, "", citation)];
    }
    paragraphs
        .into_iter()
        .enumerate()
        .map(|(index, paragraph)| DocumentPassage::new(document_id, index, paragraph, citation))
        .collect()
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

/// `rural_development` → `Rural Development`.
#[must_use]
pub fn title_from_stem(stem: &str) -> String {
    stem.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
