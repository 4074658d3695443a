//! Document Indexer: sparse TF-IDF vectors over the passage corpus.
//!
//! The index is rebuilt from scratch whenever the corpus changes. IDF depends
//! on the whole corpus, so adding one passage can change every vector.

use std::collections::{BTreeMap, BTreeSet};

use keel_core::passages::{DocumentPassage, PassageId};
use serde::Serialize;

use crate::tokenize::tokenize;

/// Sparse TF-IDF vector for one passage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassageVector {
    pub id: PassageId,
    /// Term → weight. Only terms present in the passage appear.
    pub weights: BTreeMap<String, f64>,
    /// Euclidean norm of `weights`; 0 for a passage with no terms.
    pub norm: f64,
}

impl PassageVector {
    /// Dot product with another sparse vector.
    #[must_use]
    pub fn dot(&self, other: &BTreeMap<String, f64>) -> f64 {
        let (small, large) = if self.weights.len() <= other.len() {
            (&self.weights, other)
        } else {
            (other, &self.weights)
        };
        small
            .iter()
            .filter_map(|(term, w)| large.get(term).map(|v| w * v))
            .sum()
    }
}

/// Immutable TF-IDF index. Passages keep their corpus insertion order.
#[derive(Debug, Clone, Default)]
pub struct Index {
    passages: Vec<DocumentPassage>,
    vectors: Vec<PassageVector>,
    idf: BTreeMap<String, f64>,
}

impl Index {
    #[must_use]
    pub fn passages(&self) -> &[DocumentPassage] {
        &self.passages
    }

    #[must_use]
    pub fn vectors(&self) -> &[PassageVector] {
        &self.vectors
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.passages.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Indexed terms in sorted order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.idf.keys().map(String::as_str)
    }

    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    /// Vectorize arbitrary text against this index's vocabulary.
    ///
    /// Terms the index has never seen are ignored.
    #[must_use]
    pub fn vectorize(&self, text: &str) -> (BTreeMap<String, f64>, f64) {
        weigh(term_counts(&tokenize(text)), |term| self.idf(term))
    }
}

/// Build an index over `corpus`, keeping passage order.
///
/// Weight = raw term frequency × `ln((1 + N) / (1 + df)) + 1`, where `N` is
/// the passage count and `df` the number of passages containing the term.
/// Passages with no surviving terms keep an all-zero vector.
#[must_use]
pub fn build_index(corpus: Vec<DocumentPassage>) -> Index {
    let counts: Vec<BTreeMap<String, usize>> = corpus
        .iter()
        .map(|passage| term_counts(&tokenize(&passage.text)))
        .collect();

    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for terms in &counts {
        for term in terms.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let n = corpus.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let idf: BTreeMap<String, f64> = document_frequency
        .into_iter()
        .map(|(term, df)| (term.to_string(), ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0))
        .collect();

    let vectors: Vec<PassageVector> = corpus
        .iter()
        .zip(counts)
        .map(|(passage, terms)| {
            let (weights, norm) = weigh(terms, |term| idf.get(term).copied());
            PassageVector {
                id: passage.id.clone(),
                weights,
                norm,
            }
        })
        .collect();

    let empty = vectors.iter().filter(|v| v.weights.is_empty()).count();
    let documents: BTreeSet<&str> = corpus.iter().map(|p| p.id.document_id.as_str()).collect();
    tracing::info!(
        documents = documents.len(),
        passages = corpus.len(),
        terms = idf.len(),
        empty_passages = empty,
        "policy index built"
    );

    Index {
        passages: corpus,
        vectors,
        idf,
    }
}

fn term_counts(tokens: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

fn weigh(
    counts: BTreeMap<String, usize>,
    idf: impl Fn(&str) -> Option<f64>,
) -> (BTreeMap<String, f64>, f64) {
    #[allow(clippy::cast_precision_loss)]
    let weights: BTreeMap<String, f64> = counts
        .into_iter()
        .filter_map(|(term, tf)| idf(&term).map(|w| (term, tf as f64 * w)))
        .collect();
    let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
    (weights, norm)
}
