//! Retriever: rank indexed passages against a free-text query.

use keel_core::passages::{QueryResult, RankedPassage};

use crate::error::SearchError;
use crate::index::Index;

/// Limits applied after ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalFilters {
    /// Maximum passages returned. Must be at least 1.
    pub limit: usize,
    /// Passages scoring below this are dropped.
    pub min_score: f64,
}

impl RetrievalFilters {
    #[must_use]
    pub const fn top(limit: usize) -> Self {
        Self {
            limit,
            min_score: 0.0,
        }
    }
}

/// The `top_k` passages most similar to `query`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] when `top_k` is 0.
pub fn retrieve(query: &str, index: &Index, top_k: usize) -> Result<QueryResult, SearchError> {
    retrieve_filtered(query, index, &RetrievalFilters::top(top_k))
}

/// Rank by cosine similarity, then apply `filters`.
///
/// Ties keep corpus insertion order. A query with no indexed terms returns an
/// empty result rather than an arbitrary ordering of zero scores.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] when `filters.limit` is 0 or
/// `filters.min_score` is not finite.
pub fn retrieve_filtered(
    query: &str,
    index: &Index,
    filters: &RetrievalFilters,
) -> Result<QueryResult, SearchError> {
    if filters.limit == 0 {
        return Err(SearchError::InvalidQuery(
            "top_k must be at least 1".to_string(),
        ));
    }
    if !filters.min_score.is_finite() {
        return Err(SearchError::InvalidQuery(format!(
            "min_score must be finite, got {}",
            filters.min_score
        )));
    }

    let (query_weights, query_norm) = index.vectorize(query);
    if query_norm == 0.0 {
        tracing::debug!(query, "query has no indexed terms");
        return Ok(QueryResult::empty(query));
    }

    let mut scored: Vec<(usize, f64)> = index
        .vectors()
        .iter()
        .enumerate()
        .map(|(position, vector)| {
            let score = if vector.norm == 0.0 {
                0.0
            } else {
                vector.dot(&query_weights) / (vector.norm * query_norm)
            };
            (position, score)
        })
        .filter(|(_, score)| *score >= filters.min_score)
        .collect();

    // stable: equal scores stay in insertion order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(filters.limit);

    let ranked: Vec<RankedPassage> = scored
        .into_iter()
        .map(|(position, score)| RankedPassage {
            passage: index.passages()[position].clone(),
            score,
        })
        .collect();

    tracing::debug!(query, hits = ranked.len(), "passages retrieved");
    Ok(QueryResult {
        query: query.to_string(),
        ranked,
    })
}

#[cfg(test)]
mod tests {
    use keel_core::passages::DocumentPassage;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::index::build_index;

    fn corpus() -> Vec<DocumentPassage> {
        vec![
            DocumentPassage::new(
                "a",
                0,
                "manufacturing resilience manufacturing resilience manufacturing resilience \
                 manufacturing resilience manufacturing resilience regional policy",
                "A",
            ),
            DocumentPassage::new(
                "b",
                0,
                "manufacturing resilience regional policy workforce training grants",
                "B",
            ),
            DocumentPassage::new("c", 0, "housing affordability rural broadband", "C"),
        ]
    }

    fn ids(result: &QueryResult) -> Vec<&str> {
        result
            .ranked
            .iter()
            .map(|r| r.passage.id.document_id.as_str())
            .collect()
    }

    #[test]
    fn term_density_orders_results() {
        let index = build_index(corpus());
        let result = retrieve("manufacturing resilience", &index, 3).unwrap();

        assert_eq!(ids(&result), vec!["a", "b", "c"]);
        assert!(result.ranked[0].score > result.ranked[1].score);
        assert!(result.ranked[1].score > 0.0);
        assert!(result.ranked[2].score.abs() < f64::EPSILON);
    }

    #[test]
    fn scores_are_cosines() {
        let index = build_index(corpus());
        let result = retrieve("manufacturing resilience", &index, 3).unwrap();
        for hit in &result.ranked {
            assert!((0.0..=1.0 + 1e-12).contains(&hit.score));
        }
    }

    #[test]
    fn ties_keep_insertion_order() {
        let index = build_index(vec![
            DocumentPassage::new("first", 0, "small business capital", "First"),
            DocumentPassage::new("second", 0, "small business capital", "Second"),
            DocumentPassage::new("third", 0, "tourism", "Third"),
        ]);
        let result = retrieve("capital", &index, 2).unwrap();
        assert_eq!(ids(&result), vec!["first", "second"]);
        assert!((result.ranked[0].score - result.ranked[1].score).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case::unknown_terms("quantum spaceflight")]
    #[case::stop_words("the and of")]
    #[case::empty("")]
    fn zero_query_vector_is_empty(#[case] query: &str) {
        let index = build_index(corpus());
        let result = retrieve(query, &index, 3).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.query, query);
    }

    #[test]
    fn top_k_larger_than_corpus_returns_all() {
        let index = build_index(corpus());
        assert_eq!(retrieve("manufacturing", &index, 50).unwrap().len(), 3);
    }

    #[test]
    fn top_k_truncates() {
        let index = build_index(corpus());
        let result = retrieve("manufacturing resilience", &index, 1).unwrap();
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn zero_top_k_is_invalid() {
        let index = build_index(corpus());
        assert!(matches!(
            retrieve("manufacturing", &index, 0),
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn min_score_drops_weak_matches() {
        let index = build_index(corpus());
        let filters = RetrievalFilters {
            limit: 3,
            min_score: 0.1,
        };
        let result = retrieve_filtered("manufacturing resilience", &index, &filters).unwrap();
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn empty_index_returns_empty() {
        let index = build_index(Vec::new());
        assert!(retrieve("manufacturing", &index, 3).unwrap().is_empty());
    }
}
