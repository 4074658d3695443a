//! Document passages, ranked query results, and synthesized answers.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of a passage: source document plus position within it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PassageId {
    pub document_id: String,
    pub passage_index: usize,
}

impl fmt::Display for PassageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.document_id, self.passage_index)
    }
}

/// A chunk of a policy document; the unit of retrieval and citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentPassage {
    pub id: PassageId,
    pub text: String,
    /// Human-readable source label (document title).
    pub citation: String,
}

impl DocumentPassage {
    #[must_use]
    pub fn new(
        document_id: impl Into<String>,
        passage_index: usize,
        text: impl Into<String>,
        citation: impl Into<String>,
    ) -> Self {
        Self {
            id: PassageId {
                document_id: document_id.into(),
                passage_index,
            },
            text: text.into(),
            citation: citation.into(),
        }
    }
}

/// One passage with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedPassage {
    pub passage: DocumentPassage,
    pub score: f64,
}

/// Passages ranked by descending similarity, ties in corpus order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryResult {
    pub query: String,
    pub ranked: Vec<RankedPassage>,
}

impl QueryResult {
    #[must_use]
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ranked: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ranked.len()
    }
}

/// A grounded answer plus the documents its context was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SynthesizedAnswer {
    pub query: String,
    pub answer: String,
    /// Distinct source documents, in the order first used.
    pub citations: Vec<String>,
}
