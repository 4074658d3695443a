//! # keel-search
//!
//! Lexical retrieval over the policy corpus.
//!
//! - [`tokenize`]: lower-casing, punctuation stripping, stop-word removal
//! - [`index`]: sparse TF-IDF vectors, rebuilt wholesale from a passage list
//! - [`retrieve`]: cosine-similarity ranking against an [`Index`]
//! - [`corpus`] / [`walk`]: loading `.txt` / `.md` documents into passages
//!
//! An [`Index`] is immutable once built and safe to share across threads.

pub mod corpus;
pub mod error;
pub mod index;
pub mod retrieve;
pub mod tokenize;
pub mod walk;

pub use corpus::load_corpus;
pub use error::SearchError;
pub use index::{Index, PassageVector, build_index};
pub use retrieve::{RetrievalFilters, retrieve, retrieve_filtered};
