//! # keel-rag
//!
//! Grounded answers over retrieved policy passages.
//!
//! [`synthesize`] assembles a character-budgeted context from a ranked
//! [`QueryResult`](keel_core::passages::QueryResult), makes one call to a
//! [`LanguageModel`], and attaches the cited source documents.
//! [`OpenAiClient`] is the production model; tests substitute a stub.

mod http;

pub mod error;
pub mod llm;
pub mod openai;
pub mod synthesize;

pub use error::{ProviderError, RagError};
pub use llm::{Disabled, LanguageModel};
pub use openai::OpenAiClient;
pub use synthesize::{NO_RELEVANT_MATERIAL, synthesize};
