//! # keel-core
//!
//! Core value objects and shared types for Keel.
//!
//! This crate provides the foundational types shared across all Keel crates:
//! - Indicator records (raw and normalized) keyed by metro identity
//! - Resilience score records, components, categories, and summaries
//! - Scoring policy types (transforms, derived indicators, component model, weights)
//! - Document passages, query results, and synthesized answers
//! - JSONL table I/O for indicator and score tables
//! - Cross-cutting error types

pub mod errors;
pub mod indicators;
pub mod passages;
pub mod policy;
pub mod scores;
pub mod table;

pub use errors::CoreError;
