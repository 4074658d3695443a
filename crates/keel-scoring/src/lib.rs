//! # keel-scoring
//!
//! Resilience scoring for Keel.
//!
//! Stages, each a pure function over immutable batches:
//! - [`derive`]: computed columns (sector entropy, ratios) appended to raw records
//! - [`normalize`]: batch-relative mapping of every indicator onto [0, 1]
//! - [`engine`]: four weighted sub-components and the composite score
//! - [`board`]: ranking, comparison, and summary over a scored batch
//!
//! [`pipeline::score_batch`] runs the stages in order and either scores the
//! whole batch or fails without partial results.

pub mod board;
pub mod derive;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod pipeline;

pub use board::ScoreBoard;
pub use error::ScoringError;
pub use pipeline::{ScoringPlan, score_batch};
