//! # keel-service
//!
//! The facade a dashboard talks to: score a metro batch, compare metros, and
//! answer policy questions against the indexed corpus.
//!
//! Scoring is a full recompute on every call. The policy index is held behind
//! an `Arc`; [`KeelService::replace_index`] swaps in a rebuilt one while
//! readers keep the snapshot they already hold.

mod error;

use std::path::Path;
use std::sync::Arc;

use keel_config::{KeelConfig, RetrievalConfig, ScoringConfig};
use keel_core::indicators::MetroIndicatorRecord;
use keel_core::passages::{DocumentPassage, QueryResult, SynthesizedAnswer};
use keel_core::scores::ResilienceScoreRecord;
use keel_rag::{LanguageModel, synthesize};
use keel_scoring::{ScoreBoard, ScoringPlan, score_batch};
use keel_search::{Index, RetrievalFilters, build_index, load_corpus, retrieve, retrieve_filtered};

pub use error::ServiceError;

/// Build a [`ScoringPlan`] from the `[scoring]` config section.
#[must_use]
pub fn scoring_plan(config: &ScoringConfig) -> ScoringPlan {
    ScoringPlan {
        normalization: config.normalization.clone(),
        derived: config.derived.clone(),
        model: config.effective_model(),
        weights: config.weights,
    }
}

/// Load and index every document under `dir`.
///
/// # Errors
///
/// Returns [`ServiceError::Search`] if the directory is missing or a document
/// cannot be read.
pub fn load_index(dir: &Path) -> Result<Index, ServiceError> {
    Ok(build_index(load_corpus(dir)?))
}

pub struct KeelService<M> {
    plan: ScoringPlan,
    retrieval: RetrievalConfig,
    index: Arc<Index>,
    model: M,
}

impl<M: LanguageModel> KeelService<M> {
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if `config` fails validation.
    pub fn new(config: &KeelConfig, index: Index, model: M) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self {
            plan: scoring_plan(&config.scoring),
            retrieval: config.retrieval.clone(),
            index: Arc::new(index),
            model,
        })
    }

    #[must_use]
    pub const fn plan(&self) -> &ScoringPlan {
        &self.plan
    }

    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Current index snapshot.
    #[must_use]
    pub fn index(&self) -> Arc<Index> {
        Arc::clone(&self.index)
    }

    /// Rebuild the index from `corpus` and swap it in.
    pub fn replace_index(&mut self, corpus: Vec<DocumentPassage>) {
        self.index = Arc::new(build_index(corpus));
    }

    /// Score a full indicator batch.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Scoring`]; the batch is never partially scored.
    pub fn get_scores(&self, batch: &[MetroIndicatorRecord]) -> Result<ScoreBoard, ServiceError> {
        Ok(score_batch(batch, &self.plan)?)
    }

    /// Score `batch` and keep only `metro_codes`, in batch order.
    ///
    /// Normalization still spans the whole batch, so restricting afterwards
    /// keeps the selected scores comparable with the rest.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Scoring`] if the batch cannot be scored.
    pub fn compare<I, S>(
        &self,
        batch: &[MetroIndicatorRecord],
        metro_codes: I,
    ) -> Result<Vec<ResilienceScoreRecord>, ServiceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.get_scores(batch)?.compare(metro_codes))
    }

    /// Rank passages for `query`; `top_k` defaults to the configured value.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Search`] when `top_k` is 0.
    pub fn search(&self, query: &str, top_k: Option<usize>) -> Result<QueryResult, ServiceError> {
        let top_k = top_k.unwrap_or(self.retrieval.top_k);
        Ok(retrieve(query, &self.index, top_k)?)
    }

    /// Answer a policy question from the indexed corpus.
    ///
    /// Passages below the configured `min_score` are not offered to the
    /// model; if none remain the model is not called.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Rag`] wrapping `GenerationUnavailable` when the model
    ///   call fails. Not retried.
    /// - [`ServiceError::Search`] for invalid retrieval settings.
    pub async fn ask(&self, query: &str) -> Result<SynthesizedAnswer, ServiceError> {
        let index = self.index();
        let filters = RetrievalFilters {
            limit: self.retrieval.top_k,
            min_score: self.retrieval.min_score,
        };
        let ranked = retrieve_filtered(query, &index, &filters)?;
        tracing::debug!(query, hits = ranked.len(), "ask: passages above threshold");

        let answer = synthesize(
            query,
            &ranked,
            self.retrieval.max_context_chars,
            &self.model,
        )
        .await?;
        Ok(answer)
    }
}
