//! End-to-end scoring: derive, normalize, score.

use keel_core::indicators::MetroIndicatorRecord;
use keel_core::policy::{
    CompositeWeights, DerivedIndicator, NormalizationPolicy, ScoringModel, default_derived,
};

use crate::board::ScoreBoard;
use crate::derive::derive_indicators;
use crate::engine::{score, validate_model};
use crate::error::ScoringError;
use crate::normalize::normalize;

/// Everything needed to turn a raw batch into scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPlan {
    pub normalization: NormalizationPolicy,
    pub derived: Vec<DerivedIndicator>,
    pub model: ScoringModel,
    pub weights: CompositeWeights,
}

impl Default for ScoringPlan {
    fn default() -> Self {
        Self {
            normalization: NormalizationPolicy::default(),
            derived: default_derived(),
            model: ScoringModel::default(),
            weights: CompositeWeights::default(),
        }
    }
}

/// Score a raw indicator batch.
///
/// Weights and model are checked before any record is read, so a bad plan
/// fails even for an empty batch.
///
/// # Errors
///
/// Any [`ScoringError`] from the stages; the batch is never partially scored.
pub fn score_batch(
    raw: &[MetroIndicatorRecord],
    plan: &ScoringPlan,
) -> Result<ScoreBoard, ScoringError> {
    plan.weights
        .validate()
        .map_err(|e| ScoringError::weights(None, e))?;
    validate_model(&plan.model)?;

    let derived = derive_indicators(raw, &plan.derived)?;
    let normalized = normalize(&derived, &plan.normalization)?;
    let scored = score(&normalized, &plan.model, &plan.weights)?;

    tracing::info!(metros = scored.len(), "metro batch scored");
    Ok(ScoreBoard::new(scored))
}
