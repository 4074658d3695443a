//! Resilience Scoring Engine: sub-components and the composite score.

use std::collections::BTreeMap;

use keel_core::indicators::NormalizedIndicatorRecord;
use keel_core::policy::{ComponentIndicators, CompositeWeights, ScoringModel, check_weights};
use keel_core::scores::{Component, ResilienceCategory, ResilienceScoreRecord};

use crate::error::ScoringError;

/// Score a normalized batch.
///
/// Weights and model are validated before any record is touched. The whole
/// batch scores or the call fails; identical inputs give identical outputs.
///
/// # Errors
///
/// - [`ScoringError::InvalidWeights`] for bad composite or component weights.
/// - [`ScoringError::InvalidModel`] for empty or overlapping components.
/// - [`ScoringError::SchemaMismatch`] if a record lacks a modeled indicator.
pub fn score(
    batch: &[NormalizedIndicatorRecord],
    model: &ScoringModel,
    weights: &CompositeWeights,
) -> Result<Vec<ResilienceScoreRecord>, ScoringError> {
    weights
        .validate()
        .map_err(|e| ScoringError::weights(None, e))?;
    validate_model(model)?;

    let scored = batch
        .iter()
        .map(|record| score_record(record, model, weights))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(metros = scored.len(), "resilience scores computed");
    Ok(scored)
}

/// Check that every component has a non-empty indicator set with valid
/// weights and that no indicator feeds two components.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidModel`] or [`ScoringError::InvalidWeights`].
pub fn validate_model(model: &ScoringModel) -> Result<(), ScoringError> {
    let mut owners: BTreeMap<&str, Component> = BTreeMap::new();

    for component in Component::ALL {
        let indicators = model.indicators(component);
        if indicators.is_empty() {
            return Err(ScoringError::InvalidModel(format!(
                "component {component} has no indicators"
            )));
        }
        check_weights(indicators.iter().map(|(name, w)| (name.as_str(), *w)))
            .map_err(|e| ScoringError::weights(Some(component.as_str()), e))?;

        for name in indicators.keys() {
            if let Some(previous) = owners.insert(name.as_str(), component) {
                return Err(ScoringError::InvalidModel(format!(
                    "indicator '{name}' feeds both {previous} and {component}"
                )));
            }
        }
    }
    Ok(())
}

fn score_record(
    record: &NormalizedIndicatorRecord,
    model: &ScoringModel,
    weights: &CompositeWeights,
) -> Result<ResilienceScoreRecord, ScoringError> {
    let mut components = [0.0; 4];
    for (slot, component) in components.iter_mut().zip(Component::ALL) {
        *slot = component_score(record, model.indicators(component))?;
    }

    let composite = Component::ALL
        .iter()
        .zip(components)
        .map(|(component, value)| weights.weight(*component) * value)
        .sum::<f64>()
        .clamp(0.0, 1.0);

    let [employment_stability, economic_diversity, income_resilience, human_capital] = components;
    Ok(ResilienceScoreRecord {
        metro_code: record.metro_code.clone(),
        metro_name: record.metro_name.clone(),
        employment_stability,
        economic_diversity,
        income_resilience,
        human_capital,
        composite,
        category: ResilienceCategory::from_composite(composite),
    })
}

fn component_score(
    record: &NormalizedIndicatorRecord,
    indicators: &ComponentIndicators,
) -> Result<f64, ScoringError> {
    let mut total = 0.0;
    for (name, weight) in indicators {
        let value = record
            .get(name)
            .ok_or_else(|| ScoringError::SchemaMismatch {
                metro_code: record.metro_code.clone(),
                missing: vec![name.clone()],
                unexpected: Vec::new(),
            })?;
        total += weight * value;
    }
    Ok(total.clamp(0.0, 1.0))
}
