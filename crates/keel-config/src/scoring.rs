//! Scoring policy configuration.

use keel_core::policy::{
    CompositeWeights, DerivedIndicator, NormalizationPolicy, ScoringModel, check_weights,
    default_derived,
};
use keel_core::scores::Component;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Per-indicator transforms. Entries merge over the built-in defaults.
    #[serde(default)]
    pub normalization: NormalizationPolicy,

    /// Indicators derived from raw columns before normalization.
    #[serde(default = "default_derived")]
    pub derived: Vec<DerivedIndicator>,

    /// Indicator-to-component mapping. When set, it replaces the built-in
    /// model wholesale (all four components must be given).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ScoringModel>,

    /// Composite weights over the four components.
    #[serde(default)]
    pub weights: CompositeWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationPolicy::default(),
            derived: default_derived(),
            model: None,
            weights: CompositeWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// The configured model, or the built-in one.
    #[must_use]
    pub fn effective_model(&self) -> ScoringModel {
        self.model.clone().unwrap_or_default()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.weights
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                field: "scoring.weights".to_string(),
                reason: e.to_string(),
            })?;

        let model = self.effective_model();
        for component in Component::ALL {
            let set = model.indicators(component);
            check_weights(set.iter().map(|(name, w)| (name.as_str(), *w))).map_err(|e| {
                ConfigError::InvalidValue {
                    field: format!("scoring.model.{component}"),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}
