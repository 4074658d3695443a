//! Scoring policy: per-indicator transforms, derived indicators, the
//! indicator-to-component model, and composite weights.
//!
//! These are plain serde types so they can live in configuration. Semantic
//! checks that need the batch (schema, overlap) happen in `keel-scoring`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::indicators::names;
use crate::scores::Component;

/// Tolerance for "weights sum to 1".
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// How a raw indicator is mapped onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Linear between the batch min and max.
    #[default]
    MinMax,
    /// `1 - min_max`, for indicators where lower raw values are better.
    Inverted,
    /// `min_max` after `ln_1p`, for heavy-tailed indicators.
    LogCompress,
    /// Pass through when every batch value is already a share in [0, 1].
    IdentityIfAlreadyBounded,
}

/// Per-indicator transform selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizationPolicy {
    /// Transform for indicators without an explicit entry.
    #[serde(default)]
    pub default: Transform,
    #[serde(default)]
    pub transforms: BTreeMap<String, Transform>,
}

impl NormalizationPolicy {
    #[must_use]
    pub fn transform_for(&self, indicator: &str) -> Transform {
        self.transforms
            .get(indicator)
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        let transforms = [
            (names::TOTAL_POPULATION, Transform::LogCompress),
            (names::MEDIAN_HOUSEHOLD_INCOME, Transform::MinMax),
            (names::INCOME_GROWTH, Transform::MinMax),
            (names::UNEMPLOYMENT_RATE, Transform::Inverted),
            (names::EMPLOYMENT_VOLATILITY, Transform::Inverted),
            (names::HOUSING_COST_BURDEN, Transform::Inverted),
            (names::BACHELORS_SHARE, Transform::IdentityIfAlreadyBounded),
            (names::GRADUATE_SHARE, Transform::IdentityIfAlreadyBounded),
            (names::SECTOR_ENTROPY, Transform::IdentityIfAlreadyBounded),
        ]
        .into_iter()
        .map(|(name, t)| (name.to_string(), t))
        .collect();

        Self {
            default: Transform::MinMax,
            transforms,
        }
    }
}

/// An indicator computed from other raw columns before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedIndicator {
    /// Normalized Shannon entropy over a set of share columns.
    ShannonEntropy { name: String, inputs: Vec<String> },
    /// `numerator / denominator`.
    Ratio {
        name: String,
        numerator: String,
        denominator: String,
    },
}

impl DerivedIndicator {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ShannonEntropy { name, .. } | Self::Ratio { name, .. } => name,
        }
    }

    /// Raw columns this indicator reads.
    #[must_use]
    pub fn inputs(&self) -> Vec<&str> {
        match self {
            Self::ShannonEntropy { inputs, .. } => inputs.iter().map(String::as_str).collect(),
            Self::Ratio {
                numerator,
                denominator,
                ..
            } => vec![numerator.as_str(), denominator.as_str()],
        }
    }
}

/// Derived indicators used by the default model.
#[must_use]
pub fn default_derived() -> Vec<DerivedIndicator> {
    vec![DerivedIndicator::ShannonEntropy {
        name: names::SECTOR_ENTROPY.to_string(),
        inputs: names::SECTOR_SHARES.iter().map(ToString::to_string).collect(),
    }]
}

/// Indicator → internal weight for one sub-component.
pub type ComponentIndicators = BTreeMap<String, f64>;

/// Which normalized indicators feed each sub-component, and how strongly.
///
/// Indicator sets must not overlap between components, and each set's
/// weights must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoringModel {
    pub employment_stability: ComponentIndicators,
    pub economic_diversity: ComponentIndicators,
    pub income_resilience: ComponentIndicators,
    pub human_capital: ComponentIndicators,
}

impl ScoringModel {
    #[must_use]
    pub const fn indicators(&self, component: Component) -> &ComponentIndicators {
        match component {
            Component::EmploymentStability => &self.employment_stability,
            Component::EconomicDiversity => &self.economic_diversity,
            Component::IncomeResilience => &self.income_resilience,
            Component::HumanCapital => &self.human_capital,
        }
    }
}

impl Default for ScoringModel {
    fn default() -> Self {
        fn set(entries: &[(&str, f64)]) -> ComponentIndicators {
            entries
                .iter()
                .map(|(name, weight)| ((*name).to_string(), *weight))
                .collect()
        }

        Self {
            employment_stability: set(&[
                (names::UNEMPLOYMENT_RATE, 0.7),
                (names::EMPLOYMENT_VOLATILITY, 0.3),
            ]),
            economic_diversity: set(&[(names::SECTOR_ENTROPY, 1.0)]),
            income_resilience: set(&[
                (names::MEDIAN_HOUSEHOLD_INCOME, 0.6),
                (names::INCOME_GROWTH, 0.4),
            ]),
            human_capital: set(&[(names::BACHELORS_SHARE, 0.6), (names::GRADUATE_SHARE, 0.4)]),
        }
    }
}

/// Weights combining the four sub-components into the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompositeWeights {
    pub employment_stability: f64,
    pub economic_diversity: f64,
    pub income_resilience: f64,
    pub human_capital: f64,
}

impl CompositeWeights {
    #[must_use]
    pub const fn weight(&self, component: Component) -> f64 {
        match component {
            Component::EmploymentStability => self.employment_stability,
            Component::EconomicDiversity => self.economic_diversity,
            Component::IncomeResilience => self.income_resilience,
            Component::HumanCapital => self.human_capital,
        }
    }

    /// Check that every weight is finite and non-negative and that they sum
    /// to 1 within [`WEIGHT_TOLERANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_weights(Component::ALL.map(|c| (c.as_str(), self.weight(c))))
    }
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            employment_stability: 0.25,
            economic_diversity: 0.25,
            income_resilience: 0.25,
            human_capital: 0.25,
        }
    }
}

/// Validate a named weight set: finite, non-negative, summing to 1.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] describing the first violation.
pub fn check_weights<'a>(
    weights: impl IntoIterator<Item = (&'a str, f64)>,
) -> Result<(), CoreError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (name, weight) in weights {
        if !weight.is_finite() {
            return Err(CoreError::Validation(format!(
                "weight '{name}' is not finite"
            )));
        }
        if weight < 0.0 {
            return Err(CoreError::Validation(format!(
                "weight '{name}' is negative ({weight})"
            )));
        }
        sum += weight;
        count += 1;
    }
    if count == 0 {
        return Err(CoreError::Validation("weight set is empty".to_string()));
    }
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(CoreError::Validation(format!(
            "weights sum to {sum}, expected 1"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_valid() {
        let weights = CompositeWeights::default();
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn negative_weight_rejected() {
        let weights = CompositeWeights {
            employment_stability: -0.25,
            economic_diversity: 0.75,
            ..CompositeWeights::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn weights_off_by_more_than_tolerance_rejected() {
        let weights = CompositeWeights {
            human_capital: 0.25 + 1e-6,
            ..CompositeWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn default_model_component_weights_sum_to_one() {
        let model = ScoringModel::default();
        for component in Component::ALL {
            let set = model.indicators(component);
            assert!(
                check_weights(set.iter().map(|(k, v)| (k.as_str(), *v))).is_ok(),
                "{component} weights should be valid"
            );
        }
    }

    #[test]
    fn unknown_indicator_uses_default_transform() {
        let policy = NormalizationPolicy::default();
        assert_eq!(policy.transform_for("median_home_value"), Transform::MinMax);
        assert_eq!(
            policy.transform_for(names::UNEMPLOYMENT_RATE),
            Transform::Inverted
        );
    }

    #[test]
    fn derived_indicator_deserializes_tagged() {
        let json = r#"{"kind":"ratio","name":"bachelors_rate","numerator":"bachelors_degree","denominator":"total_population"}"#;
        let derived: DerivedIndicator = serde_json::from_str(json).unwrap();
        assert_eq!(derived.name(), "bachelors_rate");
        assert_eq!(derived.inputs(), vec!["bachelors_degree", "total_population"]);
    }
}
