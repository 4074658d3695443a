//! Resilience score records, sub-components, and categories.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The four sub-components of the composite resilience score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    EmploymentStability,
    EconomicDiversity,
    IncomeResilience,
    HumanCapital,
}

impl Component {
    pub const ALL: [Self; 4] = [
        Self::EmploymentStability,
        Self::EconomicDiversity,
        Self::IncomeResilience,
        Self::HumanCapital,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmploymentStability => "employment_stability",
            Self::EconomicDiversity => "economic_diversity",
            Self::IncomeResilience => "income_resilience",
            Self::HumanCapital => "human_capital",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse banding of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResilienceCategory {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ResilienceCategory {
    /// Band a composite score in [0, 1].
    #[must_use]
    pub fn from_composite(composite: f64) -> Self {
        if composite >= 0.8 {
            Self::VeryHigh
        } else if composite >= 0.7 {
            Self::High
        } else if composite >= 0.6 {
            Self::Moderate
        } else if composite >= 0.5 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for ResilienceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scores for one metro. Recomputed wholesale per batch, never patched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResilienceScoreRecord {
    pub metro_code: String,
    pub metro_name: String,
    pub employment_stability: f64,
    pub economic_diversity: f64,
    pub income_resilience: f64,
    pub human_capital: f64,
    /// Weighted sum of the four components.
    pub composite: f64,
    pub category: ResilienceCategory,
}

impl ResilienceScoreRecord {
    #[must_use]
    pub const fn component(&self, component: Component) -> f64 {
        match component {
            Component::EmploymentStability => self.employment_stability,
            Component::EconomicDiversity => self.economic_diversity,
            Component::IncomeResilience => self.income_resilience,
            Component::HumanCapital => self.human_capital,
        }
    }

    #[must_use]
    pub const fn metric(&self, metric: ScoreMetric) -> f64 {
        match metric {
            ScoreMetric::Composite => self.composite,
            ScoreMetric::Component(component) => self.component(component),
        }
    }
}

/// A sortable score column: the composite or one sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreMetric {
    #[default]
    Composite,
    Component(Component),
}

impl FromStr for ScoreMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "composite" {
            return Ok(Self::Composite);
        }
        Component::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .map(Self::Component)
            .ok_or_else(|| format!("unknown score metric '{s}'"))
    }
}

impl fmt::Display for ScoreMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite => f.write_str("composite"),
            Self::Component(c) => c.fmt(f),
        }
    }
}

/// Batch-level statistics over composite scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreSummary {
    pub total_metros: usize,
    pub mean_composite: f64,
    pub highest_composite: f64,
    pub lowest_composite: f64,
    pub category_distribution: BTreeMap<ResilienceCategory, usize>,
}
