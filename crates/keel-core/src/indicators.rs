//! Indicator records keyed by metro identity.
//!
//! Rows serialize flat: the identity columns followed by one column per
//! indicator, so a JSONL table reads like the tabular export of the
//! collection layer.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Indicator column names used by the default scoring policy.
pub mod names {
    pub const TOTAL_POPULATION: &str = "total_population";
    pub const MEDIAN_HOUSEHOLD_INCOME: &str = "median_household_income";
    pub const INCOME_GROWTH: &str = "income_growth";
    pub const UNEMPLOYMENT_RATE: &str = "unemployment_rate";
    pub const EMPLOYMENT_VOLATILITY: &str = "employment_volatility";
    pub const HOUSING_COST_BURDEN: &str = "housing_cost_burden";
    pub const BACHELORS_SHARE: &str = "bachelors_share";
    pub const GRADUATE_SHARE: &str = "graduate_share";
    pub const SECTOR_ENTROPY: &str = "sector_entropy";

    /// Industry-sector employment share columns feeding `sector_entropy`.
    pub const SECTOR_SHARES: [&str; 6] = [
        "sector_manufacturing",
        "sector_professional_services",
        "sector_health_education",
        "sector_retail_trade",
        "sector_government",
        "sector_other",
    ];
}

/// Raw indicator values for one metro, as produced by the collection layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MetroIndicatorRecord {
    /// CBSA code (e.g. `"35620"`).
    pub metro_code: String,
    pub metro_name: String,
    #[serde(flatten)]
    pub indicators: BTreeMap<String, f64>,
}

impl MetroIndicatorRecord {
    #[must_use]
    pub fn new(metro_code: impl Into<String>, metro_name: impl Into<String>) -> Self {
        Self {
            metro_code: metro_code.into(),
            metro_name: metro_name.into(),
            indicators: BTreeMap::new(),
        }
    }

    /// Builder-style insert of one indicator value.
    #[must_use]
    pub fn with(mut self, indicator: impl Into<String>, value: f64) -> Self {
        self.indicators.insert(indicator.into(), value);
        self
    }

    #[must_use]
    pub fn get(&self, indicator: &str) -> Option<f64> {
        self.indicators.get(indicator).copied()
    }
}

/// Indicator values for one metro mapped onto [0, 1].
///
/// Only comparable with records from the same normalization batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NormalizedIndicatorRecord {
    pub metro_code: String,
    pub metro_name: String,
    #[serde(flatten)]
    pub indicators: BTreeMap<String, f64>,
}

impl NormalizedIndicatorRecord {
    #[must_use]
    pub fn get(&self, indicator: &str) -> Option<f64> {
        self.indicators.get(indicator).copied()
    }
}
