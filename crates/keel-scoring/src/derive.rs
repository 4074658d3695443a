//! Derived indicators computed from raw columns before normalization.
//!
//! Economic diversity is a two-step indicator: sector employment shares are
//! first collapsed into a normalized Shannon entropy here, then normalized
//! alongside every other column.

use keel_core::indicators::MetroIndicatorRecord;
use keel_core::policy::DerivedIndicator;

use crate::error::ScoringError;

/// Append every derived indicator to a copy of each record.
///
/// Derived indicators are evaluated in order, so a later entry may read an
/// earlier one.
///
/// # Errors
///
/// - [`ScoringError::InvalidModel`] if a derived name collides with a raw column.
/// - [`ScoringError::SchemaMismatch`] if an input column is absent.
/// - [`ScoringError::NonFinite`] if an input value is NaN or infinite.
pub fn derive_indicators(
    batch: &[MetroIndicatorRecord],
    derived: &[DerivedIndicator],
) -> Result<Vec<MetroIndicatorRecord>, ScoringError> {
    if derived.is_empty() {
        return Ok(batch.to_vec());
    }

    let out = batch
        .iter()
        .map(|record| derive_record(record, derived))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        metros = out.len(),
        derived = derived.len(),
        "derived indicators computed"
    );
    Ok(out)
}

fn derive_record(
    record: &MetroIndicatorRecord,
    derived: &[DerivedIndicator],
) -> Result<MetroIndicatorRecord, ScoringError> {
    let mut out = record.clone();
    for indicator in derived {
        let name = indicator.name();
        if out.indicators.contains_key(name) {
            return Err(ScoringError::InvalidModel(format!(
                "derived indicator '{name}' collides with an existing column"
            )));
        }

        let inputs = indicator
            .inputs()
            .into_iter()
            .map(|input| input_value(&out, input))
            .collect::<Result<Vec<f64>, _>>()?;

        let value = match indicator {
            DerivedIndicator::ShannonEntropy { .. } => normalized_entropy(&inputs),
            DerivedIndicator::Ratio { .. } => ratio(inputs[0], inputs[1]),
        };
        out.indicators.insert(name.to_string(), value);
    }
    Ok(out)
}

fn input_value(record: &MetroIndicatorRecord, input: &str) -> Result<f64, ScoringError> {
    let value = record
        .get(input)
        .ok_or_else(|| ScoringError::SchemaMismatch {
            metro_code: record.metro_code.clone(),
            missing: vec![input.to_string()],
            unexpected: Vec::new(),
        })?;
    if !value.is_finite() {
        return Err(ScoringError::NonFinite {
            metro_code: record.metro_code.clone(),
            indicator: input.to_string(),
        });
    }
    Ok(value)
}

/// Shannon entropy of the shares, divided by its maximum `ln(k)`.
///
/// Shares are renormalized to sum to 1; negative shares count as 0. Returns 0
/// when fewer than two shares are given or they sum to 0.
#[must_use]
pub fn normalized_entropy(shares: &[f64]) -> f64 {
    if shares.len() < 2 {
        return 0.0;
    }
    let total: f64 = shares.iter().map(|s| s.max(0.0)).sum();
    if total <= 0.0 {
        return 0.0;
    }

    let entropy: f64 = shares
        .iter()
        .map(|s| s.max(0.0) / total)
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.ln())
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let max_entropy = (shares.len() as f64).ln();
    (entropy / max_entropy).clamp(0.0, 1.0)
}

/// `numerator / denominator`, or 0 for a zero denominator.
#[must_use]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
