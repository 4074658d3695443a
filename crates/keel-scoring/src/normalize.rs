//! Indicator Normalizer: batch-relative mapping onto [0, 1].
//!
//! Min/max bounds come from the batch being normalized, so values are only
//! comparable within one batch. Never reuse normalized records across batches
//! with different metro membership.

use std::collections::BTreeSet;

use keel_core::indicators::{MetroIndicatorRecord, NormalizedIndicatorRecord};
use keel_core::policy::{NormalizationPolicy, Transform};

use crate::error::ScoringError;

/// Value assigned to every metro when an indicator has zero range.
pub const ZERO_RANGE_VALUE: f64 = 0.5;

/// Normalize every indicator of every record according to `policy`.
///
/// # Errors
///
/// - [`ScoringError::SchemaMismatch`] if records disagree on indicator names;
///   checked before any value is transformed.
/// - [`ScoringError::NonFinite`] if a raw value is NaN or infinite.
pub fn normalize(
    batch: &[MetroIndicatorRecord],
    policy: &NormalizationPolicy,
) -> Result<Vec<NormalizedIndicatorRecord>, ScoringError> {
    let Some(first) = batch.first() else {
        return Ok(Vec::new());
    };

    check_schema(batch)?;
    check_finite(batch)?;

    let mut out: Vec<NormalizedIndicatorRecord> = batch
        .iter()
        .map(|record| NormalizedIndicatorRecord {
            metro_code: record.metro_code.clone(),
            metro_name: record.metro_name.clone(),
            indicators: std::collections::BTreeMap::new(),
        })
        .collect();

    for name in first.indicators.keys() {
        let raw: Vec<f64> = batch
            .iter()
            .map(|record| record.indicators[name])
            .collect();
        let transform = policy.transform_for(name);
        let normalized = normalize_column(name, &raw, transform);
        for (record, value) in out.iter_mut().zip(normalized) {
            record.indicators.insert(name.clone(), value);
        }
    }

    tracing::debug!(
        metros = out.len(),
        indicators = first.indicators.len(),
        "indicator batch normalized"
    );
    Ok(out)
}

/// Apply one transform to one indicator column.
///
/// `name` is only used for diagnostics.
#[must_use]
pub fn normalize_column(name: &str, values: &[f64], transform: Transform) -> Vec<f64> {
    match transform {
        Transform::MinMax => min_max(values),
        Transform::Inverted => inverted(values),
        Transform::LogCompress => {
            if values.iter().any(|v| *v < 0.0) {
                tracing::warn!(
                    indicator = name,
                    "negative values cannot be log-compressed; using min_max"
                );
                return min_max(values);
            }
            let logged: Vec<f64> = values.iter().map(|v| v.ln_1p()).collect();
            min_max(&logged)
        }
        Transform::IdentityIfAlreadyBounded => {
            if values.iter().all(|v| (0.0..=1.0).contains(v)) {
                values.to_vec()
            } else {
                tracing::warn!(
                    indicator = name,
                    "values outside [0, 1]; using min_max instead of identity"
                );
                min_max(values)
            }
        }
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

/// Half the batch span and half the minimum and maximum.
///
/// Working on halves keeps `max - min` finite for large values of opposite sign.
fn half_bounds(values: &[f64]) -> (f64, f64, f64) {
    let (min, max) = bounds(values);
    let (lo, hi) = (min / 2.0, max / 2.0);
    (lo, hi, hi - lo)
}

fn min_max(values: &[f64]) -> Vec<f64> {
    let (lo, _, span) = half_bounds(values);
    if span <= 0.0 {
        return vec![ZERO_RANGE_VALUE; values.len()];
    }
    values
        .iter()
        .map(|v| ((v / 2.0 - lo) / span).clamp(0.0, 1.0))
        .collect()
}

fn inverted(values: &[f64]) -> Vec<f64> {
    let (_, hi, span) = half_bounds(values);
    if span <= 0.0 {
        return vec![ZERO_RANGE_VALUE; values.len()];
    }
    values
        .iter()
        .map(|v| ((hi - v / 2.0) / span).clamp(0.0, 1.0))
        .collect()
}

fn check_schema(batch: &[MetroIndicatorRecord]) -> Result<(), ScoringError> {
    let Some(first) = batch.first() else {
        return Ok(());
    };
    let expected: BTreeSet<&String> = first.indicators.keys().collect();

    for record in &batch[1..] {
        let actual: BTreeSet<&String> = record.indicators.keys().collect();
        if actual != expected {
            return Err(ScoringError::SchemaMismatch {
                metro_code: record.metro_code.clone(),
                missing: expected
                    .difference(&actual)
                    .map(|s| (*s).clone())
                    .collect(),
                unexpected: actual
                    .difference(&expected)
                    .map(|s| (*s).clone())
                    .collect(),
            });
        }
    }
    Ok(())
}

fn check_finite(batch: &[MetroIndicatorRecord]) -> Result<(), ScoringError> {
    for record in batch {
        if let Some((name, _)) = record.indicators.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScoringError::NonFinite {
                metro_code: record.metro_code.clone(),
                indicator: name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn policy(entries: &[(&str, Transform)]) -> NormalizationPolicy {
        NormalizationPolicy {
            default: Transform::MinMax,
            transforms: entries
                .iter()
                .map(|(k, t)| ((*k).to_string(), *t))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn metro(code: &str, values: &[(&str, f64)]) -> MetroIndicatorRecord {
        values
            .iter()
            .fold(MetroIndicatorRecord::new(code, format!("Metro {code}")), |r, (k, v)| {
                r.with(*k, *v)
            })
    }

    #[test]
    fn inverted_unemployment_two_metros() {
        let batch = vec![
            metro("a", &[("unemployment_rate", 3.0)]),
            metro("b", &[("unemployment_rate", 9.0)]),
        ];
        let out = normalize(&batch, &policy(&[("unemployment_rate", Transform::Inverted)])).unwrap();

        assert_eq!(out[0].get("unemployment_rate"), Some(1.0));
        assert_eq!(out[1].get("unemployment_rate"), Some(0.0));
    }

    #[rstest]
    #[case::min_max(Transform::MinMax)]
    #[case::inverted(Transform::Inverted)]
    #[case::log_compress(Transform::LogCompress)]
    fn constant_indicator_is_half(#[case] transform: Transform) {
        let batch = vec![
            metro("a", &[("x", 4.2)]),
            metro("b", &[("x", 4.2)]),
            metro("c", &[("x", 4.2)]),
        ];
        let out = normalize(&batch, &policy(&[("x", transform)])).unwrap();
        for record in &out {
            assert_eq!(record.get("x"), Some(0.5));
        }
    }

    #[rstest]
    #[case::min_max(Transform::MinMax, vec![0.0, 0.5, 1.0])]
    #[case::inverted(Transform::Inverted, vec![1.0, 0.5, 0.0])]
    fn linear_transforms(#[case] transform: Transform, #[case] expected: Vec<f64>) {
        let out = normalize_column("x", &[10.0, 20.0, 30.0], transform);
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case::min_max(Transform::MinMax, vec![0.0, 0.5, 1.0])]
    #[case::inverted(Transform::Inverted, vec![1.0, 0.5, 0.0])]
    fn extreme_opposite_sign_values_stay_bounded(
        #[case] transform: Transform,
        #[case] expected: Vec<f64>,
    ) {
        let out = normalize_column("x", &[-1.0e308, 0.0, 1.0e308], transform);
        assert_eq!(out, expected);
    }

    #[test]
    fn log_compress_preserves_order_and_compresses_tail() {
        let out = normalize_column("pop", &[1_000.0, 10_000.0, 10_000_000.0], Transform::LogCompress);
        assert!((out[0]).abs() < f64::EPSILON);
        assert!((out[2] - 1.0).abs() < f64::EPSILON);
        // linear scaling would put the middle metro near 0.001
        assert!(out[1] > 0.2 && out[1] < 0.5, "got {}", out[1]);
    }

    #[test]
    fn identity_passes_bounded_shares_through() {
        let out = normalize_column("share", &[0.31, 0.42, 0.18], Transform::IdentityIfAlreadyBounded);
        assert_eq!(out, vec![0.31, 0.42, 0.18]);
    }

    #[test]
    fn identity_falls_back_to_min_max_when_unbounded() {
        let out = normalize_column("pct", &[31.0, 42.0, 18.0], Transform::IdentityIfAlreadyBounded);
        assert!((out[1] - 1.0).abs() < f64::EPSILON);
        assert!(out[2].abs() < f64::EPSILON);
    }

    #[test]
    fn unlisted_indicator_uses_default_transform() {
        let batch = vec![metro("a", &[("y", 1.0)]), metro("b", &[("y", 3.0)])];
        let out = normalize(&batch, &policy(&[])).unwrap();
        assert_eq!(out[0].get("y"), Some(0.0));
        assert_eq!(out[1].get("y"), Some(1.0));
    }

    #[test]
    fn schema_mismatch_reports_difference() {
        let batch = vec![
            metro("a", &[("x", 1.0), ("y", 2.0)]),
            metro("b", &[("x", 1.0), ("z", 2.0)]),
        ];
        let err = normalize(&batch, &policy(&[])).unwrap_err();
        match err {
            ScoringError::SchemaMismatch {
                metro_code,
                missing,
                unexpected,
            } => {
                assert_eq!(metro_code, "b");
                assert_eq!(missing, vec!["y".to_string()]);
                assert_eq!(unexpected, vec!["z".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_value_rejected() {
        let batch = vec![metro("a", &[("x", f64::NAN)]), metro("b", &[("x", 1.0)])];
        let err = normalize(&batch, &policy(&[])).unwrap_err();
        assert!(matches!(err, ScoringError::NonFinite { .. }));
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(normalize(&[], &policy(&[])).unwrap().is_empty());
    }

    #[test]
    fn identity_preserved_per_record() {
        let batch = vec![metro("35620", &[("x", 1.0)]), metro("31080", &[("x", 2.0)])];
        let out = normalize(&batch, &policy(&[])).unwrap();
        assert_eq!(out[0].metro_code, "35620");
        assert_eq!(out[1].metro_name, "Metro 31080");
    }
}
