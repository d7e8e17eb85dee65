//! Shared field checks for the clamp-vs-reject policy.
//!
//! Scores (reputation, popularity, satisfaction) are clamped silently into
//! `[0, 100]`. Everything else is rejected with a [`ValidationError`] that
//! names the field.

use crate::error::ValidationError;

/// Lower bound of every 0-100 score.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of every 0-100 score.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a score into `[0, 100]`. NaN collapses to the lower bound.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return SCORE_MIN;
    }
    value.clamp(SCORE_MIN, SCORE_MAX)
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

pub(crate) fn unit_interval(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            constraint: "within [0, 1]",
            value,
        });
    }
    Ok(value)
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            constraint: ">= 0",
            value,
        });
    }
    Ok(value)
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            constraint: "> 0",
            value,
        });
    }
    Ok(value)
}

pub(crate) fn score_in_range(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            constraint: "within [0, 100]",
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_score_handles_nan() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 100.0);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert_eq!(unit_interval("x", 0.0), Ok(0.0));
        assert_eq!(unit_interval("x", 1.0), Ok(1.0));
        assert!(unit_interval("x", 1.0001).is_err());
        assert!(unit_interval("x", -0.0001).is_err());
        assert_eq!(
            unit_interval("x", f64::NAN),
            Err(ValidationError::NonFinite { field: "x" })
        );
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(positive("stock_price", 0.0).is_err());
        assert!(positive("stock_price", 0.01).is_ok());
    }

    proptest! {
        #[test]
        fn clamp_score_stays_in_range(v in -1.0e6f64..1.0e6) {
            let c = clamp_score(v);
            prop_assert!((SCORE_MIN..=SCORE_MAX).contains(&c));
            if (SCORE_MIN..=SCORE_MAX).contains(&v) {
                prop_assert_eq!(c, v);
            }
        }
    }
}
