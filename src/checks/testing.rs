//! Numeric comparison and seeding helpers used by the rules.

use crate::base::Estimator;
use crate::data::Data;
use crate::error::{CheckError, CheckResult, EstimatorError};
use crate::value::{Params, Value};

/// Checks that two results agree to `decimal` places: same kind and shape,
/// NaN in the same positions, and `|a - b| < 1.5 * 10^-decimal` elsewhere.
pub fn assert_array_almost_equal(actual: &Data, desired: &Data, decimal: u32) -> CheckResult {
    if actual.kind() != desired.kind() {
        return Err(CheckError::Violation(format!(
            "result kinds differ: {} vs {}",
            actual.kind(),
            desired.kind()
        )));
    }
    if actual.shape() != desired.shape() {
        return Err(CheckError::Violation(format!(
            "result shapes differ: {:?} vs {:?}",
            actual.shape(),
            desired.shape()
        )));
    }
    let tolerance = 1.5 * 10f64.powi(-(decimal as i32));
    let a = actual.to_flat_vec();
    let b = desired.to_flat_vec();
    let mismatched = a
        .iter()
        .zip(&b)
        .filter(|(x, y)| match (x.is_nan(), y.is_nan()) {
            (true, true) => false,
            (false, false) => (*x - *y).abs() >= tolerance,
            _ => true,
        })
        .count();
    if mismatched > 0 {
        return Err(CheckError::Violation(format!(
            "arrays are not almost equal to {} decimals: {} of {} elements differ",
            decimal,
            mismatched,
            a.len()
        )));
    }
    Ok(())
}

/// Sets the `random_state` parameter to `seed` if the estimator has one.
/// Returns whether a parameter was set.
pub fn set_random_state(estimator: &mut dyn Estimator, seed: i64) -> Result<bool, EstimatorError> {
    if !estimator.get_params().contains_key("random_state") {
        return Ok(false);
    }
    let mut params = Params::new();
    params.insert("random_state".to_string(), Value::Int(seed));
    estimator.set_params(&params)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::clustering::TimeSeriesKMeans;
    use crate::estimators::transformations::StandardScaler;
    use ndarray::array;

    #[test]
    fn test_almost_equal_within_tolerance() {
        let a = Data::Series(array![1.0, 2.0, f64::NAN]);
        let b = Data::Series(array![1.0 + 1e-7, 2.0, f64::NAN]);
        assert!(assert_array_almost_equal(&a, &b, 6).is_ok());
    }

    #[test]
    fn test_almost_equal_detects_difference() {
        let a = Data::Series(array![1.0, 2.0]);
        let b = Data::Series(array![1.0, 2.001]);
        let err = assert_array_almost_equal(&a, &b, 6).unwrap_err();
        assert!(err.to_string().contains("1 of 2 elements differ"));
    }

    #[test]
    fn test_nan_position_mismatch() {
        let a = Data::Series(array![f64::NAN, 1.0]);
        let b = Data::Series(array![1.0, 1.0]);
        assert!(assert_array_almost_equal(&a, &b, 6).is_err());
    }

    #[test]
    fn test_shape_and_kind_mismatch() {
        let a = Data::Series(array![1.0]);
        assert!(assert_array_almost_equal(&a, &Data::Series(array![1.0, 1.0]), 6).is_err());
        assert!(assert_array_almost_equal(&a, &Data::Labels(array![1]), 6).is_err());
    }

    #[test]
    fn test_set_random_state() {
        let mut km = TimeSeriesKMeans::default();
        assert!(set_random_state(&mut km, 7).unwrap());
        assert_eq!(km.get_params().get("random_state"), Some(&Value::Int(7)));

        let mut scaler = StandardScaler::default();
        assert!(!set_random_state(&mut scaler, 7).unwrap());
    }
}
