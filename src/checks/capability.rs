//! Capability introspection and dispatch by operation name.

use crate::base::{Estimator, Operation};
use crate::data::Data;
use crate::error::EstimatorError;

/// True if the instance declares `operation`.
pub fn has_capability(estimator: &dyn Estimator, operation: Operation) -> bool {
    estimator.capabilities().contains(&operation)
}

/// Calls a result-producing operation. `fit` returns the estimator rather
/// than data and is rejected here.
pub fn invoke(
    estimator: &mut dyn Estimator,
    operation: Operation,
    args: &[Data],
) -> Result<Data, EstimatorError> {
    match operation {
        Operation::Predict => estimator.predict(args),
        Operation::PredictProba => estimator.predict_proba(args),
        Operation::DecisionFunction => estimator.decision_function(args),
        Operation::Transform => estimator.transform(args),
        Operation::InverseTransform => estimator.inverse_transform(args),
        Operation::FitTransform => estimator.fit_transform(args),
        Operation::Fit => Err(EstimatorError::invalid_input(
            "fit",
            "`fit` is not dispatched through `invoke`",
        )),
    }
}

/// Declared operations among `operations`, in the given order.
pub fn supported<'a>(
    estimator: &'a dyn Estimator,
    operations: &'a [Operation],
) -> impl Iterator<Item = Operation> + 'a {
    operations
        .iter()
        .copied()
        .filter(move |&op| has_capability(estimator, op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::forecasting::NaiveForecaster;
    use crate::estimators::transformations::StandardScaler;
    use ndarray::array;

    #[test]
    fn test_has_capability() {
        let est = StandardScaler::default();
        assert!(has_capability(&est, Operation::InverseTransform));
        assert!(!has_capability(&est, Operation::Predict));
    }

    #[test]
    fn test_invoke_dispatches_by_name() {
        let mut est = NaiveForecaster::default();
        est.fit(&[Data::Series(array![1.0, 2.0])]).unwrap();
        let out = invoke(&mut est, Operation::Predict, &[Data::Horizon(vec![1])]).unwrap();
        assert_eq!(out.to_flat_vec(), vec![2.0]);
        assert!(invoke(&mut est, Operation::Fit, &[]).is_err());
    }

    #[test]
    fn test_supported_filters_in_order() {
        let est = StandardScaler::default();
        let ops: Vec<_> = supported(&est, &Operation::ALL).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Fit,
                Operation::Transform,
                Operation::InverseTransform,
                Operation::FitTransform
            ]
        );
    }
}
