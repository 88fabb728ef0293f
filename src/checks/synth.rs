//! Test instances built from an estimator type's canonical parameter sets.

use crate::base::{Estimator, EstimatorType};
use crate::error::EstimatorError;
use crate::value::Params;

/// An instance built from the first canonical test parameter set.
pub fn create_test_instance(ty: &EstimatorType) -> Result<Box<dyn Estimator>, EstimatorError> {
    let params = (ty.test_params)().into_iter().next().unwrap_or_default();
    (ty.construct)(&params)
}

/// One instance per canonical test parameter set, with names `TypeName` for
/// a single set and `TypeName-{i}` otherwise.
pub fn create_test_instances_and_names(
    ty: &EstimatorType,
) -> Result<(Vec<Box<dyn Estimator>>, Vec<String>), EstimatorError> {
    let mut param_sets = (ty.test_params)();
    if param_sets.is_empty() {
        param_sets.push(Params::new());
    }
    let single = param_sets.len() == 1;
    let mut instances = Vec::with_capacity(param_sets.len());
    let mut names = Vec::with_capacity(param_sets.len());
    for (i, params) in param_sets.iter().enumerate() {
        instances.push((ty.construct)(params)?);
        names.push(if single {
            ty.name.to_string()
        } else {
            format!("{}-{}", ty.name, i)
        });
    }
    Ok((instances, names))
}

/// Rebuilds the `index`-th test instance of `ty`, so that every rule works on
/// a fresh object.
pub fn create_test_instance_at(
    ty: &EstimatorType,
    index: usize,
) -> Result<Box<dyn Estimator>, EstimatorError> {
    let params = (ty.test_params)()
        .into_iter()
        .nth(index)
        .unwrap_or_default();
    (ty.construct)(&params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::forecasting::NaiveForecaster;
    use crate::estimators::transformations::LagTransformer;
    use crate::value::Value;

    #[test]
    fn test_single_instance_name() {
        let ty = EstimatorType::of::<NaiveForecaster>();
        let est = create_test_instance(&ty).unwrap();
        assert_eq!(est.name(), "NaiveForecaster");
        assert!(!est.is_fitted());
    }

    #[test]
    fn test_multiple_instances_are_numbered() {
        let ty = EstimatorType::of::<LagTransformer>();
        let (instances, names) = create_test_instances_and_names(&ty).unwrap();
        assert_eq!(instances.len(), names.len());
        assert_eq!(names, vec!["LagTransformer-0", "LagTransformer-1"]);
        assert_eq!(
            instances[1].get_params().get("lags"),
            Some(&Value::Tuple(vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(3)
            ]))
        );
    }

    #[test]
    fn test_instance_at_matches_listing() {
        let ty = EstimatorType::of::<LagTransformer>();
        let (instances, _) = create_test_instances_and_names(&ty).unwrap();
        let rebuilt = create_test_instance_at(&ty, 1).unwrap();
        assert_eq!(rebuilt.get_params(), instances[1].get_params());
    }
}
