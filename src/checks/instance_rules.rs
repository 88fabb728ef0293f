//! Rules evaluated once per synthesized test instance.
//!
//! Every rule receives a freshly constructed, unfitted instance.

use super::args::make_args;
use super::capability::{invoke, supported};
use super::class_rules::concrete_type_id;
use super::config::ConformanceConfig;
use super::testing::{assert_array_almost_equal, set_random_state};
use crate::base::{clone_estimator, Estimator, Operation};
use crate::data::Data;
use crate::ensure;
use crate::error::{CheckError, CheckResult, EstimatorError};
use crate::tags;
use crate::value::{Attributes, Params, Value};

fn address(estimator: &dyn Estimator) -> *const () {
    std::ptr::from_ref(estimator).cast()
}

/// Names whose values differ between two maps, including names present in
/// only one of them.
fn changed_keys(before: &Attributes, after: &Attributes) -> Vec<String> {
    let mut changed: Vec<String> = before
        .iter()
        .filter(|(k, v)| !after.get(*k).is_some_and(|a| a.same_as(v)))
        .map(|(k, _)| k.clone())
        .collect();
    changed.extend(
        after
            .keys()
            .filter(|k| !before.contains_key(*k))
            .cloned(),
    );
    changed
}

fn fit(estimator: &mut dyn Estimator) -> CheckResult {
    let args = make_args(estimator, Operation::Fit);
    estimator.fit(&args)?;
    Ok(())
}

/// Outputs of every supported non-state-changing operation, in order.
fn non_state_changing_outputs(
    estimator: &mut dyn Estimator,
    config: &ConformanceConfig,
) -> Result<Vec<(Operation, Data)>, CheckError> {
    let operations: Vec<Operation> = supported(estimator, &config.non_state_changing).collect();
    let mut outputs = Vec::with_capacity(operations.len());
    for op in operations {
        let args = make_args(estimator, op);
        outputs.push((op, invoke(estimator, op, &args)?));
    }
    Ok(outputs)
}

/// `get_params` is stable and `set_params(get_params())` returns the same
/// instance without changing anything.
pub fn get_params_roundtrip(estimator: &mut dyn Estimator, _config: &ConformanceConfig) -> CheckResult {
    let first = estimator.get_params();
    let second = estimator.get_params();
    let differing = changed_keys(&first, &second);
    ensure!(
        differing.is_empty(),
        "{}: successive get_params calls disagree on {:?}",
        estimator.name(),
        differing
    );

    let before = address(estimator);
    let returned = address(estimator.set_params(&first)?);
    ensure!(
        before == returned,
        "{}: set_params does not return the estimator itself",
        estimator.name()
    );
    let after = estimator.get_params();
    let differing = changed_keys(&first, &after);
    ensure!(
        differing.is_empty(),
        "{}: set_params(get_params()) changed {:?}",
        estimator.name(),
        differing
    );
    Ok(())
}

/// Alternative values of the same kind as `value`, plus `None`.
fn candidate_values(value: &Value) -> Vec<Value> {
    let mut candidates = vec![value.clone(), Value::None];
    match value {
        Value::Bool(b) => candidates.push(Value::Bool(!b)),
        Value::Int(i) => candidates.push(Value::Int(i.saturating_add(1))),
        Value::Float(f) => candidates.push(Value::Float(f * 2.0)),
        Value::Str(s) => candidates.push(Value::Str(format!("{}-unknown", s))),
        _ => {}
    }
    candidates
}

/// Each parameter either accepts a new value, reflected by `get_params`, or
/// rejects it and leaves every parameter unchanged.
pub fn set_params_consistency(
    estimator: &mut dyn Estimator,
    _config: &ConformanceConfig,
) -> CheckResult {
    let original = estimator.get_params();
    for (name, value) in &original {
        for candidate in candidate_values(value) {
            let before = estimator.get_params();
            let mut update = Params::new();
            update.insert(name.clone(), candidate.clone());
            match estimator.set_params(&update) {
                Ok(_) => {
                    let after = estimator.get_params();
                    ensure!(
                        after.get(name).is_some_and(|v| v.same_as(&candidate)),
                        "{}: set_params({}={}) succeeded but get_params reports {:?}",
                        estimator.name(),
                        name,
                        candidate,
                        after.get(name)
                    );
                    let mut others = changed_keys(&before, &after);
                    others.retain(|k| k != name);
                    ensure!(
                        others.is_empty(),
                        "{}: set_params({}={}) also changed {:?}",
                        estimator.name(),
                        name,
                        candidate,
                        others
                    );
                }
                Err(_) => {
                    let differing = changed_keys(&before, &estimator.get_params());
                    ensure!(
                        differing.is_empty(),
                        "{}: rejected set_params({}={}) still changed {:?}",
                        estimator.name(),
                        name,
                        candidate,
                        differing
                    );
                }
            }
            estimator.set_params(&original)?;
        }
    }
    Ok(())
}

/// A structural clone is an unfitted instance of the same type with equal
/// parameters.
pub fn clone_succeeds(estimator: &mut dyn Estimator, _config: &ConformanceConfig) -> CheckResult {
    let clone = clone_estimator(estimator)?;
    ensure!(
        concrete_type_id(clone.as_ref()) == concrete_type_id(estimator),
        "{}: clone has a different type ({})",
        estimator.name(),
        clone.name()
    );
    ensure!(!clone.is_fitted(), "{}: clone is fitted", estimator.name());
    let differing = changed_keys(&estimator.get_params(), &clone.get_params());
    ensure!(
        differing.is_empty(),
        "{}: clone differs in parameters {:?}",
        estimator.name(),
        differing
    );
    Ok(())
}

pub fn repr_succeeds(estimator: &mut dyn Estimator, _config: &ConformanceConfig) -> CheckResult {
    let repr = format!("{}", &*estimator);
    ensure!(
        !repr.is_empty(),
        "{}: empty textual representation",
        estimator.name()
    );
    Ok(())
}

pub fn initial_unfitted_state(estimator: &mut dyn Estimator, _config: &ConformanceConfig) -> CheckResult {
    ensure!(
        !estimator.fit_state().is_fitted(),
        "{}: internal fitted flag is set before fit",
        estimator.name()
    );
    ensure!(
        !estimator.is_fitted(),
        "{}: is_fitted() is true before fit",
        estimator.name()
    );
    Ok(())
}

pub fn fit_sets_fitted_state(estimator: &mut dyn Estimator, _config: &ConformanceConfig) -> CheckResult {
    fit(estimator)?;
    ensure!(
        estimator.fit_state().is_fitted(),
        "{}: internal fitted flag is not set after fit",
        estimator.name()
    );
    ensure!(
        estimator.is_fitted(),
        "{}: is_fitted() is false after fit",
        estimator.name()
    );
    Ok(())
}

pub fn fit_returns_self(estimator: &mut dyn Estimator, _config: &ConformanceConfig) -> CheckResult {
    let args = make_args(estimator, Operation::Fit);
    let before = address(estimator);
    let returned = address(estimator.fit(&args)?);
    ensure!(
        before == returned,
        "{}: fit does not return the estimator itself",
        estimator.name()
    );
    Ok(())
}

/// Before `fit`, every supported non-state-changing operation fails with a
/// not-fitted error. Roles without a fitting step are exempt.
pub fn unfitted_call_raises(estimator: &mut dyn Estimator, config: &ConformanceConfig) -> CheckResult {
    if estimator.roles().iter().any(|r| !r.has_fitting_step()) {
        return Ok(());
    }
    let operations: Vec<Operation> = supported(estimator, &config.non_state_changing).collect();
    for op in operations {
        let args = make_args(estimator, op);
        match invoke(estimator, op, &args) {
            Err(err @ EstimatorError::NotFitted { .. }) => {
                let message = err.to_string();
                ensure!(
                    message.contains(&config.not_fitted_pattern),
                    "{}: not-fitted error of `{}` does not mention '{}': {}",
                    estimator.name(),
                    op,
                    config.not_fitted_pattern,
                    message
                );
            }
            Err(other) => return Err(other.into()),
            Ok(_) => {
                return Err(CheckError::Violation(format!(
                    "{}: `{}` succeeded before fit",
                    estimator.name(),
                    op
                )))
            }
        }
    }
    Ok(())
}

/// Fitting twice on the same data, with the same seed, gives the same
/// results.
pub fn fit_idempotence(estimator: &mut dyn Estimator, config: &ConformanceConfig) -> CheckResult {
    set_random_state(estimator, config.random_state)?;
    fit(estimator)?;
    let first = non_state_changing_outputs(estimator, config)?;

    set_random_state(estimator, config.random_state)?;
    fit(estimator)?;
    let second = non_state_changing_outputs(estimator, config)?;

    for ((op, a), (_, b)) in first.iter().zip(&second) {
        assert_array_almost_equal(b, a, config.decimal).map_err(|e| {
            CheckError::Violation(format!(
                "{}: `{}` differs after refitting: {}",
                estimator.name(),
                op,
                e
            ))
        })?;
    }
    Ok(())
}

/// `fit` leaves hyper-parameter content unchanged. A `random_state` that was
/// not an integer seed may be normalized.
pub fn params_immutable_across_fit(
    estimator: &mut dyn Estimator,
    config: &ConformanceConfig,
) -> CheckResult {
    set_random_state(estimator, config.random_state)?;
    let original = estimator.get_params();
    fit(estimator)?;
    let current = estimator.get_params();

    for (name, value) in &original {
        if name == "random_state" && !matches!(value, Value::Int(_)) {
            continue;
        }
        let Some(new_value) = current.get(name) else {
            return Err(CheckError::Violation(format!(
                "{}: parameter `{}` disappeared during fit",
                estimator.name(),
                name
            )));
        };
        ensure!(
            new_value.content_hash()? == value.content_hash()?,
            "{}: fit changed parameter `{}` from {} to {}",
            estimator.name(),
            name,
            value,
            new_value
        );
    }
    Ok(())
}

/// After `fit`, non-state-changing operations leave every attribute alone,
/// unless the estimator declares that the operation refits.
pub fn methods_preserve_state(estimator: &mut dyn Estimator, config: &ConformanceConfig) -> CheckResult {
    set_random_state(estimator, config.random_state)?;
    fit(estimator)?;
    let refits_in = |tag: &str| {
        estimator
            .get_tags()
            .get(tag)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };
    let fit_in_transform = refits_in(tags::FIT_IN_TRANSFORM);
    let fit_in_predict = refits_in(tags::FIT_IN_PREDICT);

    let operations: Vec<Operation> = supported(estimator, &config.non_state_changing).collect();
    for op in operations {
        if (op == Operation::Transform && fit_in_transform)
            || (op == Operation::Predict && fit_in_predict)
        {
            continue;
        }
        let before = estimator.attributes();
        let args = make_args(estimator, op);
        invoke(estimator, op, &args)?;
        let changed = changed_keys(&before, &estimator.attributes());
        ensure!(
            changed.is_empty(),
            "{}: `{}` changed attributes {:?}",
            estimator.name(),
            op,
            changed
        );
    }
    Ok(())
}

/// A fitted instance survives a serialization round trip and the restored
/// instance produces the same results.
pub fn pickle_roundtrip(estimator: &mut dyn Estimator, config: &ConformanceConfig) -> CheckResult {
    set_random_state(estimator, config.random_state)?;
    fit(estimator)?;
    let bytes = estimator.to_bytes()?;
    let mut restored = (estimator.class().load)(&bytes)?;

    ensure!(
        concrete_type_id(restored.as_ref()) == concrete_type_id(estimator),
        "{}: restored instance has a different type",
        estimator.name()
    );
    ensure!(
        restored.is_fitted(),
        "{}: restored instance is not fitted",
        estimator.name()
    );
    let differing = changed_keys(&estimator.get_params(), &restored.get_params());
    ensure!(
        differing.is_empty(),
        "{}: restored instance differs in parameters {:?}",
        estimator.name(),
        differing
    );

    let expected = non_state_changing_outputs(estimator, config)?;
    let actual = non_state_changing_outputs(restored.as_mut(), config)?;
    for ((op, a), (_, b)) in expected.iter().zip(&actual) {
        assert_array_almost_equal(b, a, config.decimal).map_err(|e| {
            CheckError::Violation(format!(
                "{}: `{}` differs after restoring: {}",
                estimator.name(),
                op,
                e
            ))
        })?;
    }
    Ok(())
}

pub fn instance_tag_validity(estimator: &mut dyn Estimator, config: &ConformanceConfig) -> CheckResult {
    let tags = estimator.get_tags();
    let unknown: Vec<&String> = tags
        .keys()
        .filter(|k| !config.valid_tags.contains(k.as_str()))
        .collect();
    ensure!(
        unknown.is_empty(),
        "{} has unknown tags {:?}",
        estimator.name(),
        unknown
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::annotation::ZScoreAnnotator;
    use crate::estimators::clustering::TimeSeriesKMeans;
    use crate::estimators::dists_kernels::EuclideanDistance;
    use crate::estimators::forecasting::NaiveForecaster;
    use crate::value::value_map;

    #[test]
    fn test_changed_keys() {
        let a = value_map([("x", 1i64), ("y", 2i64)]);
        let b = value_map([("x", 1i64), ("z", 2i64)]);
        assert_eq!(changed_keys(&a, &b), vec!["y".to_string(), "z".to_string()]);
        let nan = value_map([("x", f64::NAN)]);
        assert!(changed_keys(&nan, &nan.clone()).is_empty());
    }

    #[test]
    fn test_forecaster_lifecycle_rules() {
        let config = ConformanceConfig::default();
        let mut est = NaiveForecaster::default();
        assert_eq!(initial_unfitted_state(&mut est, &config), Ok(()));
        assert_eq!(unfitted_call_raises(&mut est, &config), Ok(()));
        assert_eq!(fit_returns_self(&mut est, &config), Ok(()));
        assert!(est.is_fitted());
    }

    #[test]
    fn test_pairwise_is_exempt_from_unfitted_call() {
        let mut est = EuclideanDistance::default();
        assert_eq!(
            unfitted_call_raises(&mut est, &ConformanceConfig::default()),
            Ok(())
        );
    }

    #[test]
    fn test_wrong_pattern_is_reported() {
        let config = ConformanceConfig {
            not_fitted_pattern: "please fit me".to_string(),
            ..ConformanceConfig::default()
        };
        let mut est = NaiveForecaster::default();
        let err = unfitted_call_raises(&mut est, &config).unwrap_err();
        assert!(err.to_string().contains("does not mention 'please fit me'"));
    }

    #[test]
    fn test_fit_in_predict_is_exempt_from_state_check() {
        let mut est = ZScoreAnnotator::default();
        assert_eq!(
            methods_preserve_state(&mut est, &ConformanceConfig::default()),
            Ok(())
        );
    }

    #[test]
    fn test_seeded_clusterer_is_idempotent() {
        let config = ConformanceConfig::default();
        let mut est = TimeSeriesKMeans::default();
        assert_eq!(fit_idempotence(&mut est, &config), Ok(()));
        assert_eq!(
            est.get_params().get("random_state"),
            Some(&Value::Int(config.random_state))
        );
    }

    #[test]
    fn test_state_and_pickle_rules_seed_the_clusterer() {
        let config = ConformanceConfig::default();
        let mut est = TimeSeriesKMeans::default();
        assert_eq!(methods_preserve_state(&mut est, &config), Ok(()));
        assert_eq!(
            est.get_params().get("random_state"),
            Some(&Value::Int(config.random_state))
        );

        let mut est = TimeSeriesKMeans::default();
        assert_eq!(pickle_roundtrip(&mut est, &config), Ok(()));
        assert_eq!(
            est.get_params().get("random_state"),
            Some(&Value::Int(config.random_state))
        );
    }

    #[test]
    fn test_pickle_and_param_rules() {
        let config = ConformanceConfig::default();
        assert_eq!(pickle_roundtrip(&mut NaiveForecaster::default(), &config), Ok(()));
        assert_eq!(
            params_immutable_across_fit(&mut NaiveForecaster::default(), &config),
            Ok(())
        );
        assert_eq!(
            set_params_consistency(&mut NaiveForecaster::default(), &config),
            Ok(())
        );
    }
}
