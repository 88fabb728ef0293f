//! Rules evaluated once per estimator type.

use super::config::ConformanceConfig;
use super::synth::{create_test_instance, create_test_instances_and_names};
use crate::base::{validate_role_set, AsAny, Estimator, EstimatorType, Operation};
use crate::ensure;
use crate::error::{CheckError, CheckResult};
use std::any::TypeId;
use std::collections::BTreeSet;

/// Runtime type of the concrete estimator behind a trait object.
pub(crate) fn concrete_type_id(estimator: &dyn Estimator) -> TypeId {
    estimator.as_any().type_id()
}

/// The synthesized test instance is exactly of the type under test.
pub fn instance_type_fidelity(ty: &EstimatorType, _config: &ConformanceConfig) -> CheckResult {
    let estimator = create_test_instance(ty)?;
    ensure!(
        concrete_type_id(estimator.as_ref()) == ty.type_id,
        "create_test_instance for {} returned an instance of another type ({})",
        ty.name,
        estimator.name()
    );
    Ok(())
}

/// Instances and names come as two equal-length lists with unique,
/// non-empty names and instances of the exact type.
pub fn instances_and_names_shape(ty: &EstimatorType, _config: &ConformanceConfig) -> CheckResult {
    let (instances, names) = create_test_instances_and_names(ty)?;
    ensure!(
        !instances.is_empty(),
        "{} yields no test instances",
        ty.name
    );
    ensure!(
        instances.len() == names.len(),
        "{} yields {} instances but {} names",
        ty.name,
        instances.len(),
        names.len()
    );
    ensure!(
        names.iter().all(|n| !n.is_empty()),
        "{} yields an empty instance name",
        ty.name
    );
    let unique: BTreeSet<&String> = names.iter().collect();
    ensure!(
        unique.len() == names.len(),
        "{} yields duplicate instance names: {:?}",
        ty.name,
        names
    );
    for (instance, name) in instances.iter().zip(&names) {
        ensure!(
            concrete_type_id(instance.as_ref()) == ty.type_id,
            "test instance {} is not an instance of {}",
            name,
            ty.name
        );
    }
    Ok(())
}

/// Every required parameter is a formal constructor parameter.
pub fn required_params_declared(ty: &EstimatorType, _config: &ConformanceConfig) -> CheckResult {
    let declared = ty.constructor_param_names();
    let invalid: Vec<&str> = ty
        .required_parameters
        .iter()
        .copied()
        .filter(|name| !declared.contains(name))
        .collect();
    ensure!(
        invalid.is_empty(),
        "required parameters {:?} of {} are not constructor parameters; found {:?}",
        invalid,
        ty.name,
        declared
    );
    Ok(())
}

/// Class tags are non-empty and drawn from the valid vocabulary, and nothing
/// named like the tag interface shadows it.
pub fn class_tag_validity(ty: &EstimatorType, config: &ConformanceConfig) -> CheckResult {
    let tags = (ty.class_tags)();
    ensure!(!tags.is_empty(), "{} declares no class tags", ty.name);
    let unknown: Vec<&String> = tags
        .keys()
        .filter(|k| !config.valid_tags.contains(k.as_str()))
        .collect();
    ensure!(
        unknown.is_empty(),
        "{} declares unknown class tags {:?}",
        ty.name,
        unknown
    );

    let params = ty.constructor_param_names();
    let estimator = create_test_instance(ty)?;
    let attributes = estimator.attributes();
    for name in &config.ambiguous_tag_attributes {
        ensure!(
            !params.contains(&name.as_str()) && !attributes.contains_key(name),
            "{} has a parameter or attribute named `{}`, which is ambiguous with the tag interface",
            ty.name,
            name
        );
    }
    Ok(())
}

/// One or two roles from the valid base set; a second role must be a
/// transformer role.
pub fn single_role_inheritance(ty: &EstimatorType, config: &ConformanceConfig) -> CheckResult {
    validate_role_set(
        ty.roles,
        &config.valid_base_types,
        &config.valid_transformer_types,
    )
    .map_err(|reason| CheckError::Violation(format!("{}: {}", ty.name, reason)))
}

/// Every operation the roles require is declared, and the fitted indicator
/// is derived from internal state rather than a parameter.
pub fn common_interface_presence(ty: &EstimatorType, _config: &ConformanceConfig) -> CheckResult {
    for role in ty.roles {
        for &op in role.required_operations() {
            ensure!(
                ty.declares(op),
                "{} plays role {} but does not declare `{}`",
                ty.name,
                role,
                op
            );
        }
    }
    if ty.declares(Operation::InverseTransform) {
        ensure!(
            ty.declares(Operation::Transform),
            "{} declares `inverse_transform` without `transform`",
            ty.name
        );
    }
    if ty.declares(Operation::PredictProba) {
        ensure!(
            ty.declares(Operation::Predict),
            "{} declares `predict_proba` without `predict`",
            ty.name
        );
    }

    let params = ty.constructor_param_names();
    for indicator in ["is_fitted", "_is_fitted"] {
        ensure!(
            !params.contains(&indicator),
            "{} exposes the fitted indicator `{}` as a constructor parameter",
            ty.name,
            indicator
        );
    }
    let estimator = create_test_instance(ty)?;
    ensure!(
        estimator.is_fitted() == estimator.fit_state().is_fitted(),
        "{}: is_fitted() disagrees with the internal fitted flag",
        ty.name
    );
    ensure!(
        estimator.capabilities().iter().all(|op| ty.declares(*op)),
        "{}: instance capabilities {:?} exceed the declared ones {:?}",
        ty.name,
        estimator.capabilities(),
        ty.capabilities
    );
    Ok(())
}

/// Constructors store every parameter unchanged under its own name, with
/// plain defaults.
pub fn constructor_purity(ty: &EstimatorType, _config: &ConformanceConfig) -> CheckResult {
    let supplied = (ty.test_params)().into_iter().next().unwrap_or_default();
    let estimator = (ty.construct)(&supplied)?;
    let attributes = estimator.attributes();

    for spec in (ty.constructor_params)() {
        let Some(stored) = attributes.get(spec.name) else {
            return Err(CheckError::Violation(format!(
                "{} does not store constructor parameter `{}` as an attribute",
                ty.name, spec.name
            )));
        };
        if let Some(value) = supplied.get(spec.name) {
            ensure!(
                stored.same_as(value),
                "{} modified parameter `{}` in the constructor: supplied {}, stored {}",
                ty.name,
                spec.name,
                value,
                stored
            );
            continue;
        }
        if ty.required_parameters.contains(&spec.name) {
            continue;
        }
        let Some(default) = spec.default else {
            return Err(CheckError::Violation(format!(
                "parameter `{}` for {} has no default value and is not included in required parameters",
                spec.name, ty.name
            )));
        };
        ensure!(
            matches!(default.kind(), "none" | "bool" | "int" | "float" | "str" | "tuple"),
            "{}: default of `{}` has kind {}, expected none, bool, int, float, str or tuple",
            ty.name,
            spec.name,
            default.kind()
        );
        ensure!(
            stored.same_as(&default),
            "{} modified parameter `{}` in the constructor: default {}, stored {}",
            ty.name,
            spec.name,
            default,
            stored
        );
    }
    Ok(())
}
