//! The rule tables.
//!
//! Rule names are stable identifiers: they appear in case ids, exclusion
//! tables and reports.

use super::class_rules;
use super::config::ConformanceConfig;
use super::instance_rules;
use crate::base::{Estimator, EstimatorType};
use crate::error::CheckResult;

/// A rule evaluated once per estimator type.
pub type ClassCheck = fn(&EstimatorType, &ConformanceConfig) -> CheckResult;

/// A rule evaluated once per test instance.
pub type InstanceCheck = fn(&mut dyn Estimator, &ConformanceConfig) -> CheckResult;

#[derive(Clone, Copy)]
pub struct ClassRule {
    pub name: &'static str,
    pub check: ClassCheck,
}

#[derive(Clone, Copy)]
pub struct InstanceRule {
    pub name: &'static str,
    pub check: InstanceCheck,
}

pub const CLASS_RULES: &[ClassRule] = &[
    ClassRule {
        name: "instance-type-fidelity",
        check: class_rules::instance_type_fidelity,
    },
    ClassRule {
        name: "instances-and-names-shape",
        check: class_rules::instances_and_names_shape,
    },
    ClassRule {
        name: "required-params-declared",
        check: class_rules::required_params_declared,
    },
    ClassRule {
        name: "class-tag-validity",
        check: class_rules::class_tag_validity,
    },
    ClassRule {
        name: "single-role-inheritance",
        check: class_rules::single_role_inheritance,
    },
    ClassRule {
        name: "common-interface-presence",
        check: class_rules::common_interface_presence,
    },
    ClassRule {
        name: "constructor-purity",
        check: class_rules::constructor_purity,
    },
];

pub const INSTANCE_RULES: &[InstanceRule] = &[
    InstanceRule {
        name: "get-params-roundtrip",
        check: instance_rules::get_params_roundtrip,
    },
    InstanceRule {
        name: "set-params-consistency",
        check: instance_rules::set_params_consistency,
    },
    InstanceRule {
        name: "clone-succeeds",
        check: instance_rules::clone_succeeds,
    },
    InstanceRule {
        name: "repr-succeeds",
        check: instance_rules::repr_succeeds,
    },
    InstanceRule {
        name: "initial-unfitted-state",
        check: instance_rules::initial_unfitted_state,
    },
    InstanceRule {
        name: "fit-sets-fitted-state",
        check: instance_rules::fit_sets_fitted_state,
    },
    InstanceRule {
        name: "fit-returns-self",
        check: instance_rules::fit_returns_self,
    },
    InstanceRule {
        name: "unfitted-call-raises",
        check: instance_rules::unfitted_call_raises,
    },
    InstanceRule {
        name: "fit-idempotence",
        check: instance_rules::fit_idempotence,
    },
    InstanceRule {
        name: "params-immutable-across-fit",
        check: instance_rules::params_immutable_across_fit,
    },
    InstanceRule {
        name: "methods-preserve-state",
        check: instance_rules::methods_preserve_state,
    },
    InstanceRule {
        name: "pickle-roundtrip",
        check: instance_rules::pickle_roundtrip,
    },
    InstanceRule {
        name: "instance-tag-validity",
        check: instance_rules::instance_tag_validity,
    },
];

/// Every rule name, class rules first.
pub fn rule_names() -> Vec<&'static str> {
    CLASS_RULES
        .iter()
        .map(|r| r.name)
        .chain(INSTANCE_RULES.iter().map(|r| r.name))
        .collect()
}
