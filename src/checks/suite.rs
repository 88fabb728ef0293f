//! Enumerates (estimator, rule) cases and runs them.

use super::config::ConformanceConfig;
use super::report::{CaseReport, ConformanceReport, Outcome};
use super::rules::{CLASS_RULES, INSTANCE_RULES};
use super::synth::create_test_instance_at;
use crate::base::EstimatorType;
use crate::error::CheckResult;
use crate::registry::Registry;
use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Runs the conformance rules over every type of a registry.
///
/// ```no_run
/// use estimator_checks::checks::{ConformanceConfig, ConformanceSuite};
/// use estimator_checks::registry;
///
/// let registry = registry::builtin().unwrap();
/// let report = ConformanceSuite::new(&registry, ConformanceConfig::default()).run();
/// assert!(report.is_success(), "{}", report);
/// ```
pub struct ConformanceSuite<'a> {
    registry: &'a Registry,
    config: ConformanceConfig,
    rule_filter: Option<BTreeSet<String>>,
}

impl<'a> ConformanceSuite<'a> {
    pub fn new(registry: &'a Registry, config: ConformanceConfig) -> Self {
        Self {
            registry,
            config,
            rule_filter: None,
        }
    }

    /// Restricts the run to the named rules.
    pub fn with_rule_filter<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule_filter = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    pub fn config(&self) -> &ConformanceConfig {
        &self.config
    }

    /// Every case, class rules of a type before its instance rules, types in
    /// registry order.
    pub fn run(&self) -> ConformanceReport {
        let types = self.registry.all_estimators(&self.config.exclude_estimators);
        info!(
            estimators = types.len(),
            excluded = self.config.exclude_estimators.len(),
            "running conformance suite"
        );
        let mut report = ConformanceReport::default();
        for ty in &types {
            report.extend(run_type(ty, &self.config, self.rule_filter.as_ref()));
        }
        info!(
            cases = report.len(),
            passed = report.passed(),
            failed = report.failed(),
            errored = report.errored(),
            "conformance suite finished"
        );
        report
    }
}

/// Runs every rule for a single type, honoring the exclusion table.
pub fn check_estimator(ty: &EstimatorType, config: &ConformanceConfig) -> ConformanceReport {
    run_type(ty, config, None)
}

fn run_type(
    ty: &EstimatorType,
    config: &ConformanceConfig,
    filter: Option<&BTreeSet<String>>,
) -> ConformanceReport {
    let selected = |rule: &str| {
        filter.map_or(true, |f| f.contains(rule)) && !config.is_excluded(ty.name, rule)
    };
    let mut report = ConformanceReport::default();

    for rule in CLASS_RULES.iter().filter(|r| selected(r.name)) {
        let outcome = run_case(ty.name, rule.name, || (rule.check)(ty, config));
        report.push(CaseReport::new(ty.name, ty.name, rule.name, outcome));
    }

    let names = instance_names(ty);
    for rule in INSTANCE_RULES.iter().filter(|r| selected(r.name)) {
        for (index, subject) in names.iter().enumerate() {
            let outcome = run_case(subject, rule.name, || {
                let mut estimator = create_test_instance_at(ty, index)?;
                (rule.check)(estimator.as_mut(), config)
            });
            report.push(CaseReport::new(subject, ty.name, rule.name, outcome));
        }
    }
    report
}

/// Case subjects for the instance rules, one per test parameter set.
fn instance_names(ty: &EstimatorType) -> Vec<String> {
    let count = (ty.test_params)().len().max(1);
    if count == 1 {
        vec![ty.name.to_string()]
    } else {
        (0..count).map(|i| format!("{}-{}", ty.name, i)).collect()
    }
}

fn run_case(subject: &str, rule: &str, case: impl FnOnce() -> CheckResult) -> Outcome {
    debug!(subject, rule, "running case");
    let outcome = match panic::catch_unwind(AssertUnwindSafe(case)) {
        Ok(result) => Outcome::from(result),
        Err(payload) => Outcome::Errored {
            message: format!("panicked: {}", panic_message(payload.as_ref())),
        },
    };
    if let Some(message) = outcome.message() {
        warn!(subject, rule, %message, "case did not pass");
    }
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::EstimatorClass;
    use crate::estimators::forecasting::NaiveForecaster;
    use crate::estimators::transformations::LagTransformer;

    #[test]
    fn test_check_estimator_single_type() {
        let ty = EstimatorType::of::<LagTransformer>();
        let report = check_estimator(&ty, &ConformanceConfig::default());
        assert!(report.is_success(), "{}", report);
        // two test parameter sets
        assert_eq!(
            report.len(),
            CLASS_RULES.len() + 2 * INSTANCE_RULES.len()
        );
        assert!(report.get("LagTransformer-1::pickle-roundtrip").is_some());
        assert!(report.get("LagTransformer::constructor-purity").is_some());
    }

    #[test]
    fn test_exclusion_table_drops_cases() {
        let ty = EstimatorType::of::<NaiveForecaster>();
        let config = ConformanceConfig::default().exclude_test("NaiveForecaster", "fit-idempotence");
        let report = check_estimator(&ty, &config);
        assert!(report.cases.iter().all(|c| c.rule != "fit-idempotence"));
    }

    #[test]
    fn test_rule_filter() {
        let mut registry = Registry::new();
        registry
            .register(EstimatorType::of::<NaiveForecaster>())
            .unwrap();
        let report = ConformanceSuite::new(&registry, ConformanceConfig::default())
            .with_rule_filter(["repr-succeeds", "instance-type-fidelity"])
            .run();
        // one class case plus one per test instance
        assert_eq!(report.len(), 1 + NaiveForecaster::test_params().len());
        assert!(report.is_success());
    }

    #[test]
    fn test_panic_is_reported_as_error() {
        let outcome = run_case("X", "rule", || panic!("boom"));
        assert_eq!(
            outcome,
            Outcome::Errored {
                message: "panicked: boom".to_string()
            }
        );
    }

    #[test]
    fn test_instance_names() {
        assert_eq!(
            instance_names(&EstimatorType::of::<NaiveForecaster>())[0],
            "NaiveForecaster-0"
        );
    }
}
