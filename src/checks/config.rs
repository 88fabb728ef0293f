//! Static configuration of a conformance run.

use crate::base::{default_role_sets, Operation, Role};
use crate::error::ConfigError;
use crate::tags::VALID_TAGS;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Everything the suite treats as external configuration: exclusions,
/// vocabularies and comparison settings.
///
/// Missing fields take their default when loading from JSON:
///
/// ```
/// use estimator_checks::checks::ConformanceConfig;
///
/// let config = ConformanceConfig::from_json_str(
///     r#"{ "excluded_tests": { "DummyRegressor": ["fit-idempotence"] } }"#,
/// ).unwrap();
/// assert!(config.is_excluded("DummyRegressor", "fit-idempotence"));
/// assert_eq!(config.decimal, 6);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    /// Estimator names dropped before enumeration.
    pub exclude_estimators: BTreeSet<String>,
    /// Estimator name to the rule names skipped for it.
    pub excluded_tests: BTreeMap<String, BTreeSet<String>>,
    /// Accepted tag keys.
    pub valid_tags: BTreeSet<String>,
    pub valid_base_types: BTreeSet<Role>,
    pub valid_transformer_types: BTreeSet<Role>,
    /// Operations that must not change observable state once fitted.
    pub non_state_changing: Vec<Operation>,
    /// Substring every not-fitted error message must contain.
    pub not_fitted_pattern: String,
    /// Decimal places used when comparing numeric outputs.
    pub decimal: u32,
    /// Seed applied to `random_state` parameters before fitting.
    pub random_state: i64,
    /// Attribute and parameter names that clash with the tag interface.
    pub ambiguous_tag_attributes: Vec<String>,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        let (valid_base_types, valid_transformer_types) = default_role_sets();
        Self {
            exclude_estimators: BTreeSet::new(),
            excluded_tests: BTreeMap::new(),
            valid_tags: VALID_TAGS.iter().map(|t| t.to_string()).collect(),
            valid_base_types,
            valid_transformer_types,
            non_state_changing: vec![
                Operation::Predict,
                Operation::PredictProba,
                Operation::DecisionFunction,
                Operation::Transform,
                Operation::InverseTransform,
            ],
            not_fitted_pattern: "has not been fitted".to_string(),
            decimal: 6,
            random_state: 0,
            ambiguous_tag_attributes: vec!["tags".to_string(), "tags_".to_string()],
        }
    }
}

impl ConformanceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True if `rule` is skipped for `estimator`.
    pub fn is_excluded(&self, estimator: &str, rule: &str) -> bool {
        self.excluded_tests
            .get(estimator)
            .is_some_and(|rules| rules.contains(rule))
    }

    /// Drops an estimator from every run.
    pub fn exclude_estimator(mut self, name: impl Into<String>) -> Self {
        self.exclude_estimators.insert(name.into());
        self
    }

    /// Skips one rule for one estimator.
    pub fn exclude_test(mut self, estimator: impl Into<String>, rule: impl Into<String>) -> Self {
        self.excluded_tests
            .entry(estimator.into())
            .or_default()
            .insert(rule.into());
        self
    }

    pub fn is_non_state_changing(&self, operation: Operation) -> bool {
        self.non_state_changing.contains(&operation)
    }
}
