//! Estimator roles and role-set validation.
//!
//! A role is a capability interface. An estimator declares the set of roles
//! it plays; most play exactly one, composites such as transformed-target
//! forecasters play a primary role plus a transformer role.

use super::operation::Operation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Classifier,
    Regressor,
    Clusterer,
    Forecaster,
    SeriesAnnotator,
    /// Series-to-series or series-to-table transformer.
    Transformer,
    /// Panel-to-table or panel-to-panel transformer.
    PanelTransformer,
    /// Distance or kernel between two tables.
    PairwiseTransformer,
    /// Distance or kernel between two panels.
    PairwiseTransformerPanel,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Classifier,
        Role::Regressor,
        Role::Clusterer,
        Role::Forecaster,
        Role::SeriesAnnotator,
        Role::Transformer,
        Role::PanelTransformer,
        Role::PairwiseTransformer,
        Role::PairwiseTransformerPanel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Role::Classifier => "classifier",
            Role::Regressor => "regressor",
            Role::Clusterer => "clusterer",
            Role::Forecaster => "forecaster",
            Role::SeriesAnnotator => "series_annotator",
            Role::Transformer => "transformer",
            Role::PanelTransformer => "panel_transformer",
            Role::PairwiseTransformer => "pairwise_transformer",
            Role::PairwiseTransformerPanel => "pairwise_transformer_panel",
        }
    }

    /// Whether this role is one of the (non-pairwise) transformer roles.
    pub fn is_transformer(self) -> bool {
        matches!(self, Role::Transformer | Role::PanelTransformer)
    }

    pub fn is_pairwise(self) -> bool {
        matches!(
            self,
            Role::PairwiseTransformer | Role::PairwiseTransformerPanel
        )
    }

    /// Pairwise transformers compute directly from their inputs and have no
    /// fitting step.
    pub fn has_fitting_step(self) -> bool {
        !self.is_pairwise()
    }

    /// Operations every estimator playing this role must expose.
    pub fn required_operations(self) -> &'static [Operation] {
        match self {
            Role::Classifier => &[Operation::Fit, Operation::Predict, Operation::PredictProba],
            Role::Regressor | Role::Clusterer | Role::Forecaster | Role::SeriesAnnotator => {
                &[Operation::Fit, Operation::Predict]
            }
            Role::Transformer | Role::PanelTransformer => {
                &[Operation::Fit, Operation::Transform, Operation::FitTransform]
            }
            Role::PairwiseTransformer | Role::PairwiseTransformerPanel => {
                &[Operation::Fit, Operation::Transform]
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validates a declared role set against the allowed base and transformer
/// roles: one or two distinct roles, all allowed, and when two are declared
/// one of them must be a transformer role.
pub fn validate_role_set(
    roles: &[Role],
    valid_base: &BTreeSet<Role>,
    valid_transformer: &BTreeSet<Role>,
) -> Result<(), String> {
    let distinct: BTreeSet<Role> = roles.iter().copied().collect();
    if distinct.len() != roles.len() {
        return Err(format!("duplicate roles in {:?}", roles));
    }
    let unknown: Vec<Role> = roles
        .iter()
        .copied()
        .filter(|r| !valid_base.contains(r))
        .collect();
    if !unknown.is_empty() {
        return Err(format!("roles {:?} are not valid base roles", unknown));
    }
    match roles.len() {
        1 => Ok(()),
        2 if roles.iter().any(|r| valid_transformer.contains(r)) => Ok(()),
        2 => Err(format!(
            "dual-role estimators must include a transformer role, got {:?}",
            roles
        )),
        n => Err(format!("expected 1 or 2 roles, got {}", n)),
    }
}

/// The default sets: every role is a valid base role, and the two
/// non-pairwise transformer roles are transformer roles.
pub fn default_role_sets() -> (BTreeSet<Role>, BTreeSet<Role>) {
    let base = Role::ALL.into_iter().collect();
    let transformer = Role::ALL.into_iter().filter(|r| r.is_transformer()).collect();
    (base, transformer)
}
