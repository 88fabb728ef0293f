//! Synthetic arguments for estimator operations.
//!
//! Arguments depend on the instance's roles and, for transformers, on the
//! `scitype:transform-input` tag. All data comes from fixed seeds, so two
//! calls with the same instance and operation return equal arguments.

use crate::base::{Estimator, Operation, Role};
use crate::data::synthetic::{
    make_classification_problem, make_panel, make_regression_problem, make_series, make_table,
};
use crate::data::Data;
use crate::tags;

const SEED: u64 = 42;
const N_INSTANCES: usize = 10;
const N_TIMEPOINTS: usize = 20;
const SERIES_LENGTH: usize = 50;
const ANNOTATION_PREDICT_LENGTH: usize = 10;
const N_FEATURES: usize = 4;

/// Role that governs `fit` and the `predict*` operations: the first
/// non-transformer role, else the first role.
fn primary_role(roles: &[Role]) -> Option<Role> {
    roles
        .iter()
        .copied()
        .find(|r| !r.is_transformer())
        .or_else(|| roles.first().copied())
}

fn transformer_role(roles: &[Role]) -> Option<Role> {
    roles.iter().copied().find(|r| r.is_transformer() || r.is_pairwise())
}

/// Input for transformers, chosen by the `scitype:transform-input` tag.
fn transformer_input(estimator: &dyn Estimator, role: Role) -> Vec<Data> {
    let declared = estimator
        .get_tags()
        .get(tags::TRANSFORM_INPUT)
        .and_then(|v| v.as_str().map(str::to_string));
    match (role, declared.as_deref()) {
        (_, Some("panel")) | (Role::PanelTransformer, None) => {
            vec![Data::Panel(make_panel(N_INSTANCES, N_TIMEPOINTS, SEED))]
        }
        (_, Some("table")) => vec![Data::Table(make_table(N_INSTANCES, N_FEATURES, SEED))],
        _ => vec![Data::Series(make_series(SERIES_LENGTH, SEED))],
    }
}

fn pairwise_input(role: Role) -> Vec<Data> {
    if role == Role::PairwiseTransformerPanel {
        vec![
            Data::Panel(make_panel(5, N_TIMEPOINTS, SEED)),
            Data::Panel(make_panel(4, N_TIMEPOINTS, SEED + 1)),
        ]
    } else {
        vec![
            Data::Table(make_table(5, N_FEATURES, SEED)),
            Data::Table(make_table(4, N_FEATURES, SEED + 1)),
        ]
    }
}

fn fit_args(estimator: &dyn Estimator, role: Role) -> Vec<Data> {
    match role {
        Role::Forecaster => vec![Data::Series(make_series(SERIES_LENGTH, SEED))],
        Role::Classifier => {
            let (x, y) = make_classification_problem(N_INSTANCES, N_TIMEPOINTS, 2, SEED);
            vec![Data::Panel(x), Data::Labels(y)]
        }
        Role::Regressor => {
            let (x, y) = make_regression_problem(N_INSTANCES, N_TIMEPOINTS, SEED);
            vec![Data::Panel(x), Data::Series(y)]
        }
        Role::Clusterer => vec![Data::Panel(make_panel(N_INSTANCES, N_TIMEPOINTS, SEED))],
        Role::SeriesAnnotator => vec![Data::Series(make_series(SERIES_LENGTH, SEED))],
        Role::Transformer | Role::PanelTransformer => transformer_input(estimator, role),
        Role::PairwiseTransformer | Role::PairwiseTransformerPanel => pairwise_input(role),
    }
}

fn predict_args(estimator: &dyn Estimator, role: Role) -> Vec<Data> {
    match role {
        Role::Forecaster => vec![Data::Horizon(vec![1])],
        Role::Classifier | Role::Regressor | Role::Clusterer => {
            vec![Data::Panel(make_panel(N_INSTANCES, N_TIMEPOINTS, SEED + 1))]
        }
        Role::SeriesAnnotator => {
            vec![Data::Series(make_series(ANNOTATION_PREDICT_LENGTH, SEED + 1))]
        }
        _ => fit_args(estimator, role),
    }
}

/// Arguments for calling `operation` on `estimator`.
pub fn make_args(estimator: &dyn Estimator, operation: Operation) -> Vec<Data> {
    let roles = estimator.roles();
    let Some(primary) = primary_role(roles) else {
        return Vec::new();
    };
    match operation {
        Operation::Fit | Operation::FitTransform => fit_args(estimator, primary),
        Operation::Predict | Operation::PredictProba | Operation::DecisionFunction => {
            predict_args(estimator, primary)
        }
        Operation::Transform | Operation::InverseTransform => match transformer_role(roles) {
            Some(role) if role.is_pairwise() => pairwise_input(role),
            Some(role) => transformer_input(estimator, role),
            None => fit_args(estimator, primary),
        },
    }
}
