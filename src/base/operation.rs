//! Named estimator operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation an estimator may expose.
///
/// Capability introspection is membership of an `Operation` in the
/// instance's declared capability list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Fit,
    Predict,
    PredictProba,
    DecisionFunction,
    Transform,
    InverseTransform,
    FitTransform,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Fit,
        Operation::Predict,
        Operation::PredictProba,
        Operation::DecisionFunction,
        Operation::Transform,
        Operation::InverseTransform,
        Operation::FitTransform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Fit => "fit",
            Operation::Predict => "predict",
            Operation::PredictProba => "predict_proba",
            Operation::DecisionFunction => "decision_function",
            Operation::Transform => "transform",
            Operation::InverseTransform => "inverse_transform",
            Operation::FitTransform => "fit_transform",
        }
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
