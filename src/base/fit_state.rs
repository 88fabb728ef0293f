use crate::error::EstimatorError;
use serde::{Deserialize, Serialize};

/// The internal fitted flag every estimator carries.
///
/// It starts out false and is only set by `fit`. The public
/// [`Estimator::is_fitted`](super::Estimator::is_fitted) indicator is derived
/// from it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitState {
    is_fitted: bool,
}

impl FitState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn mark_fitted(&mut self) {
        self.is_fitted = true;
    }

    /// Returns [`EstimatorError::NotFitted`] unless `fit` has completed.
    pub fn check_is_fitted(&self, estimator: &str) -> Result<(), EstimatorError> {
        if self.is_fitted {
            Ok(())
        } else {
            Err(EstimatorError::not_fitted(estimator))
        }
    }
}
