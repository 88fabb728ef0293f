//! Reference estimators, one or more per role.
//!
//! These are the implementations the builtin registry exposes to the
//! conformance suite. Numerics are deliberately simple; what matters is that
//! each one follows the lifecycle contract.
//!
//! # Available Estimators
//!
//! ## Transformations
//! - [`StandardScaler`](transformations::StandardScaler): z-score a series
//! - [`MinMaxScaler`](transformations::MinMaxScaler): scale a series to a range
//! - [`ExponentTransformer`](transformations::ExponentTransformer): power transform
//! - [`LagTransformer`](transformations::LagTransformer): lagged feature table
//! - [`SummaryTransformer`](transformations::SummaryTransformer): per-series summary statistics
//!
//! ## Forecasting
//! - [`NaiveForecaster`](forecasting::NaiveForecaster)
//! - [`TransformedTargetForecaster`](forecasting::TransformedTargetForecaster)
//!
//! ## Panel learners
//! - [`NearestCentroidClassifier`](classification::NearestCentroidClassifier)
//! - [`DummyRegressor`](regression::DummyRegressor)
//! - [`TimeSeriesKMeans`](clustering::TimeSeriesKMeans)
//!
//! ## Annotation and distances
//! - [`ZScoreAnnotator`](annotation::ZScoreAnnotator)
//! - [`EuclideanDistance`](dists_kernels::EuclideanDistance)

use crate::base::FitState;
use crate::value::{Attributes, Params, Value};

pub mod annotation;
pub mod classification;
pub mod clustering;
pub mod dists_kernels;
pub mod forecasting;
pub mod regression;
pub mod transformations;

/// Assembles an attribute snapshot from hyper-parameters, fitted attributes
/// and the internal fitted flag.
pub(crate) fn attributes_with<I>(params: Params, state: &FitState, fitted: I) -> Attributes
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let mut attrs = params;
    attrs.extend(fitted.into_iter().map(|(k, v)| (k.to_string(), v)));
    attrs.insert("_is_fitted".to_string(), Value::Bool(state.is_fitted()));
    attrs
}

/// Population mean and standard deviation of a slice.
pub(crate) fn mean_std(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count().max(1) as f64;
    let mean = values.clone().sum::<f64>() / n;
    let var = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
