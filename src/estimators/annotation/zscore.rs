//! Outlier annotation by z-score.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{series_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::{attributes_with, mean_std};
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZScoreAnnotatorConfig {
    /// Absolute z-score above which a point is an outlier.
    pub threshold: f64,
}

impl Default for ZScoreAnnotatorConfig {
    fn default() -> Self {
        Self { threshold: 2.0 }
    }
}

impl HyperParameters for ZScoreAnnotatorConfig {
    const ESTIMATOR: &'static str = "ZScoreAnnotator";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::new("threshold", 2.0)]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let threshold = reader.float("threshold")?;
        if !(threshold > 0.0) {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "threshold",
                format!("must be positive, got {}", threshold),
            ));
        }
        Ok(Self { threshold })
    }

    fn to_params(&self) -> Params {
        value_map([("threshold", self.threshold)])
    }
}

/// Marks points whose distance from the series mean exceeds `threshold`
/// standard deviations with `1`, all others with `0`.
///
/// Statistics are re-estimated on every series passed to `predict`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZScoreAnnotator {
    config: ZScoreAnnotatorConfig,
    mean_: Option<f64>,
    std_: Option<f64>,
    state: FitState,
}

impl ZScoreAnnotator {
    pub fn new(threshold: f64) -> Result<Self, EstimatorError> {
        Self::from_params(&value_map([("threshold", threshold)]))
    }

    fn estimate(&mut self, x: &Array1<f64>) {
        let (mean, std) = mean_std(x.iter().copied());
        self.mean_ = Some(mean);
        self.std_ = Some(std);
    }
}

impl Estimator for ZScoreAnnotator {
    fn class(&self) -> EstimatorType {
        EstimatorType::of::<Self>()
    }

    fn get_params(&self) -> Params {
        self.config.to_params()
    }

    fn set_params(&mut self, params: &Params) -> Result<&mut dyn Estimator, EstimatorError> {
        self.config = self.config.merged(params)?;
        Ok(self)
    }

    fn attributes(&self) -> Attributes {
        attributes_with(
            self.get_params(),
            &self.state,
            [("mean_", self.mean_.into()), ("std_", self.std_.into())],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = series_arg(args, 0, "fit")?;
        self.estimate(x);
        self.state.mark_fitted();
        Ok(self)
    }

    fn predict(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let x = series_arg(args, 0, "predict")?;
        self.estimate(x);
        let (mean, std) = (self.mean_.unwrap_or_default(), self.std_.unwrap_or_default());
        let threshold = self.config.threshold;
        Ok(Data::Labels(x.mapv(|v| {
            i64::from(std > 0.0 && ((v - mean) / std).abs() > threshold)
        })))
    }
}

impl EstimatorClass for ZScoreAnnotator {
    const NAME: &'static str = "ZScoreAnnotator";
    const ROLES: &'static [Role] = &[Role::SeriesAnnotator];
    const CAPABILITIES: &'static [Operation] = &[Operation::Fit, Operation::Predict];

    fn class_tags() -> Tags {
        value_map([
            (tags::FIT_IN_PREDICT, Value::from(true)),
            (tags::UNIVARIATE_ONLY, true.into()),
            (tags::HANDLES_MISSING_DATA, false.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        ZScoreAnnotatorConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: ZScoreAnnotatorConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![Params::new(), value_map([("threshold", 1.0)])]
    }
}
