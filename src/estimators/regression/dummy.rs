//! Baseline regressor that ignores the series and predicts a constant.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{panel_arg, series_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::{attributes_with, mean_std};
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

const STRATEGIES: &[&str] = &["mean", "median", "constant"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DummyRegressorConfig {
    pub strategy: String,
    /// Prediction of the `constant` strategy.
    pub constant: Option<f64>,
}

impl Default for DummyRegressorConfig {
    fn default() -> Self {
        Self {
            strategy: "mean".to_string(),
            constant: None,
        }
    }
}

impl HyperParameters for DummyRegressorConfig {
    const ESTIMATOR: &'static str = "DummyRegressor";

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("strategy", "mean"),
            ParamSpec::new("constant", Value::None),
        ]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let strategy = reader.choice("strategy", STRATEGIES)?;
        let constant = reader.opt_float("constant")?;
        if strategy == "constant" && constant.is_none() {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "constant",
                "the constant strategy requires a value",
            ));
        }
        Ok(Self { strategy, constant })
    }

    fn to_params(&self) -> Params {
        value_map([
            ("strategy", Value::from(self.strategy.as_str())),
            ("constant", self.constant.into()),
        ])
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DummyRegressor {
    config: DummyRegressorConfig,
    prediction_: Option<f64>,
    state: FitState,
}

impl DummyRegressor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Estimator for DummyRegressor {
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
            [("prediction_", self.prediction_.into())],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = panel_arg(args, 0, "fit")?;
        let y = series_arg(args, 1, "fit")?;
        if x.nrows() != y.len() {
            return Err(EstimatorError::invalid_input(
                "fit",
                format!("{} series but {} targets", x.nrows(), y.len()),
            ));
        }
        let prediction = match (self.config.strategy.as_str(), self.config.constant) {
            ("constant", Some(c)) => c,
            ("median", _) => {
                let mut sorted = y.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
            _ => mean_std(y.iter().copied()).0,
        };
        self.prediction_ = Some(prediction);
        self.state.mark_fitted();
        Ok(self)
    }

    fn predict(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let prediction = self
            .prediction_
            .ok_or_else(|| EstimatorError::not_fitted(Self::NAME))?;
        let x = panel_arg(args, 0, "predict")?;
        Ok(Data::Series(Array1::from_elem(x.nrows(), prediction)))
    }
}

impl EstimatorClass for DummyRegressor {
    const NAME: &'static str = "DummyRegressor";
    const ROLES: &'static [Role] = &[Role::Regressor];
    const CAPABILITIES: &'static [Operation] = &[Operation::Fit, Operation::Predict];

    fn class_tags() -> Tags {
        value_map([
            (tags::CAPABILITY_MULTIVARIATE, true),
            (tags::CAPABILITY_UNEQUAL_LENGTH, true),
            (tags::CAPABILITY_MISSING_VALUES, true),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        DummyRegressorConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: DummyRegressorConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            Params::new(),
            value_map([("strategy", "median")]),
            value_map([("strategy", Value::from("constant")), ("constant", 4.2.into())]),
        ]
    }
}
