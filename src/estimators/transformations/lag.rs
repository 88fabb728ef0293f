//! Lagged feature table of a univariate series.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{series_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::{attributes_with, mean_std};
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LagTransformerConfig {
    /// Positive lags, one output column per lag. No default.
    pub lags: Vec<i64>,
}

impl HyperParameters for LagTransformerConfig {
    const ESTIMATOR: &'static str = "LagTransformer";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::required("lags")]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let lags = reader.int_list("lags")?;
        if lags.is_empty() || lags.iter().any(|&l| l < 1) {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "lags",
                format!("expected a non-empty tuple of positive ints, got {:?}", lags),
            ));
        }
        Ok(Self { lags })
    }

    fn to_params(&self) -> Params {
        value_map([("lags", lag_value(&self.lags))])
    }
}

fn lag_value(lags: &[i64]) -> Value {
    Value::Tuple(lags.iter().map(|&l| Value::Int(l)).collect())
}

/// Turns a series of length `n` into an `(n, lags.len())` table whose column
/// `j` holds the series shifted by `lags[j]`. Positions before the start of
/// the series are filled with the training mean.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LagTransformer {
    config: LagTransformerConfig,
    fill_value_: Option<f64>,
    state: FitState,
}

impl LagTransformer {
    pub fn new(lags: &[i64]) -> Result<Self, EstimatorError> {
        Self::from_params(&value_map([("lags", lag_value(lags))]))
    }

    pub fn lags(&self) -> &[i64] {
        &self.config.lags
    }
}

impl Estimator for LagTransformer {
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
            [("fill_value_", self.fill_value_.into())],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = series_arg(args, 0, "fit")?;
        self.fill_value_ = Some(mean_std(x.iter().copied()).0);
        self.state.mark_fitted();
        Ok(self)
    }

    fn transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let fill = self
            .fill_value_
            .ok_or_else(|| EstimatorError::not_fitted(Self::NAME))?;
        let x = series_arg(args, 0, "transform")?;
        let lags = &self.config.lags;
        let table = Array2::from_shape_fn((x.len(), lags.len()), |(t, j)| {
            let lag = lags[j] as usize;
            if t >= lag {
                x[t - lag]
            } else {
                fill
            }
        });
        Ok(Data::Table(table))
    }
}

impl EstimatorClass for LagTransformer {
    const NAME: &'static str = "LagTransformer";
    const ROLES: &'static [Role] = &[Role::Transformer];
    const CAPABILITIES: &'static [Operation] =
        &[Operation::Fit, Operation::Transform, Operation::FitTransform];
    const REQUIRED_PARAMETERS: &'static [&'static str] = &["lags"];

    fn class_tags() -> Tags {
        value_map([
            (tags::TRANSFORM_INPUT, Value::from("series")),
            (tags::TRANSFORM_OUTPUT, "table".into()),
            (tags::INSTANCEWISE, true.into()),
            (tags::FIT_IN_TRANSFORM, false.into()),
            (tags::TRANSFORM_SAME_INDEX, true.into()),
            (tags::UNIVARIATE_ONLY, true.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        LagTransformerConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: LagTransformerConfig::from_params(params)?,
            fill_value_: None,
            state: FitState::new(),
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            value_map([("lags", lag_value(&[1]))]),
            value_map([("lags", lag_value(&[1, 2, 3]))]),
        ]
    }
}
