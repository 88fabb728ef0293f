//! Forecasting on a transformed target.
//!
//! [`TransformedTargetForecaster`] plays two roles: as a forecaster it fits a
//! [`NaiveForecaster`] on the power-transformed series and maps forecasts
//! back through the inverse transform; as a transformer it exposes the
//! power transform itself.

use super::naive::NaiveForecaster;
use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{series_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::attributes_with;
use crate::estimators::transformations::ExponentTransformer;
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformedTargetForecasterConfig {
    /// Exponent of the target transform.
    pub power: f64,
    /// Strategy of the inner naive forecaster.
    pub strategy: String,
}

impl Default for TransformedTargetForecasterConfig {
    fn default() -> Self {
        Self {
            power: 0.5,
            strategy: "last".to_string(),
        }
    }
}

impl HyperParameters for TransformedTargetForecasterConfig {
    const ESTIMATOR: &'static str = "TransformedTargetForecaster";

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("power", 0.5),
            ParamSpec::new("strategy", "last"),
        ]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let config = Self {
            power: reader.float("power")?,
            strategy: reader.string("strategy")?,
        };
        // components validate their own parameters
        config.components()?;
        Ok(config)
    }

    fn to_params(&self) -> Params {
        value_map([
            ("power", Value::from(self.power)),
            ("strategy", self.strategy.as_str().into()),
        ])
    }
}

impl TransformedTargetForecasterConfig {
    fn components(&self) -> Result<(ExponentTransformer, NaiveForecaster), EstimatorError> {
        Ok((
            ExponentTransformer::new(self.power, 0.0)?,
            NaiveForecaster::new(&self.strategy)?,
        ))
    }
}

/// Pipeline of an [`ExponentTransformer`] followed by a [`NaiveForecaster`].
///
/// Components are built from the hyper-parameters on every `fit`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransformedTargetForecaster {
    config: TransformedTargetForecasterConfig,
    transformer_: Option<ExponentTransformer>,
    forecaster_: Option<NaiveForecaster>,
    state: FitState,
}

impl TransformedTargetForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn fitted_transformer(&mut self) -> Result<&mut ExponentTransformer, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        self.transformer_
            .as_mut()
            .ok_or_else(|| EstimatorError::not_fitted(Self::NAME))
    }
}

impl Estimator for TransformedTargetForecaster {
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
        let mut fitted = Vec::new();
        if let Some(forecaster) = &self.forecaster_ {
            fitted.extend(forecaster.attributes().into_iter().filter_map(|(k, v)| {
                match k.as_str() {
                    "window_" => Some(("forecaster__window_", v)),
                    "cutoff_" => Some(("forecaster__cutoff_", v)),
                    _ => None,
                }
            }));
        }
        fitted.push((
            "transformer__is_fitted",
            Value::from(self.transformer_.as_ref().map(|t| t.is_fitted())),
        ));
        attributes_with(self.get_params(), &self.state, fitted)
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        series_arg(args, 0, "fit")?;
        let (mut transformer, mut forecaster) = self.config.components()?;
        let transformed = transformer.fit_transform(args)?;
        forecaster.fit(&[transformed])?;
        self.transformer_ = Some(transformer);
        self.forecaster_ = Some(forecaster);
        self.state.mark_fitted();
        Ok(self)
    }

    fn predict(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let (Some(transformer), Some(forecaster)) =
            (self.transformer_.as_mut(), self.forecaster_.as_mut())
        else {
            return Err(EstimatorError::not_fitted(Self::NAME));
        };
        let forecast = forecaster.predict(args)?;
        transformer.inverse_transform(&[forecast])
    }

    fn transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.fitted_transformer()?.transform(args)
    }

    fn inverse_transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.fitted_transformer()?.inverse_transform(args)
    }
}

impl EstimatorClass for TransformedTargetForecaster {
    const NAME: &'static str = "TransformedTargetForecaster";
    const ROLES: &'static [Role] = &[Role::Forecaster, Role::Transformer];
    const CAPABILITIES: &'static [Operation] = &[
        Operation::Fit,
        Operation::Predict,
        Operation::Transform,
        Operation::InverseTransform,
        Operation::FitTransform,
    ];

    fn class_tags() -> Tags {
        value_map([
            (tags::SCITYPE_Y, Value::from("univariate")),
            (tags::REQUIRES_FH_IN_FIT, false.into()),
            (tags::IGNORES_EXOGENEOUS_X, true.into()),
            (tags::TRANSFORM_INPUT, "series".into()),
            (tags::TRANSFORM_OUTPUT, "series".into()),
            (tags::FIT_IN_TRANSFORM, false.into()),
            (tags::TRANSFORM_SAME_INDEX, true.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        TransformedTargetForecasterConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: TransformedTargetForecasterConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            Params::new(),
            value_map([("power", Value::from(2.0)), ("strategy", "mean".into())]),
        ]
    }
}
