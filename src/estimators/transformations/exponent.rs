//! Power transform `(x + offset) ^ power` of a univariate series.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{series_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::attributes_with;
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExponentTransformerConfig {
    /// Exponent applied to the offset series; must be non-zero.
    pub power: f64,
    pub offset: f64,
}

impl Default for ExponentTransformerConfig {
    fn default() -> Self {
        Self {
            power: 0.5,
            offset: 0.0,
        }
    }
}

impl HyperParameters for ExponentTransformerConfig {
    const ESTIMATOR: &'static str = "ExponentTransformer";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::new("power", 0.5), ParamSpec::new("offset", 0.0)]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let power = reader.float("power")?;
        if power == 0.0 || !power.is_finite() {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "power",
                format!("must be a finite non-zero number, got {}", power),
            ));
        }
        Ok(Self {
            power,
            offset: reader.float("offset")?,
        })
    }

    fn to_params(&self) -> Params {
        value_map([("power", self.power), ("offset", self.offset)])
    }
}

/// Applies a power transform. There is nothing to learn, so `fit` only
/// records that the transformer is ready.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExponentTransformer {
    config: ExponentTransformerConfig,
    state: FitState,
}

impl ExponentTransformer {
    pub fn new(power: f64, offset: f64) -> Result<Self, EstimatorError> {
        Self::from_params(&value_map([("power", power), ("offset", offset)]))
    }

    pub fn config(&self) -> &ExponentTransformerConfig {
        &self.config
    }
}

impl Estimator for ExponentTransformer {
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
        attributes_with(self.get_params(), &self.state, std::iter::empty())
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        series_arg(args, 0, "fit")?;
        self.state.mark_fitted();
        Ok(self)
    }

    fn transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let x = series_arg(args, 0, "transform")?;
        let ExponentTransformerConfig { power, offset } = self.config;
        Ok(Data::Series(x.mapv(|v| (v + offset).powf(power))))
    }

    fn inverse_transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let x = series_arg(args, 0, "inverse_transform")?;
        let ExponentTransformerConfig { power, offset } = self.config;
        Ok(Data::Series(x.mapv(|v| v.powf(1.0 / power) - offset)))
    }
}

impl EstimatorClass for ExponentTransformer {
    const NAME: &'static str = "ExponentTransformer";
    const ROLES: &'static [Role] = &[Role::Transformer];
    const CAPABILITIES: &'static [Operation] = &[
        Operation::Fit,
        Operation::Transform,
        Operation::InverseTransform,
        Operation::FitTransform,
    ];

    fn class_tags() -> Tags {
        value_map([
            (tags::TRANSFORM_INPUT, Value::from("series")),
            (tags::TRANSFORM_OUTPUT, "series".into()),
            (tags::INSTANCEWISE, true.into()),
            (tags::FIT_IN_TRANSFORM, false.into()),
            (tags::TRANSFORM_SAME_INDEX, true.into()),
            (tags::HANDLES_MISSING_DATA, true.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        ExponentTransformerConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: ExponentTransformerConfig::from_params(params)?,
            state: FitState::new(),
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            Params::new(),
            value_map([("power", 2.0), ("offset", 1.0)]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_exponent_transform_square_root() {
        let mut t = ExponentTransformer::default();
        let out = t
            .fit_transform(&[Data::Series(array![4.0, 9.0, 16.0])])
            .unwrap();
        assert_eq!(out.to_flat_vec(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_exponent_inverse_with_offset() {
        let mut t = ExponentTransformer::new(2.0, 1.0).unwrap();
        let x = array![0.5, 1.0, 2.5];
        t.fit(&[Data::Series(x.clone())]).unwrap();
        let out = t.transform(&[Data::Series(x.clone())]).unwrap();
        let back = t.inverse_transform(&[out]).unwrap().to_flat_vec();
        for (a, b) in x.iter().zip(back) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_exponent_rejects_zero_power() {
        assert!(matches!(
            ExponentTransformer::new(0.0, 0.0),
            Err(EstimatorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_exponent_requires_fit() {
        let mut t = ExponentTransformer::default();
        assert!(matches!(
            t.transform(&[Data::Series(array![1.0])]),
            Err(EstimatorError::NotFitted { .. })
        ));
    }
}
