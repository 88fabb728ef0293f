//! Min-max scaling of a univariate series to a target range.

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

/// Configuration for MinMaxScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScalerConfig {
    /// Desired `(min, max)` of the transformed data; `min < max`.
    pub feature_range: (f64, f64),
}

impl Default for MinMaxScalerConfig {
    fn default() -> Self {
        Self {
            feature_range: (0.0, 1.0),
        }
    }
}

fn range_value((lo, hi): (f64, f64)) -> Value {
    Value::Tuple(vec![lo.into(), hi.into()])
}

impl HyperParameters for MinMaxScalerConfig {
    const ESTIMATOR: &'static str = "MinMaxScaler";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::new("feature_range", range_value((0.0, 1.0)))]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let (lo, hi) = reader.float_pair("feature_range")?;
        if !(lo < hi) {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "feature_range",
                format!("minimum must be smaller than maximum, got ({}, {})", lo, hi),
            ));
        }
        Ok(Self {
            feature_range: (lo, hi),
        })
    }

    fn to_params(&self) -> Params {
        value_map([("feature_range", range_value(self.feature_range))])
    }
}

/// Scales a series so that its training minimum and maximum map onto
/// `feature_range`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MinMaxScaler {
    config: MinMaxScalerConfig,
    data_min_: Option<f64>,
    data_max_: Option<f64>,
    state: FitState,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Result<Self, EstimatorError> {
        self.config = self
            .config
            .merged(&value_map([("feature_range", range_value((lo, hi)))]))?;
        Ok(self)
    }

    /// `(scale, min)` such that `x * scale + min` is the transformed value.
    fn coefficients(&self) -> Result<(f64, f64), EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let (Some(data_min), Some(data_max)) = (self.data_min_, self.data_max_) else {
            return Err(EstimatorError::not_fitted(Self::NAME));
        };
        let (lo, hi) = self.config.feature_range;
        let span = data_max - data_min;
        let scale = if span > 0.0 { (hi - lo) / span } else { 1.0 };
        Ok((scale, lo - data_min * scale))
    }
}

impl Estimator for MinMaxScaler {
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
            [
                ("data_min_", self.data_min_.into()),
                ("data_max_", self.data_max_.into()),
            ],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = series_arg(args, 0, "fit")?;
        let min = x.iter().copied().fold(f64::INFINITY, f64::min);
        let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        self.data_min_ = Some(min);
        self.data_max_ = Some(max);
        self.state.mark_fitted();
        Ok(self)
    }

    fn transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        let (scale, min) = self.coefficients()?;
        let x = series_arg(args, 0, "transform")?;
        Ok(Data::Series(x.mapv(|v| v * scale + min)))
    }

    fn inverse_transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        let (scale, min) = self.coefficients()?;
        let x = series_arg(args, 0, "inverse_transform")?;
        Ok(Data::Series(x.mapv(|v| (v - min) / scale)))
    }
}

impl EstimatorClass for MinMaxScaler {
    const NAME: &'static str = "MinMaxScaler";
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
            (tags::UNIVARIATE_ONLY, true.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        MinMaxScalerConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: MinMaxScalerConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            Params::new(),
            value_map([("feature_range", range_value((-1.0, 1.0)))]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_minmax_scaler_default_range() {
        let mut scaler = MinMaxScaler::new();
        let x = Data::Series(array![2.0, 4.0, 6.0]);
        let out = scaler.fit_transform(&[x]).unwrap().to_flat_vec();
        assert_eq!(out, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_minmax_scaler_custom_range_and_inverse() {
        let mut scaler = MinMaxScaler::new().with_range(-1.0, 1.0).unwrap();
        let x = array![1.0, 3.0, 5.0];
        scaler.fit(&[Data::Series(x.clone())]).unwrap();
        let t = scaler.transform(&[Data::Series(x.clone())]).unwrap();
        assert_eq!(t.to_flat_vec(), vec![-1.0, 0.0, 1.0]);
        let back = scaler.inverse_transform(&[t]).unwrap().to_flat_vec();
        for (a, b) in x.iter().zip(back) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_minmax_scaler_rejects_inverted_range() {
        let err = MinMaxScaler::new().with_range(1.0, 0.0).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidParameter { .. }));
    }

    #[test]
    fn test_minmax_scaler_constant_series() {
        let mut scaler = MinMaxScaler::new();
        let out = scaler
            .fit_transform(&[Data::Series(array![3.0, 3.0])])
            .unwrap()
            .to_flat_vec();
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn test_minmax_scaler_not_fitted() {
        let mut scaler = MinMaxScaler::new();
        assert!(matches!(
            scaler.inverse_transform(&[Data::Series(array![1.0])]),
            Err(EstimatorError::NotFitted { .. })
        ));
    }
}
