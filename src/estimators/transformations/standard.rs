//! Standard Scaler (Z-score normalization) for a univariate series.
//!
//! The standard score of a value `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training series, and `s` is its population
//! standard deviation.
//!
//! # Example
//! ```ignore
//! use estimator_checks::estimators::transformations::StandardScaler;
//!
//! let mut scaler = StandardScaler::new().with_mean(true).with_std(true);
//! scaler.fit(&[Data::Series(series.clone())])?;
//! let scaled = scaler.transform(&[Data::Series(series)])?;
//! ```

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{series_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::{attributes_with, mean_std};
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use serde::{Deserialize, Serialize};

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If true, center the data before scaling.
    pub with_mean: bool,
    /// If true, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

impl HyperParameters for StandardScalerConfig {
    const ESTIMATOR: &'static str = "StandardScaler";

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("with_mean", true),
            ParamSpec::new("with_std", true),
        ]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        Ok(Self {
            with_mean: reader.bool("with_mean")?,
            with_std: reader.bool("with_std")?,
        })
    }

    fn to_params(&self) -> Params {
        value_map([("with_mean", self.with_mean), ("with_std", self.with_std)])
    }
}

/// StandardScaler transformer.
///
/// Transforms a series by removing the mean and scaling to unit variance.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    config: StandardScalerConfig,
    mean_: Option<f64>,
    scale_: Option<f64>,
    state: FitState,
}

impl StandardScaler {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }

    /// Mean learned during fit (0 when `with_mean` is false).
    pub fn mean(&self) -> Option<f64> {
        self.mean_
    }

    /// Scale learned during fit (1 when `with_std` is false).
    pub fn scale(&self) -> Option<f64> {
        self.scale_
    }

    fn fitted(&self) -> Result<(f64, f64), EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        match (self.mean_, self.scale_) {
            (Some(mean), Some(scale)) => Ok((mean, scale)),
            _ => Err(EstimatorError::not_fitted(Self::NAME)),
        }
    }
}

impl Estimator for StandardScaler {
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
            [("mean_", self.mean_.into()), ("scale_", self.scale_.into())],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = series_arg(args, 0, "fit")?;
        let (mean, std) = mean_std(x.iter().copied());
        self.mean_ = Some(if self.config.with_mean { mean } else { 0.0 });
        // Constant series keep their scale
        self.scale_ = Some(if self.config.with_std && std > 0.0 {
            std
        } else {
            1.0
        });
        self.state.mark_fitted();
        Ok(self)
    }

    fn transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        let (mean, scale) = self.fitted()?;
        let x = series_arg(args, 0, "transform")?;
        Ok(Data::Series(x.mapv(|v| (v - mean) / scale)))
    }

    fn inverse_transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        let (mean, scale) = self.fitted()?;
        let x = series_arg(args, 0, "inverse_transform")?;
        Ok(Data::Series(x.mapv(|v| v * scale + mean)))
    }
}

impl EstimatorClass for StandardScaler {
    const NAME: &'static str = "StandardScaler";
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
            (tags::HANDLES_MISSING_DATA, false.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        StandardScalerConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: StandardScalerConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![Params::new(), value_map([("with_mean", false)])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Persist;
    use ndarray::{array, Array1};

    fn create_test_data() -> Array1<f64> {
        array![0.0, 1.0, 0.0, 1.0, 1.0, 3.0]
    }

    fn fitted(scaler: StandardScaler) -> StandardScaler {
        let mut scaler = scaler;
        scaler.fit(&[Data::Series(create_test_data())]).unwrap();
        scaler
    }

    #[test]
    fn test_standard_scaler_fit() {
        let scaler = fitted(StandardScaler::new());
        assert!((scaler.mean().unwrap() - 1.0).abs() < 1e-10);
        assert!(scaler.is_fitted());
    }

    #[test]
    fn test_standard_scaler_transform() {
        let mut scaler = fitted(StandardScaler::new());
        let out = scaler.transform(&[Data::Series(create_test_data())]).unwrap();
        let Data::Series(z) = out else {
            panic!("expected series output");
        };
        let (mean, std) = mean_std(z.iter().copied());
        assert!(mean.abs() < 1e-10, "mean = {}", mean);
        assert!((std - 1.0).abs() < 1e-8, "std = {}", std);
    }

    #[test]
    fn test_standard_scaler_inverse_transform() {
        let mut scaler = fitted(StandardScaler::new());
        let transformed = scaler.transform(&[Data::Series(create_test_data())]).unwrap();
        let recovered = scaler.inverse_transform(&[transformed]).unwrap();
        for (o, r) in create_test_data().iter().zip(recovered.to_flat_vec()) {
            assert!((o - r).abs() < 1e-10);
        }
    }

    #[test]
    fn test_standard_scaler_without_mean() {
        let scaler = fitted(StandardScaler::new().with_mean(false));
        assert_eq!(scaler.mean(), Some(0.0));
    }

    #[test]
    fn test_standard_scaler_without_std() {
        let scaler = fitted(StandardScaler::new().with_std(false));
        assert_eq!(scaler.scale(), Some(1.0));
    }

    #[test]
    fn test_standard_scaler_constant_series() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&[Data::Series(array![5.0, 5.0, 5.0])]).unwrap();
        assert_eq!(scaler.scale(), Some(1.0));
        assert!((scaler.mean().unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_scaler_not_fitted() {
        let mut scaler = StandardScaler::new();
        let err = scaler
            .transform(&[Data::Series(create_test_data())])
            .unwrap_err();
        assert!(matches!(err, EstimatorError::NotFitted { .. }));
    }

    #[test]
    fn test_standard_scaler_empty_data() {
        let mut scaler = StandardScaler::new();
        assert!(scaler.fit(&[Data::Series(Array1::zeros(0))]).is_err());
    }

    #[test]
    fn test_standard_scaler_serialization() {
        let mut scaler = fitted(StandardScaler::new());
        let bytes = scaler.to_bytes().unwrap();
        let mut restored = (scaler.class().load)(&bytes).unwrap();

        let t1 = scaler.transform(&[Data::Series(create_test_data())]).unwrap();
        let t2 = restored.transform(&[Data::Series(create_test_data())]).unwrap();
        for (a, b) in t1.to_flat_vec().iter().zip(t2.to_flat_vec()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_standard_scaler_set_params_rejects_wrong_kind() {
        let mut scaler = StandardScaler::new();
        let err = scaler
            .set_params(&value_map([("with_std", 1i64)]))
            .unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidParameter { .. }));
        assert_eq!(scaler.get_params(), StandardScalerConfig::default().to_params());
    }
}
