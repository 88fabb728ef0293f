//! Naive forecasting strategies.
//!
//! - `last`: repeat the last observed value of the same season.
//! - `mean`: mean of the observed values of the same season.
//! - `drift`: extrapolate the line through the first and last observation.
//!
//! Only the trailing `window_length` observations are considered when a
//! window is given.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{horizon_arg, series_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::{attributes_with, mean_std};
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

const STRATEGIES: &[&str] = &["last", "mean", "drift"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NaiveForecasterConfig {
    pub strategy: String,
    /// Seasonal periodicity, `>= 1`.
    pub sp: i64,
    pub window_length: Option<i64>,
}

impl Default for NaiveForecasterConfig {
    fn default() -> Self {
        Self {
            strategy: "last".to_string(),
            sp: 1,
            window_length: None,
        }
    }
}

impl HyperParameters for NaiveForecasterConfig {
    const ESTIMATOR: &'static str = "NaiveForecaster";

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("strategy", "last"),
            ParamSpec::new("sp", 1i64),
            ParamSpec::new("window_length", Value::None),
        ]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let strategy = reader.choice("strategy", STRATEGIES)?;
        let sp = reader.int("sp")?;
        if sp < 1 {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "sp",
                format!("must be >= 1, got {}", sp),
            ));
        }
        let window_length = reader.opt_int("window_length")?;
        if let Some(w) = window_length.filter(|&w| w < 1) {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "window_length",
                format!("must be >= 1, got {}", w),
            ));
        }
        Ok(Self {
            strategy,
            sp,
            window_length,
        })
    }

    fn to_params(&self) -> Params {
        value_map([
            ("strategy", Value::from(self.strategy.as_str())),
            ("sp", self.sp.into()),
            ("window_length", self.window_length.into()),
        ])
    }
}

/// Forecasts with a naive strategy over the training window.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NaiveForecaster {
    config: NaiveForecasterConfig,
    /// Observations inside the window, oldest first.
    window_: Option<Vec<f64>>,
    /// Length of the training series.
    cutoff_: Option<i64>,
    state: FitState,
}

impl NaiveForecaster {
    pub fn new(strategy: &str) -> Result<Self, EstimatorError> {
        Self::from_params(&value_map([("strategy", strategy)]))
    }

    pub fn cutoff(&self) -> Option<i64> {
        self.cutoff_
    }

    fn forecast(&self, window: &[f64], step: i64) -> f64 {
        let n = window.len();
        let Some(&last) = window.last() else {
            return f64::NAN;
        };
        match self.config.strategy.as_str() {
            "drift" => {
                let slope = if n > 1 {
                    (last - window[0]) / (n - 1) as f64
                } else {
                    0.0
                };
                last + slope * step as f64
            }
            strategy => {
                // positions in the window that share the target's season
                let sp = self.config.sp as usize;
                let target = n - 1 + step as usize;
                let season: Vec<f64> = (0..n)
                    .filter(|&i| (target - i) % sp == 0)
                    .map(|i| window[i])
                    .collect();
                match (strategy, season.last()) {
                    (_, None) => last,
                    ("mean", Some(_)) => mean_std(season.iter().copied()).0,
                    (_, Some(&value)) => value,
                }
            }
        }
    }
}

impl Estimator for NaiveForecaster {
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
                ("window_", self.window_.clone().into()),
                ("cutoff_", self.cutoff_.into()),
            ],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let y = series_arg(args, 0, "fit")?;
        let n = y.len();
        let w = self
            .config
            .window_length
            .map_or(n, |w| (w as usize).min(n));
        self.window_ = Some(y.iter().skip(n - w).copied().collect());
        self.cutoff_ = Some(n as i64);
        self.state.mark_fitted();
        Ok(self)
    }

    fn predict(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let window = self
            .window_
            .as_deref()
            .ok_or_else(|| EstimatorError::not_fitted(Self::NAME))?;
        let fh = horizon_arg(args, 0, "predict")?;
        Ok(Data::Series(Array1::from_iter(
            fh.iter().map(|&step| self.forecast(window, step)),
        )))
    }
}

impl EstimatorClass for NaiveForecaster {
    const NAME: &'static str = "NaiveForecaster";
    const ROLES: &'static [Role] = &[Role::Forecaster];
    const CAPABILITIES: &'static [Operation] = &[Operation::Fit, Operation::Predict];

    fn class_tags() -> Tags {
        value_map([
            (tags::SCITYPE_Y, Value::from("univariate")),
            (tags::REQUIRES_FH_IN_FIT, false.into()),
            (tags::IGNORES_EXOGENEOUS_X, true.into()),
            (tags::HANDLES_MISSING_DATA, false.into()),
            (tags::CAPABILITY_PRED_INT, false.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        NaiveForecasterConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: NaiveForecasterConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            Params::new(),
            value_map([("strategy", Value::from("mean")), ("window_length", 5i64.into())]),
            value_map([("strategy", Value::from("last")), ("sp", 4i64.into())]),
            value_map([("strategy", "drift")]),
        ]
    }
}
