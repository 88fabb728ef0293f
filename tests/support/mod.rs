//! Deliberately broken forecasters, one fault per type.

#![allow(dead_code)]

use estimator_checks::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, Operation, ParamSpec, Role,
};
use estimator_checks::data::{horizon_arg, series_arg, Data};
use estimator_checks::error::EstimatorError;
use estimator_checks::tags;
use estimator_checks::value::{value_map, Attributes, Params, Tags, Value};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Selects which contract a [`FaultyForecaster`] breaks.
pub trait Fault: Clone + Debug + Default + Send + 'static {
    const NAME: &'static str;
    /// The constructor sorts the supplied `weights`.
    const SORTS_WEIGHTS: bool = false;
    /// `predict` works before `fit`.
    const PREDICTS_UNFITTED: bool = false;
    /// `predict` increments a fitted attribute.
    const COUNTS_PREDICTIONS: bool = false;
    const PANICS_IN_FIT: bool = false;
    /// Each `fit` shifts the fitted value by the number of earlier fits.
    const DRIFTS_ON_REFIT: bool = false;
    /// `fit` normalizes `weights` in place.
    const REWRITES_WEIGHTS: bool = false;
    /// `predict` reads a fitted value that is not serialized.
    const CACHES_UNSERIALIZED: bool = false;
    /// `fit` never sets the internal fitted flag; `is_fitted` looks at the
    /// fitted value instead.
    const SKIPS_FIT_FLAG: bool = false;
    /// The constructor sets the internal fitted flag.
    const STARTS_FITTED: bool = false;
    /// `fit` returns a copy instead of the receiver.
    const FIT_RETURNS_COPY: bool = false;
    /// `set_params` returns a copy instead of the receiver.
    const SET_PARAMS_RETURNS_COPY: bool = false;
    /// `set_params` clears `weights` before validating the new value.
    const PARTIAL_SET_PARAMS: bool = false;
}

#[derive(Clone, Debug, Default)]
pub struct WellBehaved;

impl Fault for WellBehaved {
    const NAME: &'static str = "WellBehavedForecaster";
}

/// Behaves exactly like [`WellBehaved`] under another type.
#[derive(Clone, Debug, Default)]
pub struct Lookalike;

impl Fault for Lookalike {
    const NAME: &'static str = "LookalikeForecaster";
}

#[derive(Clone, Debug, Default)]
pub struct SortsWeights;

impl Fault for SortsWeights {
    const NAME: &'static str = "SortingForecaster";
    const SORTS_WEIGHTS: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct PredictsUnfitted;

impl Fault for PredictsUnfitted {
    const NAME: &'static str = "EagerForecaster";
    const PREDICTS_UNFITTED: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct CountsPredictions;

impl Fault for CountsPredictions {
    const NAME: &'static str = "CountingForecaster";
    const COUNTS_PREDICTIONS: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct PanicsInFit;

impl Fault for PanicsInFit {
    const NAME: &'static str = "PanickingForecaster";
    const PANICS_IN_FIT: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct DriftsOnRefit;

impl Fault for DriftsOnRefit {
    const NAME: &'static str = "DriftingForecaster";
    const DRIFTS_ON_REFIT: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct RewritesWeights;

impl Fault for RewritesWeights {
    const NAME: &'static str = "NormalizingForecaster";
    const REWRITES_WEIGHTS: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct CachesUnserialized;

impl Fault for CachesUnserialized {
    const NAME: &'static str = "ForgetfulForecaster";
    const CACHES_UNSERIALIZED: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct SkipsFitFlag;

impl Fault for SkipsFitFlag {
    const NAME: &'static str = "UnflaggedForecaster";
    const SKIPS_FIT_FLAG: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct StartsFitted;

impl Fault for StartsFitted {
    const NAME: &'static str = "PrefittedForecaster";
    const STARTS_FITTED: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct FitReturnsCopy;

impl Fault for FitReturnsCopy {
    const NAME: &'static str = "DetachedForecaster";
    const FIT_RETURNS_COPY: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct SetParamsReturnsCopy;

impl Fault for SetParamsReturnsCopy {
    const NAME: &'static str = "DelegatingForecaster";
    const SET_PARAMS_RETURNS_COPY: bool = true;
}

#[derive(Clone, Debug, Default)]
pub struct PartialSetParams;

impl Fault for PartialSetParams {
    const NAME: &'static str = "LeakyForecaster";
    const PARTIAL_SET_PARAMS: bool = true;
}

/// Repeats the last training value, breaking one contract selected by `F`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FaultyForecaster<F: Fault> {
    weights: Vec<f64>,
    last_: Option<f64>,
    n_predictions_: i64,
    n_fits_: i64,
    state: FitState,
    #[serde(skip)]
    cached_: Option<f64>,
    #[serde(skip)]
    copy: Option<Box<FaultyForecaster<F>>>,
    #[serde(skip)]
    fault: PhantomData<F>,
}

/// Builds a [`Lookalike`] forecaster, for descriptors whose constructor
/// returns a type other than their own.
pub fn construct_lookalike(params: &Params) -> Result<Box<dyn Estimator>, EstimatorError> {
    Ok(Box::new(FaultyForecaster::<Lookalike>::from_params(params)?))
}

fn weights_value(weights: &[f64]) -> Value {
    Value::Tuple(weights.iter().map(|w| Value::Float(*w)).collect())
}

fn read_weights(name: &str, params: &Params, current: &[f64]) -> Result<Vec<f64>, EstimatorError> {
    if let Some(unknown) = params.keys().find(|k| k.as_str() != "weights") {
        return Err(EstimatorError::UnknownParameter {
            estimator: name.to_string(),
            name: unknown.clone(),
        });
    }
    let Some(value) = params.get("weights") else {
        return Ok(current.to_vec());
    };
    value
        .as_tuple()
        .and_then(|items| items.iter().map(Value::as_f64).collect::<Option<Vec<_>>>())
        .ok_or_else(|| {
            EstimatorError::invalid_parameter(name, "weights", "expected a tuple of floats")
        })
}

impl<F: Fault> Estimator for FaultyForecaster<F> {
    fn class(&self) -> EstimatorType {
        EstimatorType::of::<Self>()
    }

    fn get_params(&self) -> Params {
        value_map([("weights", weights_value(&self.weights))])
    }

    fn set_params(&mut self, params: &Params) -> Result<&mut dyn Estimator, EstimatorError> {
        if F::PARTIAL_SET_PARAMS {
            self.weights.clear();
        }
        self.weights = read_weights(F::NAME, params, &self.weights)?;
        if F::SET_PARAMS_RETURNS_COPY {
            let copy = Box::new(self.clone());
            return Ok(&mut **self.copy.insert(copy));
        }
        Ok(self)
    }

    fn attributes(&self) -> Attributes {
        let mut attrs = self.get_params();
        attrs.insert("last_".to_string(), self.last_.into());
        attrs.insert("n_predictions_".to_string(), self.n_predictions_.into());
        attrs.insert("n_fits_".to_string(), self.n_fits_.into());
        attrs.insert("_is_fitted".to_string(), self.state.is_fitted().into());
        attrs
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn is_fitted(&self) -> bool {
        if F::SKIPS_FIT_FLAG {
            self.last_.is_some()
        } else {
            self.state.is_fitted()
        }
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        if F::PANICS_IN_FIT {
            panic!("{} cannot fit", F::NAME);
        }
        let y = series_arg(args, 0, "fit")?;
        self.n_fits_ += 1;
        let mut last = y.last().copied();
        if F::DRIFTS_ON_REFIT {
            last = last.map(|v| v + self.n_fits_ as f64);
        }
        self.last_ = last;
        if F::CACHES_UNSERIALIZED {
            self.cached_ = last;
        }
        if F::REWRITES_WEIGHTS {
            let total: f64 = self.weights.iter().sum();
            self.weights.iter_mut().for_each(|w| *w /= total);
        }
        if !F::SKIPS_FIT_FLAG {
            self.state.mark_fitted();
        }
        if F::FIT_RETURNS_COPY {
            let copy = Box::new(self.clone());
            return Ok(&mut **self.copy.insert(copy));
        }
        Ok(self)
    }

    fn predict(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        if F::SKIPS_FIT_FLAG || F::STARTS_FITTED {
            if self.last_.is_none() {
                return Err(EstimatorError::not_fitted(F::NAME));
            }
        } else if !F::PREDICTS_UNFITTED {
            self.state.check_is_fitted(F::NAME)?;
        }
        let fh = horizon_arg(args, 0, "predict")?;
        if F::COUNTS_PREDICTIONS {
            self.n_predictions_ += 1;
        }
        let fitted = if F::CACHES_UNSERIALIZED {
            self.cached_
        } else {
            self.last_
        };
        let value = fitted.unwrap_or_default();
        Ok(Data::Series(ndarray::Array1::from_elem(fh.len(), value)))
    }
}

impl<F: Fault> EstimatorClass for FaultyForecaster<F> {
    const NAME: &'static str = F::NAME;
    const ROLES: &'static [Role] = &[Role::Forecaster];
    const CAPABILITIES: &'static [Operation] = &[Operation::Fit, Operation::Predict];

    fn class_tags() -> Tags {
        value_map([
            (tags::SCITYPE_Y, Value::from("univariate")),
            (tags::REQUIRES_FH_IN_FIT, false.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        vec![ParamSpec::new("weights", weights_value(&[1.0, 2.0, 3.0]))]
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        let mut weights = read_weights(F::NAME, params, &[1.0, 2.0, 3.0])?;
        if F::SORTS_WEIGHTS {
            weights.sort_by(f64::total_cmp);
        }
        let mut state = FitState::new();
        if F::STARTS_FITTED {
            state.mark_fitted();
        }
        Ok(Self {
            weights,
            last_: None,
            n_predictions_: 0,
            n_fits_: 0,
            state,
            cached_: None,
            copy: None,
            fault: PhantomData,
        })
    }

    fn test_params() -> Vec<Params> {
        vec![value_map([("weights", weights_value(&[3.0, 1.0, 2.0]))])]
    }
}
