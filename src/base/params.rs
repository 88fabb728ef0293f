//! Constructor parameter declarations and typed parameter reading.
//!
//! Each estimator keeps its hyper-parameters in a `...Config` struct that
//! implements [`HyperParameters`]. The declared [`ParamSpec`] list is the
//! single source of defaults: [`ParamReader`] falls back to it for every
//! parameter the caller did not supply.

use crate::error::EstimatorError;
use crate::value::{Params, Value};

/// A formal constructor parameter and its declared default.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    /// `None` when the parameter has no default and must be supplied.
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            default: Some(default.into()),
        }
    }

    /// A parameter without a default value.
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            default: None,
        }
    }
}

/// Reads typed hyper-parameters from a [`Params`] map, falling back to the
/// declared defaults.
pub struct ParamReader<'a> {
    estimator: &'static str,
    params: &'a Params,
    specs: Vec<ParamSpec>,
}

impl<'a> ParamReader<'a> {
    /// Fails with [`EstimatorError::UnknownParameter`] if `params` holds a
    /// name that is not declared in `specs`.
    pub fn new(
        estimator: &'static str,
        params: &'a Params,
        specs: Vec<ParamSpec>,
    ) -> Result<Self, EstimatorError> {
        if let Some(unknown) = params
            .keys()
            .find(|name| !specs.iter().any(|s| s.name == name.as_str()))
        {
            return Err(EstimatorError::UnknownParameter {
                estimator: estimator.to_string(),
                name: unknown.clone(),
            });
        }
        Ok(Self {
            estimator,
            params,
            specs,
        })
    }

    fn value(&self, name: &str) -> Result<&Value, EstimatorError> {
        if let Some(v) = self.params.get(name) {
            return Ok(v);
        }
        self.specs
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.default.as_ref())
            .ok_or_else(|| EstimatorError::MissingParameter {
                estimator: self.estimator.to_string(),
                name: name.to_string(),
            })
    }

    fn invalid(&self, name: &str, expected: &str, got: &Value) -> EstimatorError {
        EstimatorError::invalid_parameter(
            self.estimator,
            name,
            format!("expected {}, got {} ({})", expected, got.kind(), got),
        )
    }

    pub fn bool(&self, name: &str) -> Result<bool, EstimatorError> {
        let v = self.value(name)?;
        v.as_bool().ok_or_else(|| self.invalid(name, "bool", v))
    }

    pub fn float(&self, name: &str) -> Result<f64, EstimatorError> {
        let v = self.value(name)?;
        v.as_f64().ok_or_else(|| self.invalid(name, "float", v))
    }

    pub fn int(&self, name: &str) -> Result<i64, EstimatorError> {
        let v = self.value(name)?;
        v.as_i64().ok_or_else(|| self.invalid(name, "int", v))
    }

    pub fn opt_int(&self, name: &str) -> Result<Option<i64>, EstimatorError> {
        match self.value(name)? {
            Value::None => Ok(None),
            Value::Int(i) => Ok(Some(*i)),
            other => Err(self.invalid(name, "int or None", other)),
        }
    }

    pub fn opt_float(&self, name: &str) -> Result<Option<f64>, EstimatorError> {
        let v = self.value(name)?;
        if v.is_none() {
            return Ok(None);
        }
        v.as_f64()
            .map(Some)
            .ok_or_else(|| self.invalid(name, "float or None", v))
    }

    pub fn string(&self, name: &str) -> Result<String, EstimatorError> {
        let v = self.value(name)?;
        v.as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(name, "str", v))
    }

    /// A string restricted to `allowed`.
    pub fn choice(&self, name: &str, allowed: &[&str]) -> Result<String, EstimatorError> {
        let s = self.string(name)?;
        if allowed.contains(&s.as_str()) {
            Ok(s)
        } else {
            Err(EstimatorError::invalid_parameter(
                self.estimator,
                name,
                format!("expected one of {:?}, got '{}'", allowed, s),
            ))
        }
    }

    pub fn float_pair(&self, name: &str) -> Result<(f64, f64), EstimatorError> {
        let v = self.value(name)?;
        match v.as_tuple() {
            Some([a, b]) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => Ok((a, b)),
                _ => Err(self.invalid(name, "tuple of two floats", v)),
            },
            _ => Err(self.invalid(name, "tuple of two floats", v)),
        }
    }

    pub fn int_list(&self, name: &str) -> Result<Vec<i64>, EstimatorError> {
        let v = self.value(name)?;
        v.as_tuple()
            .and_then(|items| items.iter().map(Value::as_i64).collect::<Option<Vec<_>>>())
            .ok_or_else(|| self.invalid(name, "tuple of ints", v))
    }

    pub fn str_list(&self, name: &str) -> Result<Vec<String>, EstimatorError> {
        let v = self.value(name)?;
        v.as_tuple()
            .and_then(|items| {
                items
                    .iter()
                    .map(|i| i.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| self.invalid(name, "tuple of str", v))
    }
}

/// Hyper-parameter configuration of an estimator.
pub trait HyperParameters: Sized {
    /// Name of the owning estimator, used in error messages.
    const ESTIMATOR: &'static str;

    /// Formal constructor parameters, in declaration order.
    fn specs() -> Vec<ParamSpec>;

    /// Builds the configuration, validating every value.
    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError>;

    /// Current values keyed by parameter name.
    fn to_params(&self) -> Params;

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        let reader = ParamReader::new(Self::ESTIMATOR, params, Self::specs())?;
        Self::read(&reader)
    }

    /// Applies `updates` on top of the current values. On error the
    /// receiver is left untouched.
    fn merged(&self, updates: &Params) -> Result<Self, EstimatorError> {
        let mut params = self.to_params();
        params.extend(updates.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self::from_params(&params)
    }
}
