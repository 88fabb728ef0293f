//! The estimator contract shared by every implementation.

use super::descriptor::EstimatorType;
use super::fit_state::FitState;
use super::operation::Operation;
use super::params::ParamSpec;
use super::role::Role;
use crate::data::Data;
use crate::error::EstimatorError;
use crate::value::{Attributes, Params, Tags, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::fmt;

/// Upcast to [`Any`] so the exact runtime type of a trait object can be
/// compared against a descriptor.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Byte-level persistence of a whole estimator, fitted state included.
pub trait Persist {
    fn to_bytes(&self) -> Result<Vec<u8>, EstimatorError>;
}

impl<T: Serialize> Persist for T {
    fn to_bytes(&self) -> Result<Vec<u8>, EstimatorError> {
        Ok(bincode::serialize(self)?)
    }
}

/// Object-safe estimator interface.
///
/// Operations that must not change observable state (`predict`,
/// `transform`, ...) still take `&mut self`: estimators tagged
/// `fit-in-transform` or `fit-in-predict` legitimately update themselves
/// during those calls.
///
/// Operations an estimator does not declare keep the default body, which
/// returns [`EstimatorError::Unsupported`].
pub trait Estimator: AsAny + Persist + fmt::Debug + Send {
    /// Descriptor of the concrete type.
    fn class(&self) -> EstimatorType;

    fn name(&self) -> &'static str {
        self.class().name
    }

    fn roles(&self) -> &'static [Role] {
        self.class().roles
    }

    /// Operations this instance supports.
    fn capabilities(&self) -> Vec<Operation> {
        self.class().capabilities.to_vec()
    }

    fn get_class_tags(&self) -> Tags {
        (self.class().class_tags)()
    }

    /// Instance tags; class tags unless an instance overrides them.
    fn get_tags(&self) -> Tags {
        self.get_class_tags()
    }

    fn get_class_tag(&self, tag: &str) -> Option<Value> {
        self.get_class_tags().remove(tag)
    }

    fn get_params(&self) -> Params;

    /// Updates hyper-parameters and returns the receiver.
    fn set_params(&mut self, params: &Params) -> Result<&mut dyn Estimator, EstimatorError>;

    /// Every attribute of the instance: hyper-parameters, fitted attributes
    /// and the internal fitted flag.
    fn attributes(&self) -> Attributes;

    /// The internal fitted flag.
    fn fit_state(&self) -> &FitState;

    /// Public fitted indicator, derived from [`fit_state`](Self::fit_state).
    fn is_fitted(&self) -> bool {
        self.fit_state().is_fitted()
    }

    /// Fits the estimator and returns the receiver.
    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError>;

    fn predict(&mut self, _args: &[Data]) -> Result<Data, EstimatorError> {
        Err(unsupported(self.name(), Operation::Predict))
    }

    fn predict_proba(&mut self, _args: &[Data]) -> Result<Data, EstimatorError> {
        Err(unsupported(self.name(), Operation::PredictProba))
    }

    fn decision_function(&mut self, _args: &[Data]) -> Result<Data, EstimatorError> {
        Err(unsupported(self.name(), Operation::DecisionFunction))
    }

    fn transform(&mut self, _args: &[Data]) -> Result<Data, EstimatorError> {
        Err(unsupported(self.name(), Operation::Transform))
    }

    fn inverse_transform(&mut self, _args: &[Data]) -> Result<Data, EstimatorError> {
        Err(unsupported(self.name(), Operation::InverseTransform))
    }

    fn fit_transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.fit(args)?;
        self.transform(args)
    }
}

fn unsupported(estimator: &str, operation: Operation) -> EstimatorError {
    EstimatorError::Unsupported {
        estimator: estimator.to_string(),
        operation: operation.name().to_string(),
    }
}

/// `Name(param=value, ...)`, the textual representation of an estimator.
impl fmt::Display for dyn Estimator + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, (name, value)) in self.get_params().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}

/// Static side of an estimator: its name, roles, declared capabilities,
/// tags, constructor parameters and canonical test configurations.
pub trait EstimatorClass: Estimator + Serialize + DeserializeOwned + Sized + 'static {
    const NAME: &'static str;
    const ROLES: &'static [Role];
    const CAPABILITIES: &'static [Operation];
    /// Constructor parameters that have no usable default.
    const REQUIRED_PARAMETERS: &'static [&'static str] = &[];

    fn class_tags() -> Tags;

    fn constructor_params() -> Vec<ParamSpec>;

    fn from_params(params: &Params) -> Result<Self, EstimatorError>;

    /// Parameter sets used to build test instances; the first one is the
    /// canonical test configuration.
    fn test_params() -> Vec<Params> {
        vec![Params::new()]
    }
}

/// Structural clone: a fresh, unfitted instance of the same type built from
/// the current hyper-parameters.
pub fn clone_estimator(estimator: &dyn Estimator) -> Result<Box<dyn Estimator>, EstimatorError> {
    (estimator.class().construct)(&estimator.get_params())
}
