//! Type descriptors: the registration-table entry for an estimator type.

use super::estimator::{Estimator, EstimatorClass};
use super::operation::Operation;
use super::params::ParamSpec;
use super::role::Role;
use crate::error::EstimatorError;
use crate::value::{Params, Tags};
use std::any::TypeId;
use std::fmt;

/// Everything the harness needs to know about an estimator type without an
/// instance: identity, declared roles and capabilities, tags, constructor
/// parameters, and the factories used to build and restore instances.
///
/// [`EstimatorType::of`] derives a descriptor from an [`EstimatorClass`];
/// the fields are public so hand-assembled descriptors can be registered.
#[derive(Clone, Copy)]
pub struct EstimatorType {
    pub name: &'static str,
    pub type_id: TypeId,
    pub roles: &'static [Role],
    pub capabilities: &'static [Operation],
    pub required_parameters: &'static [&'static str],
    pub class_tags: fn() -> Tags,
    pub constructor_params: fn() -> Vec<ParamSpec>,
    pub test_params: fn() -> Vec<Params>,
    pub construct: fn(&Params) -> Result<Box<dyn Estimator>, EstimatorError>,
    pub load: fn(&[u8]) -> Result<Box<dyn Estimator>, EstimatorError>,
}

impl EstimatorType {
    pub fn of<T: EstimatorClass>() -> Self {
        Self {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
            roles: T::ROLES,
            capabilities: T::CAPABILITIES,
            required_parameters: T::REQUIRED_PARAMETERS,
            class_tags: T::class_tags,
            constructor_params: T::constructor_params,
            test_params: T::test_params,
            construct: construct::<T>,
            load: load::<T>,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn declares(&self, operation: Operation) -> bool {
        self.capabilities.contains(&operation)
    }

    pub fn constructor_param_names(&self) -> Vec<&'static str> {
        (self.constructor_params)().iter().map(|p| p.name).collect()
    }
}

fn construct<T: EstimatorClass>(params: &Params) -> Result<Box<dyn Estimator>, EstimatorError> {
    Ok(Box::new(T::from_params(params)?))
}

fn load<T: EstimatorClass>(bytes: &[u8]) -> Result<Box<dyn Estimator>, EstimatorError> {
    let estimator: T = bincode::deserialize(bytes)?;
    Ok(Box::new(estimator))
}

impl fmt::Debug for EstimatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EstimatorType")
            .field("name", &self.name)
            .field("roles", &self.roles)
            .field("capabilities", &self.capabilities)
            .field("required_parameters", &self.required_parameters)
            .finish_non_exhaustive()
    }
}

impl PartialEq for EstimatorType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.type_id == other.type_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::forecasting::NaiveForecaster;
    use crate::estimators::transformations::LagTransformer;

    #[test]
    fn test_of_captures_static_metadata() {
        let ty = EstimatorType::of::<NaiveForecaster>();
        assert_eq!(ty.name, "NaiveForecaster");
        assert_eq!(ty.type_id, TypeId::of::<NaiveForecaster>());
        assert!(ty.has_role(Role::Forecaster));
        assert!(ty.declares(Operation::Predict));
        assert!(ty.constructor_param_names().contains(&"strategy"));
    }

    #[test]
    fn test_construct_and_load_round_trip() {
        let ty = EstimatorType::of::<NaiveForecaster>();
        let est = (ty.construct)(&Params::new()).unwrap();
        let bytes = est.to_bytes().unwrap();
        let restored = (ty.load)(&bytes).unwrap();
        assert_eq!(restored.get_params(), est.get_params());
        assert_eq!(restored.as_ref().as_any().type_id(), ty.type_id);
    }

    #[test]
    fn test_construct_propagates_missing_required_parameter() {
        let ty = EstimatorType::of::<LagTransformer>();
        assert!(matches!(
            (ty.construct)(&Params::new()),
            Err(EstimatorError::MissingParameter { .. })
        ));
    }
}
