//! Estimator registry: the explicit table of types the conformance suite
//! enumerates.

use crate::base::{default_role_sets, validate_role_set, EstimatorClass, EstimatorType};
use crate::error::RegistryError;
use crate::estimators::{
    annotation::ZScoreAnnotator,
    classification::NearestCentroidClassifier,
    clustering::TimeSeriesKMeans,
    dists_kernels::EuclideanDistance,
    forecasting::{NaiveForecaster, TransformedTargetForecaster},
    regression::DummyRegressor,
    transformations::{
        ExponentTransformer, LagTransformer, MinMaxScaler, StandardScaler, SummaryTransformer,
    },
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Name-keyed set of estimator types. Iteration is ordered by name so case
/// ids are stable across runs.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    types: BTreeMap<&'static str, EstimatorType>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type. Names must be unique and the declared role set must be
    /// structurally valid.
    pub fn register(&mut self, ty: EstimatorType) -> Result<&mut Self, RegistryError> {
        if self.types.contains_key(ty.name) {
            return Err(RegistryError::DuplicateName(ty.name.to_string()));
        }
        let (base, transformer) = default_role_sets();
        validate_role_set(ty.roles, &base, &transformer).map_err(|reason| {
            RegistryError::InvalidRoleSet {
                name: ty.name.to_string(),
                reason,
            }
        })?;
        debug!(estimator = ty.name, roles = ?ty.roles, "registered estimator type");
        self.types.insert(ty.name, ty);
        Ok(self)
    }

    /// Builder form of [`register`](Self::register) for a static type.
    pub fn with<T: EstimatorClass>(mut self) -> Result<Self, RegistryError> {
        self.register(EstimatorType::of::<T>())?;
        Ok(self)
    }

    /// Every registered type whose name is not in `exclude`, ordered by name.
    pub fn all_estimators(&self, exclude: &BTreeSet<String>) -> Vec<EstimatorType> {
        self.types
            .values()
            .filter(|ty| !exclude.contains(ty.name))
            .copied()
            .collect()
    }

    /// Alias of [`all_estimators`](Self::all_estimators).
    pub fn list_types(&self, exclude: &BTreeSet<String>) -> Vec<EstimatorType> {
        self.all_estimators(exclude)
    }

    /// Names of [`all_estimators`](Self::all_estimators), in the same order.
    pub fn all_estimator_names(&self, exclude: &BTreeSet<String>) -> Vec<&'static str> {
        self.all_estimators(exclude)
            .into_iter()
            .map(|ty| ty.name)
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<EstimatorType> {
        self.types.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Registry of the reference estimators shipped with the crate.
pub fn builtin() -> Result<Registry, RegistryError> {
    let registry = Registry::new()
        .with::<StandardScaler>()?
        .with::<MinMaxScaler>()?
        .with::<ExponentTransformer>()?
        .with::<LagTransformer>()?
        .with::<SummaryTransformer>()?
        .with::<NaiveForecaster>()?
        .with::<TransformedTargetForecaster>()?
        .with::<NearestCentroidClassifier>()?
        .with::<DummyRegressor>()?
        .with::<TimeSeriesKMeans>()?
        .with::<ZScoreAnnotator>()?
        .with::<EuclideanDistance>()?;
    info!(estimators = registry.len(), "builtin registry ready");
    Ok(registry)
}
