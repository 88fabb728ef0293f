//! The estimator contract.
//!
//! - [`Estimator`]: object-safe instance interface (params, tags, fitted
//!   state, `fit` and the capability-named operations).
//! - [`EstimatorClass`]: static side of a concrete type (name, roles,
//!   declared capabilities, constructor parameters, test configurations).
//! - [`EstimatorType`]: registration-table descriptor derived from an
//!   `EstimatorClass`, used by the registry and the conformance rules.

pub mod descriptor;
pub mod estimator;
pub mod fit_state;
pub mod operation;
pub mod params;
pub mod role;

pub use descriptor::EstimatorType;
pub use estimator::{clone_estimator, AsAny, Estimator, EstimatorClass, Persist};
pub use fit_state::FitState;
pub use operation::Operation;
pub use params::{HyperParameters, ParamReader, ParamSpec};
pub use role::{default_role_sets, validate_role_set, Role};
