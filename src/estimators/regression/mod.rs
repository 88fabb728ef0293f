//! Time series regressors.

pub mod dummy;

pub use dummy::{DummyRegressor, DummyRegressorConfig};
