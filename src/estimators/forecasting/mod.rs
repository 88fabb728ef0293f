//! Forecasters.

pub mod compose;
pub mod naive;

pub use compose::{TransformedTargetForecaster, TransformedTargetForecasterConfig};
pub use naive::{NaiveForecaster, NaiveForecasterConfig};
