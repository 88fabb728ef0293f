//! # estimator-checks
//!
//! Conformance checks for estimators that follow a fit / predict / transform
//! lifecycle.
//!
//! Every estimator type is registered in an explicit [`Registry`]. The
//! [`ConformanceSuite`] enumerates each registered type against a fixed set
//! of named rules. Some rules run once per type, others once per canonical
//! test instance. The result is a [`ConformanceReport`] with one pass, fail
//! or error outcome per case.
//!
//! ## Quick Start
//!
//! ```rust
//! use estimator_checks::checks::{check_estimator, ConformanceConfig};
//! use estimator_checks::base::EstimatorType;
//! use estimator_checks::estimators::forecasting::NaiveForecaster;
//!
//! let ty = EstimatorType::of::<NaiveForecaster>();
//! let report = check_estimator(&ty, &ConformanceConfig::default());
//! assert!(report.is_success(), "{}", report);
//! ```
//!
//! ## Module Structure
//!
//! - `base` — the `Estimator` trait, roles, operations and type descriptors
//! - `checks` — rules, synthetic arguments, the suite and its report
//! - `data` — argument containers and seeded synthetic data
//! - `estimators` — reference estimators for every role
//! - `registry` — the registration table
//! - `tags` — the tag vocabulary
//! - `value` — dynamically typed parameter, tag and attribute values
//! - `error` — estimator and harness error types

pub mod base;
pub mod checks;
pub mod data;
pub mod error;
pub mod estimators;
pub mod registry;
pub mod tags;
pub mod value;

pub use base::{Estimator, EstimatorClass, EstimatorType, Operation, Role};
pub use checks::{check_estimator, ConformanceConfig, ConformanceReport, ConformanceSuite};
pub use data::Data;
pub use error::{CheckError, CheckResult, EstimatorError};
pub use registry::Registry;
pub use value::Value;
