//! The conformance harness.
//!
//! - [`config`]: vocabularies, exclusion tables and comparison settings.
//! - [`synth`], [`args`]: test instances and synthetic arguments.
//! - [`class_rules`], [`instance_rules`]: the rules themselves, collected
//!   into named tables in [`rules`].
//! - [`suite`]: enumeration of (estimator, rule) cases and the
//!   [`ConformanceReport`] they produce.

pub mod args;
pub mod capability;
pub mod class_rules;
pub mod config;
pub mod instance_rules;
pub mod report;
pub mod rules;
pub mod suite;
pub mod synth;
pub mod testing;

pub use args::make_args;
pub use capability::{has_capability, invoke};
pub use config::ConformanceConfig;
pub use report::{CaseReport, ConformanceReport, Outcome};
pub use rules::{rule_names, ClassRule, InstanceRule, CLASS_RULES, INSTANCE_RULES};
pub use suite::{check_estimator, ConformanceSuite};
pub use synth::{create_test_instance, create_test_instances_and_names};
pub use testing::{assert_array_almost_equal, set_random_state};
