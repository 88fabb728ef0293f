//! Capability tag names.
//!
//! Tags are declared metadata describing an estimator's behavior or input
//! requirements. [`VALID_TAGS`] is the vocabulary the default conformance
//! configuration accepts.

/// `transform` fits on each input it receives, so it updates state.
pub const FIT_IN_TRANSFORM: &str = "fit-in-transform";
/// `predict` fits on each input it receives, so it updates state.
pub const FIT_IN_PREDICT: &str = "fit-in-predict";
/// Input kind of `fit`/`transform` for transformers: `series`, `panel` or `table`.
pub const TRANSFORM_INPUT: &str = "scitype:transform-input";
/// Output kind of `transform`.
pub const TRANSFORM_OUTPUT: &str = "scitype:transform-output";
pub const INSTANCEWISE: &str = "scitype:instancewise";
pub const SCITYPE_Y: &str = "scitype:y";
pub const TRANSFORM_SAME_INDEX: &str = "transform-returns-same-time-index";
pub const UNIVARIATE_ONLY: &str = "univariate-only";
pub const MULTIVARIATE_ONLY: &str = "multivariate-only";
pub const REQUIRES_FH_IN_FIT: &str = "requires-fh-in-fit";
pub const HANDLES_MISSING_DATA: &str = "handles-missing-data";
pub const SKIP_INVERSE_TRANSFORM: &str = "skip-inverse-transform";
pub const IGNORES_EXOGENEOUS_X: &str = "ignores-exogeneous-X";
pub const CAPABILITY_PRED_INT: &str = "capability:pred_int";
pub const CAPABILITY_MULTIVARIATE: &str = "capability:multivariate";
pub const CAPABILITY_UNEQUAL_LENGTH: &str = "capability:unequal_length";
pub const CAPABILITY_MISSING_VALUES: &str = "capability:missing_values";
pub const NON_DETERMINISTIC: &str = "non-deterministic";
/// Pairwise transformers: whether `transform(X, X2)` is symmetric.
pub const SYMMETRIC: &str = "symmetric";
pub const PWTRAFO_TYPE: &str = "pwtrafo_type";

pub const VALID_TAGS: &[&str] = &[
    FIT_IN_TRANSFORM,
    FIT_IN_PREDICT,
    TRANSFORM_INPUT,
    TRANSFORM_OUTPUT,
    INSTANCEWISE,
    SCITYPE_Y,
    TRANSFORM_SAME_INDEX,
    UNIVARIATE_ONLY,
    MULTIVARIATE_ONLY,
    REQUIRES_FH_IN_FIT,
    HANDLES_MISSING_DATA,
    SKIP_INVERSE_TRANSFORM,
    IGNORES_EXOGENEOUS_X,
    CAPABILITY_PRED_INT,
    CAPABILITY_MULTIVARIATE,
    CAPABILITY_UNEQUAL_LENGTH,
    CAPABILITY_MISSING_VALUES,
    NON_DETERMINISTIC,
    SYMMETRIC,
    PWTRAFO_TYPE,
];
