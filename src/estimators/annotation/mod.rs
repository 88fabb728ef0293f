//! Series annotators.

pub mod zscore;

pub use zscore::{ZScoreAnnotator, ZScoreAnnotatorConfig};
