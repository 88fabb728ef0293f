//! Time series classifiers.

pub mod centroid;

pub use centroid::{NearestCentroidClassifier, NearestCentroidClassifierConfig};
