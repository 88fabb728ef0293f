//! Pairwise distances and kernels.

pub mod euclidean;

pub use euclidean::{EuclideanDistance, EuclideanDistanceConfig};
