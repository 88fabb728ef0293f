//! Time series clusterers.

pub mod kmeans;

pub use kmeans::{TimeSeriesKMeans, TimeSeriesKMeansConfig};
