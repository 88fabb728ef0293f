//! Series and panel transformers.

pub mod exponent;
pub mod lag;
pub mod minmax;
pub mod standard;
pub mod summary;

pub use exponent::{ExponentTransformer, ExponentTransformerConfig};
pub use lag::{LagTransformer, LagTransformerConfig};
pub use minmax::{MinMaxScaler, MinMaxScalerConfig};
pub use standard::{StandardScaler, StandardScalerConfig};
pub use summary::{SummaryTransformer, SummaryTransformerConfig};
