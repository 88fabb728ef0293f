//! Input and output containers passed to estimator operations.
//!
//! Every operation takes a slice of [`Data`] arguments and returns a single
//! [`Data`]. The variants mirror the input shapes estimators declare through
//! their `scitype:*` tags.

use crate::error::EstimatorError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

pub mod synthetic;

/// A single argument or result of an estimator operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Data {
    /// A univariate time series.
    Series(Array1<f64>),
    /// A collection of equal-length univariate series, shape `(instances, timepoints)`.
    Panel(Array2<f64>),
    /// A feature table, shape `(rows, features)`.
    Table(Array2<f64>),
    /// Integer class or cluster labels.
    Labels(Array1<i64>),
    /// Forecasting horizon as steps ahead of the end of the training series.
    Horizon(Vec<i64>),
}

impl Data {
    pub fn kind(&self) -> &'static str {
        match self {
            Data::Series(_) => "series",
            Data::Panel(_) => "panel",
            Data::Table(_) => "table",
            Data::Labels(_) => "labels",
            Data::Horizon(_) => "horizon",
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Data::Series(s) => vec![s.len()],
            Data::Panel(p) | Data::Table(p) => p.shape().to_vec(),
            Data::Labels(l) => vec![l.len()],
            Data::Horizon(h) => vec![h.len()],
        }
    }

    /// Row-major values widened to `f64`, for numeric comparison.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        match self {
            Data::Series(s) => s.to_vec(),
            Data::Panel(p) | Data::Table(p) => p.iter().copied().collect(),
            Data::Labels(l) => l.iter().map(|&v| v as f64).collect(),
            Data::Horizon(h) => h.iter().map(|&v| v as f64).collect(),
        }
    }
}

/// Returns the argument at `index`, or an input error naming the operation.
pub fn arg<'a>(args: &'a [Data], index: usize, operation: &str) -> Result<&'a Data, EstimatorError> {
    args.get(index).ok_or_else(|| {
        EstimatorError::invalid_input(
            operation,
            format!("expected at least {} argument(s), got {}", index + 1, args.len()),
        )
    })
}

pub fn series_arg<'a>(
    args: &'a [Data],
    index: usize,
    operation: &str,
) -> Result<&'a Array1<f64>, EstimatorError> {
    match arg(args, index, operation)? {
        Data::Series(s) if s.is_empty() => Err(EstimatorError::EmptyData(format!(
            "`{}` received an empty series",
            operation
        ))),
        Data::Series(s) => Ok(s),
        other => Err(unexpected(operation, "series", other)),
    }
}

pub fn panel_arg<'a>(
    args: &'a [Data],
    index: usize,
    operation: &str,
) -> Result<&'a Array2<f64>, EstimatorError> {
    match arg(args, index, operation)? {
        Data::Panel(p) if p.nrows() == 0 => Err(EstimatorError::EmptyData(format!(
            "`{}` received an empty panel",
            operation
        ))),
        Data::Panel(p) => Ok(p),
        other => Err(unexpected(operation, "panel", other)),
    }
}

pub fn table_arg<'a>(
    args: &'a [Data],
    index: usize,
    operation: &str,
) -> Result<&'a Array2<f64>, EstimatorError> {
    match arg(args, index, operation)? {
        Data::Table(t) => Ok(t),
        other => Err(unexpected(operation, "table", other)),
    }
}

pub fn labels_arg<'a>(
    args: &'a [Data],
    index: usize,
    operation: &str,
) -> Result<&'a Array1<i64>, EstimatorError> {
    match arg(args, index, operation)? {
        Data::Labels(l) => Ok(l),
        other => Err(unexpected(operation, "labels", other)),
    }
}

pub fn horizon_arg<'a>(
    args: &'a [Data],
    index: usize,
    operation: &str,
) -> Result<&'a [i64], EstimatorError> {
    match arg(args, index, operation)? {
        Data::Horizon(h) if h.iter().any(|&step| step < 1) => Err(EstimatorError::invalid_input(
            operation,
            "forecasting horizon steps must be >= 1",
        )),
        Data::Horizon(h) => Ok(h),
        other => Err(unexpected(operation, "horizon", other)),
    }
}

fn unexpected(operation: &str, expected: &str, got: &Data) -> EstimatorError {
    EstimatorError::invalid_input(
        operation,
        format!("expected {}, got {}", expected, got.kind()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_flat_vec_is_row_major() {
        let table = Data::Table(array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(table.to_flat_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(table.shape(), vec![2, 2]);
    }

    #[test]
    fn test_series_arg_rejects_wrong_kind() {
        let args = vec![Data::Horizon(vec![1])];
        let err = series_arg(&args, 0, "fit").unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInput { .. }));
        assert!(err.to_string().contains("expected series, got horizon"));
    }

    #[test]
    fn test_series_arg_rejects_empty() {
        let args = vec![Data::Series(Array1::zeros(0))];
        assert!(matches!(
            series_arg(&args, 0, "fit"),
            Err(EstimatorError::EmptyData(_))
        ));
    }

    #[test]
    fn test_missing_argument() {
        let err = arg(&[], 0, "predict").unwrap_err();
        assert!(err.to_string().contains("expected at least 1 argument(s), got 0"));
    }

    #[test]
    fn test_horizon_rejects_non_positive_steps() {
        let args = vec![Data::Horizon(vec![0, 1])];
        assert!(horizon_arg(&args, 0, "predict").is_err());
    }
}
