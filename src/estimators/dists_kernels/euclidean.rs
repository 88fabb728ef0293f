//! Pairwise Euclidean distance between the rows of two tables.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{table_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::attributes_with;
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EuclideanDistanceConfig {
    /// Return squared distances.
    pub squared: bool,
}

impl HyperParameters for EuclideanDistanceConfig {
    const ESTIMATOR: &'static str = "EuclideanDistance";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::new("squared", false)]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        Ok(Self {
            squared: reader.bool("squared")?,
        })
    }

    fn to_params(&self) -> Params {
        value_map([("squared", self.squared)])
    }
}

/// Distance matrix `D[i, j] = ||X[i] - X2[j]||`.
///
/// `transform(X)` compares `X` with itself. There is no fitting step: `fit`
/// validates its input and marks the instance fitted, and `transform` works
/// on unfitted instances.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EuclideanDistance {
    config: EuclideanDistanceConfig,
    state: FitState,
}

impl EuclideanDistance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distances(&self, x: &Array2<f64>, x2: &Array2<f64>) -> Result<Array2<f64>, EstimatorError> {
        if x.ncols() != x2.ncols() {
            return Err(EstimatorError::invalid_input(
                "transform",
                format!("X has {} columns but X2 has {}", x.ncols(), x2.ncols()),
            ));
        }
        let squared = self.config.squared;
        Ok(Array2::from_shape_fn((x.nrows(), x2.nrows()), |(i, j)| {
            let d: f64 = x
                .row(i)
                .iter()
                .zip(x2.row(j).iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            if squared {
                d
            } else {
                d.sqrt()
            }
        }))
    }
}

impl Estimator for EuclideanDistance {
    fn class(&self) -> EstimatorType {
        EstimatorType::of::<Self>()
    }

    fn get_params(&self) -> Params {
        self.config.to_params()
    }

    fn set_params(&mut self, params: &Params) -> Result<&mut dyn Estimator, EstimatorError> {
        self.config = self.config.merged(params)?;
        Ok(self)
    }

    fn attributes(&self) -> Attributes {
        attributes_with(self.get_params(), &self.state, std::iter::empty())
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        table_arg(args, 0, "fit")?;
        self.state.mark_fitted();
        Ok(self)
    }

    fn transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        let x = table_arg(args, 0, "transform")?;
        let x2 = if args.len() > 1 {
            table_arg(args, 1, "transform")?
        } else {
            x
        };
        Ok(Data::Table(self.distances(x, x2)?))
    }
}

impl EstimatorClass for EuclideanDistance {
    const NAME: &'static str = "EuclideanDistance";
    const ROLES: &'static [Role] = &[Role::PairwiseTransformer];
    const CAPABILITIES: &'static [Operation] = &[Operation::Fit, Operation::Transform];

    fn class_tags() -> Tags {
        value_map([
            (tags::SYMMETRIC, Value::from(true)),
            (tags::PWTRAFO_TYPE, "distance".into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        EuclideanDistanceConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: EuclideanDistanceConfig::from_params(params)?,
            state: FitState::new(),
        })
    }

    fn test_params() -> Vec<Params> {
        vec![Params::new(), value_map([("squared", true)])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_distance_matrix() {
        let mut d = EuclideanDistance::new();
        let x = array![[0.0, 0.0], [3.0, 4.0]];
        let x2 = array![[0.0, 0.0]];
        let out = d.transform(&[Data::Table(x), Data::Table(x2)]).unwrap();
        assert_eq!(out, Data::Table(array![[0.0], [5.0]]));
    }

    #[test]
    fn test_single_argument_is_symmetric() {
        let mut d = EuclideanDistance::from_params(&value_map([("squared", true)])).unwrap();
        let Data::Table(out) = d
            .transform(&[Data::Table(array![[0.0, 1.0], [2.0, 3.0], [1.0, 1.0]])])
            .unwrap()
        else {
            panic!("expected table output");
        };
        assert_eq!(out, out.t());
        assert_eq!(out[[0, 1]], 8.0);
    }

    #[test]
    fn test_column_mismatch() {
        let d = EuclideanDistance::new();
        assert!(d
            .distances(&Array2::zeros((1, 2)), &Array2::zeros((1, 3)))
            .is_err());
    }

    #[test]
    fn test_fit_marks_fitted() {
        let mut d = EuclideanDistance::new();
        assert!(!d.is_fitted());
        d.fit(&[Data::Table(Array2::zeros((2, 2)))]).unwrap();
        assert!(d.is_fitted());
    }

    #[test]
    fn test_requires_table_input() {
        let mut d = EuclideanDistance::new();
        assert!(matches!(
            d.transform(&[Data::Series(array![1.0])]),
            Err(EstimatorError::InvalidInput { .. })
        ));
        assert!(d.transform(&[]).is_err());
    }
}
