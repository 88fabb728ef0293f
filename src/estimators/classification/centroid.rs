//! Nearest-centroid time series classification.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{labels_arg, panel_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::attributes_with;
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

const DISTANCES: &[&str] = &["euclidean", "manhattan"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestCentroidClassifierConfig {
    pub distance: String,
}

impl Default for NearestCentroidClassifierConfig {
    fn default() -> Self {
        Self {
            distance: "euclidean".to_string(),
        }
    }
}

impl HyperParameters for NearestCentroidClassifierConfig {
    const ESTIMATOR: &'static str = "NearestCentroidClassifier";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::new("distance", "euclidean")]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        Ok(Self {
            distance: reader.choice("distance", DISTANCES)?,
        })
    }

    fn to_params(&self) -> Params {
        value_map([("distance", self.distance.as_str())])
    }
}

/// Assigns each series to the class whose mean series is closest.
///
/// `predict_proba` is a softmax over negative centroid distances, one column
/// per class in ascending label order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NearestCentroidClassifier {
    config: NearestCentroidClassifierConfig,
    classes_: Option<Vec<i64>>,
    centroids_: Option<Array2<f64>>,
    state: FitState,
}

impl NearestCentroidClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> Option<&[i64]> {
        self.classes_.as_deref()
    }

    fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| x - y);
        match self.config.distance.as_str() {
            "manhattan" => diffs.map(f64::abs).sum(),
            _ => diffs.map(|d| d * d).sum::<f64>().sqrt(),
        }
    }

    /// Distances of every instance to every centroid, `(instances, classes)`.
    fn distances(&self, args: &[Data], operation: &str) -> Result<Array2<f64>, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let centroids = self
            .centroids_
            .as_ref()
            .ok_or_else(|| EstimatorError::not_fitted(Self::NAME))?;
        let x = panel_arg(args, 0, operation)?;
        if x.ncols() != centroids.ncols() {
            return Err(EstimatorError::invalid_input(
                operation,
                format!(
                    "expected series of length {}, got {}",
                    centroids.ncols(),
                    x.ncols()
                ),
            ));
        }
        Ok(Array2::from_shape_fn(
            (x.nrows(), centroids.nrows()),
            |(i, k)| self.distance(x.row(i), centroids.row(k)),
        ))
    }
}

impl Estimator for NearestCentroidClassifier {
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
        attributes_with(
            self.get_params(),
            &self.state,
            [
                (
                    "classes_",
                    self.classes_
                        .as_ref()
                        .map(|c| Value::Tuple(c.iter().map(|&l| Value::Int(l)).collect()))
                        .unwrap_or(Value::None),
                ),
                (
                    "centroids_",
                    self.centroids_
                        .as_ref()
                        .map(|c| c.iter().copied().collect::<Vec<f64>>())
                        .into(),
                ),
            ],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = panel_arg(args, 0, "fit")?;
        let y = labels_arg(args, 1, "fit")?;
        if x.nrows() != y.len() {
            return Err(EstimatorError::invalid_input(
                "fit",
                format!("{} series but {} labels", x.nrows(), y.len()),
            ));
        }
        let mut classes: Vec<i64> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let mut centroids = Array2::zeros((classes.len(), x.ncols()));
        for (k, &class) in classes.iter().enumerate() {
            let members: Vec<usize> = (0..y.len()).filter(|&i| y[i] == class).collect();
            let mean = x
                .select(Axis(0), &members)
                .mean_axis(Axis(0))
                .ok_or_else(|| EstimatorError::EmptyData(format!("class {} has no members", class)))?;
            centroids.row_mut(k).assign(&mean);
        }
        self.classes_ = Some(classes);
        self.centroids_ = Some(centroids);
        self.state.mark_fitted();
        Ok(self)
    }

    fn predict(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        let distances = self.distances(args, "predict")?;
        let classes = self.classes_.as_deref().unwrap_or_default();
        let labels = distances.rows().into_iter().map(|row| {
            let best = row
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(b.1))
                .map_or(0, |(k, _)| k);
            classes.get(best).copied().unwrap_or_default()
        });
        Ok(Data::Labels(Array1::from_iter(labels)))
    }

    fn predict_proba(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        let mut scores = self.distances(args, "predict_proba")?;
        for mut row in scores.rows_mut() {
            let min = row.iter().copied().fold(f64::INFINITY, f64::min);
            row.mapv_inplace(|d| (min - d).exp());
            let total = row.sum();
            row /= total;
        }
        Ok(Data::Table(scores))
    }
}

impl EstimatorClass for NearestCentroidClassifier {
    const NAME: &'static str = "NearestCentroidClassifier";
    const ROLES: &'static [Role] = &[Role::Classifier];
    const CAPABILITIES: &'static [Operation] =
        &[Operation::Fit, Operation::Predict, Operation::PredictProba];

    fn class_tags() -> Tags {
        value_map([
            (tags::CAPABILITY_MULTIVARIATE, false),
            (tags::CAPABILITY_UNEQUAL_LENGTH, false),
            (tags::CAPABILITY_MISSING_VALUES, false),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        NearestCentroidClassifierConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: NearestCentroidClassifierConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![Params::new(), value_map([("distance", "manhattan")])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::make_classification_problem;
    use ndarray::array;

    #[test]
    fn test_nearest_centroid_predict() {
        let x = array![[0.0, 0.0], [0.2, 0.0], [5.0, 5.0], [5.2, 4.8]];
        let y = array![3, 3, 7, 7];
        let mut clf = NearestCentroidClassifier::new();
        clf.fit(&[Data::Panel(x), Data::Labels(y)]).unwrap();
        assert_eq!(clf.classes(), Some(&[3, 7][..]));
        let pred = clf
            .predict(&[Data::Panel(array![[0.5, 0.5], [4.0, 4.0]])])
            .unwrap();
        assert_eq!(pred, Data::Labels(array![3, 7]));
    }

    #[test]
    fn test_predict_proba_rows_sum_to_one() {
        let (x, y) = make_classification_problem(6, 5, 2, 1);
        let mut clf = NearestCentroidClassifier::new();
        clf.fit(&[Data::Panel(x.clone()), Data::Labels(y)]).unwrap();
        let Data::Table(proba) = clf.predict_proba(&[Data::Panel(x)]).unwrap() else {
            panic!("expected table output");
        };
        assert_eq!(proba.shape(), &[6, 2]);
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_manhattan_distance() {
        let clf = NearestCentroidClassifier::from_params(&value_map([("distance", "manhattan")]))
            .unwrap();
        let d = clf.distance(array![0.0, 0.0].view(), array![3.0, -4.0].view());
        assert_eq!(d, 7.0);
    }

    #[test]
    fn test_label_count_mismatch() {
        let mut clf = NearestCentroidClassifier::new();
        let err = clf
            .fit(&[Data::Panel(Array2::zeros((3, 2))), Data::Labels(array![0, 1])])
            .unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInput { .. }));
    }

    #[test]
    fn test_length_mismatch_at_predict() {
        let mut clf = NearestCentroidClassifier::new();
        clf.fit(&[Data::Panel(Array2::zeros((2, 3))), Data::Labels(array![0, 1])])
            .unwrap();
        assert!(clf.predict(&[Data::Panel(Array2::zeros((1, 4)))]).is_err());
    }
}
