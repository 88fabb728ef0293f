//! K-means clustering of equal-length series under the Euclidean distance.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{panel_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::attributes_with;
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesKMeansConfig {
    pub n_clusters: i64,
    pub max_iter: i64,
    /// Seed of the centroid initialisation; drawn from entropy when `None`.
    pub random_state: Option<i64>,
}

impl Default for TimeSeriesKMeansConfig {
    fn default() -> Self {
        Self {
            n_clusters: 2,
            max_iter: 10,
            random_state: None,
        }
    }
}

impl HyperParameters for TimeSeriesKMeansConfig {
    const ESTIMATOR: &'static str = "TimeSeriesKMeans";

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("n_clusters", 2i64),
            ParamSpec::new("max_iter", 10i64),
            ParamSpec::new("random_state", Value::None),
        ]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let config = Self {
            n_clusters: reader.int("n_clusters")?,
            max_iter: reader.int("max_iter")?,
            random_state: reader.opt_int("random_state")?,
        };
        for (name, value) in [("n_clusters", config.n_clusters), ("max_iter", config.max_iter)] {
            if value < 1 {
                return Err(EstimatorError::invalid_parameter(
                    Self::ESTIMATOR,
                    name,
                    format!("must be >= 1, got {}", value),
                ));
            }
        }
        Ok(config)
    }

    fn to_params(&self) -> Params {
        value_map([
            ("n_clusters", Value::from(self.n_clusters)),
            ("max_iter", self.max_iter.into()),
            ("random_state", self.random_state.into()),
        ])
    }
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

fn nearest(centroids: &Array2<f64>, row: ArrayView1<'_, f64>) -> usize {
    centroids
        .rows()
        .into_iter()
        .map(|c| squared_distance(c, row))
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(0, |(k, _)| k)
}

/// Lloyd's algorithm with centroids initialised from randomly chosen series.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimeSeriesKMeans {
    config: TimeSeriesKMeansConfig,
    cluster_centers_: Option<Array2<f64>>,
    labels_: Option<Array1<i64>>,
    n_iter_: Option<i64>,
    state: FitState,
}

impl TimeSeriesKMeans {
    pub fn new(n_clusters: i64) -> Result<Self, EstimatorError> {
        Self::from_params(&value_map([("n_clusters", n_clusters)]))
    }

    pub fn cluster_centers(&self) -> Option<&Array2<f64>> {
        self.cluster_centers_.as_ref()
    }

    fn rng(&self) -> StdRng {
        match self.config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed as u64),
            None => StdRng::from_entropy(),
        }
    }
}

impl Estimator for TimeSeriesKMeans {
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
                    "cluster_centers_",
                    self.cluster_centers_
                        .as_ref()
                        .map(|c| c.iter().copied().collect::<Vec<f64>>())
                        .into(),
                ),
                (
                    "labels_",
                    self.labels_
                        .as_ref()
                        .map(|l| l.iter().map(|&v| v as f64).collect::<Vec<f64>>())
                        .into(),
                ),
                ("n_iter_", self.n_iter_.into()),
            ],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = panel_arg(args, 0, "fit")?;
        let k = self.config.n_clusters as usize;
        if x.nrows() < k {
            return Err(EstimatorError::invalid_input(
                "fit",
                format!("n_clusters={} exceeds the {} series given", k, x.nrows()),
            ));
        }

        let mut rng = self.rng();
        let seeds = index::sample(&mut rng, x.nrows(), k).into_vec();
        let mut centers = x.select(Axis(0), &seeds);
        let mut labels = vec![0usize; x.nrows()];
        let mut n_iter = 0;

        for _ in 0..self.config.max_iter {
            n_iter += 1;
            let assigned: Vec<usize> = x.rows().into_iter().map(|r| nearest(&centers, r)).collect();
            let changed = assigned != labels;
            labels = assigned;
            for (c, mut center) in centers.rows_mut().into_iter().enumerate() {
                let members: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == c).collect();
                // empty clusters keep their previous center
                if let Some(mean) = x.select(Axis(0), &members).mean_axis(Axis(0)) {
                    center.assign(&mean);
                }
            }
            if !changed && n_iter > 1 {
                break;
            }
        }

        self.cluster_centers_ = Some(centers);
        self.labels_ = Some(labels.iter().map(|&l| l as i64).collect());
        self.n_iter_ = Some(n_iter);
        self.state.mark_fitted();
        Ok(self)
    }

    fn predict(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let centers = self
            .cluster_centers_
            .as_ref()
            .ok_or_else(|| EstimatorError::not_fitted(Self::NAME))?;
        let x = panel_arg(args, 0, "predict")?;
        if x.ncols() != centers.ncols() {
            return Err(EstimatorError::invalid_input(
                "predict",
                format!(
                    "expected series of length {}, got {}",
                    centers.ncols(),
                    x.ncols()
                ),
            ));
        }
        Ok(Data::Labels(
            x.rows()
                .into_iter()
                .map(|r| nearest(centers, r) as i64)
                .collect(),
        ))
    }
}

impl EstimatorClass for TimeSeriesKMeans {
    const NAME: &'static str = "TimeSeriesKMeans";
    const ROLES: &'static [Role] = &[Role::Clusterer];
    const CAPABILITIES: &'static [Operation] = &[Operation::Fit, Operation::Predict];

    fn class_tags() -> Tags {
        value_map([
            (tags::CAPABILITY_MULTIVARIATE, false),
            (tags::CAPABILITY_UNEQUAL_LENGTH, false),
            (tags::CAPABILITY_MISSING_VALUES, false),
            (tags::NON_DETERMINISTIC, false),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        TimeSeriesKMeansConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: TimeSeriesKMeansConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            Params::new(),
            value_map([("n_clusters", 3i64), ("max_iter", 5i64)]),
        ]
    }
}
