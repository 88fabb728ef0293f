//! Per-series summary statistics of a panel.

use crate::base::{
    Estimator, EstimatorClass, EstimatorType, FitState, HyperParameters, Operation, ParamReader,
    ParamSpec, Role,
};
use crate::data::{panel_arg, Data};
use crate::error::EstimatorError;
use crate::estimators::{attributes_with, mean_std};
use crate::tags;
use crate::value::{value_map, Attributes, Params, Tags, Value};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

const SUMMARY_FUNCTIONS: &[&str] = &["mean", "std", "min", "max", "median", "sum"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryTransformerConfig {
    /// Names of the statistics to compute, one output column each.
    pub summary_function: Vec<String>,
}

impl Default for SummaryTransformerConfig {
    fn default() -> Self {
        Self {
            summary_function: ["mean", "std", "min", "max"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

fn functions_value(functions: &[String]) -> Value {
    Value::Tuple(functions.iter().map(|f| Value::from(f.as_str())).collect())
}

impl HyperParameters for SummaryTransformerConfig {
    const ESTIMATOR: &'static str = "SummaryTransformer";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::new(
            "summary_function",
            functions_value(&Self::default().summary_function),
        )]
    }

    fn read(reader: &ParamReader<'_>) -> Result<Self, EstimatorError> {
        let summary_function = reader.str_list("summary_function")?;
        if summary_function.is_empty() {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "summary_function",
                "at least one summary function is required",
            ));
        }
        if let Some(unknown) = summary_function
            .iter()
            .find(|f| !SUMMARY_FUNCTIONS.contains(&f.as_str()))
        {
            return Err(EstimatorError::invalid_parameter(
                Self::ESTIMATOR,
                "summary_function",
                format!("unknown function '{}', expected one of {:?}", unknown, SUMMARY_FUNCTIONS),
            ));
        }
        Ok(Self { summary_function })
    }

    fn to_params(&self) -> Params {
        value_map([("summary_function", functions_value(&self.summary_function))])
    }
}

fn summarize(name: &str, row: ArrayView1<'_, f64>) -> f64 {
    match name {
        "mean" => mean_std(row.iter().copied()).0,
        "std" => mean_std(row.iter().copied()).1,
        "min" => row.iter().copied().fold(f64::INFINITY, f64::min),
        "max" => row.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        "sum" => row.sum(),
        "median" => {
            let mut sorted = row.to_vec();
            sorted.sort_by(f64::total_cmp);
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
        _ => f64::NAN,
    }
}

/// Summarizes every series of a panel into one row of statistics.
///
/// The transformer is stateless apart from the number of timepoints it last
/// summarized, which `transform` refreshes on each call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SummaryTransformer {
    config: SummaryTransformerConfig,
    n_timepoints_: Option<usize>,
    state: FitState,
}

impl SummaryTransformer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Estimator for SummaryTransformer {
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
            [(
                "n_timepoints_",
                self.n_timepoints_.map(|n| n as i64).into(),
            )],
        )
    }

    fn fit_state(&self) -> &FitState {
        &self.state
    }

    fn fit(&mut self, args: &[Data]) -> Result<&mut dyn Estimator, EstimatorError> {
        let x = panel_arg(args, 0, "fit")?;
        self.n_timepoints_ = Some(x.ncols());
        self.state.mark_fitted();
        Ok(self)
    }

    fn transform(&mut self, args: &[Data]) -> Result<Data, EstimatorError> {
        self.state.check_is_fitted(Self::NAME)?;
        let x = panel_arg(args, 0, "transform")?;
        self.n_timepoints_ = Some(x.ncols());
        let functions = &self.config.summary_function;
        let out = Array2::from_shape_fn((x.nrows(), functions.len()), |(i, j)| {
            summarize(&functions[j], x.row(i))
        });
        Ok(Data::Table(out))
    }
}

impl EstimatorClass for SummaryTransformer {
    const NAME: &'static str = "SummaryTransformer";
    const ROLES: &'static [Role] = &[Role::PanelTransformer];
    const CAPABILITIES: &'static [Operation] =
        &[Operation::Fit, Operation::Transform, Operation::FitTransform];

    fn class_tags() -> Tags {
        value_map([
            (tags::TRANSFORM_INPUT, Value::from("panel")),
            (tags::TRANSFORM_OUTPUT, "table".into()),
            (tags::INSTANCEWISE, true.into()),
            (tags::FIT_IN_TRANSFORM, true.into()),
            (tags::CAPABILITY_UNEQUAL_LENGTH, false.into()),
        ])
    }

    fn constructor_params() -> Vec<ParamSpec> {
        SummaryTransformerConfig::specs()
    }

    fn from_params(params: &Params) -> Result<Self, EstimatorError> {
        Ok(Self {
            config: SummaryTransformerConfig::from_params(params)?,
            ..Self::default()
        })
    }

    fn test_params() -> Vec<Params> {
        vec![
            Params::new(),
            value_map([(
                "summary_function",
                Value::Tuple(vec!["median".into(), "sum".into()]),
            )]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_summary_default_functions() {
        let mut t = SummaryTransformer::new();
        let x = Data::Panel(array![[1.0, 2.0, 3.0], [2.0, 2.0, 2.0]]);
        let Data::Table(out) = t.fit_transform(&[x]).unwrap() else {
            panic!("expected table output");
        };
        assert_eq!(out.shape(), &[2, 4]);
        assert_eq!(out[[0, 0]], 2.0);
        assert_eq!(out[[0, 2]], 1.0);
        assert_eq!(out[[0, 3]], 3.0);
        assert_eq!(out[[1, 1]], 0.0);
    }

    #[test]
    fn test_summary_median() {
        assert_eq!(summarize("median", array![3.0, 1.0, 2.0, 10.0].view()), 2.5);
        assert_eq!(summarize("median", array![3.0, 1.0, 2.0].view()), 2.0);
    }

    #[test]
    fn test_summary_transform_refreshes_state() {
        let mut t = SummaryTransformer::new();
        t.fit(&[Data::Panel(Array2::zeros((2, 5)))]).unwrap();
        t.transform(&[Data::Panel(Array2::zeros((2, 7)))]).unwrap();
        assert_eq!(t.attributes().get("n_timepoints_"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_summary_rejects_unknown_function() {
        let params = value_map([("summary_function", Value::Tuple(vec!["kurtosis".into()]))]);
        assert!(SummaryTransformer::from_params(&params).is_err());
    }
}
