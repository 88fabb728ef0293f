//! Seeded generators for synthetic test problems.
//!
//! All generators are deterministic for a given seed so that repeated calls
//! produce identical arguments.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strictly positive univariate series of `n_timepoints` values in `[1, 10)`
/// with a mild upward trend.
pub fn make_series(n_timepoints: usize, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array1::from_iter(
        (0..n_timepoints).map(|t| rng.gen_range(1.0..10.0) + 0.05 * t as f64),
    )
}

/// Panel of `n_instances` univariate series with `n_timepoints` each.
pub fn make_panel(n_instances: usize, n_timepoints: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n_instances, n_timepoints), |_| rng.gen_range(0.0..1.0))
}

/// Feature table of shape `(rows, cols)` with values in `[-1, 1)`.
pub fn make_table(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((rows, cols), |_| rng.gen_range(-1.0..1.0))
}

/// Classification problem with alternating labels; every class is present
/// whenever `n_instances >= n_classes`. Series of class `k` are shifted by
/// `k` so the classes are separable.
pub fn make_classification_problem(
    n_instances: usize,
    n_timepoints: usize,
    n_classes: usize,
    seed: u64,
) -> (Array2<f64>, Array1<i64>) {
    let n_classes = n_classes.max(1);
    let y = Array1::from_iter((0..n_instances).map(|i| (i % n_classes) as i64));
    let mut x = make_panel(n_instances, n_timepoints, seed);
    for (mut row, &label) in x.rows_mut().into_iter().zip(y.iter()) {
        row += label as f64;
    }
    (x, y)
}

/// Regression problem whose target is the mean of each series plus noise.
pub fn make_regression_problem(
    n_instances: usize,
    n_timepoints: usize,
    seed: u64,
) -> (Array2<f64>, Array1<f64>) {
    let x = make_panel(n_instances, n_timepoints, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let y = Array1::from_iter(
        x.rows()
            .into_iter()
            .map(|row| row.mean().unwrap_or(0.0) * 10.0 + rng.gen_range(-0.1..0.1)),
    );
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_deterministic_and_positive() {
        let a = make_series(50, 7);
        let b = make_series(50, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| v >= 1.0));
        assert_ne!(a, make_series(50, 8));
    }

    #[test]
    fn test_classification_problem_has_all_classes() {
        let (x, y) = make_classification_problem(10, 20, 2, 0);
        assert_eq!(x.shape(), &[10, 20]);
        assert_eq!(y.iter().filter(|&&l| l == 0).count(), 5);
        assert_eq!(y.iter().filter(|&&l| l == 1).count(), 5);
        // class 1 rows are shifted above class 0 rows
        assert!(x.row(1).iter().all(|&v| v >= 1.0));
        assert!(x.row(0).iter().all(|&v| v < 1.0));
    }

    #[test]
    fn test_regression_problem_shapes() {
        let (x, y) = make_regression_problem(8, 12, 3);
        assert_eq!(x.nrows(), y.len());
    }

    #[test]
    fn test_table_range() {
        let t = make_table(4, 3, 1);
        assert!(t.iter().all(|&v| (-1.0..1.0).contains(&v)));
    }
}
