//! Ordinary least-squares linear fit of mean time against size.

use crate::error::FitError;
use crate::series::Series;

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    /// Change in mean time per unit of size.
    pub slope: f64,
    /// Mean time extrapolated to size zero.
    pub intercept: f64,
}

impl TrendModel {
    /// Evaluate the line at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }

    /// `samples` evenly spaced points of the line over `[lo, hi]`, both ends
    /// included.
    pub fn sample(&self, [lo, hi]: [f64; 2], samples: usize) -> Vec<(f64, f64)> {
        match samples {
            0 => Vec::new(),
            1 => vec![(lo, self.eval(lo))],
            n => {
                let step = (hi - lo) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = if i == n - 1 { hi } else { lo + step * i as f64 };
                        (x, self.eval(x))
                    })
                    .collect()
            }
        }
    }
}

/// Fit `mean ≈ slope * size + intercept` over every sample of `series`.
///
/// Error bounds are not used as weights.
pub fn fit(series: &Series) -> Result<TrendModel, FitError> {
    let n = series.len();
    if n < 2 {
        return Err(FitError::TooFewPoints {
            label: series.label.clone(),
            count: n,
        });
    }

    let count = n as f64;
    let mean_x = series.sizes.iter().map(|&x| x as f64).sum::<f64>() / count;
    let mean_y = series.means.iter().sum::<f64>() / count;

    // Centered sums keep the normal equations well conditioned.
    let (sxx, sxy) = series
        .points()
        .fold((0.0_f64, 0.0_f64), |(sxx, sxy), (x, y)| {
            let dx = x - mean_x;
            (dx.mul_add(dx, sxx), dx.mul_add(y - mean_y, sxy))
        });

    if sxx <= 0.0 {
        return Err(FitError::DegenerateSizes {
            label: series.label.clone(),
            size: series.sizes[0],
        });
    }

    let slope = sxy / sxx;
    Ok(TrendModel {
        slope,
        intercept: slope.mul_add(-mean_x, mean_y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(sizes: &[u64], means: &[f64]) -> Series {
        Series {
            label: "s".into(),
            sizes: sizes.to_vec(),
            means: means.to_vec(),
            errors: vec![0.0; sizes.len()],
        }
    }

    #[test]
    fn recovers_exact_line() {
        let model = fit(&series(&[1, 2, 3, 4, 5], &[2.0, 4.0, 6.0, 8.0, 10.0])).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-6);
        assert!(model.intercept.abs() < 1e-6);
    }

    #[test]
    fn matches_closed_form_on_noisy_data() {
        // Hand-computed: x̄ = 2.5, ȳ = 4.5, Sxx = 5, Sxy = 11.
        let model = fit(&series(&[1, 2, 3, 4], &[1.0, 4.0, 5.0, 8.0])).unwrap();
        assert!((model.slope - 2.2).abs() < 1e-9);
        assert!((model.intercept - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_too_few() {
        let err = fit(&series(&[5], &[312.8258])).unwrap_err();
        assert_eq!(
            err,
            FitError::TooFewPoints {
                label: "s".into(),
                count: 1
            }
        );
    }

    #[test]
    fn empty_series_is_too_few() {
        assert!(matches!(
            fit(&series(&[], &[])),
            Err(FitError::TooFewPoints { count: 0, .. })
        ));
    }

    #[test]
    fn identical_sizes_are_degenerate() {
        let err = fit(&series(&[7, 7, 7], &[1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(
            err,
            FitError::DegenerateSizes {
                label: "s".into(),
                size: 7
            }
        );
    }

    #[test]
    fn duplicate_sizes_count_as_independent_samples() {
        let model = fit(&series(&[1, 1, 3, 3], &[1.0, 3.0, 5.0, 7.0])).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-9);
        assert!((model.intercept - 0.0).abs() < 1e-9);
    }

    #[test]
    fn evaluates_beyond_samples() {
        let model = TrendModel {
            slope: 0.5,
            intercept: 10.0,
        };
        assert_eq!(model.eval(0.0), 10.0);
        assert_eq!(model.eval(20.0), 20.0);
    }

    #[test]
    fn sample_spans_domain_inclusively() {
        let model = TrendModel {
            slope: 1.0,
            intercept: 0.0,
        };
        let points = model.sample([0.0, 20.0], 100);
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(points[99], (20.0, 20.0));
        assert!(model.sample([0.0, 1.0], 0).is_empty());
    }
}
