//! Model selection: scoring a fit and picking k from a range.

use std::f64::consts::PI;

use super::ckmeans::{fit_for_k, validate_k, CkmeansFit};
use super::dp::Optimizer;
use super::sample::{count_distinct_sorted, SortedSample};
use crate::error::{Error, Result};

/// Criterion used to pick the cluster count from a range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMethod {
    /// Bayesian Information Criterion; lower is better. The default.
    #[default]
    Bic,
    /// Gap statistic of Tibshirani, Walther, and Hastie. Not implemented;
    /// selecting it is an error.
    GapStatistic,
    /// Method of Pham, Dimov, and Nguyen. Not implemented; selecting it is
    /// an error.
    PhamDimovNguyen,
}

/// Variance at or below this is treated as zero when scoring a cluster.
const ZERO_VARIANCE: f64 = 1e-8;

/// Bayesian Information Criterion of a clustering fit on `x`.
///
/// Each cluster contributes a Gaussian log-likelihood from its empirical
/// mean and variance. A cluster with (numerically) zero variance is instead
/// modeled as uniform over an interval bridging to its sorted neighbors:
/// midpoints to the adjacent values when the cluster holds a single distinct
/// value, its own extreme members otherwise, and the sorted sample extremes
/// at the outer edges. The penalty charges three parameters per cluster
/// (mean, variance, mixing weight) minus one for weight normalization.
///
/// # Errors
///
/// [`Error::NonFiniteLikelihood`] when a contribution diverges (a zero-width
/// cluster interval, possible only with corrupted input), and
/// [`Error::InvalidParameter`] when `fit` does not match `x` in length.
pub fn bic(x: &[f64], fit: &CkmeansFit) -> Result<f64> {
    let n = x.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if fit.sizes.iter().sum::<usize>() != n {
        return Err(Error::InvalidParameter {
            name: "fit",
            message: "cluster sizes do not sum to the sample length",
        });
    }
    if fit.sizes.iter().any(|&size| size == 0) {
        return Err(Error::InvalidParameter {
            name: "fit",
            message: "cluster sizes must be non-zero",
        });
    }

    let k = fit.sizes.len();
    let mut sorted = x.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mut ll = 0.0;
    let mut left = 0usize;
    for m in 0..k {
        let size = fit.sizes[m];
        let right = left + size - 1;
        let within = fit.within_ss[m];
        let variance = if size > 1 {
            within / (size - 1) as f64
        } else {
            0.0
        };

        if variance <= ZERO_VARIANCE {
            let members = &sorted[left..=right];
            let (lo, hi) = if count_distinct_sorted(members) == 1 {
                (
                    if left > 0 {
                        0.5 * (sorted[left - 1] + sorted[left])
                    } else {
                        sorted[0]
                    },
                    if right < n - 1 {
                        0.5 * (sorted[right] + sorted[right + 1])
                    } else {
                        sorted[n - 1]
                    },
                )
            } else {
                (sorted[left], sorted[right])
            };
            let width = hi - lo;
            ll += size as f64 * (1.0 / width / size as f64).ln();
        } else {
            ll += -within / (2.0 * variance);
            ll += size as f64
                * ((size as f64 / n as f64).ln() - 0.5 * (2.0 * PI * variance).ln());
        }

        if !ll.is_finite() {
            return Err(Error::NonFiniteLikelihood { k });
        }
        left = right + 1;
    }

    // Three parameters per cluster minus the weight-normalization constraint.
    let n_params = (3 * k - 1) as f64;
    Ok(-2.0 * ll + n_params * (n as f64).ln())
}

/// Fit every candidate k in `min..=max` and keep the one with the lowest
/// score under `method`.
///
/// One optimizer pass at the largest feasible candidate serves every k: the
/// columns a smaller k backtracks through are complete in the shared tables.
/// Ties keep the smaller k.
pub(crate) fn choose_k<O: Optimizer>(
    optimizer: &O,
    method: SelectionMethod,
    x: &[f64],
    sample: &SortedSample,
    min: usize,
    max: usize,
) -> Result<CkmeansFit> {
    match method {
        SelectionMethod::Bic => {}
        SelectionMethod::GapStatistic => {
            return Err(Error::Unsupported {
                method: "gap statistic",
            })
        }
        SelectionMethod::PhamDimovNguyen => {
            return Err(Error::Unsupported {
                method: "Pham-Dimov-Nguyen",
            })
        }
    }

    if min > max {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "range minimum exceeds maximum",
        });
    }
    validate_k(min, sample.distinct)?;
    // Candidates beyond the distinct-value count have no valid partition.
    let max = max.min(sample.distinct);

    let tables = optimizer.optimize(&sample.values, max);
    let mut best: Option<(f64, CkmeansFit)> = None;
    for k in min..=max {
        let fit = fit_for_k(x, sample, &tables, k)?;
        let score = bic(x, &fit)?;
        if best.as_ref().map_or(true, |(s, _)| score < *s) {
            best = Some((score, fit));
        }
    }

    best.map(|(_, fit)| fit).ok_or(Error::Internal {
        message: "candidate range produced no fit",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Ckmeans;

    /// Two tight, well-separated components (means near 3 and 23).
    fn two_gaussians() -> Vec<f64> {
        vec![
            2.1, 22.2, 2.4, 22.5, 2.6, 22.6, 2.7, 22.8, 2.9, 22.9, 3.0, 23.1, 3.1, 23.2, 3.3,
            23.4, 3.5, 23.6, 3.8, 23.9,
        ]
    }

    #[test]
    fn test_bic_prefers_two_components() {
        let x = two_gaussians();
        let fit = Ckmeans::k_range(1, 10).fit(&x).unwrap();

        assert_eq!(fit.k(), 2);
        assert_eq!(fit.sizes, vec![10, 10]);
        assert!((fit.centers[0] - 3.0).abs() < 0.5);
        assert!((fit.centers[1] - 23.0).abs() < 0.5);
    }

    #[test]
    fn test_bic_ranks_correct_k_lowest() {
        let x = two_gaussians();
        let sample = SortedSample::new(&x);
        let tables = crate::cluster::DynamicProgram.optimize(&sample.values, 4);

        let scores: Vec<f64> = (1..=4)
            .map(|k| {
                let fit = fit_for_k(&x, &sample, &tables, k).unwrap();
                bic(&x, &fit).unwrap()
            })
            .collect();

        assert!(scores[1] < scores[0]);
        assert!(scores[1] < scores[2]);
        assert!(scores[1] < scores[3]);
    }

    #[test]
    fn test_bic_finite_on_gaussian_branch() {
        let x = [1.0, 1.5, 2.0, 10.0, 10.5, 11.0];
        let fit = Ckmeans::new(2).fit(&x).unwrap();
        let score = bic(&x, &fit).unwrap();
        assert!(score.is_finite());
    }

    #[test]
    fn test_bic_zero_variance_branches() {
        // Repeated values force zero-variance clusters through the uniform
        // branch; single-point clusters take the midpoint intervals.
        let x = [1.0, 1.0, 1.0, 4.0, 9.0, 9.0, 9.0];
        let fit = Ckmeans::new(3).fit(&x).unwrap();

        assert_eq!(fit.sizes, vec![3, 1, 3]);
        assert!(fit.within_ss.iter().all(|&ss| ss == 0.0));
        let score = bic(&x, &fit).unwrap();
        assert!(score.is_finite());
    }

    #[test]
    fn test_bic_near_duplicate_cluster_uses_own_extremes() {
        // Clusters whose members differ but whose variance is numerically
        // zero fall back to a uniform interval over their own extreme
        // members rather than midpoints to the neighbors.
        let x = [1.0, 1.0 + 1e-9, 5.0, 9.0, 9.0 + 1e-9];
        let fit = Ckmeans::new(3).fit(&x).unwrap();

        assert_eq!(fit.sizes, vec![2, 1, 2]);
        assert!(fit.within_ss[0] > 0.0 && fit.within_ss[0] < 1e-8);
        let score = bic(&x, &fit).unwrap();
        assert!(score.is_finite());
    }

    #[test]
    fn test_bic_constant_sample_is_degenerate() {
        let x = [5.0, 5.0, 5.0, 5.0];
        let fit = Ckmeans::new(1).fit(&x).unwrap();

        // A single zero-width cluster has no valid uniform interval.
        assert!(matches!(
            bic(&x, &fit).unwrap_err(),
            Error::NonFiniteLikelihood { k: 1 }
        ));
    }

    #[test]
    fn test_bic_rejects_mismatched_fit() {
        let x = [1.0, 2.0, 9.0, 10.0];
        let fit = Ckmeans::new(2).fit(&x).unwrap();
        assert!(matches!(
            bic(&x[..3], &fit).unwrap_err(),
            Error::InvalidParameter { name: "fit", .. }
        ));
    }

    #[test]
    fn test_range_clamped_to_distinct_values() {
        // Six distinct values; candidates 7..=10 are infeasible and skipped.
        let x = [1.0, 1.0, 2.0, 3.0, 10.0, 10.0, 11.0, 12.0];
        let fit = Ckmeans::k_range(1, 10).fit(&x).unwrap();

        assert!(fit.k() >= 1 && fit.k() <= 6);
        assert_eq!(fit.sizes.iter().sum::<usize>(), x.len());
    }

    #[test]
    fn test_range_min_above_distinct_values() {
        let x = [1.0, 1.0, 2.0];
        assert!(matches!(
            Ckmeans::k_range(3, 5).fit(&x).unwrap_err(),
            Error::InvalidClusterCount {
                requested: 3,
                distinct: 2
            }
        ));
    }

    #[test]
    fn test_inverted_range() {
        let x = [1.0, 2.0, 3.0];
        assert!(matches!(
            Ckmeans::k_range(3, 1).fit(&x).unwrap_err(),
            Error::InvalidParameter { name: "k", .. }
        ));
    }

    #[test]
    fn test_unsupported_methods() {
        let x = [1.0, 2.0, 3.0];
        for method in [SelectionMethod::GapStatistic, SelectionMethod::PhamDimovNguyen] {
            let err = Ckmeans::k_range(1, 2)
                .with_selection(method)
                .fit(&x)
                .unwrap_err();
            assert!(matches!(err, Error::Unsupported { .. }));
        }
    }

    #[test]
    fn test_duplicates_heavy_selection() {
        // Value/count data with long runs; exercises the zero-variance BIC
        // branches during selection without tripping the degenerate case.
        let values = [176.2, 205.2, 206.2, 226.2, 237.2, 275.2, 279.2, 305.2];
        let counts = [3usize, 7, 42, 42, 140, 21, 26, 27];
        let mut x = Vec::new();
        for (&v, &c) in values.iter().zip(counts.iter()) {
            x.extend(std::iter::repeat(v).take(c));
        }

        let fit = Ckmeans::k_range(1, 8).fit(&x).unwrap();
        assert!(fit.k() >= 1 && fit.k() <= 8);
        assert_eq!(fit.sizes.iter().sum::<usize>(), x.len());
        assert_eq!(fit.clustering.len(), x.len());
    }
}
