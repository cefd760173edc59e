//! Input preparation shared by the clustering pipeline.

/// A sample sorted ascending, derived once per fit and discarded afterwards.
#[derive(Clone, Debug)]
pub(crate) struct SortedSample {
    /// The observations, ascending.
    pub(crate) values: Vec<f64>,
    /// Number of distinct values; bounds the feasible cluster count.
    pub(crate) distinct: usize,
}

impl SortedSample {
    /// Sort a copy of `x`. Callers must have rejected non-finite values.
    pub(crate) fn new(x: &[f64]) -> Self {
        let mut values = x.to_vec();
        values.sort_unstable_by(f64::total_cmp);
        let distinct = count_distinct_sorted(&values);
        Self { values, distinct }
    }
}

/// Number of distinct values in an ascending slice.
pub(crate) fn count_distinct_sorted(xs: &[f64]) -> usize {
    if xs.is_empty() {
        0
    } else {
        1 + xs.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

/// Mean and sum of squared deviations of a non-empty slice.
///
/// Two-pass so cluster statistics are exact rather than inheriting the
/// optimizer's incremental rounding.
pub(crate) fn mean_and_ss(xs: &[f64]) -> (f64, f64) {
    let size = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / size;
    let ss = xs.iter().map(|x| (x - mean) * (x - mean)).sum();
    (mean, ss)
}
