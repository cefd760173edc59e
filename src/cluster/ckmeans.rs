//! Exact 1-D k-means: the public clusterer and its result type.

use super::dp::{DpTables, DynamicProgram, Optimizer};
use super::sample::{mean_and_ss, SortedSample};
use super::select::{self, SelectionMethod};
use super::traits::Clustering;
use crate::error::{Error, Result};

/// How the number of clusters is determined.
#[derive(Clone, Copy, Debug)]
enum KSpec {
    /// Exactly this many clusters.
    Exact(usize),
    /// The best count in an inclusive range, per the selection method.
    Range { min: usize, max: usize },
}

/// Globally optimal 1-D clustering by dynamic programming.
///
/// Unlike Lloyd-style k-means this is exact and deterministic: for scalar
/// data the optimal clusters are contiguous ranges of the sorted sample, and
/// the optimizer finds the best such partition outright.
///
/// Construct with [`Ckmeans::new`] for a fixed cluster count or
/// [`Ckmeans::k_range`] to let the selection criterion pick one.
#[derive(Clone, Debug)]
pub struct Ckmeans<O = DynamicProgram> {
    k: KSpec,
    selection: SelectionMethod,
    optimizer: O,
}

impl Ckmeans<DynamicProgram> {
    /// Cluster into exactly `k` clusters.
    ///
    /// `k` must be between 1 and the number of distinct values in the sample;
    /// anything else is rejected by [`fit`](Ckmeans::fit).
    pub fn new(k: usize) -> Self {
        Self {
            k: KSpec::Exact(k),
            selection: SelectionMethod::default(),
            optimizer: DynamicProgram,
        }
    }

    /// Cluster with the best count in `min..=max`, judged by the selection
    /// method (BIC by default; lower is better, ties go to the smaller k).
    ///
    /// Candidates above the sample's distinct-value count are skipped; a
    /// `min` above it is an error.
    pub fn k_range(min: usize, max: usize) -> Self {
        Self {
            k: KSpec::Range { min, max },
            selection: SelectionMethod::default(),
            optimizer: DynamicProgram,
        }
    }
}

impl<O: Optimizer> Ckmeans<O> {
    /// Set the criterion used to pick k from a range.
    ///
    /// Has no effect when the cluster count is exact.
    pub fn with_selection(mut self, selection: SelectionMethod) -> Self {
        self.selection = selection;
        self
    }

    /// Swap in an alternate DP backend.
    ///
    /// The backend must conform to the [`Optimizer`] contract; this is the
    /// one place a faster implementation plugs in, chosen explicitly by the
    /// caller rather than detected at run time.
    pub fn with_optimizer<P: Optimizer>(self, optimizer: P) -> Ckmeans<P> {
        Ckmeans {
            k: self.k,
            selection: self.selection,
            optimizer,
        }
    }

    /// Cluster `x` and return the full fit.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] for an empty sample.
    /// - [`Error::InvalidParameter`] for non-finite values, `k == 0`, or an
    ///   inverted k range.
    /// - [`Error::InvalidClusterCount`] when the requested count exceeds the
    ///   number of distinct values.
    /// - [`Error::NonFiniteLikelihood`] when range selection hits a
    ///   degenerate cluster interval.
    /// - [`Error::Unsupported`] for selection methods that are stubs.
    pub fn fit(&self, x: &[f64]) -> Result<CkmeansFit> {
        if x.is_empty() {
            return Err(Error::EmptyInput);
        }
        if !x.iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "x",
                message: "all values must be finite",
            });
        }

        let sample = SortedSample::new(x);
        match self.k {
            KSpec::Exact(k) => {
                validate_k(k, sample.distinct)?;
                let tables = self.optimizer.optimize(&sample.values, k);
                fit_for_k(x, &sample, &tables, k)
            }
            KSpec::Range { min, max } => {
                select::choose_k(&self.optimizer, self.selection, x, &sample, min, max)
            }
        }
    }
}

impl<O: Optimizer> Clustering for Ckmeans<O> {
    fn fit_predict(&self, data: &[f64]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.clustering)
    }

    /// The configured count, or 0 when k is picked from a range.
    fn n_clusters(&self) -> usize {
        match self.k {
            KSpec::Exact(k) => k,
            KSpec::Range { .. } => 0,
        }
    }
}

/// Result of an exact 1-D clustering fit.
///
/// Per-cluster vectors are indexed by cluster id; cluster 0 holds the
/// smallest values and ids increase with value. `total_ss` decomposes as
/// `Σ within_ss + between_ss` up to floating tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct CkmeansFit {
    /// Cluster id per input element, in the caller's original order.
    pub clustering: Vec<usize>,
    /// Cluster means.
    pub centers: Vec<f64>,
    /// Within-cluster sum of squared deviations, per cluster.
    pub within_ss: Vec<f64>,
    /// Number of elements per cluster.
    pub sizes: Vec<usize>,
    /// Sum of squared deviations of the whole sample from its mean.
    pub total_ss: f64,
    /// `total_ss` minus the total within-cluster SS.
    pub between_ss: f64,
}

impl CkmeansFit {
    /// Number of clusters in this fit.
    pub fn k(&self) -> usize {
        self.centers.len()
    }
}

pub(crate) fn validate_k(k: usize, distinct: usize) -> Result<()> {
    if k < 1 {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "must be at least 1",
        });
    }
    if k > distinct {
        return Err(Error::InvalidClusterCount {
            requested: k,
            distinct,
        });
    }
    Ok(())
}

/// One contiguous range of sorted positions, inclusive on both ends.
#[derive(Clone, Copy, Debug)]
struct Span {
    left: usize,
    right: usize,
}

/// Assemble the full fit for one `k` out of tables computed at `k` or above.
///
/// Columns `0..k-1` of a larger table are identical to what a `k`-sized pass
/// would produce, so range selection shares one pass across candidates.
pub(crate) fn fit_for_k(
    x: &[f64],
    sample: &SortedSample,
    tables: &DpTables,
    k: usize,
) -> Result<CkmeansFit> {
    let spans = backtrack(sample, tables, k)?;

    let mut centers = Vec::with_capacity(k);
    let mut within_ss = Vec::with_capacity(k);
    let mut sizes = Vec::with_capacity(k);
    for span in &spans {
        let members = &sample.values[span.left..=span.right];
        let (mean, ss) = mean_and_ss(members);
        centers.push(mean);
        within_ss.push(ss);
        sizes.push(members.len());
    }

    let clustering = recover_order(x, &sample.values, &sizes);
    let (_, total_ss) = mean_and_ss(&sample.values);
    let between_ss = total_ss - within_ss.iter().sum::<f64>();

    Ok(CkmeansFit {
        clustering,
        centers,
        within_ss,
        sizes,
        total_ss,
        between_ss,
    })
}

/// Walk the backtrack table from the last cluster to the first.
///
/// Cluster statistics are recomputed exactly from the sorted values by the
/// caller rather than reusing DP partial sums, so incremental rounding does
/// not compound into the reported fit.
fn backtrack(sample: &SortedSample, tables: &DpTables, k: usize) -> Result<Vec<Span>> {
    let n = sample.values.len();
    let mut spans = vec![Span { left: 0, right: 0 }; k];

    let mut right = n - 1;
    for m in (0..k).rev() {
        let left = tables.split[(right, m)];
        // left >= m guarantees every remaining cluster is non-empty; the
        // first cluster must reach back to the start. Anything else means
        // the tables are inconsistent.
        if left > right || left < m || (m == 0 && left != 0) {
            return Err(Error::Internal {
                message: "backtrack produced an empty or misaligned cluster",
            });
        }
        spans[m] = Span { left, right };
        if m > 0 {
            right = left - 1;
        }
    }

    Ok(spans)
}

/// Map cluster membership computed on sorted data back onto the caller's
/// original element order.
///
/// Clusters occupy contiguous sorted ranges, so membership is fully
/// determined by each cluster's right-boundary value. A value equal to a
/// boundary goes to the lower-indexed cluster, which keeps every occurrence
/// of a duplicate together.
fn recover_order(x: &[f64], sorted: &[f64], sizes: &[usize]) -> Vec<usize> {
    let mut bounds = Vec::with_capacity(sizes.len());
    let mut end = 0usize;
    for &size in sizes {
        end += size;
        bounds.push(sorted[end - 1]);
    }

    x.iter()
        .map(|&v| {
            bounds
                .iter()
                .position(|&b| v <= b)
                .expect("last boundary is the sample maximum")
        })
        .collect()
}
