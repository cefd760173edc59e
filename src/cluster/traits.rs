use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster label per input element, in the
    /// caller's original element order.
    fn fit_predict(&self, data: &[f64]) -> Result<Vec<usize>>;

    /// The configured number of clusters (if applicable).
    ///
    /// For configurations that pick the number of clusters from a range,
    /// this returns 0.
    fn n_clusters(&self) -> usize;
}
