//! Optimal clustering for one-dimensional data.
//!
//! `breaks` computes the globally optimal partition of a scalar sample into
//! contiguous clusters minimizing the within-cluster sum of squares. It is an
//! exact, deterministic alternative to heuristic k-means for 1-D data, with
//! BIC-based selection of the cluster count over a range.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`Ckmeans`]: the dynamic-programming clusterer (fixed k or a k range)
//! - [`bic`]: the Bayesian Information Criterion score for a fit

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    bic, Ckmeans, CkmeansFit, Clustering, DpTables, DynamicProgram, Optimizer, SelectionMethod,
    Table,
};
pub use error::{Error, Result};
