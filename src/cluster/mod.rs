//! Exact clustering for one-dimensional data.
//!
//! This module provides globally optimal clustering of scalar samples.
//!
//! ## Why not plain k-means?
//!
//! Lloyd-style k-means is a heuristic: it converges to a local optimum that
//! depends on initialization, even in one dimension. For scalar data the
//! optimal partition is always a set of *contiguous ranges of the sorted
//! sample*, which makes the problem solvable exactly by dynamic programming
//! (Wang & Song, 2011). The result is deterministic and needs no seeding or
//! restarts.
//!
//! **Objective**: Minimize the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_m Σ_{x ∈ C_m} (x - μ_m)²
//! ```
//!
//! The optimizer fills an n×k cost table with an incrementally maintained
//! mean/SS per candidate cluster and a pruned inner scan, giving O(k·n²) time
//! in the worst case and much less in practice.
//!
//! ## Picking k
//!
//! When the number of clusters is not known in advance, [`Ckmeans::k_range`]
//! fits every candidate k in an inclusive range and keeps the one with the
//! lowest Bayesian Information Criterion ([`bic`]). A single DP pass at the
//! largest candidate serves all of them, since smaller-k optima are prefixes
//! of the same table.
//!
//! ## Usage
//!
//! ```rust
//! use breaks::{Ckmeans, Clustering};
//!
//! let x = vec![-1.0, 2.0, -1.0, 2.0, 4.0, 5.0, 6.0, -1.0, 2.0, -1.0];
//!
//! // Exactly three clusters.
//! let fit = Ckmeans::new(3).fit(&x).unwrap();
//! assert_eq!(fit.sizes, vec![4, 3, 3]);
//! assert_eq!(fit.clustering[0], fit.clustering[2]); // duplicates stay together
//!
//! // Let BIC pick k over 1..=5.
//! let labels = Ckmeans::k_range(1, 5).fit_predict(&x).unwrap();
//! assert_eq!(labels.len(), x.len());
//! ```
//!
//! ## References
//!
//! Wang, H., Song, M. (2011). "Ckmeans.1d.dp: Optimal k-means Clustering in
//! One Dimension by Dynamic Programming." The R Journal 3(2).

mod ckmeans;
mod dp;
mod sample;
mod select;
mod traits;

pub use ckmeans::{Ckmeans, CkmeansFit};
pub use dp::{DpTables, DynamicProgram, Optimizer, Table};
pub use select::{bic, SelectionMethod};
pub use traits::Clustering;
