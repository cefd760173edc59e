use thiserror::Error;

/// Errors returned by clustering operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    ///
    /// A 1-D sample can be split into at most as many clusters as it has
    /// distinct values.
    #[error("invalid cluster count: requested {requested}, but sample has {distinct} distinct values")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of distinct values in the sample.
        distinct: usize,
    },

    /// A model log-likelihood came out non-finite during scoring.
    ///
    /// This can only arise from a degenerate cluster interval (for example a
    /// zero-width uniform component), which indicates corrupted input.
    #[error("non-finite log-likelihood while scoring k = {k}")]
    NonFiniteLikelihood {
        /// The cluster count being scored when the likelihood diverged.
        k: usize,
    },

    /// An internal invariant was violated.
    ///
    /// Indicates a bug in the optimizer or backtracker, not a user error.
    #[error("internal invariant violated: {message}")]
    Internal {
        /// What went wrong.
        message: &'static str,
    },

    /// The requested model-selection method is not implemented.
    #[error("selection method {method} is not supported")]
    Unsupported {
        /// Method name.
        method: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
