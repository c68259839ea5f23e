//! Error type shared by every sampler in the crate.

use thiserror::Error;

/// Failures raised by the posterior samplers.
///
/// Every variant is structural: retrying the same call with the same input
/// fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    /// A size, count, dimension or input value is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The design matrix leaves no residual degrees of freedom or XᵗX is not
    /// positive definite.
    #[error("singular design matrix: n = {n}, p = {p}")]
    SingularDesignMatrix { n: usize, p: usize },

    /// The scatter matrix of the data cannot be inverted.
    #[error("singular scatter matrix: n = {n}, d = {d}")]
    SingularScatterMatrix { n: usize, d: usize },

    /// A retired entry point was called.
    #[error("`{old}` has been renamed to `{new}`")]
    RenamedFunction {
        old: &'static str,
        new: &'static str,
    },

    /// The random-variate backend rejected a parameter.
    #[error("distribution parameter rejected: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, SamplerError>;

impl SamplerError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SamplerError::InvalidArgument(msg.into())
    }
}
