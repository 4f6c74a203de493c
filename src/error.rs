//! Error type shared by the distributions and the sampler.

use std::fmt::Display;

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The initial state vector does not hold one entry per chain.
    #[error("initial state has {got} entries, expected one per chain ({expected})")]
    InvalidShape { expected: usize, got: usize },

    /// A distribution was constructed with out-of-domain parameters.
    #[error("invalid parameter for {distribution}: {reason}")]
    InvalidParameter {
        distribution: &'static str,
        reason: String,
    },

    /// The sampler was configured with zero chains or zero samples.
    #[error("invalid sampler configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn parameter(distribution: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            distribution,
            reason: reason.into(),
        }
    }
}

/// Maps a constructor error from `statrs` or `rand_distr` into [`Error::InvalidParameter`].
pub(crate) fn invalid_parameter<E: Display>(distribution: &'static str) -> impl FnOnce(E) -> Error {
    move |e| Error::parameter(distribution, e.to_string())
}
