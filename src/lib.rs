//! Probability distributions with density, CDF and quantile functions, and a multi-chain
//! Metropolis–Hastings sampler that draws from them.

pub mod distributions;
pub mod error;
pub mod io;
pub mod key;
pub mod ks_test;
pub mod metropolis_hastings;
pub mod progress;
pub mod proposal;

pub use error::{Error, Result};
pub use key::Key;
pub use metropolis_hastings::MetropolisHastings;
