/*!
Proposal kernels: maps from a chain's current position to the distribution its next
candidate is drawn from.

Any closure `Fn(f64) -> Result<D>` with `D: RandomVariable` is a kernel, which keeps
one-off proposals short:

```rust
use rvs_mcmc::distributions::{LogNormal, RandomVariable};
use rvs_mcmc::proposal::ProposalKernel;

// Multiplicative random walk on the positive axis.
let kernel = |x: f64| LogNormal::new(x.ln(), 0.3);
let q = kernel.conditional(2.0).unwrap();
assert_eq!(q.pdf(-1.0), 0.0);
```
*/

use std::fmt;

use rand::Rng;

use crate::distributions::discrete::lattice_point;
use crate::distributions::{Normal, RandomVariable};
use crate::error::{Error, Result};

/// Builds the conditional distribution `q(x)` for a chain sitting at `state`.
///
/// Errors from building the conditional (usually [`Error::InvalidParameter`]) are
/// propagated by the sampler unchanged.
pub trait ProposalKernel {
    type Conditional: RandomVariable;

    fn conditional(&self, state: f64) -> Result<Self::Conditional>;
}

impl<F, D> ProposalKernel for F
where
    F: Fn(f64) -> Result<D>,
    D: RandomVariable,
{
    type Conditional = D;

    fn conditional(&self, state: f64) -> Result<D> {
        self(state)
    }
}

/**
Symmetric Gaussian random walk, `q(x) = Normal(x, sigma)`.

```rust
use rvs_mcmc::distributions::RandomVariable;
use rvs_mcmc::proposal::{ProposalKernel, RandomWalk};

let walk = RandomWalk::new(0.5).unwrap();
let q = walk.conditional(1.0).unwrap();
assert!((q.cdf(1.0) - 0.5).abs() < 1e-12);
```
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWalk {
    sigma: f64,
}

impl RandomWalk {
    pub fn new(sigma: f64) -> Result<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(Error::parameter("RandomWalk", "step size must be positive"));
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl ProposalKernel for RandomWalk {
    type Conditional = Normal;

    fn conditional(&self, state: f64) -> Result<Normal> {
        Normal::new(state, self.sigma)
    }
}

impl fmt::Display for RandomWalk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RandomWalk(sigma={})", self.sigma)
    }
}

/// Independence sampler: every candidate comes from the same distribution,
/// whatever the current state.
///
/// This kernel is not symmetric, so it should be paired with the Hastings correction.
#[derive(Debug, Clone)]
pub struct Independence<D> {
    distribution: D,
}

impl<D: RandomVariable + Clone> Independence<D> {
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }
}

impl<D: RandomVariable + Clone> ProposalKernel for Independence<D> {
    type Conditional = D;

    fn conditional(&self, _state: f64) -> Result<D> {
        Ok(self.distribution.clone())
    }
}

/// Nearest-neighbour walk on the non-negative integers: from `k > 0` move to `k - 1` or
/// `k + 1` with equal probability, from `0` always move to `1`.
///
/// The reflection at zero makes the kernel asymmetric there, so pair it with the
/// Hastings correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerWalk;

impl ProposalKernel for IntegerWalk {
    type Conditional = LatticeStep;

    fn conditional(&self, state: f64) -> Result<LatticeStep> {
        let from = lattice_point(state).ok_or_else(|| {
            Error::parameter(
                "IntegerWalk",
                format!("state {state} is not a non-negative integer"),
            )
        })?;
        Ok(LatticeStep { from })
    }
}

/// One step of an [`IntegerWalk`] started at `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeStep {
    from: u64,
}

impl RandomVariable for LatticeStep {
    fn pdf(&self, x: f64) -> f64 {
        match (self.from, lattice_point(x)) {
            (0, Some(1)) => 1.0,
            (0, _) => 0.0,
            (k, Some(y)) if y + 1 == k || y == k + 1 => 0.5,
            _ => 0.0,
        }
    }

    fn logpdf(&self, x: f64) -> f64 {
        self.pdf(x).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        if self.from == 0 {
            return if x >= 1.0 { 1.0 } else { 0.0 };
        }
        let k = self.from as f64;
        if x < k - 1.0 {
            0.0
        } else if x < k + 1.0 {
            0.5
        } else {
            1.0
        }
    }

    fn ppf(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        match self.from {
            0 => 1.0,
            k if p <= 0.5 => (k - 1) as f64,
            k => (k + 1) as f64,
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.from {
            0 => 1.0,
            k if rng.gen_bool(0.5) => (k + 1) as f64,
            k => (k - 1) as f64,
        }
    }
}
