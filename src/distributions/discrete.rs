//! Discrete random variables on the non-negative integers.
//!
//! `pdf` returns the probability mass at integer points and `0` elsewhere.

use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Open01};
use statrs::distribution as sd;

use super::is_probability;
use crate::error::{invalid_parameter, Error, Result};

/// `Some(k)` when `x` is exactly the non-negative integer `k`.
pub(crate) fn lattice_point(x: f64) -> Option<u64> {
    if x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x < u64::MAX as f64 {
        Some(x as u64)
    } else {
        None
    }
}

/// Smallest `k` in `[lower, upper]` with `cdf(k) >= p`.
///
/// Brackets by doubling and then bisects, so heavy right tails stay cheap.
pub(crate) fn quantile(p: f64, lower: u64, upper: Option<u64>, cdf: impl Fn(u64) -> f64) -> f64 {
    if !is_probability(p) {
        return f64::NAN;
    }
    if p == 1.0 {
        return upper.map_or(f64::INFINITY, |u| u as f64);
    }
    if cdf(lower) >= p {
        return lower as f64;
    }

    let mut lo = lower;
    let mut step = 1u64;
    let mut hi = loop {
        let candidate = lower.saturating_add(step);
        if let Some(u) = upper {
            if candidate >= u {
                break u;
            }
        }
        if cdf(candidate) >= p {
            break candidate;
        }
        if step > u64::MAX / 4 {
            return f64::INFINITY;
        }
        lo = candidate;
        step *= 2;
    };

    // cdf(lo) < p <= cdf(hi)
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if cdf(mid) >= p {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi as f64
}

/// A single trial succeeding with probability `p`.
#[derive(Debug, Clone)]
pub struct Bernoulli {
    p: f64,
    mass: sd::Bernoulli,
}

impl Bernoulli {
    pub fn new(p: f64) -> Result<Self> {
        let mass = sd::Bernoulli::new(p).map_err(invalid_parameter("Bernoulli"))?;
        Ok(Self { p, mass })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    fn support(&self) -> (u64, Option<u64>) {
        (0, Some(1))
    }

    fn draw_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        rng.gen_bool(self.p) as u64
    }
}

statrs_discrete!(Bernoulli);

impl fmt::Display for Bernoulli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bernoulli(p={})", self.p)
    }
}

/// Number of successes in `n` independent trials.
#[derive(Debug, Clone)]
pub struct Binomial {
    n: u64,
    p: f64,
    mass: sd::Binomial,
    sampler: rand_distr::Binomial,
}

impl Binomial {
    pub fn new(n: u64, p: f64) -> Result<Self> {
        let mass = sd::Binomial::new(p, n).map_err(invalid_parameter("Binomial"))?;
        let sampler = rand_distr::Binomial::new(n, p).map_err(invalid_parameter("Binomial"))?;
        Ok(Self {
            n,
            p,
            mass,
            sampler,
        })
    }

    fn support(&self) -> (u64, Option<u64>) {
        (0, Some(self.n))
    }

    fn draw_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.sampler.sample(rng)
    }
}

statrs_discrete!(Binomial);

impl fmt::Display for Binomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binomial(n={}, p={})", self.n, self.p)
    }
}

/// Number of trials up to and including the first success. Support is `{1, 2, ...}`.
#[derive(Debug, Clone)]
pub struct Geometric {
    p: f64,
    mass: sd::Geometric,
}

impl Geometric {
    pub fn new(p: f64) -> Result<Self> {
        if p == 0.0 {
            return Err(Error::parameter("Geometric", "p must be in (0, 1]"));
        }
        let mass = sd::Geometric::new(p).map_err(invalid_parameter("Geometric"))?;
        Ok(Self { p, mass })
    }

    fn support(&self) -> (u64, Option<u64>) {
        (1, None)
    }

    fn draw_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.p == 1.0 {
            return 1;
        }
        let u: f64 = Open01.sample(rng);
        let trials = (u.ln() / (-self.p).ln_1p()).ceil();
        trials.max(1.0) as u64
    }
}

statrs_discrete!(Geometric);

impl fmt::Display for Geometric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geometric(p={})", self.p)
    }
}

/// Poisson distribution with rate `mu`.
#[derive(Debug, Clone)]
pub struct Poisson {
    mu: f64,
    mass: sd::Poisson,
    sampler: rand_distr::Poisson<f64>,
}

impl Poisson {
    pub fn new(mu: f64) -> Result<Self> {
        let mass = sd::Poisson::new(mu).map_err(invalid_parameter("Poisson"))?;
        let sampler = rand_distr::Poisson::new(mu).map_err(invalid_parameter("Poisson"))?;
        Ok(Self { mu, mass, sampler })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    fn support(&self) -> (u64, Option<u64>) {
        (0, None)
    }

    fn draw_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.sampler.sample(rng) as u64
    }
}

statrs_discrete!(Poisson);

impl fmt::Display for Poisson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poisson(mu={})", self.mu)
    }
}
