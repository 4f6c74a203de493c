//! Continuous distributions backed by `statrs` densities and `rand_distr` samplers.

use std::fmt;

use statrs::distribution as sd;

use crate::error::{invalid_parameter, Error, Result};

fn is_positive_finite(x: f64) -> bool {
    x > 0.0 && x.is_finite()
}

/// Normal distribution with mean `mu` and standard deviation `sigma`.
#[derive(Debug, Clone)]
pub struct Normal {
    mu: f64,
    sigma: f64,
    density: sd::Normal,
    sampler: rand_distr::Normal<f64>,
}

impl Normal {
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        Ok(Self {
            mu,
            sigma,
            density: sd::Normal::new(mu, sigma).map_err(invalid_parameter("Normal"))?,
            sampler: rand_distr::Normal::new(mu, sigma).map_err(invalid_parameter("Normal"))?,
        })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

statrs_continuous!(Normal);

impl fmt::Display for Normal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Normal(mu={}, sigma={})", self.mu, self.sigma)
    }
}

/// Uniform distribution on `[low, high]`.
#[derive(Debug, Clone)]
pub struct Uniform {
    low: f64,
    high: f64,
    density: sd::Uniform,
    sampler: rand_distr::Uniform<f64>,
}

impl Uniform {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite()) {
            return Err(Error::parameter("Uniform", "bounds must be finite"));
        }
        if low >= high {
            return Err(Error::parameter("Uniform", "low must be smaller than high"));
        }
        Ok(Self {
            low,
            high,
            density: sd::Uniform::new(low, high).map_err(invalid_parameter("Uniform"))?,
            sampler: rand_distr::Uniform::new(low, high),
        })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

statrs_continuous!(Uniform);

impl fmt::Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uniform(low={}, high={})", self.low, self.high)
    }
}

/// Beta distribution on `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Beta {
    alpha: f64,
    beta: f64,
    density: sd::Beta,
    sampler: rand_distr::Beta<f64>,
}

impl Beta {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !is_positive_finite(alpha) {
            return Err(Error::parameter("Beta", "alpha must be positive"));
        }
        if !is_positive_finite(beta) {
            return Err(Error::parameter("Beta", "beta must be positive"));
        }
        Ok(Self {
            alpha,
            beta,
            density: sd::Beta::new(alpha, beta).map_err(invalid_parameter("Beta"))?,
            sampler: rand_distr::Beta::new(alpha, beta).map_err(invalid_parameter("Beta"))?,
        })
    }
}

statrs_continuous!(Beta);

impl fmt::Display for Beta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Beta(alpha={}, beta={})", self.alpha, self.beta)
    }
}

/// Gamma distribution parameterised by `shape` and `rate`.
#[derive(Debug, Clone)]
pub struct Gamma {
    shape: f64,
    rate: f64,
    density: sd::Gamma,
    sampler: rand_distr::Gamma<f64>,
}

impl Gamma {
    pub fn new(shape: f64, rate: f64) -> Result<Self> {
        if !is_positive_finite(shape) {
            return Err(Error::parameter("Gamma", "shape must be positive"));
        }
        if !is_positive_finite(rate) {
            return Err(Error::parameter("Gamma", "rate must be positive"));
        }
        Ok(Self {
            shape,
            rate,
            density: sd::Gamma::new(shape, rate).map_err(invalid_parameter("Gamma"))?,
            sampler: rand_distr::Gamma::new(shape, 1.0 / rate)
                .map_err(invalid_parameter("Gamma"))?,
        })
    }
}

statrs_continuous!(Gamma);

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gamma(shape={}, rate={})", self.shape, self.rate)
    }
}

/// Exponential distribution with rate `lambda`.
#[derive(Debug, Clone)]
pub struct Exponential {
    lambda: f64,
    density: sd::Exp,
    sampler: rand_distr::Exp<f64>,
}

impl Exponential {
    pub fn new(lambda: f64) -> Result<Self> {
        if !is_positive_finite(lambda) {
            return Err(Error::parameter("Exponential", "rate must be positive"));
        }
        Ok(Self {
            lambda,
            density: sd::Exp::new(lambda).map_err(invalid_parameter("Exponential"))?,
            sampler: rand_distr::Exp::new(lambda).map_err(invalid_parameter("Exponential"))?,
        })
    }
}

statrs_continuous!(Exponential);

impl fmt::Display for Exponential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exponential(lambda={})", self.lambda)
    }
}

/// Chi-squared distribution with `nu` degrees of freedom.
#[derive(Debug, Clone)]
pub struct Chi2 {
    nu: f64,
    density: sd::ChiSquared,
    sampler: rand_distr::ChiSquared<f64>,
}

impl Chi2 {
    pub fn new(nu: f64) -> Result<Self> {
        if !is_positive_finite(nu) {
            return Err(Error::parameter("Chi2", "nu must be positive"));
        }
        Ok(Self {
            nu,
            density: sd::ChiSquared::new(nu).map_err(invalid_parameter("Chi2"))?,
            sampler: rand_distr::ChiSquared::new(nu).map_err(invalid_parameter("Chi2"))?,
        })
    }
}

statrs_continuous!(Chi2);

impl fmt::Display for Chi2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chi2(nu={})", self.nu)
    }
}

/// Log-normal distribution: `ln X ~ Normal(mu, sigma)`.
#[derive(Debug, Clone)]
pub struct LogNormal {
    mu: f64,
    sigma: f64,
    density: sd::LogNormal,
    sampler: rand_distr::LogNormal<f64>,
}

impl LogNormal {
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !is_positive_finite(sigma) {
            return Err(Error::parameter("LogNormal", "sigma must be positive"));
        }
        Ok(Self {
            mu,
            sigma,
            density: sd::LogNormal::new(mu, sigma).map_err(invalid_parameter("LogNormal"))?,
            sampler: rand_distr::LogNormal::new(mu, sigma)
                .map_err(invalid_parameter("LogNormal"))?,
        })
    }
}

statrs_continuous!(LogNormal);

impl fmt::Display for LogNormal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogNormal(mu={}, sigma={})", self.mu, self.sigma)
    }
}

/// Weibull distribution with scale `lambda` and shape `k`.
#[derive(Debug, Clone)]
pub struct Weibull {
    lambda: f64,
    k: f64,
    density: sd::Weibull,
    sampler: rand_distr::Weibull<f64>,
}

impl Weibull {
    pub fn new(lambda: f64, k: f64) -> Result<Self> {
        if !is_positive_finite(lambda) {
            return Err(Error::parameter("Weibull", "scale must be greater than 0"));
        }
        if !is_positive_finite(k) {
            return Err(Error::parameter(
                "Weibull",
                "concentration must be greater than 0",
            ));
        }
        Ok(Self {
            lambda,
            k,
            density: sd::Weibull::new(k, lambda).map_err(invalid_parameter("Weibull"))?,
            sampler: rand_distr::Weibull::new(lambda, k).map_err(invalid_parameter("Weibull"))?,
        })
    }
}

statrs_continuous!(Weibull);

impl fmt::Display for Weibull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weibull(lambda={}, k={})", self.lambda, self.k)
    }
}

/// Cauchy distribution with location `loc` and scale `scale`.
#[derive(Debug, Clone)]
pub struct Cauchy {
    loc: f64,
    scale: f64,
    density: sd::Cauchy,
    sampler: rand_distr::Cauchy<f64>,
}

impl Cauchy {
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        if !is_positive_finite(scale) {
            return Err(Error::parameter("Cauchy", "scale must be positive"));
        }
        Ok(Self {
            loc,
            scale,
            density: sd::Cauchy::new(loc, scale).map_err(invalid_parameter("Cauchy"))?,
            sampler: rand_distr::Cauchy::new(loc, scale).map_err(invalid_parameter("Cauchy"))?,
        })
    }
}

statrs_continuous!(Cauchy);

impl fmt::Display for Cauchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cauchy(loc={}, scale={})", self.loc, self.scale)
    }
}

/// Standard Student's t distribution with `nu` degrees of freedom.
#[derive(Debug, Clone)]
pub struct StudentT {
    nu: f64,
    density: sd::StudentsT,
    sampler: rand_distr::StudentT<f64>,
}

impl StudentT {
    pub fn new(nu: f64) -> Result<Self> {
        if !is_positive_finite(nu) {
            return Err(Error::parameter("StudentT", "nu must be positive"));
        }
        Ok(Self {
            nu,
            density: sd::StudentsT::new(0.0, 1.0, nu).map_err(invalid_parameter("StudentT"))?,
            sampler: rand_distr::StudentT::new(nu).map_err(invalid_parameter("StudentT"))?,
        })
    }
}

statrs_continuous!(StudentT);

impl fmt::Display for StudentT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentT(nu={})", self.nu)
    }
}

/// Pareto distribution with tail index `alpha` and minimum `scale`.
#[derive(Debug, Clone)]
pub struct Pareto {
    alpha: f64,
    scale: f64,
    density: sd::Pareto,
    sampler: rand_distr::Pareto<f64>,
}

impl Pareto {
    pub fn new(alpha: f64, scale: f64) -> Result<Self> {
        if !is_positive_finite(alpha) {
            return Err(Error::parameter("Pareto", "alpha must be positive"));
        }
        if !is_positive_finite(scale) {
            return Err(Error::parameter("Pareto", "scale must be positive"));
        }
        Ok(Self {
            alpha,
            scale,
            density: sd::Pareto::new(scale, alpha).map_err(invalid_parameter("Pareto"))?,
            sampler: rand_distr::Pareto::new(scale, alpha).map_err(invalid_parameter("Pareto"))?,
        })
    }
}

statrs_continuous!(Pareto);

impl fmt::Display for Pareto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pareto(alpha={}, scale={})", self.alpha, self.scale)
    }
}

/// Triangular distribution on `[low, high]` peaking at `mode`.
#[derive(Debug, Clone)]
pub struct Triangular {
    low: f64,
    mode: f64,
    high: f64,
    density: sd::Triangular,
    sampler: rand_distr::Triangular<f64>,
}

impl Triangular {
    pub fn new(low: f64, mode: f64, high: f64) -> Result<Self> {
        let ordered = low < high && (low..=high).contains(&mode);
        if !ordered {
            return Err(Error::parameter(
                "Triangular",
                "expected low <= mode <= high with low < high",
            ));
        }
        Ok(Self {
            low,
            mode,
            high,
            density: sd::Triangular::new(low, high, mode)
                .map_err(invalid_parameter("Triangular"))?,
            sampler: rand_distr::Triangular::new(low, high, mode)
                .map_err(invalid_parameter("Triangular"))?,
        })
    }
}

statrs_continuous!(Triangular);

impl fmt::Display for Triangular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Triangular(low={}, mode={}, high={})",
            self.low, self.mode, self.high
        )
    }
}
