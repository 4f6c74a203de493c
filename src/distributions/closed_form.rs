//! Distributions with hand-written closed forms. All of them sample by inverse transform.

use std::f64::consts::{PI, SQRT_2};
use std::fmt;

use statrs::function::erf::{erfc, erfc_inv};

use super::{is_probability, RandomVariable};
use crate::error::{Error, Result};

fn std_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

fn std_normal_ppf(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

fn std_normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

fn std_normal_isf(q: f64) -> f64 {
    SQRT_2 * erfc_inv(2.0 * q)
}

fn std_normal_logpdf(z: f64) -> f64 {
    -0.5 * z * z - 0.5 * (2.0 * PI).ln()
}

/**
Normal distribution with mean `mu` and scale `sigma`, truncated to `[low, high]`.

Intervals lying entirely above `mu` are handled through the survival function, so bounds
deep in the right tail keep their full precision.

```rust
use rvs_mcmc::distributions::{RandomVariable, TruncNormal};

let tn = TruncNormal::new(0.0, 1.0, -1.0, 2.0).unwrap();
assert_eq!(tn.cdf(-1.0), 0.0);
assert_eq!(tn.cdf(2.0), 1.0);
assert_eq!(tn.pdf(2.5), 0.0);

let tail = TruncNormal::new(0.0, 1.0, 10.0, 12.0).unwrap();
assert!(tail.pdf(10.5) > 0.0);
```
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncNormal {
    mu: f64,
    sigma: f64,
    low: f64,
    high: f64,
    // standardised lower bound
    a: f64,
    // mass is measured from the upper tail
    upper: bool,
    // tail probability at `a`
    tail_a: f64,
    log_z: f64,
    z: f64,
}

impl TruncNormal {
    pub fn new(mu: f64, sigma: f64, low: f64, high: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(Error::parameter("TruncNormal", "mu must be finite"));
        }
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(Error::parameter("TruncNormal", "sigma must be positive"));
        }
        if low.is_nan() || high.is_nan() || low >= high {
            return Err(Error::parameter(
                "TruncNormal",
                "low must be smaller than high",
            ));
        }
        let a = (low - mu) / sigma;
        let b = (high - mu) / sigma;
        let upper = a > 0.0;
        let (tail_a, z) = if upper {
            let tail_a = std_normal_sf(a);
            (tail_a, tail_a - std_normal_sf(b))
        } else {
            let tail_a = std_normal_cdf(a);
            (tail_a, std_normal_cdf(b) - tail_a)
        };
        if z <= 0.0 {
            return Err(Error::parameter(
                "TruncNormal",
                "truncation interval carries no probability mass",
            ));
        }
        Ok(Self {
            mu,
            sigma,
            low,
            high,
            a,
            upper,
            tail_a,
            log_z: z.ln(),
            z,
        })
    }

    /// Untruncated standard normal mass between `a` and `t`.
    fn mass_to(&self, t: f64) -> f64 {
        if self.upper {
            self.tail_a - std_normal_sf(t)
        } else {
            std_normal_cdf(t) - self.tail_a
        }
    }
}

impl RandomVariable for TruncNormal {
    fn logpdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < self.low || x > self.high {
            return f64::NEG_INFINITY;
        }
        std_normal_logpdf((x - self.mu) / self.sigma) - self.sigma.ln() - self.log_z
    }

    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            f64::NAN
        } else if x <= self.low {
            0.0
        } else if x >= self.high {
            1.0
        } else {
            (self.mass_to((x - self.mu) / self.sigma) / self.z).clamp(0.0, 1.0)
        }
    }

    fn ppf(&self, p: f64) -> f64 {
        if !is_probability(p) {
            return f64::NAN;
        }
        let t = if self.upper {
            std_normal_isf(self.tail_a - p * self.z)
        } else {
            std_normal_ppf(self.tail_a + p * self.z)
        };
        (self.mu + self.sigma * t).clamp(self.low, self.high)
    }
}

impl fmt::Display for TruncNormal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TruncNormal(mu={}, sigma={}, low={}, high={})",
            self.mu, self.sigma, self.low, self.high
        )
    }
}

/**
Power law `p(x) ∝ x^alpha` on `[low, high]` with `0 < low < high`.

`alpha == -1` is the log-uniform case.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncPowerLaw {
    alpha: f64,
    low: f64,
    high: f64,
    log_z: f64,
}

impl TruncPowerLaw {
    pub fn new(alpha: f64, low: f64, high: f64) -> Result<Self> {
        if !alpha.is_finite() {
            return Err(Error::parameter("TruncPowerLaw", "alpha must be finite"));
        }
        if !(low > 0.0) {
            return Err(Error::parameter(
                "TruncPowerLaw",
                "low must be greater than 0",
            ));
        }
        if !(high > low && high.is_finite()) {
            return Err(Error::parameter(
                "TruncPowerLaw",
                "high must be greater than low",
            ));
        }
        let beta = 1.0 + alpha;
        let log_z = if beta == 0.0 {
            (high.ln() - low.ln()).ln()
        } else if beta > 0.0 {
            (high.powf(beta) - low.powf(beta)).ln() - beta.ln()
        } else {
            (low.powf(beta) - high.powf(beta)).ln() - (-beta).ln()
        };
        Ok(Self {
            alpha,
            low,
            high,
            log_z,
        })
    }

    fn beta(&self) -> f64 {
        1.0 + self.alpha
    }
}

impl RandomVariable for TruncPowerLaw {
    fn logpdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < self.low || x > self.high {
            return f64::NEG_INFINITY;
        }
        self.alpha * x.ln() - self.log_z
    }

    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= self.low {
            return 0.0;
        }
        if x >= self.high {
            return 1.0;
        }
        let beta = self.beta();
        let mass = if beta == 0.0 {
            x.ln() - self.low.ln()
        } else {
            (x.powf(beta) - self.low.powf(beta)) / beta
        };
        (mass / self.log_z.exp()).clamp(0.0, 1.0)
    }

    fn ppf(&self, p: f64) -> f64 {
        if !is_probability(p) {
            return f64::NAN;
        }
        let beta = self.beta();
        let x = if beta == 0.0 {
            (p * self.high.ln() + (1.0 - p) * self.low.ln()).exp()
        } else {
            (p * beta * self.log_z.exp() + self.low.powf(beta)).powf(1.0 / beta)
        };
        x.clamp(self.low, self.high)
    }
}

impl fmt::Display for TruncPowerLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TruncPowerLaw(alpha={}, low={}, high={})",
            self.alpha, self.low, self.high
        )
    }
}

/// Logistic distribution with location `mu` and scale `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    mu: f64,
    s: f64,
}

impl Logistic {
    pub fn new(mu: f64, s: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(Error::parameter("Logistic", "mu must be finite"));
        }
        if !(s > 0.0 && s.is_finite()) {
            return Err(Error::parameter("Logistic", "scale must be positive"));
        }
        Ok(Self { mu, s })
    }
}

impl RandomVariable for Logistic {
    fn logpdf(&self, x: f64) -> f64 {
        let z = ((x - self.mu) / self.s).abs();
        -z - self.s.ln() - 2.0 * (-z).exp().ln_1p()
    }

    fn cdf(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-(x - self.mu) / self.s).exp())
    }

    fn ppf(&self, p: f64) -> f64 {
        if !is_probability(p) {
            return f64::NAN;
        }
        self.mu + self.s * (p / (1.0 - p)).ln()
    }
}

impl fmt::Display for Logistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Logistic(mu={}, scale={})", self.mu, self.s)
    }
}

/// Rayleigh distribution with scale `sigma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rayleigh {
    sigma: f64,
}

impl Rayleigh {
    pub fn new(sigma: f64) -> Result<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(Error::parameter("Rayleigh", "sigma must be positive"));
        }
        Ok(Self { sigma })
    }
}

impl RandomVariable for Rayleigh {
    fn logpdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        let var = self.sigma * self.sigma;
        x.ln() - var.ln() - x * x / (2.0 * var)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        -(-x * x / (2.0 * self.sigma * self.sigma)).exp_m1()
    }

    fn ppf(&self, p: f64) -> f64 {
        if !is_probability(p) {
            return f64::NAN;
        }
        self.sigma * (-2.0 * (-p).ln_1p()).sqrt()
    }
}

impl fmt::Display for Rayleigh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rayleigh(sigma={})", self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::Normal;
    use crate::key::Key;
    use approx::assert_abs_diff_eq;

    #[test]
    fn trunc_normal_with_wide_bounds_matches_normal() {
        let tn = TruncNormal::new(0.5, 1.2, -50.0, 50.0).unwrap();
        let n = Normal::new(0.5, 1.2).unwrap();
        for x in [-1.0, 0.0, 0.5, 2.0] {
            assert_abs_diff_eq!(tn.pdf(x), n.pdf(x), epsilon = 1e-10);
            assert_abs_diff_eq!(tn.cdf(x), n.cdf(x), epsilon = 1e-10);
        }
    }

    #[test]
    fn trunc_normal_draws_stay_inside_bounds() {
        let tn = TruncNormal::new(0.0, 1.0, 0.0, 1.0).unwrap();
        let draws = tn.rvs(5_000, Key::new(11));
        assert!(draws.iter().all(|&x| (0.0..=1.0).contains(&x)));
        for p in [0.05, 0.5, 0.95] {
            assert_abs_diff_eq!(tn.cdf(tn.ppf(p)), p, epsilon = 1e-9);
        }
    }

    #[test]
    fn trunc_normal_far_right_tail() {
        let tn = TruncNormal::new(0.0, 1.0, 10.0, 12.0).unwrap();
        for p in [0.01, 0.1, 0.5, 0.9, 0.99] {
            let x = tn.ppf(p);
            assert!((10.0..=12.0).contains(&x));
            assert_abs_diff_eq!(tn.cdf(x), p, epsilon = 1e-9);
        }
        // Mean of a normal truncated below at 10 is the inverse Mills ratio, about 10.098.
        let draws = tn.rvs(5_000, Key::new(3));
        assert!(draws.iter().all(|&x| (10.0..=12.0).contains(&x)));
        assert_abs_diff_eq!(draws.mean().unwrap(), 10.098, epsilon = 0.01);
        assert!(tn.pdf(10.0) > tn.pdf(10.5));
    }

    #[test]
    fn trunc_normal_tails_mirror_each_other() {
        let right = TruncNormal::new(1.0, 2.0, 15.0, 21.0).unwrap();
        let left = TruncNormal::new(1.0, 2.0, -19.0, -13.0).unwrap();
        for x in [15.5, 16.0, 18.0] {
            assert_abs_diff_eq!(right.cdf(x), 1.0 - left.cdf(2.0 - x), epsilon = 1e-9);
            assert_abs_diff_eq!(right.logpdf(x), left.logpdf(2.0 - x), epsilon = 1e-9);
        }
    }

    #[test]
    fn trunc_normal_rejects_bad_parameters() {
        assert!(matches!(
            TruncNormal::new(f64::NAN, 1.0, 0.0, 1.0),
            Err(Error::InvalidParameter { reason, .. }) if reason.contains("mu")
        ));
        assert!(TruncNormal::new(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(TruncNormal::new(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(TruncNormal::new(0.0, 1.0, 2.0, 1.0).is_err());
    }

    #[test]
    fn power_law_density_integrates_to_one() {
        for alpha in [-2.5, -1.0, 0.0, 1.7] {
            let pl = TruncPowerLaw::new(alpha, 1.0, 10.0).unwrap();
            let n = 100_000;
            let h = 9.0 / n as f64;
            let integral: f64 = (0..n)
                .map(|i| pl.pdf(1.0 + (i as f64 + 0.5) * h) * h)
                .sum();
            assert_abs_diff_eq!(integral, 1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(pl.cdf(pl.ppf(0.3)), 0.3, epsilon = 1e-10);
        }
    }

    #[test]
    fn power_law_log_uniform_case() {
        let pl = TruncPowerLaw::new(-1.0, 1.0, 100.0).unwrap();
        assert_abs_diff_eq!(pl.ppf(0.5), 10.0, epsilon = 1e-10);
        assert_abs_diff_eq!(pl.cdf(10.0), 0.5, epsilon = 1e-12);
        assert_eq!(pl.pdf(0.5), 0.0);
        assert!(TruncPowerLaw::new(1.0, 0.0, 1.0).is_err());
        assert!(TruncPowerLaw::new(1.0, 2.0, 1.0).is_err());
    }

    #[test]
    fn logistic_is_symmetric_about_mu() {
        let lg = Logistic::new(2.0, 0.5).unwrap();
        assert_abs_diff_eq!(lg.cdf(2.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(lg.pdf(1.0), lg.pdf(3.0), epsilon = 1e-15);
        assert_abs_diff_eq!(lg.pdf(2.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(lg.ppf(lg.cdf(2.7)), 2.7, epsilon = 1e-10);
    }

    #[test]
    fn rayleigh_median() {
        let r = Rayleigh::new(2.0).unwrap();
        let median = 2.0 * (2.0 * 2f64.ln()).sqrt();
        assert_abs_diff_eq!(r.ppf(0.5), median, epsilon = 1e-12);
        assert_abs_diff_eq!(r.cdf(median), 0.5, epsilon = 1e-12);
        assert_eq!(r.pdf(-1.0), 0.0);
    }
}
