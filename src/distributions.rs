/*!
Random variables exposing density, cumulative and quantile functions.

Every distribution implements [`RandomVariable`], which is all the sampler ever sees of
it. Constructors validate their parameters and return
[`Error::InvalidParameter`](crate::error::Error::InvalidParameter) when they are out of
domain.

Closed-form densities and CDFs come from [`statrs`]; draws go through [`rand_distr`]
samplers where one exists and through the quantile function otherwise.

# Examples

```rust
use rvs_mcmc::distributions::{Normal, RandomVariable};
use rvs_mcmc::key::Key;

let normal = Normal::new(0.0, 1.0).unwrap();
assert!((normal.cdf(0.0) - 0.5).abs() < 1e-12);
assert!((normal.ppf(0.975) - 1.959964).abs() < 1e-5);

let draws = normal.rvs(100, Key::new(42));
assert_eq!(draws.len(), 100);
```

Discrete variables report probability mass through `pdf`:

```rust
use rvs_mcmc::distributions::{Poisson, RandomVariable};

let poisson = Poisson::new(3.0).unwrap();
assert!(poisson.pdf(2.0) > 0.0);
assert_eq!(poisson.pdf(2.5), 0.0);
```
*/

use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, Open01};

use crate::key::Key;

/// The capability set shared by every distribution.
///
/// `pdf` is a density for continuous variables and a mass for discrete ones.
pub trait RandomVariable {
    fn pdf(&self, x: f64) -> f64 {
        self.logpdf(x).exp()
    }

    fn logpdf(&self, x: f64) -> f64;

    fn cdf(&self, x: f64) -> f64;

    fn logcdf(&self, x: f64) -> f64 {
        self.cdf(x).ln()
    }

    /// Quantile function. Returns NaN for `p` outside `[0, 1]`.
    fn ppf(&self, p: f64) -> f64;

    /// Draws one value. Defaults to inverse-transform sampling.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = Open01.sample(rng);
        self.ppf(u)
    }

    /// Draws `n` values, consuming `key` exactly once.
    fn rvs(&self, n: usize, key: Key) -> Array1<f64> {
        let mut rng = key.rng();
        Array1::from_shape_fn(n, |_| self.draw(&mut rng))
    }

    /// Element-wise `pdf`.
    fn pdf_vec(&self, x: ArrayView1<f64>) -> Array1<f64> {
        x.mapv(|v| self.pdf(v))
    }
}

impl<T: RandomVariable> RandomVariable for &T {
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }

    fn logpdf(&self, x: f64) -> f64 {
        (**self).logpdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        (**self).cdf(x)
    }

    fn logcdf(&self, x: f64) -> f64 {
        (**self).logcdf(x)
    }

    fn ppf(&self, p: f64) -> f64 {
        (**self).ppf(p)
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (**self).draw(rng)
    }
}

pub(crate) fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// Newton refinement of an approximate quantile `x` of probability `p`.
///
/// Stops as soon as a step fails to reduce `|cdf(x) - p|`.
pub(crate) fn polish_quantile(
    p: f64,
    mut x: f64,
    cdf: impl Fn(f64) -> f64,
    pdf: impl Fn(f64) -> f64,
) -> f64 {
    let mut err = cdf(x) - p;
    for _ in 0..8 {
        let density = pdf(x);
        if err == 0.0 || density.is_nan() || density <= 0.0 {
            break;
        }
        let next = x - err / density;
        if !next.is_finite() {
            break;
        }
        let next_err = cdf(next) - p;
        if next_err.abs() >= err.abs() {
            break;
        }
        x = next;
        err = next_err;
    }
    x
}

/// Implements [`RandomVariable`] for a type holding a `statrs` continuous distribution in
/// `density` and a `rand_distr` sampler in `sampler`.
///
/// Quantiles from `statrs` are polished with Newton steps, since some of its inverse CDFs
/// are coarse bisections.
macro_rules! statrs_continuous {
    ($name:ident) => {
        impl $crate::distributions::RandomVariable for $name {
            fn pdf(&self, x: f64) -> f64 {
                statrs::distribution::Continuous::pdf(&self.density, x)
            }

            fn logpdf(&self, x: f64) -> f64 {
                statrs::distribution::Continuous::ln_pdf(&self.density, x)
            }

            fn cdf(&self, x: f64) -> f64 {
                statrs::distribution::ContinuousCDF::cdf(&self.density, x)
            }

            fn ppf(&self, p: f64) -> f64 {
                if !$crate::distributions::is_probability(p) {
                    return f64::NAN;
                }
                let x = statrs::distribution::ContinuousCDF::inverse_cdf(&self.density, p);
                if p == 0.0 || p == 1.0 {
                    return x;
                }
                $crate::distributions::polish_quantile(
                    p,
                    x,
                    |x| statrs::distribution::ContinuousCDF::cdf(&self.density, x),
                    |x| statrs::distribution::Continuous::pdf(&self.density, x),
                )
            }

            fn draw<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> f64 {
                rand_distr::Distribution::sample(&self.sampler, rng)
            }
        }
    };
}

/// Implements [`RandomVariable`] for a type holding a `statrs` discrete distribution in
/// `mass`. The type provides `support()` and `draw_count()`.
macro_rules! statrs_discrete {
    ($name:ident) => {
        impl $crate::distributions::RandomVariable for $name {
            fn pdf(&self, x: f64) -> f64 {
                match $crate::distributions::discrete::lattice_point(x) {
                    Some(k) => statrs::distribution::Discrete::pmf(&self.mass, k),
                    None if x.is_nan() => f64::NAN,
                    None => 0.0,
                }
            }

            fn logpdf(&self, x: f64) -> f64 {
                match $crate::distributions::discrete::lattice_point(x) {
                    Some(k) => statrs::distribution::Discrete::ln_pmf(&self.mass, k),
                    None if x.is_nan() => f64::NAN,
                    None => f64::NEG_INFINITY,
                }
            }

            fn cdf(&self, x: f64) -> f64 {
                if x.is_nan() {
                    f64::NAN
                } else if x < 0.0 {
                    0.0
                } else if x >= u64::MAX as f64 {
                    1.0
                } else {
                    statrs::distribution::DiscreteCDF::cdf(&self.mass, x.floor() as u64)
                }
            }

            fn ppf(&self, p: f64) -> f64 {
                let (lower, upper) = self.support();
                $crate::distributions::discrete::quantile(p, lower, upper, |k| {
                    <Self as $crate::distributions::RandomVariable>::cdf(self, k as f64)
                })
            }

            fn draw<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> f64 {
                self.draw_count(rng) as f64
            }
        }
    };
}

pub mod closed_form;
pub mod continuous;
pub mod discrete;

pub use closed_form::{Logistic, Rayleigh, TruncNormal, TruncPowerLaw};
pub use continuous::{
    Beta, Cauchy, Chi2, Exponential, Gamma, LogNormal, Normal, Pareto, StudentT, Triangular,
    Uniform, Weibull,
};
pub use discrete::{Bernoulli, Binomial, Geometric, Poisson};
