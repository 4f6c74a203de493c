//! Kolmogorov–Smirnov goodness-of-fit tests, used to check sampler output against a
//! reference CDF or a reference sample.
//!
//! The two-sample test follows the `kolmogorov_smirnov` crate (Apache 2.0); the
//! distribution functions `pks`/`qks` are from *Numerical Recipes* (Third Edition).

use std::cmp::Ordering;

/// Outcome of a KS test at significance `level`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// `true` when the null hypothesis (same distribution) is rejected.
    pub is_rejected: bool,
    pub statistic: f64,
    pub p_value: f64,
    pub level: f64,
}

/// Tests whether `sample` was drawn from the distribution with CDF `cdf`.
///
/// ```rust
/// use rvs_mcmc::distributions::{Normal, RandomVariable};
/// use rvs_mcmc::key::Key;
/// use rvs_mcmc::ks_test::one_sample_ks_test;
///
/// let normal = Normal::new(0.0, 1.0).unwrap();
/// let draws = normal.rvs(500, Key::new(1));
/// let result = one_sample_ks_test(draws.as_slice().unwrap(), |x| normal.cdf(x), 0.001).unwrap();
/// assert!(!result.is_rejected);
/// ```
pub fn one_sample_ks_test<F>(sample: &[f64], cdf: F, level: f64) -> Result<TestResult, String>
where
    F: Fn(f64) -> f64,
{
    let sorted = sorted_finite(sample, "sample")?;
    let n = sorted.len() as f64;
    let statistic = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            (f - i as f64 / n).max((i + 1) as f64 / n - f)
        })
        .fold(0.0, f64::max);
    let root_n = n.sqrt();
    let p_value = qks((root_n + 0.12 + 0.11 / root_n) * statistic)?;
    Ok(TestResult {
        is_rejected: p_value < level,
        statistic,
        p_value,
        level,
    })
}

/// Tests whether two samples come from the same distribution.
///
/// Both samples need more than seven values for the asymptotic p-value to be usable.
pub fn two_sample_ks_test(
    sample_1: &[f64],
    sample_2: &[f64],
    level: f64,
) -> Result<TestResult, String> {
    let statistic = ks_statistic(sample_1, sample_2)?;
    let p_value = ks_p_value(statistic, sample_1.len(), sample_2.len())?;
    Ok(TestResult {
        is_rejected: p_value < level,
        statistic,
        p_value,
        level,
    })
}

fn ks_p_value(statistic: f64, n1: usize, n2: usize) -> Result<f64, String> {
    if n1 <= 7 || n2 <= 7 {
        return Err(format!(
            "sample sizes must exceed 7 for the KS p-value, got {n1} and {n2}"
        ));
    }
    let (n1, n2) = (n1 as f64, n2 as f64);
    qks((n1 * n2 / (n1 + n2)).sqrt() * statistic)
}

fn sorted_finite(sample: &[f64], name: &str) -> Result<Vec<f64>, String> {
    if sample.is_empty() {
        return Err(format!("expected {name} to be non-empty"));
    }
    if sample.iter().any(|x| x.is_nan()) {
        return Err(format!("{name} contains NaN"));
    }
    let mut sorted = sample.to_vec();
    sorted.sort_unstable_by(cmp_f64);
    Ok(sorted)
}

/// Largest gap between the two empirical CDFs.
fn ks_statistic(sample_1: &[f64], sample_2: &[f64]) -> Result<f64, String> {
    let a = sorted_finite(sample_1, "sample_1")?;
    let b = sorted_finite(sample_2, "sample_2")?;
    let (n, m) = (a.len(), b.len());

    let (mut i, mut j) = (0, 0);
    let mut max_diff: f64 = 0.0;
    // Once one sample is exhausted the gap can only shrink.
    while i < n && j < m {
        let x = a[i].min(b[j]);
        while i < n && a[i] <= x {
            i += 1;
        }
        while j < m && b[j] <= x {
            j += 1;
        }
        max_diff = max_diff.max((i as f64 / n as f64 - j as f64 / m as f64).abs());
    }
    Ok(max_diff)
}

/// CDF of the Kolmogorov distribution.
fn pks(z: f64) -> Result<f64, String> {
    if z < 0. {
        return Err("Bad z for KS distribution function.".into());
    }
    if z == 0. {
        return Ok(0.);
    }
    if z < 1.18 {
        let y = (-1.233_700_550_136_169_7 / z.powi(2)).exp();
        return Ok(2.256_758_334_191_025
            * (-y.ln()).sqrt()
            * (y + y.powf(9.) + y.powf(25.) + y.powf(49.)));
    }
    let x = (-2. * z.powi(2)).exp();
    Ok(1. - 2. * (x - x.powf(4.) + x.powf(9.)))
}

/// Complementary CDF of the Kolmogorov distribution.
fn qks(z: f64) -> Result<f64, String> {
    if z < 0. {
        return Err("Bad z for KS distribution function.".into());
    }
    if z == 0. {
        return Ok(1.);
    }
    if z < 1.18 {
        return Ok(1. - pks(z)?);
    }
    let x = (-2. * z.powi(2)).exp();
    Ok(2. * (x - x.powf(4.) + x.powf(9.)))
}

/// Total order on f64 with NaN sorted last.
fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{Exponential, Normal, RandomVariable};
    use crate::key::Key;
    use approx::assert_abs_diff_eq;

    #[test]
    fn statistic_of_shifted_samples() {
        let d = ks_statistic(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
        assert_abs_diff_eq!(d, 1.0 / 3.0, epsilon = 1e-12);
        let d = ks_statistic(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_abs_diff_eq!(d, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn statistic_extremes() {
        assert_eq!(ks_statistic(&[3.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
        assert_eq!(ks_statistic(&[1.0, 2.0, 3.0], &[10.0, 11.0]).unwrap(), 1.0);
        assert_eq!(ks_statistic(&[2.0], &[5.0]).unwrap(), 1.0);
    }

    #[test]
    fn statistic_with_ties() {
        let d = ks_statistic(&[1.0, 1.0, 1.0, 2.0, 2.0], &[1.0, 1.0, 2.0, 2.0, 2.0]).unwrap();
        assert_abs_diff_eq!(d, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn empty_or_nan_samples_are_errors() {
        assert!(ks_statistic(&[], &[1.0, 2.0]).is_err());
        assert!(ks_statistic(&[1.0, 2.0], &[]).is_err());
        assert!(ks_statistic(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
        assert!(one_sample_ks_test(&[], |x| x, 0.05).is_err());
    }

    #[test]
    fn two_sample_p_value_of_near_identical_samples() {
        let base = [0.12, 0.25, 0.25, 0.78, 0.99, 0.33, 0.15];
        let s1: Vec<f64> = base
            .iter()
            .chain(&[0.5])
            .cycle()
            .take(160)
            .copied()
            .collect();
        let s2: Vec<f64> = base
            .iter()
            .chain(&[0.51])
            .cycle()
            .take(160)
            .copied()
            .collect();
        let result = two_sample_ks_test(&s1, &s2, 0.05).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.125, epsilon = 1e-9);
        assert_abs_diff_eq!(result.p_value, 0.1641, epsilon = 1e-4);
        assert!(!result.is_rejected);
    }

    #[test]
    fn two_sample_needs_enough_values() {
        assert!(two_sample_ks_test(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 0.05).is_err());
    }

    #[test]
    fn one_sample_accepts_matching_cdf() {
        let normal = Normal::new(1.0, 2.0).unwrap();
        let draws = normal.rvs(2_000, Key::new(77));
        let result =
            one_sample_ks_test(draws.as_slice().unwrap(), |x| normal.cdf(x), 0.001).unwrap();
        assert!(!result.is_rejected, "{result:?}");
    }

    #[test]
    fn one_sample_rejects_wrong_cdf() {
        let exp = Exponential::new(1.0).unwrap();
        let draws = exp.rvs(2_000, Key::new(78));
        let wrong = Exponential::new(2.0).unwrap();
        let result =
            one_sample_ks_test(draws.as_slice().unwrap(), |x| wrong.cdf(x), 0.001).unwrap();
        assert!(result.is_rejected, "{result:?}");
    }

    #[test]
    fn kolmogorov_distribution_values() {
        assert_eq!(pks(0.0).unwrap(), 0.0);
        assert_eq!(qks(0.0).unwrap(), 1.0);
        assert_abs_diff_eq!(pks(1.23).unwrap(), 0.902_973_102_404_779_1, epsilon = 1e-8);
        assert_abs_diff_eq!(pks(2.34).unwrap(), 0.999_964_926_083_361_1, epsilon = 1e-8);
        assert_abs_diff_eq!(pks(3.45).unwrap(), 1.0, epsilon = 1e-8);
        assert!(pks(-1.0).is_err());
        assert!(qks(-1.0).is_err());
    }

    #[test]
    fn nan_sorts_last() {
        let mut s = [f64::NAN, 2.0, f64::NAN, 1.0];
        s.sort_by(cmp_f64);
        assert_eq!(&s[..2], &[1.0, 2.0]);
        assert!(s[2].is_nan() && s[3].is_nan());
    }
}
