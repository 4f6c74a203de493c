//! Metropolis-Hastings on a discrete target: Poisson(4) explored with a reflecting
//! integer walk. The walk is asymmetric at zero, so the Hastings correction is on.

use rvs_mcmc::distributions::{Poisson, RandomVariable};
use rvs_mcmc::metropolis_hastings::MetropolisHastings;
use rvs_mcmc::proposal::IntegerWalk;
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    const N_CHAINS: usize = 4;
    let target = Poisson::new(4.0)?;
    let mh = MetropolisHastings::new(target.clone(), IntegerWalk, N_CHAINS)
        .burn_in(100)
        .n_samples(10_000)
        .hastings_ratio(true)
        .set_seed(42);
    let samples = mh.sample_progress(&[0.0; N_CHAINS])?;

    println!(" k  empirical  pmf");
    for k in 0..=12 {
        let hits = samples.iter().filter(|&&x| x == k as f64).count();
        println!(
            "{k:2}  {:9.4}  {:.4}",
            hits as f64 / samples.len() as f64,
            target.pdf(k as f64)
        );
    }
    Ok(())
}
