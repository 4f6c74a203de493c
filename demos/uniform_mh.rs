//! Samples a Uniform(0, 1) target with a narrow Gaussian random walk and prints a
//! coarse histogram of the pooled draws.

use rvs_mcmc::distributions::Uniform;
use rvs_mcmc::metropolis_hastings::MetropolisHastings;
use rvs_mcmc::proposal::RandomWalk;
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    const N_CHAINS: usize = 4;
    const N_SAMPLES: usize = 20_000;
    const BINS: usize = 10;

    let mh = MetropolisHastings::new(Uniform::new(0.0, 1.0)?, RandomWalk::new(0.1)?, N_CHAINS)
        .burn_in(50)
        .n_samples(N_SAMPLES)
        .set_seed(42);
    let samples = mh.sample_progress(&[0.5; N_CHAINS])?;

    let mut counts = [0usize; BINS];
    for &x in samples.iter() {
        let bin = ((x * BINS as f64) as usize).min(BINS - 1);
        counts[bin] += 1;
    }
    let total = samples.len() as f64;
    for (i, count) in counts.iter().enumerate() {
        let share = *count as f64 / total;
        println!(
            "[{:.1}, {:.1}) {:5.3} {}",
            i as f64 / BINS as f64,
            (i + 1) as f64 / BINS as f64,
            share,
            "#".repeat((share * 200.0) as usize)
        );
    }
    Ok(())
}
