//! Samples a Normal(2, 0.5) target and writes the draws to `normal_mh.csv`.
//!
//! Run with `cargo run --example normal_mh_csv --features csv`.

use rvs_mcmc::distributions::Normal;
use rvs_mcmc::io::csv::save_csv;
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

    let mh = MetropolisHastings::new(Normal::new(2.0, 0.5)?, RandomWalk::new(0.5)?, 8)
        .burn_in(500)
        .n_samples(5_000);
    let samples = mh.sample_progress(&[0.0; 8])?;
    println!("mean = {:.3}", samples.mean().unwrap_or(f64::NAN));

    save_csv(&samples, "normal_mh.csv")?;
    println!("wrote {} samples to normal_mh.csv", samples.len());
    Ok(())
}
