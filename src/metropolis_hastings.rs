/*!
# Metropolis–Hastings Sampler

A multi-chain Metropolis–Hastings sampler for scalar targets. Any target implementing
[`RandomVariable`] can be sampled with any [`ProposalKernel`]. All chains advance in
lockstep: each iteration draws one candidate per chain, one uniform per chain, and
decides acceptance for the whole vector at once.

## Overview

- **Burn-in**: `burn_in` steps where every chain jumps to a draw from its proposal
  without an accept/reject test. These states are discarded.
- **Sampling**: candidates are accepted with probability
  `min(1, p(x') / p(x) · H)`, where `H = q(x' → x) / q(x → x')` when the Hastings
  correction is enabled and `1` otherwise. `H` is the reverse move density over the
  forward one, `q(x').pdf(x) / q(x).pdf(x')`. Symmetric kernels give `H = 1` exactly.
  The ratio is evaluated from log-densities so chains far in the tails do not stall on
  underflowed densities. Only accepted draws are stored, so the loop runs
  until every chain has accepted `n_samples` candidates.
- **Reproducibility**: a run is a pure function of its [`Key`]. Each vectorised draw
  consumes one key and the next key is derived with [`Key::advance`].

## Example Usage

```rust
use rvs_mcmc::distributions::Normal;
use rvs_mcmc::metropolis_hastings::MetropolisHastings;
use rvs_mcmc::proposal::RandomWalk;

let target = Normal::new(0.0, 1.0).unwrap();
let proposal = RandomWalk::new(1.0).unwrap();

let mh = MetropolisHastings::new(target, proposal, 4)
    .burn_in(100)
    .n_samples(500)
    .set_seed(42);

let samples = mh.sample(&[0.0; 4]).unwrap();
assert_eq!(samples.shape(), &[500, 4]);
assert!(samples.iter().all(|x| x.is_finite()));
```
*/

use ndarray::{Array1, Array2, Zip};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::distributions::RandomVariable;
use crate::error::{Error, Result};
use crate::key::Key;
use crate::progress::{Progress, ProgressBars, Silent};
use crate::proposal::ProposalKernel;

/**
The Metropolis–Hastings sampler.

# Type Parameters
- `D`: the target distribution. Only its `logpdf` is evaluated.
- `Q`: the proposal kernel, mapping a state to the distribution its candidate is drawn from.

Configuration goes through builder-style setters. Defaults: no burn-in, 1000 samples per
chain, no Hastings correction, and a key drawn from entropy.

```rust
use rvs_mcmc::distributions::Uniform;
use rvs_mcmc::metropolis_hastings::MetropolisHastings;
use rvs_mcmc::proposal::RandomWalk;

let target = Uniform::new(0.0, 1.0).unwrap();
let mh = MetropolisHastings::new(target, RandomWalk::new(0.3).unwrap(), 2)
    .n_samples(100)
    .hastings_ratio(true)
    .set_seed(7);
assert_eq!(mh.n_chains, 2);
assert_eq!(mh.key.seed(), 7);
```
*/
#[derive(Debug, Clone)]
pub struct MetropolisHastings<D, Q> {
    /// The target distribution we want to sample from.
    pub target: D,
    /// The proposal kernel used to generate candidate states.
    pub proposal: Q,
    /// Number of chains run in lockstep.
    pub n_chains: usize,
    /// Number of discarded warm-up steps.
    pub burn_in: usize,
    /// Accepted samples to collect per chain.
    pub n_samples: usize,
    /// Whether to correct the acceptance ratio for asymmetric proposals.
    pub hastings_ratio: bool,
    /// Starting key of the run.
    pub key: Key,
}

impl<D, Q> MetropolisHastings<D, Q>
where
    D: RandomVariable,
    Q: ProposalKernel,
{
    pub fn new(target: D, proposal: Q, n_chains: usize) -> Self {
        Self {
            target,
            proposal,
            n_chains,
            burn_in: 0,
            n_samples: 1000,
            hastings_ratio: false,
            key: Key::from_entropy(),
        }
    }

    pub fn burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = burn_in;
        self
    }

    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn hastings_ratio(mut self, enabled: bool) -> Self {
        self.hastings_ratio = enabled;
        self
    }

    /// Seeds the run. Equivalent to `set_key(Key::new(seed))`.
    pub fn set_seed(self, seed: u64) -> Self {
        self.set_key(Key::new(seed))
    }

    pub fn set_key(mut self, key: Key) -> Self {
        self.key = key;
        self
    }

    /// Runs the sampler without visible progress.
    ///
    /// Returns an array of shape `(n_samples, n_chains)`; column `i` holds chain `i`'s
    /// accepted draws in acceptance order. Calling it twice gives the same result.
    pub fn sample(&self, x0: &[f64]) -> Result<Array2<f64>> {
        self.run(x0, self.key, &mut Silent)
    }

    /// Like [`sample`](Self::sample), drawing progress bars on stderr.
    pub fn sample_progress(&self, x0: &[f64]) -> Result<Array2<f64>> {
        self.run(x0, self.key, &mut ProgressBars::new())
    }

    /// Like [`sample`](Self::sample), reporting to a caller-provided sink.
    pub fn sample_with<P: Progress + ?Sized>(
        &self,
        x0: &[f64],
        progress: &mut P,
    ) -> Result<Array2<f64>> {
        self.run(x0, self.key, progress)
    }

    /// Runs one independent sampler per key on the rayon thread pool.
    ///
    /// The result for each key is identical to a sequential run started from that key.
    pub fn sample_replicas(&self, x0: &[f64], keys: &[Key]) -> Result<Vec<Array2<f64>>>
    where
        D: Sync,
        Q: Sync,
    {
        self.validate(x0)?;
        debug!(replicas = keys.len(), "running independent replicas");
        keys.par_iter()
            .map(|&key| self.run(x0, key, &mut Silent))
            .collect()
    }

    fn validate(&self, x0: &[f64]) -> Result<()> {
        if self.n_chains == 0 {
            return Err(Error::InvalidConfig(
                "at least one chain is required".to_string(),
            ));
        }
        if self.n_samples == 0 {
            return Err(Error::InvalidConfig(
                "n_samples must be at least 1".to_string(),
            ));
        }
        if x0.len() != self.n_chains {
            return Err(Error::InvalidShape {
                expected: self.n_chains,
                got: x0.len(),
            });
        }
        Ok(())
    }

    fn run<P: Progress + ?Sized>(
        &self,
        x0: &[f64],
        key: Key,
        progress: &mut P,
    ) -> Result<Array2<f64>> {
        self.validate(x0)?;
        debug!(
            n_chains = self.n_chains,
            burn_in = self.burn_in,
            n_samples = self.n_samples,
            hastings = self.hastings_ratio,
            "starting Metropolis-Hastings run"
        );
        progress.start(self.burn_in, self.n_chains, self.n_samples);

        let (current, mut key) = self.burn_in_phase(Array1::from(x0.to_vec()), key, progress)?;
        let log_density = current.mapv(|x| self.target.logpdf(x));
        let mut state = SamplingState::new(current, log_density, self.n_samples);

        let mut iterations = 0usize;
        let mut n_accepted = 0usize;
        while !state.is_done() {
            let proposed = self.propose(state.current(), key)?;
            key = key.advance();
            let proposed_log_density = proposed.mapv(|x| self.target.logpdf(x));
            let alpha = self.acceptance(
                state.current(),
                state.log_density(),
                &proposed,
                &proposed_log_density,
            )?;

            let mut rng = key.rng();
            let u = Array1::from_shape_fn(self.n_chains, |_| rng.gen::<f64>());
            key = key.advance();
            let accept = Zip::from(&u).and(&alpha).map_collect(|&u, &a| u < a);

            n_accepted += accept.iter().filter(|&&a| a).count();
            iterations += 1;
            progress.iteration();
            state.record(&proposed, &proposed_log_density, &accept, |chain| {
                progress.accepted(chain)
            });
        }
        progress.finish();

        info!(
            iterations,
            acceptance_rate = n_accepted as f64 / (iterations * self.n_chains) as f64,
            "sampling finished"
        );
        Ok(state.into_samples())
    }

    /// Moves every chain to a fresh proposal draw `burn_in` times, one key per step.
    fn burn_in_phase<P: Progress + ?Sized>(
        &self,
        mut current: Array1<f64>,
        mut key: Key,
        progress: &mut P,
    ) -> Result<(Array1<f64>, Key)> {
        for _ in 0..self.burn_in {
            current = self.propose(&current, key)?;
            key = key.advance();
            progress.burn_in_step();
        }
        if self.burn_in > 0 {
            debug!(steps = self.burn_in, "burn-in finished");
        }
        Ok((current, key))
    }

    /// One candidate per chain, all drawn from the generator of a single key.
    fn propose(&self, current: &Array1<f64>, key: Key) -> Result<Array1<f64>> {
        let mut rng = key.rng();
        current
            .iter()
            .map(|&x| Ok(self.proposal.conditional(x)?.draw(&mut rng)))
            .collect::<Result<Vec<f64>>>()
            .map(Array1::from)
    }

    fn acceptance(
        &self,
        current: &Array1<f64>,
        current_log_density: &Array1<f64>,
        proposed: &Array1<f64>,
        proposed_log_density: &Array1<f64>,
    ) -> Result<Array1<f64>> {
        let mut alpha = Array1::zeros(current.len());
        for (i, a) in alpha.iter_mut().enumerate() {
            let hastings = if self.hastings_ratio {
                let (x1, x2) = (current[i], proposed[i]);
                let forward = self.proposal.conditional(x1)?.logpdf(x2);
                let backward = self.proposal.conditional(x2)?.logpdf(x1);
                Some(log_hastings_correction(forward, backward))
            } else {
                None
            };
            *a = acceptance_probability(
                current_log_density[i],
                proposed_log_density[i],
                hastings,
            );
        }
        Ok(alpha)
    }
}

/// Acceptance probability `min(1, p(x2) / p(x1) · H)` given the target log-densities
/// at the current and proposed states and, optionally, `ln H`.
///
/// Undefined ratios (`0/0`, `∞/∞`, `0·∞`) give `0`. A proposal with positive density
/// from a zero-density state gives `1`, so chains started outside the support can move in.
pub fn acceptance_probability(
    current_log_density: f64,
    proposed_log_density: f64,
    log_hastings: Option<f64>,
) -> f64 {
    let log_ratio = proposed_log_density - current_log_density + log_hastings.unwrap_or(0.0);
    if log_ratio.is_nan() {
        0.0
    } else {
        log_ratio.exp().min(1.0)
    }
}

/// `ln H` with `H = q(x2 → x1) / q(x1 → x2)` for a move from `x1` to `x2`, where
/// `forward` is `q(x1).logpdf(x2)` and `backward` is `q(x2).logpdf(x1)`.
pub fn log_hastings_correction(forward: f64, backward: f64) -> f64 {
    backward - forward
}

/// Keeps the proposed value where `accept` is set and the current one elsewhere.
pub fn transition(
    current: &Array1<f64>,
    proposed: &Array1<f64>,
    accept: &Array1<bool>,
) -> Array1<f64> {
    Zip::from(current)
        .and(proposed)
        .and(accept)
        .map_collect(|&c, &p, &a| if a { p } else { c })
}

/// Chain positions, acceptance counters and the sample buffer of a running sampler.
///
/// Counters never exceed `n_samples`: draws accepted by a chain whose column is full
/// move the chain but are not stored.
///
/// A chain sitting where the target density is zero (typically after burn-in left the
/// support) follows its proposal unconditionally until it re-enters the support. Those
/// moves are not acceptances: nothing is stored or counted for them.
#[derive(Debug, Clone)]
pub struct SamplingState {
    current: Array1<f64>,
    log_density: Array1<f64>,
    counts: Array1<usize>,
    samples: Array2<f64>,
}

impl SamplingState {
    pub fn new(current: Array1<f64>, log_density: Array1<f64>, n_samples: usize) -> Self {
        let n_chains = current.len();
        Self {
            current,
            log_density,
            counts: Array1::zeros(n_chains),
            samples: Array2::from_elem((n_samples, n_chains), f64::NAN),
        }
    }

    pub fn current(&self) -> &Array1<f64> {
        &self.current
    }

    /// Target log-density at the current positions.
    pub fn log_density(&self) -> &Array1<f64> {
        &self.log_density
    }

    pub fn counts(&self) -> &Array1<usize> {
        &self.counts
    }

    pub fn is_done(&self) -> bool {
        let n_samples = self.samples.nrows();
        self.counts.iter().all(|&t| t >= n_samples)
    }

    /// Applies one iteration's decisions and stores accepted draws of chains that still
    /// have room, calling `on_store(chain)` for each stored draw.
    pub fn record(
        &mut self,
        proposed: &Array1<f64>,
        proposed_log_density: &Array1<f64>,
        accept: &Array1<bool>,
        mut on_store: impl FnMut(usize),
    ) {
        let moved = Zip::from(accept)
            .and(&self.log_density)
            .map_collect(|&a, &lp| a || lp == f64::NEG_INFINITY);
        self.current = transition(&self.current, proposed, &moved);
        self.log_density = transition(&self.log_density, proposed_log_density, &moved);

        let n_samples = self.samples.nrows();
        for (chain, &accepted) in accept.iter().enumerate() {
            let t = self.counts[chain];
            if accepted && t < n_samples {
                self.samples[[t, chain]] = proposed[chain];
                self.counts[chain] = t + 1;
                on_store(chain);
            }
        }
    }

    pub fn into_samples(self) -> Array2<f64> {
        self.samples
    }
}
