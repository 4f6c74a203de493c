/*!
Observers for a running sampler.

The sampler reports to a [`Progress`] sink: one unit per burn-in step, one unit per
accepted and stored draw (per chain), and a tick per sampling iteration. Sinks only
observe; they never influence which draws are made.
*/

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Chains beyond this many share the total bar only.
const MAX_CHAIN_BARS: usize = 8;

/// How often (in sampling iterations) chain bars refresh their acceptance rate.
const MESSAGE_EVERY: usize = 256;

/// Receives progress events from [`crate::metropolis_hastings::MetropolisHastings`].
///
/// Every method defaults to a no-op.
pub trait Progress {
    fn start(&mut self, _burn_in: usize, _n_chains: usize, _n_samples: usize) {}

    fn burn_in_step(&mut self) {}

    fn iteration(&mut self) {}

    /// Chain `chain` stored one more sample.
    fn accepted(&mut self, _chain: usize) {}

    fn finish(&mut self) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn start(&mut self, burn_in: usize, n_chains: usize, n_samples: usize) {
        (**self).start(burn_in, n_chains, n_samples)
    }

    fn burn_in_step(&mut self) {
        (**self).burn_in_step()
    }

    fn iteration(&mut self) {
        (**self).iteration()
    }

    fn accepted(&mut self, chain: usize) {
        (**self).accepted(chain)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

/// Terminal progress bars: burn-in, one per chain (up to eight), and the total.
pub struct ProgressBars {
    multi: MultiProgress,
    style: ProgressStyle,
    burn_in: Option<ProgressBar>,
    chains: Vec<ProgressBar>,
    accepted: Vec<u64>,
    total: Option<ProgressBar>,
    iterations: usize,
}

impl ProgressBars {
    /// Bars drawn to stderr.
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{prefix:8} {bar:40.cyan/blue} {pos}/{len} ({eta}) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        Self {
            multi: MultiProgress::with_draw_target(target),
            style,
            burn_in: None,
            chains: Vec::new(),
            accepted: Vec::new(),
            total: None,
            iterations: 0,
        }
    }

    fn bar(&self, len: usize, prefix: String) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new(len as u64));
        pb.set_style(self.style.clone());
        pb.set_prefix(prefix);
        pb
    }

    /// Position of the burn-in bar, the chain bars and the total bar.
    pub fn positions(&self) -> (u64, Vec<u64>, u64) {
        (
            self.burn_in.as_ref().map_or(0, |pb| pb.position()),
            self.chains.iter().map(|pb| pb.position()).collect(),
            self.total.as_ref().map_or(0, |pb| pb.position()),
        )
    }
}

impl Default for ProgressBars {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ProgressBars {
    fn start(&mut self, burn_in: usize, n_chains: usize, n_samples: usize) {
        if burn_in > 0 {
            self.burn_in = Some(self.bar(burn_in, "Burn-in".to_string()));
        }
        self.chains = (0..n_chains.min(MAX_CHAIN_BARS))
            .map(|i| self.bar(n_samples, format!("Chain {i}")))
            .collect();
        self.accepted = vec![0; n_chains];
        self.total = Some(self.bar(n_samples * n_chains, "Total".to_string()));
        self.iterations = 0;
    }

    fn burn_in_step(&mut self) {
        if let Some(pb) = &self.burn_in {
            pb.inc(1);
        }
    }

    fn iteration(&mut self) {
        if let Some(pb) = self.burn_in.take() {
            pb.finish_with_message("Done!");
        }
        self.iterations += 1;
        if self.iterations % MESSAGE_EVERY == 0 {
            for (pb, &acc) in self.chains.iter().zip(&self.accepted) {
                let rate = acc as f64 / self.iterations as f64;
                pb.set_message(format!("acc {rate:.2}"));
            }
        }
    }

    fn accepted(&mut self, chain: usize) {
        if let Some(pb) = self.chains.get(chain) {
            pb.inc(1);
        }
        if let Some(n) = self.accepted.get_mut(chain) {
            *n += 1;
        }
        if let Some(pb) = &self.total {
            pb.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(pb) = self.burn_in.take() {
            pb.finish_with_message("Done!");
        }
        for pb in &self.chains {
            pb.finish_with_message("Done!");
        }
        if let Some(pb) = &self.total {
            pb.finish_with_message("Done!");
        }
    }
}
