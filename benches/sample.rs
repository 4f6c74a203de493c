use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rvs_mcmc::distributions::{Gamma, LogNormal, Normal};
use rvs_mcmc::metropolis_hastings::MetropolisHastings;
use rvs_mcmc::proposal::RandomWalk;
use rvs_mcmc::Key;

fn criterion_benchmark(c: &mut Criterion) {
    let normal = MetropolisHastings::new(
        Normal::new(0.0, 1.0).unwrap(),
        RandomWalk::new(1.0).unwrap(),
        8,
    )
    .n_samples(1_000)
    .burn_in(100)
    .set_seed(42);
    c.bench_function("normal 8 chains x 1000", |b| {
        b.iter(|| normal.sample(black_box(&[0.0; 8])).unwrap())
    });

    let gamma = MetropolisHastings::new(
        Gamma::new(3.0, 1.0).unwrap(),
        |x: f64| LogNormal::new(x.ln(), 0.5),
        8,
    )
    .n_samples(1_000)
    .hastings_ratio(true)
    .set_seed(42);
    c.bench_function("gamma hastings 8 chains x 1000", |b| {
        b.iter(|| gamma.sample(black_box(&[3.0; 8])).unwrap())
    });

    let keys = Key::new(1).fork(8);
    c.bench_function("normal 8 replicas x 2 chains x 1000", |b| {
        let mh = normal.clone();
        let mh = MetropolisHastings::new(mh.target, mh.proposal, 2)
            .n_samples(1_000)
            .burn_in(100);
        b.iter(|| mh.sample_replicas(black_box(&[0.0; 2]), &keys).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
