/*!
Explicit, copyable handles on a deterministic pseudo-random stream.

A [`Key`] is consumed by exactly one (possibly vectorised) draw. The following key is
derived with [`Key::advance`], so a whole sampler run is a pure function of the key it
started from. Nothing here touches a global generator except [`Key::from_entropy`].

```rust
use rvs_mcmc::key::Key;
use rand::Rng;

let key = Key::new(42);
let a: f64 = key.rng().gen();
let b: f64 = key.rng().gen();
assert_eq!(a, b);

let c: f64 = key.advance().rng().gen();
assert_ne!(a, c);
```
*/

use rand::rngs::SmallRng;
use rand::{thread_rng, Rng, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(u64);

impl Key {
    /// Creates a key from a seed.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Creates a fresh key from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self(thread_rng().gen::<u64>())
    }

    /// The raw stream position.
    pub fn seed(self) -> u64 {
        self.0
    }

    /// Derives the next key in the stream (one SplitMix64 step).
    pub fn advance(self) -> Self {
        Self(mix(self.0.wrapping_add(GOLDEN_GAMMA)))
    }

    /// Derives `n` keys that are pairwise independent of each other and of `self`.
    ///
    /// Used to give independent sampler runs their own streams.
    pub fn fork(self, n: usize) -> Vec<Key> {
        let mut keys = Vec::with_capacity(n);
        let mut state = self.0 ^ 0xD1B5_4A32_D192_ED03;
        for _ in 0..n {
            state = state.wrapping_add(GOLDEN_GAMMA);
            keys.push(Key(mix(state)));
        }
        keys
    }

    /// Materialises a generator for a single draw.
    pub fn rng(self) -> SmallRng {
        SmallRng::seed_from_u64(self.0)
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
