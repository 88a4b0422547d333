//! Process-level default random source.
//!
//! Callers that want reproducible runs without threading a generator
//! through their code seed this source once per session and then call
//! [`crate::inject::inject`]. Code running injections from several threads
//! should pass its own generator to [`crate::inject::inject_with_rng`]
//! instead; the mutex here serializes callers but cannot make their
//! interleaving deterministic.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Mutex, MutexGuard};

static DEFAULT_SOURCE: Mutex<Option<StdRng>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<StdRng>> {
    // A panic inside a borrower leaves the generator in a valid state.
    DEFAULT_SOURCE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reseeds the default source so subsequent draws are reproducible.
pub fn seed_default_source(seed: u64) {
    log::debug!("Seeding the default random source with {seed}");
    *lock() = Some(StdRng::seed_from_u64(seed));
}

/// Discards any seed and draws fresh state from the operating system.
pub fn reseed_default_source_from_entropy() {
    *lock() = Some(StdRng::from_entropy());
}

/// Lends the default source to `f`, creating it from entropy on first use.
pub fn with_default_source<R>(f: impl FnOnce(&mut StdRng) -> R) -> R {
    let mut guard = lock();
    let rng = guard.get_or_insert_with(StdRng::from_entropy);
    f(rng)
}
