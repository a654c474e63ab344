use std::{sync::Mutex, time::Duration};

use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use scorestore::{
    workload::{random_id, random_score},
    Id, Score, Store, MAX_ID,
};

static BASE_SEED: Lazy<u64> = Lazy::new(|| {
    std::env::var("SCOREBENCH_BENCH_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5c0e_5eed_0bad_cafe)
});

static RNG_COUNTER: Lazy<Mutex<u64>> = Lazy::new(|| Mutex::new(0));

pub fn usize_env(name: &str, default: usize) -> usize {
    scorestore::config::usize_env(name, default)
}

pub fn duration_env(name: &str, default_secs: f64) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .map(Duration::from_secs_f64)
        .unwrap_or_else(|| Duration::from_secs_f64(default_secs))
}

#[inline]
pub fn seeded_rng() -> StdRng {
    let mut guard = RNG_COUNTER.lock().unwrap();
    let seed = BASE_SEED.wrapping_add(*guard);
    *guard = guard.wrapping_add(1);
    StdRng::seed_from_u64(seed)
}

pub fn uniform_pairs(n: usize) -> Vec<(Id, Score)> {
    let mut rng = seeded_rng();
    (0..n)
        .map(|_| (random_id(&mut rng, MAX_ID), random_score(&mut rng)))
        .collect()
}

/// `n` pairs spread over only `distinct` ids, so every id has a long run.
pub fn hot_pairs(n: usize, distinct: Id) -> Vec<(Id, Score)> {
    assert!(distinct > 0, "distinct must be > 0");
    let mut rng = seeded_rng();
    (0..n)
        .map(|_| (random_id(&mut rng, distinct), random_score(&mut rng)))
        .collect()
}

pub fn random_ids(n: usize) -> Vec<Id> {
    let mut rng = seeded_rng();
    (0..n).map(|_| random_id(&mut rng, MAX_ID)).collect()
}

pub fn fill<S: Store + ?Sized>(store: &mut S, pairs: &[(Id, Score)]) {
    for &(id, score) in pairs {
        store.insert(id, score);
    }
}
