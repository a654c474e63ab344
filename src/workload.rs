use std::{
    hint::black_box,
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

use crate::{Id, Score, Store, MAX_SCORE};

/// Uniform id in `1..=max_id`. Panics if `max_id` is 0; the stores refuse
/// such a bound at construction.
#[inline]
pub fn random_id<R: Rng + ?Sized>(rng: &mut R, max_id: Id) -> Id {
    rng.gen_range(1..=max_id)
}

#[inline]
pub fn random_score<R: Rng + ?Sized>(rng: &mut R) -> Score {
    rng.gen_range(0..=MAX_SCORE)
}

/// `inserts` random inserts followed by `searches` random lookups, all drawn
/// from one RNG seeded with `seed`. Search results are discarded.
pub fn run_workload<S: Store + ?Sized>(store: &mut S, inserts: usize, searches: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_id = store.max_id();

    for _ in 0..inserts {
        let id = random_id(&mut rng, max_id);
        let score = random_score(&mut rng);
        store.insert(id, score);
    }

    for _ in 0..searches {
        let id = random_id(&mut rng, max_id);
        black_box(store.search(id));
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("operation mix `{name}` sums to {total}%, expected 100%")]
pub struct MixError {
    pub name: String,
    pub total: u32,
}

/// Operation ratio for the mixed workload, in percent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixProfile {
    pub name: String,
    pub insert_pct: u32,
    pub search_pct: u32,
    pub sum_pct: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Insert,
    Search,
    Sum,
}

impl MixProfile {
    pub fn new(
        name: impl Into<String>,
        insert_pct: u32,
        search_pct: u32,
        sum_pct: u32,
    ) -> Result<Self, MixError> {
        let name = name.into();
        let total = insert_pct
            .saturating_add(search_pct)
            .saturating_add(sum_pct);
        if total != 100 {
            return Err(MixError { name, total });
        }
        Ok(Self {
            name,
            insert_pct,
            search_pct,
            sum_pct,
        })
    }

    pub fn defaults() -> Vec<MixProfile> {
        [
            ("Write-Heavy", 70, 30, 0),
            ("Read-Heavy", 30, 70, 0),
            ("Balanced", 33, 33, 34),
            ("Query-Intensive", 10, 85, 5),
            ("Mixed-Analytics", 50, 40, 10),
        ]
        .into_iter()
        .map(|(name, i, s, a)| Self {
            name: name.to_owned(),
            insert_pct: i,
            search_pct: s,
            sum_pct: a,
        })
        .collect()
    }

    /// Maps a roll in `1..=100` onto an operation.
    pub fn pick(&self, roll: u32) -> Op {
        if roll <= self.insert_pct {
            Op::Insert
        } else if roll <= self.insert_pct + self.search_pct {
            Op::Search
        } else {
            Op::Sum
        }
    }
}

/// Runs `ops` operations drawn from `profile` and returns the elapsed time.
pub fn run_mixed<S: Store + ?Sized>(
    store: &mut S,
    profile: &MixProfile,
    ops: usize,
    seed: u64,
) -> Duration {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_id = store.max_id();

    let start = Instant::now();
    for _ in 0..ops {
        match profile.pick(rng.gen_range(1..=100)) {
            Op::Insert => {
                let id = random_id(&mut rng, max_id);
                let score = random_score(&mut rng);
                store.insert(id, score);
            }
            Op::Search => {
                black_box(store.search(random_id(&mut rng, max_id)));
            }
            Op::Sum => {
                black_box(store.sum_scores());
            }
        }
    }
    start.elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortedArrayStore;

    #[test]
    fn workload_inserts_every_pair() {
        let mut store = SortedArrayStore::new();
        run_workload(&mut store, 1000, 1000, 7);
        assert_eq!(store.len(), 1000);
        assert!(store.records().iter().all(|r| r.score <= MAX_SCORE));
    }

    #[test]
    fn workload_is_deterministic_per_seed() {
        let mut a = SortedArrayStore::new();
        let mut b = SortedArrayStore::new();
        run_workload(&mut a, 200, 0, 42);
        run_workload(&mut b, 200, 0, 42);
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn profile_must_sum_to_hundred() {
        let err = MixProfile::new("bad", 50, 40, 5).unwrap_err();
        assert_eq!(err.total, 95);
        assert!(MixProfile::new("ok", 50, 40, 10).is_ok());
        let err = MixProfile::new("huge", u32::MAX, 101, 0).unwrap_err();
        assert_eq!(err.total, u32::MAX);
        assert!(MixProfile::new("wrap", u32::MAX, 101, 0).is_err());
        assert!(MixProfile::new("wrap", u32::MAX - 99, 100, 100).is_err());
        for p in MixProfile::defaults() {
            assert_eq!(p.insert_pct + p.search_pct + p.sum_pct, 100, "{}", p.name);
        }
    }

    #[test]
    fn pick_follows_cumulative_bounds() {
        let p = MixProfile::new("p", 10, 85, 5).unwrap();
        assert_eq!(p.pick(1), Op::Insert);
        assert_eq!(p.pick(10), Op::Insert);
        assert_eq!(p.pick(11), Op::Search);
        assert_eq!(p.pick(95), Op::Search);
        assert_eq!(p.pick(96), Op::Sum);
        assert_eq!(p.pick(100), Op::Sum);
    }

    #[test]
    fn write_only_mix_fills_store() {
        let p = MixProfile::new("w", 100, 0, 0).unwrap();
        let mut store = SortedArrayStore::new();
        run_mixed(&mut store, &p, 500, 3);
        assert_eq!(store.len(), 500);
    }
}
