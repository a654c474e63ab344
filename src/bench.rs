//! Time-budgeted benchmark driver.
//!
//! Variants are processed outer, sizes in the middle and repeats inner. Each
//! repeat builds a fresh store and times three phases: the inserts, a batch
//! of random lookups, and summing every unique inserted id through `search`.
//! A repeat that overruns [`BenchConfig::max_duration`] ends the size; its
//! row is then projected from the variant's earlier measured averages, and
//! the driver moves on to the next size.

use std::{
    hint::black_box,
    ops::AddAssign,
    time::{Duration, Instant},
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::{
    config::STREAM_INC,
    workload::{random_id, random_score, run_mixed},
    BenchConfig, FastHashSet, Id, MixConfig, Score, Store, Variant,
};

/// Provenance recorded on extrapolated rows.
pub const ESTIMATE_SOURCE: &str = "extrapolated from previous points";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    pub insert: Duration,
    pub search: Duration,
    pub sum: Duration,
}

impl AddAssign for PhaseTimings {
    fn add_assign(&mut self, rhs: Self) {
        self.insert += rhs.insert;
        self.search += rhs.search;
        self.sum += rhs.sum;
    }
}

impl PhaseTimings {
    pub fn average(self, runs: usize) -> Self {
        Self {
            insert: average(self.insert, runs),
            search: average(self.search, runs),
            sum: average(self.sum, runs),
        }
    }
}

fn average(total: Duration, runs: usize) -> Duration {
    if runs == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((total.as_nanos() / runs as u128) as u64)
}

/// One CSV row: a variant at one workload size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub solution: String,
    pub inserts: usize,
    pub timings: PhaseTimings,
    pub estimated: bool,
    pub estimate_src: Option<String>,
}

/// RNG for one repeat. Seed and stream both move with the repeat index so
/// repeats and sizes draw decorrelated inputs.
pub fn repeat_rng(seed: u64, size: usize, repeat: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(
        seed.wrapping_add(size as u64)
            .wrapping_add(repeat as u64),
    );
    rng.set_stream((seed ^ STREAM_INC).wrapping_add(repeat as u64));
    rng
}

/// Runs the three timed phases once against `store`. Input generation
/// happens outside the timed sections.
pub fn run_one<S, R>(store: &mut S, inserts: usize, searches: usize, rng: &mut R) -> PhaseTimings
where
    S: Store + ?Sized,
    R: rand::Rng + ?Sized,
{
    let max_id = store.max_id();
    let pairs: Vec<(Id, Score)> = (0..inserts)
        .map(|_| (random_id(rng, max_id), random_score(rng)))
        .collect();

    let start = Instant::now();
    for &(id, score) in &pairs {
        store.insert(id, score);
    }
    let insert = start.elapsed();

    let search_ids: Vec<Id> = (0..searches).map(|_| random_id(rng, max_id)).collect();
    let start = Instant::now();
    for &id in &search_ids {
        black_box(store.search(id));
    }
    let search = start.elapsed();

    let mut unique = FastHashSet::with_capacity_and_hasher(pairs.len(), Default::default());
    unique.extend(pairs.iter().map(|&(id, _)| id));

    let start = Instant::now();
    let mut total: i64 = 0;
    for &id in &unique {
        total += store
            .search(id)
            .iter()
            .filter(|&&s| s >= 0)
            .map(|&s| i64::from(s))
            .sum::<i64>();
    }
    black_box(total);
    let sum = start.elapsed();

    PhaseTimings {
        insert,
        search,
        sum,
    }
}

/// Projects the duration at `current` from earlier measured averages.
///
/// Uses the growth ratio of the last two points; a shrinking ratio is
/// replaced by the size ratio, and the result never drops below the last
/// measured point.
pub fn estimate_next(history: &[Duration], sizes: &[usize], current: usize) -> Duration {
    let (last, prev) = match history {
        [] => return Duration::ZERO,
        [.., prev, last] => (*last, *prev),
        [last] => return *last,
    };
    if last.is_zero() || prev.is_zero() {
        return last;
    }

    let mut ratio = last.as_nanos() as f64 / prev.as_nanos() as f64;
    if ratio < 1.0 {
        ratio = match sizes.last() {
            Some(&size) if size > 0 => current as f64 / size as f64,
            _ => 1.0,
        };
    }

    let projected = Duration::from_nanos((last.as_nanos() as f64 * ratio).round() as u64);
    projected.max(last)
}

/// Measured averages of one variant, in size order.
#[derive(Clone, Debug, Default)]
pub struct History {
    sizes: Vec<usize>,
    insert: Vec<Duration>,
    search: Vec<Duration>,
    sum: Vec<Duration>,
}

impl History {
    pub fn record(&mut self, size: usize, timings: PhaseTimings) {
        self.sizes.push(size);
        self.insert.push(timings.insert);
        self.search.push(timings.search);
        self.sum.push(timings.sum);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Each phase is extrapolated from its own history.
    pub fn estimate(&self, size: usize) -> PhaseTimings {
        PhaseTimings {
            insert: estimate_next(&self.insert, &self.sizes, size),
            search: estimate_next(&self.search, &self.sizes, size),
            sum: estimate_next(&self.sum, &self.sizes, size),
        }
    }
}

/// Averaged timings for `size`, or `None` when a repeat overran the budget.
pub fn measure_size(variant: Variant, size: usize, config: &BenchConfig) -> Option<PhaseTimings> {
    let repeats = config.repeats.max(1);
    let mut total = PhaseTimings::default();

    for r in 0..repeats {
        let mut rng = repeat_rng(config.seed, size, r);
        let mut store = variant.build();

        let run_start = Instant::now();
        let timings = run_one(&mut store, size, config.search_count, &mut rng);
        let run_dur = run_start.elapsed();

        if run_dur > config.max_duration {
            warn!(
                solution = variant.name(),
                inserts = size,
                "repeat {}/{repeats} timed out after {run_dur:?}",
                r + 1
            );
            return None;
        }

        debug!(
            solution = variant.name(),
            inserts = size,
            "repeat {}/{repeats} -> insert={:?} search={:?} sum={:?}",
            r + 1,
            timings.insert,
            timings.search,
            timings.sum
        );
        total += timings;
    }

    Some(total.average(repeats))
}

/// Benchmarks every variant over `config.sizes`, one row per (variant, size).
pub fn run_benchmarks(config: &BenchConfig, variants: &[Variant]) -> Vec<BenchmarkResult> {
    run_benchmarks_with(config, variants, measure_size)
}

/// [`run_benchmarks`] with the per-size measurement supplied by the caller.
/// `measure` returns `None` for a size that overran the budget; only
/// `Some` points enter the variant's history.
pub fn run_benchmarks_with<M>(
    config: &BenchConfig,
    variants: &[Variant],
    mut measure: M,
) -> Vec<BenchmarkResult>
where
    M: FnMut(Variant, usize, &BenchConfig) -> Option<PhaseTimings>,
{
    let mut results = Vec::with_capacity(variants.len() * config.sizes.len());

    for &variant in variants {
        let mut history = History::default();

        for &size in &config.sizes {
            info!("== {variant}, inserts {size} ==");

            let result = match measure(variant, size, config) {
                Some(timings) => {
                    history.record(size, timings);
                    BenchmarkResult {
                        solution: variant.name().to_owned(),
                        inserts: size,
                        timings,
                        estimated: false,
                        estimate_src: None,
                    }
                }
                None => {
                    let timings = history.estimate(size);
                    info!(
                        solution = variant.name(),
                        inserts = size,
                        "extrapolated from {} measured points",
                        history.len()
                    );
                    BenchmarkResult {
                        solution: variant.name().to_owned(),
                        inserts: size,
                        timings,
                        estimated: true,
                        estimate_src: Some(ESTIMATE_SOURCE.to_owned()),
                    }
                }
            };
            results.push(result);
        }
    }

    results
}

/// Average cost of one mixed workload on one variant.
#[derive(Clone, Debug, PartialEq)]
pub struct MixResult {
    pub workload: String,
    pub solution: String,
    pub ops: usize,
    pub avg: Duration,
}

impl MixResult {
    pub fn avg_op_us(&self) -> f64 {
        if self.ops == 0 {
            return 0.0;
        }
        self.avg.as_secs_f64() / self.ops as f64 * 1e6
    }

    pub fn throughput(&self) -> f64 {
        let secs = self.avg.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.ops as f64 / secs
    }
}

/// Every profile against every variant; trial `t` is seeded with `t`.
pub fn run_mixed_suite(config: &MixConfig, variants: &[Variant]) -> Vec<MixResult> {
    let trials = config.trials.max(1);
    let mut results = Vec::with_capacity(config.profiles.len() * variants.len());

    for profile in &config.profiles {
        info!(
            "workload {} (I:{}% S:{}% Sum:{}%)",
            profile.name, profile.insert_pct, profile.search_pct, profile.sum_pct
        );
        for &variant in variants {
            let mut total = Duration::ZERO;
            for trial in 0..trials {
                let mut store = variant.build();
                total += run_mixed(&mut store, profile, config.ops, trial as u64);
            }
            let result = MixResult {
                workload: profile.name.clone(),
                solution: variant.name().to_owned(),
                ops: config.ops,
                avg: average(total, trials),
            };
            info!(
                "  {variant}: {:?}, {:.0} ops/sec",
                result.avg,
                result.throughput()
            );
            results.push(result);
        }
    }

    results
}
