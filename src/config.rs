use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::MixProfile;

/// Odd 64-bit constant mixed into the per-repeat stream selector.
pub const STREAM_INC: u64 = 0x9e37_79b9_7f4a_7c15;

pub const DEFAULT_REPEATS: usize = 10;
pub const DEFAULT_SEARCHES: usize = 100_000;
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(10 * 60);

/// 1,000 doubling up to 16,384,000.
pub fn default_sizes() -> Vec<usize> {
    (0..15).map(|i| 1_000usize << i).collect()
}

pub fn usize_env(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

pub fn u64_env(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Nanoseconds since the epoch, the default base seed.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Workload sizes, processed in order.
    pub sizes: Vec<usize>,
    /// Timed repeats per size.
    pub repeats: usize,
    /// Random lookups per repeat.
    pub search_count: usize,
    /// A repeat that runs longer than this stops the size and turns it into
    /// an extrapolated point.
    pub max_duration: Duration,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            repeats: DEFAULT_REPEATS,
            search_count: DEFAULT_SEARCHES,
            max_duration: DEFAULT_MAX_DURATION,
            seed: clock_seed(),
        }
    }
}

impl BenchConfig {
    /// Defaults overridden by `SCOREBENCH_SEED`, `SCOREBENCH_REPEATS`,
    /// `SCOREBENCH_SEARCHES` and `SCOREBENCH_MAX_SECS`.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            sizes: base.sizes,
            repeats: usize_env("SCOREBENCH_REPEATS", base.repeats),
            search_count: usize_env("SCOREBENCH_SEARCHES", base.search_count),
            max_duration: Duration::from_secs(u64_env(
                "SCOREBENCH_MAX_SECS",
                base.max_duration.as_secs(),
            )),
            seed: u64_env("SCOREBENCH_SEED", base.seed),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MixConfig {
    pub profiles: Vec<MixProfile>,
    pub ops: usize,
    pub trials: usize,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            profiles: MixProfile::defaults(),
            ops: 100_000,
            trials: 5,
        }
    }
}
