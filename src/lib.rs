#![deny(clippy::uninlined_format_args)]
#![deny(clippy::to_string_in_format_args)]
//! Bounded-ID score multimaps and the benchmark that compares them.
//!
//! Three containers map an identifier in `1..=MAX_ID` to every score
//! inserted under it:
//!
//! - [`SortedArrayStore`]: one sorted record array, binary search, shifting
//!   insert, ×10 capacity growth.
//! - [`DirectBucketStore`]: a head slot per identifier chained into an
//!   append-only node pool. O(1) insert.
//! - [`LinkedSortedStore`]: the sorted array again, with successor links that
//!   are rebuilt after every insert.
//!
//! [`bench::run_benchmarks`] times all of them over a geometric progression
//! of workload sizes and extrapolates the sizes that blow the time budget.

use smallvec::SmallVec;

pub mod bench;
pub mod buckets;
pub mod config;
pub mod linked_sorted;
pub mod report;
pub mod sorted_array;
pub mod variant;
pub mod workload;

pub use bench::{estimate_next, run_benchmarks, BenchmarkResult};
pub use buckets::DirectBucketStore;
pub use config::{BenchConfig, MixConfig};
pub use linked_sorted::LinkedSortedStore;
pub use report::ReportError;
pub use sorted_array::{GrowthPolicy, SortedArrayStore};
pub use variant::Variant;
pub use workload::{run_workload, MixProfile};

#[cfg(feature = "fast-hash")]
use rustc_hash::FxHasher;
#[cfg(feature = "fast-hash")]
use std::hash::BuildHasherDefault;

#[cfg(feature = "fast-hash")]
type Build = BuildHasherDefault<FxHasher>;
#[cfg(not(feature = "fast-hash"))]
type Build = ahash::RandomState;

/// Hash set used wherever the driver needs to deduplicate identifiers.
pub type FastHashSet<K> = hashbrown::HashSet<K, Build>;

pub type Id = u32;
pub type Score = u8;

/// Search result. Either the matching scores or the single [`NOT_FOUND`].
pub type Scores = SmallVec<[i32; 4]>;

/// Largest valid identifier. Identifier `0` is never valid.
pub const MAX_ID: Id = 1 << 20;
/// Largest score the workloads generate.
pub const MAX_SCORE: Score = 100;
/// Sentinel returned (alone) by `search` when nothing matches.
pub const NOT_FOUND: i32 = -1;

#[inline]
pub fn not_found() -> Scores {
    smallvec::smallvec![NOT_FOUND]
}

#[inline]
pub fn is_valid_id(id: Id, max_id: Id) -> bool {
    id != 0 && id <= max_id
}

/// Common contract of the three containers.
///
/// Duplicate identifiers are allowed; `search` returns every score stored
/// under the identifier in insertion order, or `[NOT_FOUND]`.
pub trait Store {
    /// Adds `(id, score)`. Identifiers outside `1..=max_id()` are dropped.
    fn insert(&mut self, id: Id, score: Score);

    fn search(&self, id: Id) -> Scores;

    /// Number of accepted records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of every stored score.
    fn sum_scores(&self) -> u64;

    fn max_id(&self) -> Id;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn insert(&mut self, id: Id, score: Score) {
        (**self).insert(id, score)
    }

    fn search(&self, id: Id) -> Scores {
        (**self).search(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn sum_scores(&self) -> u64 {
        (**self).sum_scores()
    }

    fn max_id(&self) -> Id {
        (**self).max_id()
    }
}
