use crate::{is_valid_id, not_found, Id, Score, Scores, Store, MAX_ID};

/// One `(id, score)` pair as stored by the array-backed variants.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    pub id: Id,
    pub score: Score,
}

/// Geometric capacity growth for [`SortedArrayStore`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GrowthPolicy {
    factor: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self { factor: 10 }
    }
}

impl GrowthPolicy {
    pub fn new(factor: usize) -> Self {
        assert!(factor >= 2, "growth factor must be >= 2");
        Self { factor }
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Smallest `current * factor^k` that holds `needed` slots. Once another
    /// multiplication would leave `isize` range the exact `needed` is used.
    pub fn next_capacity(&self, current: usize, needed: usize) -> usize {
        let limit = isize::MAX as usize / self.factor;
        let mut cap = current.max(1);
        while cap < needed {
            if cap > limit {
                return needed;
            }
            cap *= self.factor;
        }
        cap
    }
}

/// Lower bound: first index whose id is `>= id`.
#[inline]
pub(crate) fn lower_bound<T>(items: &[T], id: Id, key: impl Fn(&T) -> Id) -> usize {
    items.partition_point(|item| key(item) < id)
}

/// Insert position behind every record already stored under `id`, so equal
/// ids keep their insertion order.
#[inline]
pub(crate) fn insert_position<T>(items: &[T], id: Id, key: impl Fn(&T) -> Id) -> usize {
    let mut pos = lower_bound(items, id, &key);
    while pos < items.len() && key(&items[pos]) == id {
        pos += 1;
    }
    pos
}

/// Collects the scores of the run of `id` starting at its lower bound.
#[inline]
pub(crate) fn collect_run<T>(
    items: &[T],
    id: Id,
    key: impl Fn(&T) -> Id,
    score: impl Fn(&T) -> Score,
) -> Scores {
    let start = lower_bound(items, id, &key);
    match items.get(start) {
        Some(first) if key(first) == id => items[start..]
            .iter()
            .take_while(|&item| key(item) == id)
            .map(|item| i32::from(score(item)))
            .collect(),
        _ => not_found(),
    }
}

/// Records kept in one array sorted by id. Insert is O(n) because of the
/// shift; search is O(log n + k).
#[derive(Debug)]
pub struct SortedArrayStore {
    data: Vec<Record>,
    capacity: usize,
    growth: GrowthPolicy,
    max_id: Id,
}

impl Default for SortedArrayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SortedArrayStore {
    pub fn new() -> Self {
        Self::with_config(MAX_ID, GrowthPolicy::default())
    }

    pub fn with_max_id(max_id: Id) -> Self {
        Self::with_config(max_id, GrowthPolicy::default())
    }

    pub fn with_growth_factor(factor: usize) -> Self {
        Self::with_config(MAX_ID, GrowthPolicy::new(factor))
    }

    pub fn with_config(max_id: Id, growth: GrowthPolicy) -> Self {
        assert!(max_id > 0, "max_id must be at least 1");
        Self {
            data: Vec::with_capacity(1),
            capacity: 1,
            growth,
            max_id,
        }
    }

    /// Capacity as tracked by the growth policy.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn records(&self) -> &[Record] {
        &self.data
    }

    fn ensure_capacity(&mut self, extra: usize) {
        let needed = self.data.len() + extra;
        if needed <= self.capacity {
            return;
        }
        let new_cap = self.growth.next_capacity(self.capacity, needed);
        self.data.reserve_exact(new_cap - self.data.len());
        self.capacity = new_cap;
    }
}

impl Store for SortedArrayStore {
    fn insert(&mut self, id: Id, score: Score) {
        if !is_valid_id(id, self.max_id) {
            return;
        }
        self.ensure_capacity(1);
        let pos = insert_position(&self.data, id, |r| r.id);
        self.data.insert(pos, Record { id, score });
    }

    fn search(&self, id: Id) -> Scores {
        collect_run(&self.data, id, |r| r.id, |r| r.score)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn sum_scores(&self) -> u64 {
        self.data.iter().map(|r| u64::from(r.score)).sum()
    }

    fn max_id(&self) -> Id {
        self.max_id
    }
}
