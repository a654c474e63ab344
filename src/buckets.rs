use std::convert::TryFrom;

use crate::{is_valid_id, not_found, Id, Score, Scores, Store, MAX_ID};

pub type NodeId = u32;

/// One score in a bucket chain; `next` points at the previous head.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LinkNode {
    pub score: Score,
    pub next: Option<NodeId>,
}

/// Direct-indexed buckets: `heads[id]` is the newest node for `id`, nodes
/// live in one append-only pool. Insert is O(1) amortized, search O(k).
///
/// The head array is allocated eagerly with `max_id + 1` slots, so the
/// identifier domain has to stay small.
#[derive(Debug)]
pub struct DirectBucketStore {
    pub(crate) heads: Vec<Option<NodeId>>,
    pub(crate) nodes: Vec<LinkNode>,
    max_id: Id,
}

impl Default for DirectBucketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectBucketStore {
    pub fn new() -> Self {
        Self::with_max_id(MAX_ID)
    }

    pub fn with_max_id(max_id: Id) -> Self {
        assert!(max_id > 0, "max_id must be at least 1");
        Self {
            heads: vec![None; max_id as usize + 1],
            nodes: Vec::new(),
            max_id,
        }
    }

    pub fn head(&self, id: Id) -> Option<NodeId> {
        self.heads.get(id as usize).copied().flatten()
    }

    pub fn node(&self, id: NodeId) -> &LinkNode {
        self.nodes.get(id as usize).expect("invalid node id")
    }

    /// Walks the chain of `id`, newest first.
    pub fn chain(&self, id: Id) -> impl Iterator<Item = &LinkNode> + '_ {
        let mut cur = self.head(id);
        std::iter::from_fn(move || {
            let node = self.node(cur?);
            cur = node.next;
            Some(node)
        })
    }

    fn push_node(&mut self, node: LinkNode) -> NodeId {
        let id = NodeId::try_from(self.nodes.len()).expect("too many link nodes allocated");
        self.nodes.push(node);
        id
    }
}

impl Store for DirectBucketStore {
    fn insert(&mut self, id: Id, score: Score) {
        if !is_valid_id(id, self.max_id) {
            return;
        }
        let slot = id as usize;
        let node = self.push_node(LinkNode {
            score,
            next: self.heads[slot],
        });
        self.heads[slot] = Some(node);
    }

    fn search(&self, id: Id) -> Scores {
        if !is_valid_id(id, self.max_id) || self.head(id).is_none() {
            return not_found();
        }
        let mut scores: Scores = self.chain(id).map(|n| i32::from(n.score)).collect();
        if scores.is_empty() {
            return not_found();
        }
        scores.reverse();
        scores
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn sum_scores(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.score)).sum()
    }

    fn max_id(&self) -> Id {
        self.max_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_is_newest_first() {
        let mut store = DirectBucketStore::with_max_id(16);
        store.insert(5, 1);
        store.insert(6, 9);
        store.insert(5, 2);
        store.insert(5, 3);
        let chain: Vec<_> = store.chain(5).map(|n| n.score).collect();
        assert_eq!(chain, [3, 2, 1]);
        assert_eq!(store.head(5), Some(3));
        assert_eq!(store.node(0).next, None);
    }

    #[test]
    fn head_array_covers_bound() {
        let store = DirectBucketStore::with_max_id(16);
        assert_eq!(store.heads.len(), 17);
        assert!(store.heads.iter().all(Option::is_none));
        assert_eq!(store.head(17), None);
    }
}
