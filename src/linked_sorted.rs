use crate::{
    is_valid_id,
    sorted_array::{collect_run, insert_position},
    Id, Score, Scores, Store, MAX_ID,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LinkedRecord {
    pub id: Id,
    pub score: Score,
    pub next: Option<usize>,
}

/// The sorted array of [`crate::SortedArrayStore`] plus successor links.
///
/// Every insert rebuilds all links to plain sequential order, an extra O(n)
/// pass whose cost is what this variant measures. `search` ignores the
/// links; only [`LinkedSortedStore::links`] and `sum_scores` walk them.
#[derive(Debug)]
pub struct LinkedSortedStore {
    nodes: Vec<LinkedRecord>,
    head: Option<usize>,
    max_id: Id,
}

impl Default for LinkedSortedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkedSortedStore {
    pub fn new() -> Self {
        Self::with_max_id(MAX_ID)
    }

    pub fn with_max_id(max_id: Id) -> Self {
        assert!(max_id > 0, "max_id must be at least 1");
        Self {
            nodes: Vec::new(),
            head: None,
            max_id,
        }
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn records(&self) -> &[LinkedRecord] {
        &self.nodes
    }

    /// Follows the successor chain from the head.
    pub fn links(&self) -> Links<'_> {
        Links {
            nodes: &self.nodes,
            cur: self.head,
            remaining: self.nodes.len(),
        }
    }

    fn rebuild_links(&mut self) {
        if self.nodes.is_empty() {
            self.head = None;
            return;
        }
        self.head = Some(0);
        let last = self.nodes.len() - 1;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.next = if i < last { Some(i + 1) } else { None };
        }
    }
}

impl Store for LinkedSortedStore {
    fn insert(&mut self, id: Id, score: Score) {
        if !is_valid_id(id, self.max_id) {
            return;
        }
        let pos = insert_position(&self.nodes, id, |n| n.id);
        self.nodes.insert(
            pos,
            LinkedRecord {
                id,
                score,
                next: None,
            },
        );
        self.rebuild_links();
    }

    fn search(&self, id: Id) -> Scores {
        collect_run(&self.nodes, id, |n| n.id, |n| n.score)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn sum_scores(&self) -> u64 {
        self.links().map(|(_, score)| u64::from(score)).sum()
    }

    fn max_id(&self) -> Id {
        self.max_id
    }
}

/// Iterator over `(id, score)` in link order. Stops after `len` steps even if
/// the links were to form a cycle.
#[derive(Clone, Debug)]
pub struct Links<'a> {
    nodes: &'a [LinkedRecord],
    cur: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Links<'a> {
    type Item = (Id, Score);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        self.remaining -= 1;
        Some((node.id, node.score))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
