use scorestore::{LinkedSortedStore, Store, NOT_FOUND};

fn assert_chain_covers_records(store: &LinkedSortedStore) {
    let walked: Vec<_> = store.links().collect();
    let stored: Vec<_> = store.records().iter().map(|r| (r.id, r.score)).collect();
    assert_eq!(walked, stored);
    assert!(walked.windows(2).all(|w| w[0].0 <= w[1].0));
    let last = store.records().last().map(|r| r.next);
    assert!(matches!(last, None | Some(None)));
}

#[test]
fn links_follow_array_after_every_insert() {
    let mut store = LinkedSortedStore::new();
    for (i, id) in [50u32, 10, 30, 10, 70, 20, 50, 1].into_iter().enumerate() {
        store.insert(id, i as u8);
        assert_chain_covers_records(&store);
        assert_eq!(store.head(), Some(0));
    }
    assert_eq!(store.search(10).as_slice(), [1, 3]);
    assert_eq!(store.search(50).as_slice(), [0, 6]);
    assert_eq!(store.search(40).as_slice(), [NOT_FOUND]);
}

#[test]
fn sum_walks_the_chain() {
    let mut store = LinkedSortedStore::new();
    for score in 0..=100u8 {
        store.insert(u32::from(score) + 1, score);
    }
    assert_eq!(store.sum_scores(), 5050);
}
