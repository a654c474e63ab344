use scorestore::estimate_next;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn no_history_estimates_zero() {
    assert_eq!(estimate_next(&[], &[], 4000), Duration::ZERO);
}

#[test]
fn single_point_is_propagated() {
    assert_eq!(estimate_next(&[ms(5)], &[1000], 2000), ms(5));
}

#[test]
fn growth_ratio_is_applied() {
    assert_eq!(estimate_next(&[ms(5), ms(10)], &[1000, 2000], 4000), ms(20));
}

#[test]
fn shrinking_trend_uses_size_ratio() {
    assert_eq!(estimate_next(&[ms(10), ms(5)], &[1000, 2000], 4000), ms(10));
}

#[test]
fn estimate_never_undercuts_last_point() {
    let est = estimate_next(&[ms(10), ms(5)], &[1000, 2000], 2000);
    assert_eq!(est, ms(5));
}

#[test]
fn only_last_two_points_matter() {
    let est = estimate_next(&[ms(1), ms(100), ms(300)], &[1000, 2000, 4000], 8000);
    assert_eq!(est, ms(900));
}
