use scorestore::{
    bench::run_mixed_suite, run_workload, MixConfig, MixProfile, Store, Variant, MAX_SCORE,
};

#[test]
fn smoke_workload_on_every_variant() {
    for variant in Variant::ALL {
        let mut store = variant.build();
        run_workload(&mut store, 1000, 1000, 11);
        assert_eq!(store.len(), 1000, "{variant}");
        assert!(store.sum_scores() <= 1000 * u64::from(MAX_SCORE));
    }
}

#[test]
fn same_seed_same_contents_across_variants() {
    let mut sums = Vec::new();
    for variant in Variant::ALL {
        let mut store = variant.build();
        run_workload(&mut store, 300, 0, 5);
        sums.push(store.sum_scores());
    }
    assert!(sums.windows(2).all(|w| w[0] == w[1]), "{sums:?}");
}

#[test]
fn mixed_suite_reports_each_profile_and_variant() {
    let config = MixConfig {
        profiles: vec![
            MixProfile::new("Reads", 20, 80, 0).unwrap(),
            MixProfile::new("Sums", 50, 0, 50).unwrap(),
        ],
        ops: 200,
        trials: 2,
    };
    let results = run_mixed_suite(&config, &Variant::ALL);
    assert_eq!(results.len(), 6);
    assert_eq!(results[0].workload, "Reads");
    assert_eq!(results[3].workload, "Sums");
    assert!(results.iter().all(|r| r.ops == 200 && r.avg_op_us() >= 0.0));
}
