#![no_main]
use libfuzzer_sys::fuzz_target;
use rewind::fenwick::FenwickTree;
use rewind::naive::NaiveRankSet;

fuzz_target!(|data: (u16, Vec<(u16, u8)>, u16)| {
    let (n_raw, ops, k_raw) = data;
    let n = n_raw as usize % 512 + 1;

    let mut fw = FenwickTree::<i64>::new(n);
    let mut naive = NaiveRankSet::new(n);

    // Non-negative deltas keep the kth precondition intact.
    for &(idx_raw, delta_raw) in &ops {
        let index = idx_raw as usize % n + 1;
        let delta = (delta_raw % 8) as i64;
        fw.add(index, delta).unwrap();
        naive.add(index, delta);
    }

    for i in 0..=n {
        assert_eq!(fw.prefix_sum(i).unwrap(), naive.prefix_sum(i));
    }

    let total = naive.total();
    assert_eq!(fw.total(), total);
    if total > 0 {
        let k = k_raw as i64 % total + 1;
        let idx = fw.kth(k).unwrap();
        assert_eq!(Some(idx), naive.kth(k));
        assert!(fw.prefix_sum(idx).unwrap() >= k);
        assert!(fw.prefix_sum(idx - 1).unwrap() < k);
    }
});
