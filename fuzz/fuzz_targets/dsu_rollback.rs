#![no_main]
use libfuzzer_sys::fuzz_target;
use rewind::RollbackUnionFind;

fn signature(dsu: &RollbackUnionFind) -> (Vec<usize>, usize) {
    let roots = (0..dsu.len()).map(|i| dsu.find(i).unwrap()).collect();
    (roots, dsu.components())
}

fuzz_target!(|data: Vec<(u8, u8, bool)>| {
    let n = 64usize;
    let mut dsu = RollbackUnionFind::new(n);
    let mut saved = Vec::new();

    for &(a, b, snap) in &data {
        if snap {
            saved.push((dsu.snapshot(), signature(&dsu)));
        }
        dsu.union(a as usize % n, b as usize % n).unwrap();
    }

    while let Some((token, sig)) = saved.pop() {
        dsu.rollback(token).unwrap();
        assert_eq!(signature(&dsu), sig);
    }

    dsu.rollback(0).unwrap();
    assert_eq!(dsu.components(), n);
});
