use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rewind::fenwick::FenwickTree;
use rewind::naive::NaiveRankSet;
use rewind::RollbackUnionFind;

fn bench_rank_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let n = 4096usize;

    let mut fw = FenwickTree::<i64>::new(n);
    let mut naive = NaiveRankSet::new(n);
    for i in 1..=n {
        let delta = (i % 7 + 1) as i64;
        fw.add(i, delta).unwrap();
        naive.add(i, delta);
    }
    let total = fw.total();

    group.bench_function("prefix_sum", |b| {
        b.iter(|| {
            for i in 0..=n {
                black_box(fw.prefix_sum(i).unwrap());
            }
        })
    });

    group.bench_function("kth", |b| {
        b.iter(|| {
            for k in (1..=total).step_by(7) {
                black_box(fw.kth(k).unwrap());
            }
        })
    });

    group.bench_function("prefix_sum_naive", |b| {
        b.iter(|| {
            for i in (0..=n).step_by(64) {
                black_box(naive.prefix_sum(i));
            }
        })
    });
}

fn bench_union_rollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("union_find");
    let n = 4096usize;

    group.bench_function("union_chain_rollback", |b| {
        let mut dsu = RollbackUnionFind::new(n);
        b.iter(|| {
            let snap = dsu.snapshot();
            for i in 1..n {
                dsu.union(i - 1, i).unwrap();
            }
            black_box(dsu.components());
            dsu.rollback(snap).unwrap();
        })
    });

    group.bench_function("find", |b| {
        let mut dsu = RollbackUnionFind::new(n);
        for i in 1..n {
            dsu.union(i - 1, i).unwrap();
        }
        b.iter(|| {
            for i in 0..n {
                black_box(dsu.find(i).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_rank_queries, bench_union_rollback);
criterion_main!(benches);
