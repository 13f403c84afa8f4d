//! Benchmarks for graph construction, removal and the core algorithms.
//!
//! Graphs are generated deterministically: a grid-like layout where node `i`
//! links to `i + 1` and `i + 7`, which gives long paths and many
//! strongly connected pieces once back edges are added.

extern crate lindgraph;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lindgraph::{
    algo::{dijkstra, dominators::simple_fast, kosaraju_scc, tarjan_scc, toposort},
    visit::{Dfs, Walker},
    DiGraph, NodeIndex, StableDiGraph,
};
use std::hint::black_box;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn layered(n: usize) -> DiGraph<(), u32> {
    let mut g = DiGraph::with_capacity(n, 2 * n);
    for _ in 0..n {
        g.add_node(());
    }
    for i in 0..n {
        if i + 1 < n {
            g.add_edge(NodeIndex::new(i), NodeIndex::new(i + 1), (i % 5) as u32 + 1);
        }
        if i + 7 < n {
            g.add_edge(NodeIndex::new(i), NodeIndex::new(i + 7), (i % 3) as u32 + 2);
        }
    }
    g
}

fn with_back_edges(n: usize) -> DiGraph<(), u32> {
    let mut g = layered(n);
    for i in (10..n).step_by(10) {
        g.add_edge(NodeIndex::new(i), NodeIndex::new(i - 9), 1);
    }
    g
}

/// Benchmark building a graph edge by edge.
fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(layered(n)));
        });
    }
    group.finish();
}

/// Benchmark removing every other node, which exercises swap-relinking.
fn bench_remove_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_nodes");
    for n in [100, 1_000] {
        let base = layered(n);
        group.bench_with_input(BenchmarkId::new("graph", n), &base, |b, base| {
            b.iter(|| {
                let mut g = base.clone();
                for i in (0..n / 2).rev() {
                    g.remove_node(NodeIndex::new(i * 2));
                }
                black_box(g.edge_count())
            });
        });

        let stable = StableDiGraph::from(base.clone());
        group.bench_with_input(BenchmarkId::new("stable", n), &stable, |b, stable| {
            b.iter(|| {
                let mut g = stable.clone();
                for i in 0..n / 2 {
                    g.remove_node(NodeIndex::new(i * 2));
                }
                black_box(g.edge_count())
            });
        });
    }
    group.finish();
}

/// Benchmark single-source shortest paths.
fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    for n in SIZES {
        let g = layered(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter(|| black_box(dijkstra(g, NodeIndex::new(0), None, |e| *e.weight())));
        });
    }
    group.finish();
}

/// Benchmark both SCC algorithms on the same cyclic graph.
fn bench_scc(c: &mut Criterion) {
    let mut group = c.benchmark_group("scc");
    for n in SIZES {
        let g = with_back_edges(n);
        group.bench_with_input(BenchmarkId::new("tarjan", n), &g, |b, g| {
            b.iter(|| black_box(tarjan_scc(g).len()));
        });
        group.bench_with_input(BenchmarkId::new("kosaraju", n), &g, |b, g| {
            b.iter(|| black_box(kosaraju_scc(g).len()));
        });
    }
    group.finish();
}

/// Benchmark traversal, ordering and dominators on the acyclic layout.
fn bench_traversal(c: &mut Criterion) {
    let g = layered(10_000);
    let root = NodeIndex::new(0);

    c.bench_function("dfs_10000", |b| {
        b.iter(|| black_box(Dfs::new(&g, root).iter(&g).count()));
    });
    c.bench_function("toposort_10000", |b| {
        b.iter(|| black_box(toposort(&g).map(|order| order.len())));
    });
    c.bench_function("dominators_10000", |b| {
        b.iter(|| black_box(simple_fast(&g, root).root()));
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_remove_nodes,
    bench_dijkstra,
    bench_scc,
    bench_traversal
);
criterion_main!(benches);
