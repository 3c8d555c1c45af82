//! Max-flow throughput on layered random networks
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use flowlab_core::algorithm::graph::{dinic, edmonds_karp, ford_fulkerson, KargerMinCut};
use flowlab_core::{ExecutionTracer, FlowNetwork, ReportMode};

/// Layers of `width` vertices between a source and a sink, densely wired
fn layered_network(layers: usize, width: usize, seed: u64) -> FlowNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    let order = layers * width + 2;
    let sink = order - 1;
    let mut network = FlowNetwork::directed(order);
    let vertex = |layer: usize, slot: usize| 1 + layer * width + slot;

    for slot in 0..width {
        network.add_edge(0, vertex(0, slot), rng.gen_range(10..100)).ok();
        network
            .add_edge(vertex(layers - 1, slot), sink, rng.gen_range(10..100))
            .ok();
    }
    for layer in 0..layers - 1 {
        for from in 0..width {
            for to in 0..width {
                if rng.gen_bool(0.5) {
                    network
                        .add_edge(vertex(layer, from), vertex(layer + 1, to), rng.gen_range(1..50))
                        .ok();
                }
            }
        }
    }
    network
}

fn bench_max_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_flow");
    for &(layers, width) in &[(4, 8), (8, 16)] {
        let network = layered_network(layers, width, 42);
        let label = format!("{}x{}", layers, width);

        group.bench_with_input(BenchmarkId::new("ford_fulkerson", &label), &network, |b, n| {
            b.iter(|| {
                let mut working = n.clone();
                let mut tracer = ExecutionTracer::new(ReportMode::Timing);
                black_box(ford_fulkerson(&mut working, &mut tracer).ok())
            })
        });
        group.bench_with_input(BenchmarkId::new("edmonds_karp", &label), &network, |b, n| {
            b.iter(|| {
                let mut working = n.clone();
                let mut tracer = ExecutionTracer::new(ReportMode::Timing);
                black_box(edmonds_karp(&mut working, &mut tracer).ok())
            })
        });
        group.bench_with_input(BenchmarkId::new("dinic", &label), &network, |b, n| {
            b.iter(|| {
                let mut working = n.clone();
                let mut tracer = ExecutionTracer::new(ReportMode::Timing);
                black_box(dinic(&mut working, &mut tracer).ok())
            })
        });
    }
    group.finish();
}

fn bench_karger(c: &mut Criterion) {
    let network = layered_network(4, 8, 7);
    let karger = KargerMinCut::with_trials(64, Some(1));
    c.bench_function("karger_64_trials", |b| {
        b.iter(|| black_box(karger.solve(&network).ok()))
    });
}

criterion_group!(benches, bench_max_flow, bench_karger);
criterion_main!(benches);
