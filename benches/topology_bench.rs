//! Benchmarks for topology selection and graph assembly.
//!
//! Run with: cargo bench

use atelier::core::{graph, topology, types::ProjectConfig};
use atelier::resources::service::generated_urls;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn lb_config() -> ProjectConfig {
    serde_yaml_ng::from_str(
        r#"
project_id: bench-project
use_lb: true
domain: studio.example.com
initial_user: alice@example.com
models:
  image: imagen-3.0-generate-002
  video: veo-2.0-generate-001
"#,
    )
    .unwrap()
}

fn bench_select(c: &mut Criterion) {
    let config = lb_config();
    let urls = generated_urls(&config);
    c.bench_function("topology_select", |b| {
        b.iter(|| {
            let topo = topology::select(black_box(&config), black_box(&urls));
            black_box(topo);
        });
    });
}

fn bench_assemble(c: &mut Criterion) {
    let config = lb_config();
    let topo = topology::select(&config, &generated_urls(&config));
    c.bench_function("graph_assemble", |b| {
        b.iter(|| {
            let graph = graph::assemble(black_box(&config), black_box(&topo));
            black_box(graph);
        });
    });
}

fn bench_execution_order(c: &mut Criterion) {
    let config = lb_config();
    let topo = topology::select(&config, &generated_urls(&config));
    let graph = graph::assemble(&config, &topo);
    c.bench_function("execution_order", |b| {
        b.iter(|| {
            let order = graph::build_execution_order(black_box(&graph)).unwrap();
            black_box(order);
        });
    });
}

criterion_group!(benches, bench_select, bench_assemble, bench_execution_order);
criterion_main!(benches);
