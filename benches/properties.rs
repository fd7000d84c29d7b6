//! 属性解析与快照读取性能基准测试

use std::hint::black_box;

use commons::properties::{
    ActiveProfiles, ConfigRegistry, EmbeddedSource, PropertyLoader, parse_properties, parse_yaml,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn properties_text(keys: usize) -> String {
    (0..keys)
        .map(|i| format!("section{}.key{} = value \\\n    continued {}\n", i % 10, i, i))
        .collect()
}

fn yaml_text(sections: usize) -> String {
    (0..sections)
        .map(|i| format!("section{}:\n  host: host-{}\n  port: {}\n  tags:\n    - a\n    - b\n", i, i, 8000 + i))
        .collect()
}

// ============== 解析 ==============

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("properties/parse");

    for keys in [10usize, 100, 1000] {
        let text = properties_text(keys);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("properties", keys), &text, |b, text| {
            b.iter(|| parse_properties(black_box(text)));
        });
    }

    for sections in [10usize, 100] {
        let text = yaml_text(sections);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("yaml", sections), &text, |b, text| {
            b.iter(|| parse_yaml(black_box(text)).unwrap());
        });
    }

    group.finish();
}

// ============== 加载与读取 ==============

fn bench_load(c: &mut Criterion) {
    let source = EmbeddedSource::new("bench")
        .with_file("application.properties", properties_text(500))
        .with_file("application-dev.yml", yaml_text(50));
    let loader = PropertyLoader::new(source, "application", ActiveProfiles::from_list("dev"));

    c.bench_function("properties/reload", |b| {
        b.iter(|| loader.reload());
    });
}

fn bench_snapshot_reads(c: &mut Criterion) {
    let registry = ConfigRegistry::new(
        EmbeddedSource::new("internal").with_file("application.properties", properties_text(1000)),
        EmbeddedSource::new("external").with_file("application.yml", yaml_text(20)),
        "application",
        ActiveProfiles::new(),
    );
    registry.load_all();

    c.bench_function("properties/registry_get", |b| {
        b.iter(|| registry.get(black_box("section5.key505")).unwrap());
    });

    let snapshot = registry.shared();
    c.bench_function("properties/snapshot_get_int", |b| {
        b.iter(|| snapshot.get_int(black_box("section3.port")).unwrap());
    });
}

criterion_group!(benches, bench_parse, bench_load, bench_snapshot_reads);
criterion_main!(benches);
