use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use locale::{CompiledMatcher, LocaleConfig, Tree, TreeValue, merge};
use serde_json::json;

fn wide_config(rules: usize) -> LocaleConfig {
    let mut config = LocaleConfig::new("lang-0");
    for i in 0..rules {
        config = config.with_rule(
            format!("lang-{i}"),
            [format!("lang-{i}"), format!("lang-{i}-*")],
        );
    }
    config
}

fn wide_tree(width: usize, marker: &str) -> Tree {
    let mut tree = Tree::new();
    for i in 0..width {
        let mut child = Tree::new();
        child.insert("label", TreeValue::Terminal(json!(format!("{marker}-{i}"))));
        child.insert("count", TreeValue::Terminal(json!(i)));
        tree.insert(format!("entry-{i}"), TreeValue::Node(child));
    }
    tree
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for rules in [4, 32, 128].iter() {
        let matcher = CompiledMatcher::compile(&wide_config(*rules)).expect("patterns compile");
        let last = rules - 1;
        let hit_header = format!("xx,yy-ZZ;q=0.9,lang-{last}-US;q=0.5");
        let miss_header = "xx,yy-ZZ;q=0.9,aa-BB;q=0.5".to_string();

        group.throughput(Throughput::Bytes(hit_header.len() as u64));
        group.bench_function(format!("rules_{rules}_hit"), |b| {
            b.iter(|| matcher.lookup(black_box(&hit_header)))
        });

        group.throughput(Throughput::Bytes(miss_header.len() as u64));
        group.bench_function(format!("rules_{rules}_miss"), |b| {
            b.iter(|| matcher.lookup(black_box(&miss_header)))
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for width in [16, 256].iter() {
        let base = wide_tree(*width, "base");
        let overlay = wide_tree(*width / 2, "overlay");
        group.throughput(Throughput::Elements(*width as u64));
        group.bench_function(format!("entries_{width}"), |b| {
            b.iter(|| merge(black_box(Some(&base)), black_box(Some(&overlay))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_merge);
criterion_main!(benches);
