//! Atom Operations Benchmarks
//!
//! Benchmarks for locator resolution, argument building, and result
//! transformation.
//!
//! Run with: `cargo bench --bench atom_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use webview_atoms::prelude::*;
use webview_atoms::arguments_json;

fn bench_locator_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("locator_lookup");

    for key in ["className", "css", "partialLinkText", "xpath", "bogus"] {
        group.bench_with_input(BenchmarkId::from_parameter(key), &key, |bench, key| {
            bench.iter(|| {
                let locator = Locator::for_type(black_box(key));
                black_box(locator.is_ok());
            });
        });
    }

    group.finish();
}

fn bench_argument_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("argument_building");
    let element = ElementReference::new("bench-element");
    let root = WindowReference::new("bench-root");

    group.bench_function("find_element", |bench| {
        let atom = find_element(Locator::CssSelector, "div.container > button");
        bench.iter(|| black_box(atom.arguments(Some(black_box(&element))).unwrap()));
    });

    group.bench_function("web_keys", |bench| {
        let atom = web_keys("the quick brown fox");
        bench.iter(|| black_box(atom.arguments(Some(black_box(&element))).unwrap()));
    });

    group.bench_function("frame_by_index_json", |bench| {
        let atom = select_frame_by_index_in(2, root.clone());
        bench.iter(|| {
            let args = atom.arguments(None).unwrap();
            black_box(arguments_json(&args))
        });
    });

    group.finish();
}

fn bench_element_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_list");
    let transformer = ElementReferenceList::new(Locator::TagName, "li");

    for size in [1_usize, 10, 100, 1000] {
        let value: Vec<Value> = (0..size).map(|i| json!({ "ELEMENT": format!("e{i}") })).collect();
        let evaluation = Evaluation::success(Value::Array(value));
        group.bench_with_input(BenchmarkId::from_parameter(size), &evaluation, |bench, eval| {
            bench.iter(|| black_box(transformer.apply(eval.clone()).unwrap()));
        });
    }

    group.finish();
}

fn bench_evaluation_decode(c: &mut Criterion) {
    let doc = r#"{"status": 0, "value": [{"ELEMENT": "a"}, {"ELEMENT": "b"}, {"WINDOW": "w"}]}"#;
    c.bench_function("evaluation_decode", |bench| {
        bench.iter(|| black_box(Evaluation::from_json(black_box(doc)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_locator_lookup,
    bench_argument_building,
    bench_element_list,
    bench_evaluation_decode
);
criterion_main!(benches);
