//! Benchmarks for page rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use folio::catalog::Catalog;
use folio::document::{classify, render};

fn sample_page() -> Vec<String> {
    let mut lines = Vec::new();
    for i in 1..=40 {
        lines.push(format!("## Section {i}"));
        lines.push(format!(
            "Paragraph {i} with **bold** text and a [link](https://example.org/{i})."
        ));
        lines.push("- first item".to_string());
        lines.push("- second item".to_string());
        lines.push(String::new());
    }
    lines
}

fn bench_render_page(c: &mut Criterion) {
    let lines = sample_page();
    c.bench_function("render_page", |b| b.iter(|| render(black_box(&lines))));
}

fn bench_classify(c: &mut Criterion) {
    let lines = sample_page();
    c.bench_function("classify_lines", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(classify(black_box(line)));
            }
        })
    });
}

fn bench_bundled_catalog(c: &mut Criterion) {
    c.bench_function("parse_bundled_catalog", |b| {
        b.iter(|| Catalog::bundled().unwrap())
    });
}

criterion_group!(
    benches,
    bench_render_page,
    bench_classify,
    bench_bundled_catalog
);
criterion_main!(benches);
