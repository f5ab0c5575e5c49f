//! Performance benchmarks for rs-doctagger.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks cover the CPU-bound stages: page analysis (parse, classify,
//! strip, extract), vocabulary matching and keyword generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_doctagger::keywords::KeywordGenerator;
use rs_doctagger::{analyze_html, MatchMode, Vocabulary, VocabularyMatcher};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Configure Data Quality Rules</title>
</head>
<body>
    <header><p class="cloud-label">Alation Cloud Service</p></header>
    <nav>
        <a href="/">Home</a>
        <a href="/admin">Admin Settings</a>
    </nav>
    <article>
        <h1>Configure Data Quality Rules</h1>
        <p>A Steward defines data quality rules for catalog assets. Rules run
        on a schedule and flag assets whose checks fail.</p>
        <p>Install the Snowflake OCF Connector before profiling Snowflake tables.
        Every Viewer sees quality flags on the asset page.</p>
        <p>Lineage graphs show which downstream reports depend on a flagged
        table, so a Steward can notify the right owners.</p>
    </article>
    <aside><h3>Related</h3><ul><li>Lineage</li><li>Search</li></ul></aside>
    <footer><p>Copyright 2024</p></footer>
</body>
</html>
"#;

const BODY_TEXT: &str = "A Steward defines data quality rules for catalog assets. Rules run \
    on a schedule and flag assets whose checks fail. Install the Snowflake OCF Connector \
    before profiling Snowflake tables. Every Viewer sees quality flags on the asset page. \
    Lineage graphs show which downstream reports depend on a flagged table, so a Steward \
    can notify the right owners.";

fn bench_analyze_html(c: &mut Criterion) {
    c.bench_function("analyze_html", |b| {
        b.iter(|| analyze_html(black_box("https://docs.example.com/dq"), black_box(SAMPLE_HTML)));
    });
}

fn bench_keywords(c: &mut Criterion) {
    let generator = KeywordGenerator::default();
    let mut group = c.benchmark_group("keywords");
    for repeat in [1_usize, 10, 100] {
        let text = vec![BODY_TEXT; repeat].join(" ");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| generator.generate(black_box(text)));
        });
    }
    group.finish();
}

fn bench_vocabulary_matching(c: &mut Criterion) {
    let roles = VocabularyMatcher::new(Vocabulary::new(
        "roles",
        ["Steward", "Viewer", "Admin", "Server Admin", "Catalog Admin", "Composer User"],
    ));
    let text = vec![BODY_TEXT; 20].join(" ");

    let mut group = c.benchmark_group("roles");
    group.bench_function("all", |b| {
        b.iter(|| roles.find(black_box(&text), MatchMode::All));
    });
    group.bench_function("top_2", |b| {
        b.iter(|| roles.find(black_box(&text), MatchMode::TopN(2)));
    });
    group.finish();
}

criterion_group!(benches, bench_analyze_html, bench_keywords, bench_vocabulary_matching);
criterion_main!(benches);
