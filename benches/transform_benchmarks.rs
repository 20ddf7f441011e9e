//! Benchmarks for key transforms and language detection.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tidy_buffer::{transform, Key, KeyPress, Selection, TextBuffer};

/// Generates indented source-like text for benchmarking.
fn generate_source(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("    let value_{} = compute({}); // sample line\n", i, i))
        .collect()
}

/// Benchmarks indenting every line of a selection.
fn bench_block_indent(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_indent");

    for size in [100, 1000, 10000].iter() {
        let text = generate_source(*size);
        let all = Selection::new(0, text.chars().count());

        group.bench_with_input(BenchmarkId::new("tab", size), &text, |b, text| {
            b.iter(|| {
                let outcome =
                    transform::apply_key(black_box(text), all, &KeyPress::plain(Key::Tab));
                black_box(outcome)
            })
        });

        group.bench_with_input(BenchmarkId::new("shift_tab", size), &text, |b, text| {
            b.iter(|| {
                let outcome =
                    transform::apply_key(black_box(text), all, &KeyPress::shifted(Key::Tab));
                black_box(outcome)
            })
        });
    }

    group.finish();
}

/// Benchmarks single-caret keys against a large buffer.
fn bench_caret_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("caret_keys");

    let base_text = generate_source(10000);
    let mid = base_text.chars().count() / 2;

    group.bench_function("enter_at_middle", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base_text.as_str()),
            |mut buffer| {
                let caret = buffer
                    .apply_key(Selection::caret(mid), &KeyPress::plain(Key::Enter))
                    .unwrap();
                black_box(caret)
            },
        )
    });

    group.bench_function("auto_pair_at_end", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base_text.as_str()),
            |mut buffer| {
                let end = buffer.len_chars();
                let caret = buffer
                    .apply_key(Selection::caret(end), &KeyPress::plain(Key::Char('{')))
                    .unwrap();
                black_box(caret)
            },
        )
    });

    group.finish();
}

/// Benchmarks the language classifier.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let javascript = generate_source(1000);
    let prose = "Just some notes about the week.\n".repeat(1000);

    group.bench_function("by_filename", |b| {
        b.iter(|| black_box(tidy_syntax::classify_by_filename(black_box("Component.tsx"))))
    });

    group.bench_function("by_content_keywords", |b| {
        b.iter(|| black_box(tidy_syntax::classify_by_content(black_box(&javascript))))
    });

    group.bench_function("by_content_no_match", |b| {
        b.iter(|| black_box(tidy_syntax::classify_by_content(black_box(&prose))))
    });

    group.finish();
}

criterion_group!(benches, bench_block_indent, bench_caret_keys, bench_classify);
criterion_main!(benches);
