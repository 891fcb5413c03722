//! Benchmarks for edit bursts and search scans.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vted::document::Document;
use vted::editor::EditorBuffer;
use vted::search::{SearchDirection, SearchState};

fn large_document() -> Document {
    let lines = (0..5_000)
        .map(|i| format!("line {i}: the quick brown fox jumps over the lazy dog").into_bytes())
        .collect();
    Document::from_lines(lines)
}

fn bench_typing_burst(c: &mut Criterion) {
    c.bench_function("typing_burst", |b| {
        b.iter(|| {
            let mut buf = EditorBuffer::new(Document::new(), 120, 40);
            for ch in "the quick brown fox jumps over the lazy dog".chars().cycle().take(1_000) {
                buf.insert_char(black_box(ch));
            }
            buf
        });
    });
}

fn bench_search_scan(c: &mut Criterion) {
    let doc = large_document();
    c.bench_function("search_scan", |b| {
        b.iter(|| {
            let mut state = SearchState::new(vted::editor::Cursor::new(), 0);
            state.set_query("lazy dog".to_string());
            let first = state.find_first(black_box(&doc));
            let next = state.find_next(&doc, SearchDirection::Forward);
            (first, next)
        });
    });
}

criterion_group!(benches, bench_typing_burst, bench_search_scan);
criterion_main!(benches);
