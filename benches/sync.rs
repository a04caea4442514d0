//! Benchmarks for the update cycle: preview rebuild and validation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use htmlive::lint::Linter;
use htmlive::preview::PreviewDocument;
use htmlive::sync::SyncController;

fn sample_document(paragraphs: usize) -> String {
    let mut html = String::from("<h1>Report</h1>\n");
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p id=\"p{i}\">Paragraph {i} with <b>bold</b> and <i>italic</i> text.</p>\n"
        ));
    }
    html
}

fn bench_preview_rebuild(c: &mut Criterion) {
    let html = sample_document(200);
    c.bench_function("preview_rebuild", |b| {
        b.iter(|| PreviewDocument::from_html(black_box(&html)))
    });
}

fn bench_lint_verify(c: &mut Criterion) {
    let html = sample_document(200);
    let linter = Linter::new();
    c.bench_function("lint_verify", |b| {
        b.iter(|| linter.verify(black_box(&html)))
    });
}

fn bench_full_cycle(c: &mut Criterion) {
    let html = sample_document(200);
    let mut sync = SyncController::new(Some(Linter::new()), 300);
    c.bench_function("full_update_cycle", |b| {
        b.iter(|| sync.run_update_cycle(black_box(&html)))
    });
}

criterion_group!(benches, bench_preview_rebuild, bench_lint_verify, bench_full_cycle);
criterion_main!(benches);
