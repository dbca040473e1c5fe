//! Benchmarks for pdfoutline pipeline performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic in-memory layouts, so
//! PDF decoding cost is excluded.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfoutline::{
    BBox, Fragment, LayoutSpan, MemoryDocument, OutlineExtractor, OutlineOptions, PageLayout,
};

/// Creates a document with a chapter heading, two sections and body text per page.
fn create_test_document(page_count: usize) -> MemoryDocument {
    let mut doc = MemoryDocument::new().with_title("Microsoft Word - benchmark.docx");

    for i in 0..page_count {
        let mut spans = vec![
            LayoutSpan::new(
                format!("Chapter {}", i + 1),
                "Helvetica-Bold",
                24.0,
                BBox::new(72.0, 60.0, 300.0, 84.0),
            ),
            LayoutSpan::new(
                "Background",
                "Helvetica-Bold",
                16.0,
                BBox::new(72.0, 120.0, 250.0, 136.0),
            ),
        ];
        for line in 0..40 {
            let y = 150.0 + line as f32 * 14.0;
            spans.push(LayoutSpan::new(
                format!("Body text line {} of page {} for outline measurement.", line, i + 1),
                "Helvetica",
                11.0,
                BBox::new(72.0, y, 520.0, y + 11.0),
            ));
        }
        spans.push(LayoutSpan::new(
            "Findings",
            "Helvetica-Bold",
            14.0,
            BBox::new(72.0, 720.0, 250.0, 734.0),
        ));
        spans.push(LayoutSpan::new(
            format!("{}", i + 1),
            "Helvetica",
            9.0,
            BBox::new(300.0, 770.0, 310.0, 779.0),
        ));
        doc = doc.with_page(PageLayout::from_spans(spans));
    }

    doc
}

/// Benchmark the full pipeline at various sizes.
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let extractor = OutlineExtractor::default();

    for page_count in [1, 10, 100].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&doc)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark merge, classify and filter over pre-collected fragments.
fn bench_headings(c: &mut Criterion) {
    let extractor = OutlineExtractor::default();
    let fragments: Vec<Fragment> = (0..5_000)
        .map(|i| {
            let size = [24.0, 18.0, 12.0, 10.0][i % 4];
            let y = (i % 50) as f32 * 30.0;
            Fragment::new((i / 50) as u32 + 1, format!("Fragment {}", i), size, i % 3 == 0, y)
        })
        .collect();

    c.bench_function("headings_5000_fragments", |b| {
        b.iter(|| extractor.headings(black_box(&fragments)));
    });
}

/// Benchmark extractor construction (regex compilation).
fn bench_extractor_creation(c: &mut Criterion) {
    c.bench_function("extractor_creation", |b| {
        b.iter(|| {
            let options = OutlineOptions::new()
                .disallow_heading("contents")
                .add_generic_title_pattern("^Scan");
            OutlineExtractor::new(black_box(options)).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_extract,
    bench_headings,
    bench_extractor_creation,
);
criterion_main!(benches);
