use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wmstats_summary_box::{render_fragment, RequestSummary};

fn bench_summary_box(c: &mut Criterion) {
    let request = RequestSummary::from_json_str(
        r#"{"totalEvents": 1000, "processedEvents": 400,
            "status": {"success": 80, "failure": {"exception": 3},
                       "cooloff": {"job": 2}, "queued": {"first": 10, "retry": 1},
                       "submit": {"running": 30, "pending": 12}}}"#,
    )
    .unwrap();
    let requests = vec![request; 500];

    c.bench_function("aggregate_500_requests", |b| {
        b.iter(|| RequestSummary::aggregate(black_box(&requests)))
    });

    let summary = RequestSummary::aggregate(&requests);
    c.bench_function("render_fragment", |b| {
        b.iter(|| render_fragment(black_box(&summary)).unwrap())
    });
}

criterion_group!(benches, bench_summary_box);
criterion_main!(benches);
