use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use analysis::{analyze_tokens, AnalysisConfig, AnalysisMode};
use reference::build_reference;

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");

    for size in [500usize, 2000, 8000].iter() {
        let tokens: Vec<String> = (0..*size).map(|i| format!("word{}", i % 97)).collect();
        let reference = build_reference(&tokens, 0.5).expect("reference");
        let raw_cfg = AnalysisConfig::new().with_window_size(50).with_step(10);
        let diff_cfg = raw_cfg.clone().with_mode(AnalysisMode::Diff);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("raw_tokens_{size}"), |b| {
            b.iter(|| analyze_tokens(black_box(&tokens), black_box(&raw_cfg), None).expect("raw"))
        });
        group.bench_function(format!("diff_tokens_{size}"), |b| {
            b.iter(|| {
                analyze_tokens(
                    black_box(&tokens),
                    black_box(&diff_cfg),
                    Some(black_box(&reference)),
                )
                .expect("diff")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyzer);
criterion_main!(benches);
