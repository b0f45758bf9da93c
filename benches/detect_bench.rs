use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use plagscan::{Corpus, DetectConfig, Detector, longest_common_substring};

const WORDS: &[&str] = &[
    "analysis", "of", "the", "results", "shows", "that", "students", "who", "write", "original",
    "essays", "perform", "better", "on", "average", "than", "those", "copying", "from", "sources",
];

fn synthetic_text(seed: usize, words: usize) -> String {
    (0..words)
        .map(|i| WORDS[(seed * 31 + i * 7 + i / 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn synthetic_corpus(documents: usize, words: usize) -> Corpus {
    (0..documents)
        .map(|i| (format!("doc{i:05}.txt"), synthetic_text(i, words)))
        .collect()
}

/// Detection latency as the corpus grows, with and without cached tries.
fn bench_detect_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_scale");
    let input = synthetic_text(3, 200);

    for &size in [10usize, 100, 1000].iter() {
        let corpus = synthetic_corpus(size, 400);
        for cache_tries in [true, false] {
            let cfg = DetectConfig {
                cache_tries,
                ..DetectConfig::with_params(3, 0.5)
            };
            let detector = Detector::new(corpus.clone(), cfg).expect("detector");
            group.throughput(Throughput::Elements(size as u64));
            let label = if cache_tries { "cached" } else { "fresh" };
            group.bench_function(format!("{label}_{size}"), |b| {
                b.iter(|| {
                    let _ = detector
                        .detect(black_box(&input))
                        .expect("detect should succeed");
                });
            });
        }
    }

    group.finish();
}

/// Sequential versus rayon fan-out over the same corpus.
fn bench_detect_parallelism(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_parallelism");
    let corpus = synthetic_corpus(500, 400);
    let input = synthetic_text(11, 200);

    for parallel in [false, true] {
        let cfg = DetectConfig {
            parallel,
            cache_tries: false,
            ..DetectConfig::with_params(3, 0.5)
        };
        let detector = Detector::new(corpus.clone(), cfg).expect("detector");
        let label = if parallel { "rayon" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let _ = detector
                    .detect(black_box(&input))
                    .expect("detect should succeed");
            });
        });
    }

    group.finish();
}

/// Quadratic LCS cost by text length.
fn bench_lcs(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs");
    for &words in [50usize, 200, 800].iter() {
        let a = synthetic_text(1, words);
        let b = synthetic_text(2, words);
        group.bench_function(format!("words_{words}"), |bench| {
            bench.iter(|| longest_common_substring(black_box(&a), black_box(&b)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_detect_scale,
    bench_detect_parallelism,
    bench_lcs
);
criterion_main!(benches);
