// benches/sanitize.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use movie_scrape::core::sanitize::{normalize_ws, strip_rank_prefix, title_case};

fn sample_titles() -> Vec<String> {
    (1..=250)
        .map(|i| format!("  {i}.  The   Movie\tNumber {i}\n"))
        .collect()
}

fn bench_sanitize(c: &mut Criterion) {
    let titles = sample_titles();

    c.bench_function("normalize_ws", |b| {
        b.iter(|| {
            let n: usize = titles.iter().map(|t| normalize_ws(black_box(t)).len()).sum();
            black_box(n)
        })
    });

    c.bench_function("strip_rank_prefix", |b| {
        let clean: Vec<String> = titles.iter().map(|t| normalize_ws(t)).collect();
        b.iter(|| {
            let n: usize = clean.iter().map(|t| strip_rank_prefix(black_box(t)).len()).sum();
            black_box(n)
        })
    });

    c.bench_function("title_case", |b| {
        b.iter(|| black_box(title_case(black_box("sci-fi and the movies of tomorrow"))))
    });
}

criterion_group!(benches, bench_sanitize);
criterion_main!(benches);
