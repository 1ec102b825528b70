use criterion::{black_box, criterion_group, criterion_main, Criterion};

use impara_core::fuzzy::{is_correct, levenshtein};

fn bench_levenshtein(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein");

    group.bench_function("short", |b| {
        b.iter(|| levenshtein(black_box("parlo"), black_box("parli")))
    });

    group.bench_function("accented", |b| {
        b.iter(|| levenshtein(black_box("parlerò"), black_box("parlero")))
    });

    group.bench_function("long", |b| {
        b.iter(|| {
            levenshtein(
                black_box("precipitevolissimevolmente"),
                black_box("precipitevolissimamente"),
            )
        })
    });

    group.finish();
}

fn bench_is_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_correct");

    group.bench_function("exact", |b| {
        b.iter(|| is_correct(black_box("parlate"), black_box("parlate")))
    });

    group.bench_function("case_and_whitespace", |b| {
        b.iter(|| is_correct(black_box("  PARLATE "), black_box("parlate")))
    });

    group.bench_function("typo", |b| {
        b.iter(|| is_correct(black_box("porlite"), black_box("parlate")))
    });

    group.finish();
}

criterion_group!(benches, bench_levenshtein, bench_is_correct);
criterion_main!(benches);
