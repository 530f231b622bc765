use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use datamon_core::generator::generate;
use datamon_core::guesser::points_for_win;
use datamon_core::model::{MemoryBankEntry, Operator};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for op in [Operator::Add, Operator::Mul, Operator::DivRem] {
        group.bench_function(format!("{op:?}"), |b| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| generate(black_box(op), &mut rng))
        });
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    group.bench_function("points_for_win", |b| {
        b.iter(|| points_for_win(black_box(4)))
    });

    group.bench_function("memory_answer", |b| {
        let entry = MemoryBankEntry {
            problem: "What sound does a cat make?".into(),
            answer: "Meow".into(),
        };
        b.iter(|| entry.accepts(black_box("  meow ")))
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_scoring);
criterion_main!(benches);
