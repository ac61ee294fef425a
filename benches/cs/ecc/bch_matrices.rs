use bch_matrices::cs::ecc::bch::{build_bch_matrices, build_bch_matrices_batch, BchCode, BchParams};
use bch_matrices::math::galois_field::GaloisField;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_field_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("galois_field_new");
    for degree in [4usize, 8, 12, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(degree), &degree, |b, &m| {
            b.iter(|| GaloisField::new(black_box(m)).unwrap())
        });
    }
    group.finish();
}

fn bench_polynomials(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch_polynomials");
    for (n, d) in [(15usize, 5usize), (63, 11), (127, 21)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_{}", n, d)),
            &(n, d),
            |b, &(n, d)| b.iter(|| BchCode::new(black_box(n), black_box(d)).unwrap()),
        );
    }
    group.finish();
}

fn bench_matrices(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch_matrices");
    for (n, d) in [(15usize, 5usize), (63, 11), (127, 21)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_{}", n, d)),
            &(n, d),
            |b, &(n, d)| b.iter(|| build_bch_matrices(black_box(n), black_box(d)).unwrap()),
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let requests: Vec<BchParams> = (1..=32).map(|d| BchParams::new(127, d)).collect();
    c.bench_function("bch_matrices_batch_127", |b| {
        b.iter(|| build_bch_matrices_batch(black_box(&requests)))
    });
}

criterion_group!(
    benches,
    bench_field_tables,
    bench_polynomials,
    bench_matrices,
    bench_batch
);
criterion_main!(benches);
