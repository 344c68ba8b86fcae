use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morph_core::{Algebra, Params, RingContext, SecretKey};
use rand::{rngs::StdRng, SeedableRng};

fn bench_homomorphic(c: &mut Criterion) {
    let mut group = c.benchmark_group("homomorphic");
    for n in [64usize, 256] {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let ctx = RingContext::new(n).unwrap();
        let sk = SecretKey::generate(&ctx, &Params { dimension: n, ..Params::default() }, &mut rng).unwrap();
        let alg = Algebra::new(&ctx);
        let x = sk.encrypt_u32(0xdead_beef, &mut rng).unwrap();
        let y = sk.encrypt_u32(0x0bad_f00d, &mut rng).unwrap();
        let xy = alg.mult(&x, &y).unwrap();

        group.bench_with_input(BenchmarkId::new("encrypt", n), &n, |b, _| {
            b.iter(|| sk.encrypt_u32(black_box(0x1234_5678), &mut rng).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decrypt_size2", n), &n, |b, _| {
            b.iter(|| sk.decrypt_element(black_box(&x)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decrypt_size3", n), &n, |b, _| {
            b.iter(|| sk.decrypt_element(black_box(&xy)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("add", n), &n, |b, _| {
            b.iter(|| alg.add(black_box(&x), black_box(&y)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("mult", n), &n, |b, _| {
            b.iter(|| alg.mult(black_box(&x), black_box(&y)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_homomorphic);
criterion_main!(benches);
