use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use tsqr_core::{c64, Mat};
use tsqr_qr::HouseholderQr;
use tsqr_random::{MatrixGenerator, StandardNormalSource};

pub fn explicit_q(c: &mut Criterion) {
    for (m, n) in [(32, 32), (128, 128), (1000, 16), (4000, 32)] {
        c.bench_function(&format!("explicit-q-f64-{m}x{n}"), |b| {
            let mut source = StandardNormalSource::new(StdRng::seed_from_u64(0));
            let mut gen = MatrixGenerator::new(&mut source, HouseholderQr);
            let mut q = Mat::<f64>::zeros(m, n);

            b.iter(|| gen.explicit_q(q.as_mut()).unwrap())
        });

        c.bench_function(&format!("explicit-q-c64-{m}x{n}"), |b| {
            let mut source = StandardNormalSource::new(StdRng::seed_from_u64(0));
            let mut gen = MatrixGenerator::new(&mut source, HouseholderQr);
            let mut q = Mat::<c64>::zeros(m, n);

            b.iter(|| gen.explicit_q(q.as_mut()).unwrap())
        });
    }
}

pub fn random_r(c: &mut Criterion) {
    for n in [16, 64, 128] {
        c.bench_function(&format!("random-r-f64-{n}"), |b| {
            let mut source = StandardNormalSource::new(StdRng::seed_from_u64(0));
            let mut gen = MatrixGenerator::new(&mut source, HouseholderQr);
            let singular_values: Vec<f64> = (0..n).map(|i| 1.0 / (i + 1) as f64).collect();
            let mut r = Mat::<f64>::zeros(n, n);

            b.iter(|| gen.fill_random_r(r.as_mut(), &singular_values).unwrap())
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3))
        .sample_size(10);
    targets = explicit_q, random_r
);
criterion_main!(benches);
