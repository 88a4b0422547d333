use ampute::{DefaultRate, ExtraArgs, inject_with_rng};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vector(size: usize) -> Vec<Option<f64>> {
    let mut rng = StdRng::seed_from_u64(0x5EED_F64 + size as u64);
    (0..size).map(|_| Some(rng.sample(Standard))).collect()
}

fn benchmark_injection(c: &mut Criterion) {
    let sizes = [1_000_usize, 10_000, 100_000];
    let vectors: Vec<_> = sizes
        .iter()
        .map(|&size| (size, random_vector(size)))
        .collect();
    let extra = ExtraArgs::new().with("rate", 0.2);
    let by_value = |y: &[Option<f64>], _: &ExtraArgs| {
        y.iter()
            .map(|v| v.map_or(0.0, |x: f64| x.clamp(0.0, 1.0)))
            .collect::<Vec<f64>>()
    };

    let mut group = c.benchmark_group("inject");
    for (size, y) in vectors.iter() {
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("default_rate", size), y, |b, input| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| {
                let out = inject_with_rng(black_box(input), &DefaultRate, &extra, &mut rng);
                black_box(out).ok();
            });
        });

        group.bench_with_input(BenchmarkId::new("value_driven", size), y, |b, input| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| {
                let out = inject_with_rng(black_box(input), &by_value, &extra, &mut rng);
                black_box(out).ok();
            });
        });
    }
    group.finish();
}

criterion_group!(inject_throughput, benchmark_injection);
criterion_main!(inject_throughput);
