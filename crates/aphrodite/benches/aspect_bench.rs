use aphrodite::aspects::AspectCalculator;
use aphrodite::chart::{Chart, Planet, PlanetPosition};
use aphrodite::western::Sign;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_classify(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("classify", |b| {
        b.iter(|| calculator.classify(black_box(100.0), black_box(219.5)))
    });
}

fn bench_calculate_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    let mut chart = Chart::default();
    for (i, planet) in Planet::ALL.iter().enumerate() {
        let sign = Sign::ALL[i % 12];
        chart = chart.with_planet(
            *planet,
            PlanetPosition::new(sign, (i as f64 * 7.0) % 30.0, (i % 12) as u8 + 1),
        );
    }

    c.bench_function("calculate_aspects", |b| {
        b.iter(|| calculator.calculate_aspects(black_box(&chart)))
    });
}

criterion_group!(benches, bench_classify, bench_calculate_aspects);
criterion_main!(benches);
