use audio_synth::{AudioComposition, AudioNote, Waveform, WavSynthesizer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_synthesize(c: &mut Criterion) {
    let notes: Vec<AudioNote> = Waveform::ALL
        .iter()
        .cycle()
        .take(10)
        .enumerate()
        .map(|(i, waveform)| AudioNote {
            frequency: 220.0 + i as f64 * 33.0,
            duration: 0.8,
            volume: 0.5,
            instrument: *waveform,
            start_time: i as f64,
        })
        .collect();
    let composition = AudioComposition::new(notes, 10.0, 44100);
    let synth = WavSynthesizer::new();

    c.bench_function("synthesize_10s", |b| {
        b.iter(|| synth.synthesize(black_box(&composition)))
    });
}

criterion_group!(benches, bench_synthesize);
criterion_main!(benches);
