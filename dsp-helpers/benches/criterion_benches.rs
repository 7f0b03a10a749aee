use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dsp_helpers::node::AudioNode;
use dsp_helpers::nodes::{waveshaper, AmplitudeAnalyzer, Oscillator, PanLaw, Panner, Waveform};

const BLOCK: usize = 512;

fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("oscillator_block_512");
    // 20 Hz at 192 kHz is the harmonic-cap worst case.
    for &(wave, hz, rate) in &[
        (Waveform::Sine, 440.0f32, 48_000.0f64),
        (Waveform::Square, 440.0, 48_000.0),
        (Waveform::Saw, 20.0, 48_000.0),
        (Waveform::Square, 20.0, 192_000.0),
    ] {
        let mut osc = Oscillator::new();
        osc.prepare(rate).unwrap();
        let id = BenchmarkId::from_parameter(format!("{:?}_{}hz_{}k", wave, hz, rate / 1000.0));
        group.bench_function(id, |b| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for _ in 0..BLOCK {
                    acc += osc.generate(wave, black_box(hz), 0.0);
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

fn bench_rms(c: &mut Criterion) {
    let mut meter: Box<AmplitudeAnalyzer> = Box::default();
    meter.set_window(4800).unwrap();
    c.bench_function("rms_update_block_512", |b| {
        b.iter(|| {
            for i in 0..BLOCK {
                meter.update_rms(black_box(i as f32 * 1e-3), 4800);
            }
            black_box(meter.rms())
        })
    });
}

fn bench_stateless(c: &mut Criterion) {
    let panner = Panner::new(PanLaw::ModifiedSquare);
    c.bench_function("pan_and_shape_block_512", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..BLOCK {
                let s = black_box(i as f32 / BLOCK as f32);
                acc += waveshaper::arctan(panner.process(i & 1, s, 0.3), 4.0);
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_oscillator, bench_rms, bench_stateless);
criterion_main!(benches);
