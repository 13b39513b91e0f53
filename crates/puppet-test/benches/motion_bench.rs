//! Benchmarks for per-tick motion work

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use puppet_core::{Channel, Frame};
use puppet_motion::{interpolate_frames, HeadTrack, SignalConfig, Stabilizer, SyntheticSignals};
use puppet_runtime::StabilizerBank;
use puppet_transport::{decode_frame, encode_frame, Framing};

fn bench_stabilizer_update(c: &mut Criterion) {
    let mut stabilizer = Stabilizer::default();
    let mut z = 0.0;

    c.bench_function("stabilizer_update", |b| {
        b.iter(|| {
            z += 0.01;
            stabilizer.update(black_box(z));
            black_box(stabilizer.get())
        })
    });
}

fn bench_bank_apply(c: &mut Criterion) {
    let mut bank = StabilizerBank::default();
    let mut targets = Frame::zero();
    targets.set(Channel::Pitch, 10.0);
    targets.set(Channel::Mar, 0.7);

    c.bench_function("stabilizer_bank_apply", |b| {
        b.iter(|| black_box(bank.apply(black_box(&targets))))
    });
}

fn bench_signals_fill(c: &mut Criterion) {
    let mut signals = SyntheticSignals::with_seed(SignalConfig::default(), 0);
    let mut frame = Frame::zero();
    let mut t = 0.0;

    c.bench_function("signals_fill", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            signals.fill(black_box(t), &mut frame);
            black_box(&frame);
        })
    });
}

fn bench_head_track_sample(c: &mut Criterion) {
    let head = HeadTrack::new(
        interpolate_frames(0.0, 10.0, 2.0),
        interpolate_frames(0.0, -5.0, 2.0),
        interpolate_frames(0.0, 0.0, 2.0),
    )
    .with_settle_back(8.0, 60.0);
    let mut tick = 0usize;

    c.bench_function("head_track_sample", |b| {
        b.iter(|| {
            tick = (tick + 1) % 600;
            black_box(head.sample(black_box(tick)))
        })
    });
}

fn bench_wire_codec(c: &mut Criterion) {
    let mut frame = Frame::zero();
    for (i, channel) in Channel::ALL.into_iter().enumerate() {
        frame.set(channel, i as f64 * 0.37 - 2.0);
    }
    let line = encode_frame(&frame, Framing::Raw);

    c.bench_function("wire_encode", |b| {
        b.iter(|| black_box(encode_frame(black_box(&frame), Framing::Newline)))
    });

    c.bench_function("wire_decode", |b| {
        b.iter(|| black_box(decode_frame(black_box(&line))))
    });
}

criterion_group!(
    benches,
    bench_stabilizer_update,
    bench_bank_apply,
    bench_signals_fill,
    bench_head_track_sample,
    bench_wire_codec,
);

criterion_main!(benches);
