use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use org_engine::{Engine, EngineConfig};
use org_ir::curves::{drum_advance, frequency, pan_gains, volume_scale};
use org_ir::{InstrumentBank, Note, Song, CHANNEL_COUNT, MELODIC_CHANNELS};

const RATE: u32 = 44100;

/// Every channel busy: a note every 2000 samples, 1500 samples long.
fn busy_song() -> Song {
    let mut song = Song::empty(Arc::new(InstrumentBank::silent()), RATE);
    song.end_sample = RATE as i64 * 10;
    for (index, channel) in song.channels.iter_mut().enumerate() {
        let (left, right) = pan_gains((index % 13) as u8);
        let volume = volume_scale(200);
        channel.notes = (0..200)
            .map(|n| {
                let pitch = (24 + (n * 7 + index) % 48) as u8;
                let sample_advance = if index < MELODIC_CHANNELS {
                    frequency(pitch, 0) / RATE as f64
                } else {
                    drum_advance(pitch, RATE)
                };
                Note {
                    start: n as i64 * 2000,
                    end: n as i64 * 2000 + 1500,
                    length: 4,
                    pitch,
                    volume: 200,
                    pan: (index % 13) as u8,
                    sample_advance,
                    left_gain: left * volume,
                    right_gain: right * volume,
                }
            })
            .collect();
    }
    debug_assert_eq!(song.channels.len(), CHANNEL_COUNT);
    song
}

fn bench_run(c: &mut Criterion) {
    let mut engine = Engine::with_config(busy_song(), EngineConfig::default().without_pre_roll());
    let mut left = vec![0.0f32; 1024];
    let mut right = vec![0.0f32; 1024];

    c.bench_function("run 1024 frames, 16 channels", |b| {
        b.iter(|| {
            engine.run(1024, &mut left, &mut right);
            black_box(&left);
        })
    });
}

fn bench_step(c: &mut Criterion) {
    let mut engine = Engine::with_config(busy_song(), EngineConfig::default().without_pre_roll());
    c.bench_function("single step", |b| b.iter(|| black_box(engine.step())));
}

criterion_group!(benches, bench_run, bench_step);
criterion_main!(benches);
