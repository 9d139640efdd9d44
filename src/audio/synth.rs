//! Sample generators for the two cues. Mono, `f32` in `[-1, 1]`.

use std::f32::consts::TAU;

pub const SAMPLE_RATE: u32 = 44_100;
pub const EAT_DURATION: f32 = 0.12;
pub const GAME_OVER_DURATION: f32 = 0.5;

/// Short rising two-note chirp
pub fn eat_samples(sample_rate: u32) -> Vec<f32> {
    const NOTES: [f32; 2] = [660.0, 880.0];
    let note_len = EAT_DURATION / NOTES.len() as f32;

    let mut samples = Vec::new();
    for freq in NOTES {
        samples.extend(tone(sample_rate, note_len, |_| freq, |t| 0.2 * decay(t, note_len)));
    }
    samples
}

/// Falling sweep from 400 Hz to 80 Hz with a gritty edge
pub fn game_over_samples(sample_rate: u32) -> Vec<f32> {
    let sweep = GAME_OVER_DURATION * 0.8;
    tone(
        sample_rate,
        GAME_OVER_DURATION,
        |t| lerp(400.0, 80.0, (t / sweep).min(1.0)),
        |t| lerp(0.15, 0.0, (t / GAME_OVER_DURATION).min(1.0)),
    )
    .into_iter()
    .map(overdrive)
    .collect()
}

/// Render a sine tone whose frequency and amplitude vary over time
fn tone(
    sample_rate: u32,
    duration: f32,
    freq: impl Fn(f32) -> f32,
    amp: impl Fn(f32) -> f32,
) -> Vec<f32> {
    let count = (sample_rate as f32 * duration) as usize;
    let dt = 1.0 / sample_rate as f32;
    let mut phase = 0.0f32;

    (0..count)
        .map(|i| {
            let t = i as f32 * dt;
            phase = (phase + freq(t) * dt).fract();
            (phase * TAU).sin() * amp(t)
        })
        .collect()
}

/// Soft clipping, adds odd harmonics
fn overdrive(s: f32) -> f32 {
    (s * 1.5 - s * s * s * 0.5).clamp(-1.0, 1.0)
}

fn decay(t: f32, duration: f32) -> f32 {
    (1.0 - t / duration).max(0.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
