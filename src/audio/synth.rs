//! Waveform synthesis - builds a payload one sample at a time via `append`

use std::f64::consts::TAU;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::header::RIFF_SIZE_BIAS;
use crate::audio::WaveCodec;
use crate::error::{WaveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Noise,
}

impl Waveform {
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Noise => "noise",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub frequency: f64,
    pub duration_secs: f64,
    /// Peak level in [0.0, 1.0] relative to full scale.
    pub amplitude: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: 440.0,
            duration_secs: 1.0,
            amplitude: 0.5,
            sample_rate: 44100,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl ToneSpec {
    pub fn frame_count(&self) -> u32 {
        (self.duration_secs * self.sample_rate as f64).round() as u32
    }
}

/// Renders `spec` into a new buffer, the same value on every channel.
///
/// 8-bit output is unsigned offset-binary, 16 and 32-bit output is signed.
pub fn render_tone(spec: &ToneSpec) -> Result<WaveCodec> {
    if !matches!(spec.bits_per_sample, 8 | 16 | 32) {
        return Err(WaveError::invalid_format(format!(
            "Cannot synthesize {}-bit samples, use 8, 16 or 32",
            spec.bits_per_sample
        )));
    }
    if !spec.frequency.is_finite() || spec.frequency <= 0.0 {
        return Err(WaveError::invalid_format("Frequency must be greater than 0"));
    }
    if !spec.duration_secs.is_finite() || spec.duration_secs < 0.0 {
        return Err(WaveError::invalid_format("Duration cannot be negative"));
    }
    if !(0.0..=1.0).contains(&spec.amplitude) {
        return Err(WaveError::invalid_format("Amplitude must be in range [0.0, 1.0]"));
    }

    let width = u32::from(spec.bits_per_sample / 8);
    let mut codec = WaveCodec::with_format(spec.channels, spec.sample_rate, width, 0)?;

    // The whole payload must be describable by the RIFF size field.
    let payload_len = (spec.duration_secs * spec.sample_rate as f64).round()
        * f64::from(spec.channels)
        * f64::from(width);
    if payload_len > f64::from(u32::MAX - RIFF_SIZE_BIAS) {
        return Err(WaveError::invalid_format(format!(
            "A {}s tone needs {} payload bytes, more than a WAVE file can hold",
            spec.duration_secs, payload_len
        )));
    }

    let frames = spec.frame_count();
    codec
        .payload_mut()
        .reserve(frames as usize * spec.channels as usize * width as usize);

    log::debug!(
        "Rendering {} frames of {} at {} Hz",
        frames,
        spec.waveform.name(),
        spec.frequency
    );

    let mut rng = rand::thread_rng();
    let rate = spec.sample_rate as f64;

    for n in 0..frames {
        let phase = (spec.frequency * n as f64 / rate).fract();
        let level = match spec.waveform {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => if phase < 0.5 { 1.0 } else { -1.0 },
            Waveform::Noise => rng.gen_range(-1.0..=1.0),
        } * spec.amplitude;

        for _ in 0..spec.channels {
            append_level(&mut codec, level, spec.bits_per_sample);
        }
    }

    Ok(codec)
}

fn append_level(codec: &mut WaveCodec, level: f64, bits_per_sample: u16) {
    let level = level.clamp(-1.0, 1.0);
    match bits_per_sample {
        8 => codec.append((level * 127.0).round() as i8 as u8 ^ 0x80),
        16 => codec.append((level * i16::MAX as f64).round() as i16),
        _ => codec.append((level * i32::MAX as f64).round() as i32),
    }
}
