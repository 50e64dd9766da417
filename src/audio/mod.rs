//! Audio Module
//!
//! Canonical RIFF/WAVE encoding and decoding of raw PCM payloads, plus simple
//! waveform synthesis on top of the buffer API.

pub mod endian;
pub mod header;
pub mod synth;
pub mod wav;

pub use endian::{ByteOrder, LeValue};
pub use header::WaveHeader;
pub use synth::{render_tone, ToneSpec, Waveform};
pub use wav::WaveCodec;
