//! Canonical 44-byte RIFF/WAVE header
//!
//! Only the minimal layout is understood: a `RIFF` chunk holding a 16-byte
//! `fmt ` chunk immediately followed by the `data` chunk. Fields are read from
//! and written to fixed offsets; no chunk walking takes place, so files with
//! extra chunks or an extended `fmt ` body decode as garbage.

use std::io::{Read, Seek, SeekFrom, Write};
use crate::audio::endian::{self, ByteOrder, LeValue};
use crate::error::{WaveError, Result};

pub const HEADER_LEN: usize = 44;

pub const RIFF_TAG_OFFSET: usize = 0;
pub const RIFF_SIZE_OFFSET: usize = 4;
pub const WAVE_TAG_OFFSET: usize = 8;
pub const FMT_TAG_OFFSET: usize = 12;
pub const FMT_SIZE_OFFSET: usize = 16;
pub const FORMAT_TAG_OFFSET: usize = 20;
pub const CHANNELS_OFFSET: usize = 22;
pub const SAMPLE_RATE_OFFSET: usize = 24;
pub const BYTE_RATE_OFFSET: usize = 28;
pub const BLOCK_ALIGN_OFFSET: usize = 32;
pub const BITS_PER_SAMPLE_OFFSET: usize = 34;
pub const DATA_TAG_OFFSET: usize = 36;
pub const DATA_SIZE_OFFSET: usize = 40;
pub const DATA_OFFSET: usize = 44;

pub const RIFF_TAG: &[u8; 4] = b"RIFF";
pub const WAVE_TAG: &[u8; 4] = b"WAVE";
pub const FMT_TAG: &[u8; 4] = b"fmt ";
pub const DATA_TAG: &[u8; 4] = b"data";

pub const FMT_CHUNK_SIZE: u32 = 16;
pub const PCM_FORMAT: u16 = 1;

/// Bytes counted by the RIFF size field in front of the payload.
pub const RIFF_SIZE_BIAS: u32 = (HEADER_LEN - 8) as u32;

/// Header fields that carry information; everything else is derived or constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    pub channel_count: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WaveHeader {
    /// Header describing a payload of `payload_len` bytes.
    pub fn for_payload(
        channel_count: u16,
        sample_rate: u32,
        sample_byte_width: u32,
        payload_len: usize,
    ) -> Result<Self> {
        let data_size = u32::try_from(payload_len)
            .ok()
            .filter(|size| *size <= u32::MAX - RIFF_SIZE_BIAS)
            .ok_or(WaveError::PayloadTooLarge { len: payload_len })?;

        Ok(Self {
            channel_count,
            sample_rate,
            bits_per_sample: sample_byte_width.wrapping_mul(8) as u16,
            data_size,
        })
    }

    pub fn sample_byte_width(&self) -> u32 {
        u32::from(self.bits_per_sample / 8)
    }

    pub fn riff_size(&self) -> u32 {
        RIFF_SIZE_BIAS.wrapping_add(self.data_size)
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .wrapping_mul(u32::from(self.channel_count))
            .wrapping_mul(self.sample_byte_width())
    }

    pub fn block_align(&self) -> u16 {
        u32::from(self.channel_count).wrapping_mul(self.sample_byte_width()) as u16
    }

    /// In-memory image of the header.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        put(&mut out, RIFF_TAG_OFFSET, RIFF_TAG);
        put_le(&mut out, RIFF_SIZE_OFFSET, self.riff_size());
        put(&mut out, WAVE_TAG_OFFSET, WAVE_TAG);
        put(&mut out, FMT_TAG_OFFSET, FMT_TAG);
        put_le(&mut out, FMT_SIZE_OFFSET, FMT_CHUNK_SIZE);
        put_le(&mut out, FORMAT_TAG_OFFSET, PCM_FORMAT);
        put_le(&mut out, CHANNELS_OFFSET, self.channel_count);
        put_le(&mut out, SAMPLE_RATE_OFFSET, self.sample_rate);
        put_le(&mut out, BYTE_RATE_OFFSET, self.byte_rate());
        put_le(&mut out, BLOCK_ALIGN_OFFSET, self.block_align());
        put_le(&mut out, BITS_PER_SAMPLE_OFFSET, self.bits_per_sample);
        put(&mut out, DATA_TAG_OFFSET, DATA_TAG);
        put_le(&mut out, DATA_SIZE_OFFSET, self.data_size);
        out
    }

    /// Streams the header field by field onto `sink`.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(RIFF_TAG)?;
        endian::write_le(sink, self.riff_size())?;
        sink.write_all(WAVE_TAG)?;
        sink.write_all(FMT_TAG)?;
        endian::write_le(sink, FMT_CHUNK_SIZE)?;
        endian::write_le(sink, PCM_FORMAT)?;
        endian::write_le(sink, self.channel_count)?;
        endian::write_le(sink, self.sample_rate)?;
        endian::write_le(sink, self.byte_rate())?;
        endian::write_le(sink, self.block_align())?;
        endian::write_le(sink, self.bits_per_sample)?;
        sink.write_all(DATA_TAG)?;
        endian::write_le(sink, self.data_size)?;
        Ok(())
    }

    /// Reads the header fields from their fixed offsets.
    ///
    /// Leaves `source` positioned at the first payload byte.
    pub fn read_from<R: Read + Seek>(source: &mut R) -> Result<Self> {
        source.seek(SeekFrom::Start(CHANNELS_OFFSET as u64))?;
        let channel_count = endian::read_le(source, "channel count")?;
        let sample_rate = endian::read_le(source, "sample rate")?;

        source.seek(SeekFrom::Start(BITS_PER_SAMPLE_OFFSET as u64))?;
        let bits_per_sample = endian::read_le(source, "bits per sample")?;

        source.seek(SeekFrom::Start(DATA_SIZE_OFFSET as u64))?;
        let data_size = endian::read_le(source, "data size")?;

        Ok(Self {
            channel_count,
            sample_rate,
            bits_per_sample,
            data_size,
        })
    }
}

fn put(out: &mut [u8; HEADER_LEN], offset: usize, bytes: &[u8]) {
    out[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn put_le<T: LeValue>(out: &mut [u8; HEADER_LEN], offset: usize, value: T) {
    put(out, offset, endian::to_le(value, ByteOrder::NATIVE).as_ref());
}
