//! WAV audio buffer with canonical RIFF/WAVE load and save

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;

use crate::audio::endian::{self, ByteOrder, LeValue};
use crate::audio::header::{WaveHeader, HEADER_LEN};
use crate::error::{WaveError, Result};

/// Decoded PCM audio: format fields plus the raw interleaved payload.
///
/// The payload is kept with every sample unit in host byte order. Loading and
/// saving convert each unit to and from little-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveCodec {
    channel_count: u16,
    sample_rate: u32,
    sample_byte_width: u32,
    samples: Vec<u8>,
    host_order: ByteOrder,
}

impl Default for WaveCodec {
    fn default() -> Self {
        Self {
            channel_count: 0,
            sample_rate: 0,
            sample_byte_width: 0,
            samples: Vec::new(),
            host_order: ByteOrder::NATIVE,
        }
    }
}

impl WaveCodec {
    /// Empty buffer with no format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `frame_count` frames of silence (all bytes zero).
    pub fn with_format(
        channel_count: u16,
        sample_rate: u32,
        sample_byte_width: u32,
        frame_count: u32,
    ) -> Result<Self> {
        validate_format(channel_count, sample_rate, sample_byte_width)?;

        let len = (frame_count as usize)
            .checked_mul(channel_count as usize)
            .and_then(|n| n.checked_mul(sample_byte_width as usize))
            .ok_or_else(|| WaveError::invalid_format(format!(
                "{} frames of {} x {} bytes overflow the payload size",
                frame_count, channel_count, sample_byte_width
            )))?;

        Ok(Self {
            channel_count,
            sample_rate,
            sample_byte_width,
            samples: vec![0; len],
            host_order: ByteOrder::NATIVE,
        })
    }

    /// Reinterprets the payload as kept in `order` rather than the native order.
    ///
    /// Lets a little-endian machine reproduce what a big-endian one would do.
    pub fn with_host_order(mut self, order: ByteOrder) -> Self {
        self.host_order = order;
        self
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut codec = Self::new();
        codec.load(path)?;
        Ok(codec)
    }

    /// Replaces the whole state with the contents of a WAVE file.
    ///
    /// On error `self` is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| WaveError::SourceUnavailable {
            path: path.display().to_string(),
            source: e,
        })?;

        let decoded = Self::decode_with(&mut BufReader::new(file), self.host_order)?;
        log::debug!(
            "Loaded {}: {} channels, {} Hz, {} bytes/sample, {} payload bytes",
            path.display(),
            decoded.channel_count,
            decoded.sample_rate,
            decoded.sample_byte_width,
            decoded.samples.len()
        );

        *self = decoded;
        Ok(())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut Cursor::new(bytes))
    }

    pub fn decode<R: Read + Seek>(source: &mut R) -> Result<Self> {
        Self::decode_with(source, ByteOrder::NATIVE)
    }

    fn decode_with<R: Read + Seek>(source: &mut R, host_order: ByteOrder) -> Result<Self> {
        let header = WaveHeader::read_from(source)?;

        let width = header.sample_byte_width() as usize;
        if width == 0 {
            return Err(WaveError::UnsupportedSampleWidth { bits: header.bits_per_sample });
        }

        let data_size = header.data_size as usize;
        let unit_bytes = data_size / width * width;

        // Check the declared size against the source before allocating for it.
        let end = source.seek(SeekFrom::End(0))?;
        let available = end.saturating_sub(HEADER_LEN as u64);
        if available < unit_bytes as u64 {
            return Err(WaveError::TruncatedSource {
                context: "sample data",
                expected: unit_bytes - available as usize,
            });
        }
        source.seek(SeekFrom::Start(HEADER_LEN as u64))?;

        if data_size != unit_bytes {
            log::warn!(
                "Data size {} is not a multiple of the {}-byte sample width; trailing {} bytes left zeroed",
                data_size,
                width,
                data_size - unit_bytes
            );
        }

        let mut samples = vec![0u8; data_size];
        for unit in samples.chunks_exact_mut(width) {
            endian::read_sample_bytes(source, unit, host_order)?;
        }

        Ok(Self {
            channel_count: header.channel_count,
            sample_rate: header.sample_rate,
            sample_byte_width: header.sample_byte_width(),
            samples,
            host_order,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Fail before the destination is truncated.
        let header = self.header()?;

        let file = File::create(path).map_err(|e| WaveError::SinkUnavailable {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut writer = BufWriter::new(file);
        header.write_to(&mut writer)?;
        self.write_payload(&mut writer)?;
        writer.flush()?;

        log::debug!("Saved {} ({} payload bytes)", path.display(), self.samples.len());
        Ok(())
    }

    /// Streams the header and payload onto `sink`.
    pub fn encode<W: Write>(&self, sink: &mut W) -> Result<()> {
        self.header()?.write_to(sink)?;
        self.write_payload(sink)
    }

    /// Complete file image in memory, byte-identical to what [`save`](Self::save) writes.
    pub fn serialize_to_bytes(&self) -> Result<Vec<u8>> {
        let header = self.header()?;
        let mut out = Vec::with_capacity(HEADER_LEN + self.samples.len());
        out.extend_from_slice(&header.to_bytes());
        self.write_payload(&mut out)?;
        Ok(out)
    }

    pub fn header(&self) -> Result<WaveHeader> {
        WaveHeader::for_payload(
            self.channel_count,
            self.sample_rate,
            self.sample_byte_width,
            self.samples.len(),
        )
    }

    fn write_payload<W: Write>(&self, sink: &mut W) -> Result<()> {
        let width = self.sample_byte_width as usize;
        if self.host_order == ByteOrder::Little || width <= 1 {
            sink.write_all(&self.samples)?;
            return Ok(());
        }

        let mut unit = vec![0u8; width];
        let mut chunks = self.samples.chunks_exact(width);
        for chunk in &mut chunks {
            unit.copy_from_slice(chunk);
            endian::reorder(&mut unit, self.host_order);
            sink.write_all(&unit)?;
        }
        sink.write_all(chunks.remainder())?;
        Ok(())
    }

    /// Human-readable description of the format and payload size.
    pub fn summary(&self) -> String {
        self.to_string()
    }

    pub fn payload(&self) -> &[u8] {
        &self.samples
    }

    pub fn payload_mut(&mut self) -> &mut Vec<u8> {
        &mut self.samples
    }

    /// Replaces the payload. The length is not checked against the frame size.
    pub fn set_payload<B: Into<Vec<u8>>>(&mut self, payload: B) {
        self.samples = payload.into();
    }

    pub fn byte(&self, index: usize) -> Result<u8> {
        self.samples.get(index).copied().ok_or(WaveError::IndexOutOfRange {
            index,
            len: self.samples.len(),
        })
    }

    pub fn byte_mut(&mut self, index: usize) -> Result<&mut u8> {
        let len = self.samples.len();
        self.samples.get_mut(index).ok_or(WaveError::IndexOutOfRange { index, len })
    }

    /// Appends one value so that it reaches the wire little-endian.
    ///
    /// The value need not match the sample width: its bytes are laid over the
    /// payload's sample units, and every unit it completes is stored in host
    /// order. A partial trailing unit stays in wire order until completed.
    pub fn append<T: LeValue>(&mut self, value: T) {
        let start = self.samples.len();
        self.samples.extend_from_slice(endian::to_le(value, self.host_order).as_ref());

        let width = self.sample_byte_width as usize;
        if self.host_order == ByteOrder::Little || width <= 1 {
            return;
        }

        let first_unit = start - start % width;
        let whole = self.samples.len() - self.samples.len() % width;
        if whole > first_unit {
            for unit in self.samples[first_unit..whole].chunks_exact_mut(width) {
                endian::reorder(unit, self.host_order);
            }
        }
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn sample_byte_width(&self) -> u32 {
        self.sample_byte_width
    }

    pub fn bits_per_sample(&self) -> u32 {
        self.sample_byte_width * 8
    }

    pub fn block_align(&self) -> usize {
        self.channel_count as usize * self.sample_byte_width as usize
    }

    pub fn byte_rate(&self) -> u64 {
        u64::from(self.sample_rate) * self.block_align() as u64
    }

    pub fn frame_count(&self) -> usize {
        match self.block_align() {
            0 => 0,
            block => self.samples.len() / block,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn host_order(&self) -> ByteOrder {
        self.host_order
    }

    /// Checks the format fields and that the payload holds whole frames.
    pub fn validate(&self) -> Result<()> {
        validate_format(self.channel_count, self.sample_rate, self.sample_byte_width)?;

        if self.samples.len() % self.block_align() != 0 {
            return Err(WaveError::invalid_format(format!(
                "Payload of {} bytes is not a whole number of {}-byte frames",
                self.samples.len(),
                self.block_align()
            )));
        }

        Ok(())
    }
}

fn validate_format(channel_count: u16, sample_rate: u32, sample_byte_width: u32) -> Result<()> {
    if channel_count == 0 {
        return Err(WaveError::invalid_format("Channel count must be at least 1"));
    }
    if sample_rate == 0 {
        return Err(WaveError::invalid_format("Sample rate cannot be 0"));
    }
    if sample_byte_width == 0 {
        return Err(WaveError::invalid_format("Sample width must be at least 1 byte"));
    }
    if sample_byte_width > u32::from(u16::MAX / 8) {
        return Err(WaveError::invalid_format(format!(
            "Sample width of {} bytes does not fit the bits-per-sample field",
            sample_byte_width
        )));
    }
    Ok(())
}

impl fmt::Display for WaveCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Channels: {}", self.channel_count)?;
        writeln!(f, "Sample Rate: {}", self.sample_rate)?;
        writeln!(f, "Sample Size: {}", self.sample_byte_width)?;
        writeln!(f, "Size: {}", self.samples.len())
    }
}

impl Index<usize> for WaveCodec {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.samples[index]
    }
}

impl IndexMut<usize> for WaveCodec {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.samples[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::header::{BLOCK_ALIGN_OFFSET, BYTE_RATE_OFFSET, DATA_SIZE_OFFSET, RIFF_SIZE_OFFSET};
    use tempfile::{NamedTempFile, TempDir};

    fn le_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn le_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_allocation() {
        let codec = WaveCodec::with_format(2, 44100, 2, 1000).unwrap();
        assert_eq!(codec.len(), 4000);
        assert!(codec.payload().iter().all(|&b| b == 0));
        assert_eq!(codec.frame_count(), 1000);
        assert_eq!(codec.block_align(), 4);
        assert_eq!(codec.byte_rate(), 176_400);
    }

    #[test]
    fn test_invalid_format() {
        assert!(WaveCodec::with_format(0, 44100, 2, 10).is_err());
        assert!(WaveCodec::with_format(1, 0, 2, 10).is_err());
        assert!(WaveCodec::with_format(1, 44100, 0, 10).is_err());
        assert!(WaveCodec::with_format(1, 44100, 2, 0).is_ok());
    }

    #[test]
    fn test_empty_codec() {
        let codec = WaveCodec::new();
        assert!(codec.is_empty());
        assert_eq!(codec.frame_count(), 0);
        assert_eq!(codec.duration_secs(), 0.0);
        assert!(codec.validate().is_err());
        assert_eq!(codec.host_order(), ByteOrder::NATIVE);
    }

    #[test]
    fn test_serialize_scenario() {
        let mut codec = WaveCodec::with_format(1, 8000, 1, 4).unwrap();
        codec.set_payload(vec![10, 20, 30, 40]);

        let bytes = codec.serialize_to_bytes().unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(b"RIFF");
        expected.extend_from_slice(&40u32.to_le_bytes());
        expected.extend_from_slice(b"WAVE");
        expected.extend_from_slice(b"fmt ");
        expected.extend_from_slice(&16u32.to_le_bytes());
        expected.extend_from_slice(&1u16.to_le_bytes());
        expected.extend_from_slice(&1u16.to_le_bytes());
        expected.extend_from_slice(&8000u32.to_le_bytes());
        expected.extend_from_slice(&8000u32.to_le_bytes());
        expected.extend_from_slice(&1u16.to_le_bytes());
        expected.extend_from_slice(&8u16.to_le_bytes());
        expected.extend_from_slice(b"data");
        expected.extend_from_slice(&4u32.to_le_bytes());
        expected.extend_from_slice(&[10, 20, 30, 40]);

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_header_arithmetic() {
        for len in [0usize, 1, 6, 1023] {
            let mut codec = WaveCodec::with_format(3, 48000, 2, 0).unwrap();
            codec.set_payload(vec![0xAB; len]);
            let bytes = codec.serialize_to_bytes().unwrap();

            assert_eq!(bytes.len(), HEADER_LEN + len);
            assert_eq!(le_u32(&bytes, RIFF_SIZE_OFFSET), 36 + len as u32);
            assert_eq!(le_u32(&bytes, DATA_SIZE_OFFSET), len as u32);
            assert_eq!(le_u32(&bytes, BYTE_RATE_OFFSET), 48000 * 3 * 2);
            assert_eq!(le_u16(&bytes, BLOCK_ALIGN_OFFSET), 6);
        }
    }

    #[test]
    fn test_round_trip_bytes() {
        let mut codec = WaveCodec::with_format(2, 22050, 3, 0).unwrap();
        for i in 0..60u8 {
            codec.append(i.wrapping_mul(37));
        }

        let decoded = WaveCodec::from_bytes(&codec.serialize_to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.channel_count(), 2);
        assert_eq!(decoded.sample_rate(), 22050);
        assert_eq!(decoded.sample_byte_width(), 3);
        assert_eq!(decoded.payload(), codec.payload());
        assert_eq!(decoded, codec);
    }

    #[test]
    fn test_reserialize_is_identity() {
        let mut codec = WaveCodec::with_format(2, 16000, 2, 0).unwrap();
        for v in [-32768i16, -1, 0, 1, 1234, 32767] {
            codec.append(v);
        }
        let original = codec.serialize_to_bytes().unwrap();

        let reserialized = WaveCodec::from_bytes(&original)
            .unwrap()
            .serialize_to_bytes()
            .unwrap();
        assert_eq!(reserialized, original);
    }

    #[test]
    fn test_simulated_big_endian_host() {
        let mut little = WaveCodec::with_format(1, 8000, 2, 0)
            .unwrap()
            .with_host_order(ByteOrder::Little);
        let mut big = WaveCodec::with_format(1, 8000, 2, 0)
            .unwrap()
            .with_host_order(ByteOrder::Big);

        for v in [0x0102i16, -2, 300] {
            little.append(v);
            big.append(v);
        }

        assert_ne!(little.payload(), big.payload());
        assert_eq!(big.payload()[..2], [0x01, 0x02]);

        let wire = little.serialize_to_bytes().unwrap();
        assert_eq!(big.serialize_to_bytes().unwrap(), wire);
        assert_eq!(&wire[HEADER_LEN..HEADER_LEN + 2], &[0x02, 0x01]);

        let mut streamed = Vec::new();
        big.encode(&mut streamed).unwrap();
        assert_eq!(streamed, wire);

        let decoded = WaveCodec::decode_with(&mut Cursor::new(&wire), ByteOrder::Big).unwrap();
        assert_eq!(decoded.payload(), big.payload());
    }

    #[test]
    fn test_save_matches_serialize() {
        let mut codec = WaveCodec::with_format(2, 44100, 2, 0).unwrap();
        for v in 0..100i16 {
            codec.append(v * 300);
        }

        let temp_file = NamedTempFile::new().unwrap();
        codec.save(temp_file.path()).unwrap();

        let on_disk = std::fs::read(temp_file.path()).unwrap();
        assert_eq!(on_disk, codec.serialize_to_bytes().unwrap());

        let loaded = WaveCodec::open(temp_file.path()).unwrap();
        assert_eq!(loaded, codec);
    }

    #[test]
    fn test_load_missing_file_keeps_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut codec = WaveCodec::with_format(1, 8000, 1, 2).unwrap();
        let before = codec.clone();

        let result = codec.load(temp_dir.path().join("missing.wav"));
        assert!(matches!(result, Err(WaveError::SourceUnavailable { .. })));
        assert_eq!(codec, before);
    }

    #[test]
    fn test_load_truncated_payload_keeps_state() {
        let mut source = WaveCodec::with_format(1, 8000, 2, 8).unwrap();
        source.payload_mut().fill(7);
        let bytes = source.serialize_to_bytes().unwrap();

        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), &bytes[..bytes.len() - 3]).unwrap();

        let mut codec = WaveCodec::new();
        let result = codec.load(temp_file.path());
        match result {
            Err(WaveError::TruncatedSource { context, expected }) => {
                assert_eq!(context, "sample data");
                assert_eq!(expected, 3);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
        assert_eq!(codec, WaveCodec::new());
    }

    #[test]
    fn test_zero_bit_header() {
        let mut bytes = WaveCodec::with_format(1, 8000, 1, 4)
            .unwrap()
            .serialize_to_bytes()
            .unwrap();
        bytes[34] = 4;
        assert!(matches!(
            WaveCodec::from_bytes(&bytes),
            Err(WaveError::UnsupportedSampleWidth { bits: 4 })
        ));
    }

    #[test]
    fn test_partial_trailing_unit_left_zeroed() {
        let mut bytes = WaveCodec::with_format(1, 8000, 2, 0)
            .unwrap()
            .serialize_to_bytes()
            .unwrap();
        bytes[DATA_SIZE_OFFSET] = 5;
        bytes.extend_from_slice(&[1, 2, 3, 4, 5]);

        let decoded = WaveCodec::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.payload(), &[1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_trailing_bytes_after_data_ignored() {
        let mut codec = WaveCodec::with_format(1, 8000, 1, 0).unwrap();
        codec.set_payload(vec![1, 2, 3]);
        let mut bytes = codec.serialize_to_bytes().unwrap();
        bytes.extend_from_slice(b"LIST");

        let decoded = WaveCodec::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.payload(), &[1, 2, 3]);
    }

    #[test]
    fn test_indexed_access() {
        let mut codec = WaveCodec::with_format(1, 8000, 1, 4).unwrap();
        codec[2] = 99;
        assert_eq!(codec[2], 99);
        assert_eq!(codec.byte(2).unwrap(), 99);

        *codec.byte_mut(3).unwrap() = 5;
        assert_eq!(codec.payload(), &[0, 0, 99, 5]);

        assert!(matches!(
            codec.byte(4),
            Err(WaveError::IndexOutOfRange { index: 4, len: 4 })
        ));
        assert!(codec.byte_mut(100).is_err());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let codec = WaveCodec::with_format(1, 8000, 1, 4).unwrap();
        let _ = codec[4];
    }

    #[test]
    fn test_append_widths() {
        let mut codec = WaveCodec::with_format(1, 8000, 2, 0)
            .unwrap()
            .with_host_order(ByteOrder::Little);
        codec.append(0x7Fu8);
        codec.append(0x1234u16);
        codec.append(0x0A0B0C0Du32);
        assert_eq!(codec.payload(), &[0x7F, 0x34, 0x12, 0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn test_summary() {
        let codec = WaveCodec::with_format(2, 44100, 2, 10).unwrap();
        assert_eq!(
            codec.summary(),
            "Channels: 2\nSample Rate: 44100\nSample Size: 2\nSize: 40\n"
        );
        assert_eq!(codec.to_string(), codec.summary());
    }

    #[test]
    fn test_append_mismatched_widths_same_wire_on_both_hosts() {
        let cases: [(u32, fn(&mut WaveCodec)); 3] = [
            (1, |c| c.append(0x1234u16)),
            (2, |c| {
                c.append(0x11u8);
                c.append(0x22u8);
                c.append(0x0A0B0C0Du32);
                c.append(0x33u8);
            }),
            (4, |c| {
                c.append(0x0102u16);
                c.append(0x0304u16);
                c.append(-7i8);
            }),
        ];

        for (width, fill) in cases {
            let mut little = WaveCodec::with_format(1, 8000, width, 0)
                .unwrap()
                .with_host_order(ByteOrder::Little);
            let mut big = WaveCodec::with_format(1, 8000, width, 0)
                .unwrap()
                .with_host_order(ByteOrder::Big);
            fill(&mut little);
            fill(&mut big);

            let wire = little.serialize_to_bytes().unwrap();
            assert_eq!(big.serialize_to_bytes().unwrap(), wire, "sample width {}", width);
        }

        let mut big = WaveCodec::with_format(1, 8000, 1, 0)
            .unwrap()
            .with_host_order(ByteOrder::Big);
        big.append(0x1234u16);
        assert_eq!(&big.serialize_to_bytes().unwrap()[HEADER_LEN..], &[0x34, 0x12]);
    }

    #[test]
    fn test_append_completes_units_in_host_order() {
        let mut big = WaveCodec::with_format(1, 8000, 4, 0)
            .unwrap()
            .with_host_order(ByteOrder::Big);
        big.append(0x0102u16);
        assert_eq!(big.payload(), &[0x02, 0x01]);
        big.append(0x0304u16);
        assert_eq!(big.payload(), &[0x03, 0x04, 0x01, 0x02]);

        let wire = big.serialize_to_bytes().unwrap();
        let decoded = WaveCodec::decode_with(&mut Cursor::new(&wire), ByteOrder::Big).unwrap();
        assert_eq!(decoded.payload(), big.payload());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_save_keeps_existing_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), b"keep me").unwrap();

        let mut codec = WaveCodec::with_format(1, 8000, 1, 0).unwrap();
        codec.set_payload(vec![0u8; u32::MAX as usize]);

        assert!(matches!(
            codec.save(temp_file.path()),
            Err(WaveError::PayloadTooLarge { .. })
        ));
        assert_eq!(std::fs::read(temp_file.path()).unwrap(), b"keep me");
    }

    #[test]
    fn test_load_truncated_header_keeps_state() {
        let header = WaveCodec::with_format(2, 44100, 2, 0)
            .unwrap()
            .serialize_to_bytes()
            .unwrap();
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), &header[..30]).unwrap();

        let mut codec = WaveCodec::with_format(1, 8000, 1, 3).unwrap();
        codec.set_payload(vec![1, 2, 3]);
        let before = codec.clone();

        let result = codec.load(temp_file.path());
        assert!(matches!(
            result,
            Err(WaveError::TruncatedSource { context: "bits per sample", .. })
        ));
        assert_eq!(codec, before);
    }

    #[test]
    fn test_validate_partial_frame() {
        let mut codec = WaveCodec::with_format(2, 8000, 2, 1).unwrap();
        assert!(codec.validate().is_ok());
        codec.append(1u8);
        assert!(codec.validate().is_err());
    }
}
