//! Byte-order conversion between host memory and the little-endian wire format
//!
//! Every integer field of the WAVE header, and every raw sample unit of the
//! payload, crosses the host/wire boundary through [`reorder`]. The host order
//! is resolved at compile time as [`ByteOrder::NATIVE`], but all conversions
//! take it as a parameter so both orders can be exercised on any machine.

use std::io::{self, Read, Write};
use crate::error::{WaveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the machine this crate was compiled for.
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };

    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::Little => "little-endian",
            ByteOrder::Big => "big-endian",
        }
    }
}

/// Converts one unit of any width between `host` order and little-endian, in place.
///
/// The conversion is its own inverse, so the same call serves reads and writes.
pub fn reorder(bytes: &mut [u8], host: ByteOrder) {
    if host == ByteOrder::Big {
        bytes.reverse();
    }
}

/// Fixed-width value that can cross the wire boundary.
pub trait LeValue: Copy {
    const WIDTH: usize;
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Memory image of `self` on a host with the given byte order.
    fn to_host_bytes(self, host: ByteOrder) -> Self::Bytes;

    fn from_host_bytes(bytes: Self::Bytes, host: ByteOrder) -> Self;
}

macro_rules! impl_le_value {
    ($($t:ty),*) => {
        $(
            impl LeValue for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();
                type Bytes = [u8; std::mem::size_of::<$t>()];

                fn to_host_bytes(self, host: ByteOrder) -> Self::Bytes {
                    match host {
                        ByteOrder::Little => self.to_le_bytes(),
                        ByteOrder::Big => self.to_be_bytes(),
                    }
                }

                fn from_host_bytes(bytes: Self::Bytes, host: ByteOrder) -> Self {
                    match host {
                        ByteOrder::Little => <$t>::from_le_bytes(bytes),
                        ByteOrder::Big => <$t>::from_be_bytes(bytes),
                    }
                }
            }
        )*
    };
}

impl_le_value!(u8, i8, u16, i16, u32, i32, f32);

/// Wire bytes of `value` as produced on a `host`-ordered machine.
pub fn to_le<T: LeValue>(value: T, host: ByteOrder) -> T::Bytes {
    let mut bytes = value.to_host_bytes(host);
    reorder(bytes.as_mut(), host);
    bytes
}

/// Inverse of [`to_le`].
pub fn from_le<T: LeValue>(mut bytes: T::Bytes, host: ByteOrder) -> T {
    reorder(bytes.as_mut(), host);
    T::from_host_bytes(bytes, host)
}

pub fn write_le<W: Write, T: LeValue>(sink: &mut W, value: T) -> io::Result<()> {
    sink.write_all(to_le(value, ByteOrder::NATIVE).as_ref())
}

pub fn push_le<T: LeValue>(buf: &mut Vec<u8>, value: T) {
    buf.extend_from_slice(to_le(value, ByteOrder::NATIVE).as_ref());
}

pub fn read_le<R: Read, T: LeValue>(source: &mut R, context: &'static str) -> Result<T> {
    let mut bytes = T::Bytes::default();
    fill(source, bytes.as_mut(), context)?;
    Ok(from_le(bytes, ByteOrder::NATIVE))
}

/// Reads one raw sample unit of `out.len()` bytes and stores it in `host` order.
///
/// Works for widths with no matching integer type, such as 24-bit samples.
pub fn read_sample_bytes<R: Read>(source: &mut R, out: &mut [u8], host: ByteOrder) -> Result<()> {
    fill(source, out, "sample data")?;
    reorder(out, host);
    Ok(())
}

fn fill<R: Read>(source: &mut R, out: &mut [u8], context: &'static str) -> Result<()> {
    let expected = out.len();
    source.read_exact(out).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => WaveError::TruncatedSource { context, expected },
        _ => WaveError::Io(e),
    })
}
