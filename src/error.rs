//! Error Types

use std::io;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("Cannot open {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create {path}: {source}")]
    SinkUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Truncated source: needed {expected} more bytes for {context}")]
    TruncatedSource {
        context: &'static str,
        expected: usize,
    },

    #[error("Index {index} out of range for payload of {len} bytes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Unsupported sample width: {bits} bits per sample")]
    UnsupportedSampleWidth { bits: u16 },

    #[error("Payload of {len} bytes does not fit a RIFF size field")]
    PayloadTooLarge { len: usize },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl WaveError {
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self { Self::InvalidFormat { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
}

pub type Result<T> = std::result::Result<T, WaveError>;
