//! Error types for model extraction.
//!
//! Every failure the extractor can produce is a distinct variant, grouped into
//! a small taxonomy by [`ErrorKind`].

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for extraction operations.
#[derive(Error, Debug)]
pub enum Error {
    // ==================== I/O Errors ====================
    #[error("failed to open file '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to memory map file '{path}': {source}")]
    MemoryMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==================== Search Errors ====================
    #[error("magic marker {} not found", display_bytes(.magic))]
    MagicNotFound { magic: Vec<u8> },

    #[error("end marker {} not found after offset {start}", display_bytes(.marker))]
    EndMarkerNotFound { marker: Vec<u8>, start: usize },

    // ==================== Range Errors ====================
    #[error("computed end precedes or equals start (start: {start:#x}, end: {end:#x})")]
    InvalidRange { start: usize, end: usize },

    #[error("computed end {end:#x} lies beyond the end of the dump (size: {len:#x})")]
    RangeExceedsBuffer { end: usize, len: usize },

    // ==================== Format Errors ====================
    #[error("invalid size '{text}': {reason}")]
    InvalidSize { text: String, reason: String },

    #[error("invalid marker '{text}': {reason}")]
    InvalidMarker { text: String, reason: String },

    #[error("magic marker is empty")]
    EmptyMagic,
}

/// A specialized Result type for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The magic or end marker is absent where it was searched for.
    NotFound,
    /// The computed offsets do not describe a non-empty range inside the dump.
    Range,
    /// A user-supplied size or marker did not parse.
    Format,
    /// Reading the dump or writing the output failed.
    Io,
}

impl Error {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MagicNotFound { .. } | Error::EndMarkerNotFound { .. } => ErrorKind::NotFound,
            Error::InvalidRange { .. } | Error::RangeExceedsBuffer { .. } => ErrorKind::Range,
            Error::InvalidSize { .. } | Error::InvalidMarker { .. } | Error::EmptyMagic => {
                ErrorKind::Format
            }
            Error::FileOpen { .. } | Error::MemoryMap { .. } | Error::FileWrite { .. } => {
                ErrorKind::Io
            }
        }
    }

    /// Creates a size parse error.
    #[inline]
    pub fn invalid_size(text: &str, reason: impl Into<String>) -> Self {
        Error::InvalidSize {
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a marker parse error.
    #[inline]
    pub fn invalid_marker(text: &str, reason: impl Into<String>) -> Self {
        Error::InvalidMarker {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// Renders marker bytes as quoted text when printable, hex otherwise.
fn display_bytes(bytes: &[u8]) -> String {
    if !bytes.is_empty() && bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        format!("\"{}\"", String::from_utf8_lossy(bytes))
    } else {
        format!("0x{}", hex::encode_upper(bytes))
    }
}
