//! Locating and slicing the embedded model.
//!
//! A TFLite flatbuffer starts with a 4-byte root table offset followed by the
//! `TFL3` file identifier, so the model begins four bytes before the marker.
//! The end of the model is not recorded anywhere the extractor can trust, so
//! it is chosen by an [`ExtractionPolicy`].
//!
//! Everything here works on an in-memory buffer and has no side effects other
//! than log events.

mod policy;

pub use policy::*;

use std::ops::Range;

use tracing::debug;

use crate::error::{Error, Result};
use crate::util::{find_bytes, find_bytes_from};

/// The TFLite flatbuffer file identifier.
pub const DEFAULT_MAGIC: &[u8] = b"TFL3";

/// Bytes preceding the magic that belong to the model (the root offset).
pub const DEFAULT_OFFSET_BEFORE_MAGIC: usize = 4;

/// An extracted region of a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Offset of the first extracted byte in the dump
    pub start: usize,
    /// Offset one past the last extracted byte in the dump
    pub end: usize,
    data: Vec<u8>,
}

impl Extraction {
    /// The extracted bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of extracted bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a successful extraction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the extraction and returns the owned bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Computes the byte range of the model without copying it.
///
/// The returned range is non-empty and lies within `buffer`.
pub fn locate(
    buffer: &[u8],
    magic: &[u8],
    offset_before_magic: usize,
    policy: &ExtractionPolicy,
) -> Result<Range<usize>> {
    if magic.is_empty() {
        return Err(Error::EmptyMagic);
    }

    let magic_pos = find_bytes(buffer, magic).ok_or_else(|| Error::MagicNotFound {
        magic: magic.to_vec(),
    })?;
    let start = magic_pos.saturating_sub(offset_before_magic);
    debug!("Magic found at {:#x}, start offset {:#x}", magic_pos, start);

    let end = match policy {
        ExtractionPolicy::FixedSize(size) => start.saturating_add(*size),
        ExtractionPolicy::UntilMarker(marker) => {
            // The window opens magic.len() bytes past start; with the default
            // offset that is the magic position itself.
            let search_from = start + magic.len();
            find_bytes_from(buffer, marker, search_from).ok_or_else(|| {
                Error::EndMarkerNotFound {
                    marker: marker.clone(),
                    start,
                }
            })?
        }
        ExtractionPolicy::ToEof => buffer.len(),
    };
    debug!("Policy {} resolved end offset {:#x}", policy.name(), end);

    if end <= start {
        return Err(Error::InvalidRange { start, end });
    }
    if end > buffer.len() {
        return Err(Error::RangeExceedsBuffer {
            end,
            len: buffer.len(),
        });
    }

    Ok(start..end)
}

/// Extracts the model from `buffer` into a freshly allocated copy.
pub fn extract(
    buffer: &[u8],
    magic: &[u8],
    offset_before_magic: usize,
    policy: &ExtractionPolicy,
) -> Result<Extraction> {
    let range = locate(buffer, magic, offset_before_magic, policy)?;
    Ok(Extraction {
        start: range.start,
        end: range.end,
        data: buffer[range].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: &[u8] = b"\x01\x02\x03\x04TFL3restofdata";

    fn run(buffer: &[u8], policy: ExtractionPolicy) -> Result<Extraction> {
        extract(buffer, DEFAULT_MAGIC, DEFAULT_OFFSET_BEFORE_MAGIC, &policy)
    }

    #[test]
    fn test_to_eof_returns_whole_buffer() {
        let out = run(SAMPLE, ExtractionPolicy::ToEof).unwrap();
        assert_eq!(out.start, 0);
        assert_eq!(out.end, SAMPLE.len());
        assert_eq!(out.bytes(), SAMPLE);
    }

    #[test]
    fn test_fixed_size() {
        let out = run(SAMPLE, ExtractionPolicy::FixedSize(4)).unwrap();
        assert_eq!(out.bytes(), b"\x01\x02\x03\x04");
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_start_backs_up_before_magic() {
        for prefix in [4usize, 5, 17, 100] {
            let mut buffer = vec![0xAAu8; prefix];
            buffer.extend_from_slice(b"TFL3payload");
            let range = locate(&buffer, DEFAULT_MAGIC, 4, &ExtractionPolicy::ToEof).unwrap();
            assert_eq!(range.start, prefix - 4, "magic at {prefix}");
        }
    }

    #[test]
    fn test_start_clamps_to_zero() {
        for prefix in 0usize..4 {
            let mut buffer = vec![0xAAu8; prefix];
            buffer.extend_from_slice(b"TFL3payload");
            let range = locate(&buffer, DEFAULT_MAGIC, 4, &ExtractionPolicy::ToEof).unwrap();
            assert_eq!(range.start, 0, "magic at {prefix}");
        }
    }

    #[test]
    fn test_first_magic_wins() {
        let buffer = b"....TFL3aaaaTFL3bbbb";
        let range = locate(buffer, DEFAULT_MAGIC, 4, &ExtractionPolicy::ToEof).unwrap();
        assert_eq!(range, 0..buffer.len());
    }

    #[test]
    fn test_missing_magic() {
        let err = run(b"no model in here", ExtractionPolicy::ToEof).unwrap_err();
        assert!(matches!(err, Error::MagicNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = run(b"", ExtractionPolicy::ToEof).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_until_marker_stops_before_marker() {
        let buffer = b"HDR:\x10\x00\x00\x00TFL3modelbytesENDMtrailerENDM";
        let out = run(buffer, ExtractionPolicy::UntilMarker(b"ENDM".to_vec())).unwrap();
        assert_eq!(out.start, 4);
        assert_eq!(out.bytes(), b"\x10\x00\x00\x00TFL3modelbytes");
        assert_eq!(&buffer[out.end..out.end + 4], b"ENDM");
        assert!(find_bytes(&out.bytes()[8..], b"ENDM").is_none());
    }

    #[test]
    fn test_until_marker_search_window() {
        // An occurrence inside the root offset is skipped.
        let buffer = b"\x00\x00\x00\x00TFL3data\x00\x00\x00\x00tail";
        let out = run(buffer, ExtractionPolicy::UntilMarker(vec![0, 0, 0, 0])).unwrap();
        assert_eq!(out.bytes(), b"\x00\x00\x00\x00TFL3data");

        // The window starts at the magic itself, so the magic can end the model.
        let buffer = b"\x01\x02\x03\x04TFL3TFL3rest";
        let out = run(buffer, ExtractionPolicy::UntilMarker(b"TFL3".to_vec())).unwrap();
        assert_eq!(out.bytes(), b"\x01\x02\x03\x04");

        // With a clamped start the window opens inside the magic.
        let buffer = b"\x01\x02TFL3xx";
        let out = run(buffer, ExtractionPolicy::UntilMarker(b"L3".to_vec())).unwrap();
        assert_eq!(out.bytes(), b"\x01\x02TF");
    }

    #[test]
    fn test_until_marker_missing() {
        let err = run(SAMPLE, ExtractionPolicy::UntilMarker(b"ENDM".to_vec())).unwrap_err();
        match err {
            Error::EndMarkerNotFound { start, .. } => assert_eq!(start, 0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_until_marker_directly_after_magic_with_clamped_start() {
        // magic at 0, start clamps to 0, marker immediately follows the magic
        let buffer = b"TFL3ENDM";
        let out = run(buffer, ExtractionPolicy::UntilMarker(b"ENDM".to_vec())).unwrap();
        assert_eq!(out.bytes(), b"TFL3");
    }

    #[test]
    fn test_zero_size_is_range_error() {
        let err = run(SAMPLE, ExtractionPolicy::FixedSize(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: 0, end: 0 }));
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_size_past_end_is_range_error() {
        let err = run(SAMPLE, ExtractionPolicy::FixedSize(SAMPLE.len() + 1)).unwrap_err();
        assert!(matches!(err, Error::RangeExceedsBuffer { .. }));
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = run(SAMPLE, ExtractionPolicy::FixedSize(usize::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_size_exactly_to_end() {
        let out = run(SAMPLE, ExtractionPolicy::FixedSize(SAMPLE.len())).unwrap();
        assert_eq!(out.bytes(), SAMPLE);
    }

    #[test]
    fn test_custom_magic_and_offset() {
        let buffer = b"junkjunkHDRxMAGICbody";
        let out = extract(buffer, b"MAGIC", 4, &ExtractionPolicy::ToEof).unwrap();
        assert_eq!(out.bytes(), b"HDRxMAGICbody");

        let out = extract(buffer, b"MAGIC", 0, &ExtractionPolicy::FixedSize(5)).unwrap();
        assert_eq!(out.bytes(), b"MAGIC");
    }

    #[test]
    fn test_empty_magic_rejected() {
        let err = extract(SAMPLE, b"", 4, &ExtractionPolicy::ToEof).unwrap_err();
        assert!(matches!(err, Error::EmptyMagic));
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.to_string(), "magic marker is empty");
    }

    #[test]
    fn test_idempotent() {
        let policy = ExtractionPolicy::UntilMarker(b"data".to_vec());
        let first = run(SAMPLE, policy.clone()).unwrap();
        let second = run(SAMPLE, policy).unwrap();
        assert_eq!(first, second);
    }
}
