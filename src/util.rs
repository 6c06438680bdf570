//! Byte-pattern search primitives.
//!
//! Thin wrappers over `memchr::memmem`, which picks a SIMD-accelerated
//! searcher (AVX2 on x86-64, NEON on ARM64) and falls back to Two-Way
//! elsewhere. Dumps are searched once per marker, so a one-shot `find` is
//! enough; no prebuilt `Finder` is kept around.

use memchr::memmem;

/// Finds the position of the first occurrence of `needle` in `haystack`.
///
/// An empty needle matches at offset 0.
#[inline]
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    memmem::find(haystack, needle)
}

/// Finds the first occurrence of `needle` at or after `from`.
///
/// The returned position is absolute (relative to the start of `haystack`).
/// Returns `None` when `from` lies past the end of `haystack`.
#[inline]
pub fn find_bytes_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let tail = haystack.get(from..)?;
    memmem::find(tail, needle).map(|pos| from + pos)
}

/// Strips a case-insensitive `0x` prefix.
#[inline]
pub fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}
