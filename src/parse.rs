//! Parsers for user-supplied policy inputs.
//!
//! Sizes accept decimal or `0x`-prefixed hexadecimal. Markers accept either
//! literal text or `0x`-prefixed hex bytes with optional `_` separators
//! (`0x00_FF`).

use crate::error::{Error, Result};
use crate::util::strip_hex_prefix;

/// Parses a byte count given in decimal or `0x`-prefixed hexadecimal.
///
/// Surrounding whitespace is ignored. Signs, separators and any other
/// characters are rejected.
pub fn parse_size(text: &str) -> Result<usize> {
    let trimmed = text.trim();

    let (digits, radix) = match strip_hex_prefix(trimmed) {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };

    if digits.is_empty() {
        return Err(Error::invalid_size(text, "no digits"));
    }

    // from_str_radix tolerates a leading '+', which is not part of the grammar
    if !digits.chars().all(|c| c.is_digit(radix)) {
        let reason = if radix == 16 {
            "expected hexadecimal digits after 0x"
        } else {
            "expected decimal digits or a 0x prefix"
        };
        return Err(Error::invalid_size(text, reason));
    }

    usize::from_str_radix(digits, radix).map_err(|e| Error::invalid_size(text, e.to_string()))
}

/// Converts marker text into the bytes to search for.
///
/// With a `0x` prefix the rest is hex: underscores are dropped and an odd
/// digit count gets a leading `0` (`0xABC` is `[0x0A, 0xBC]`). Without the
/// prefix the text is taken verbatim.
pub fn parse_marker_bytes(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();

    let bytes = match strip_hex_prefix(trimmed) {
        Some(hex) => {
            let mut digits: String = hex.chars().filter(|&c| c != '_').collect();
            if digits.len() % 2 == 1 {
                digits.insert(0, '0');
            }
            hex::decode(&digits).map_err(|e| Error::invalid_marker(text, e.to_string()))?
        }
        None => trimmed.as_bytes().to_vec(),
    };

    if bytes.is_empty() {
        return Err(Error::invalid_marker(text, "marker is empty"));
    }

    Ok(bytes)
}
