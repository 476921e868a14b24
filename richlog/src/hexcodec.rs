//! Hex/byte helpers shared by the encoder and the reassembler.
//!
//! Every two hex characters map to one byte. Odd-length or non-hex input is a
//! `MalformedHex` error and is never silently truncated or zero-padded.

use crate::error::Result;

/// Hex-encode a text payload from its UTF-8 bytes, lowercase.
pub fn text_to_hex(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Hex-encode a byte payload, lowercase.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string into raw bytes. Accepts mixed case.
pub fn hex_to_bytes(hex_data: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(hex_data)?)
}

/// Decode a hex string into UTF-8 text.
pub fn hex_to_text(hex_data: &str) -> Result<String> {
    Ok(String::from_utf8(hex_to_bytes(hex_data)?)?)
}
