//! Single byte header encoding.
//!
//! Status descriptions and header values are text, the wire is bytes. Every character up to
//! `U+00FF` is written as the byte of the same value (ISO-8859-1), so ASCII round trips exactly.
//! Any character above `U+00FF` has no single byte form and is written as [`FALLBACK`].
//!
//! The transform is lossy by nature: `decode(encode(s)) == s` holds only when every character of
//! `s` is at most `U+00FF`.
use bytes::BufMut;

/// Byte written for characters that cannot be represented, `?`.
pub const FALLBACK: u8 = b'?';

/// Returns the encoded byte for given character.
#[inline]
pub const fn encode_char(ch: char) -> u8 {
    match ch as u32 {
        code @ 0..=0xFF => code as u8,
        _ => FALLBACK,
    }
}

/// Encode text into given buffer, one byte per character.
pub fn encode<B: BufMut>(text: &str, buf: &mut B) {
    if text.is_ascii() {
        buf.put_slice(text.as_bytes());
        return;
    }
    for ch in text.chars() {
        buf.put_u8(encode_char(ch));
    }
}

/// Returns the number of bytes [`encode`] writes for given text.
#[inline]
pub fn encoded_len(text: &str) -> usize {
    text.chars().count()
}

/// Decode bytes into text, one character per byte.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
