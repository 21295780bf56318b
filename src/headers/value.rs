use bytes::Bytes;
use std::str::FromStr;

use crate::headers::error::HeaderError;
use crate::matches;

/// HTTP Header Value.
///
/// Holds text without control characters and without leading or trailing whitespace. Non-ASCII
/// text is accepted and goes through [`legacy::encode`][super::legacy::encode] on the wire.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeaderValue {
    /// is valid UTF-8
    bytes: Bytes,
}

impl HeaderValue {
    /// Empty header value.
    pub const EMPTY: HeaderValue = HeaderValue::from_static("");

    /// Parse header value from static str.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header value.
    #[inline]
    pub const fn from_static(value: &'static str) -> Self {
        match validate_header_value(value) {
            Ok(()) => Self {
                bytes: Bytes::from_static(value.as_bytes()),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Parse header value from owned string without copying.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header value.
    #[inline]
    pub fn from_string(value: String) -> Result<Self, HeaderError> {
        match validate_header_value(&value) {
            Ok(()) => Ok(Self {
                bytes: Bytes::from(value),
            }),
            Err(err) => Err(err),
        }
    }

    /// Create header value from unsigned integer.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(itoa::Buffer::new().format(value).as_bytes()),
        }
    }

    /// Returns header value as `str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: `bytes` is only constructed from `str`
        unsafe { std::str::from_utf8_unchecked(&self.bytes) }
    }

    /// Returns `true` if the value is an empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if the value, as a comma separated list, contains `token` ignoring ASCII
    /// case.
    pub fn contains_token(&self, token: &str) -> bool {
        self.as_str()
            .split(',')
            .any(|e| e.trim_matches([' ', '\t']).eq_ignore_ascii_case(token))
    }
}

// ===== Parsing =====

const fn validate_header_value(value: &str) -> Result<(), HeaderError> {
    let mut bytes = value.as_bytes();
    match bytes {
        // no leading SP / HTAB
        | [b' ' | b'\t', ..]
        // no trailing SP / HTAB
        | [.., b' ' | b'\t'] => {
            return Err(HeaderError::InvalidValue);
        },
        _ => {}
    }
    // every forbidden char is ASCII, so a byte scan over UTF-8 is exact
    while let [byte, rest @ ..] = bytes {
        if *byte < 0x80 && matches::is_forbidden_char(*byte as char) {
            return Err(HeaderError::InvalidValue);
        }
        bytes = rest;
    }
    Ok(())
}

// ===== Traits =====

impl std::fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderValue").field(&self.as_str()).finish()
    }
}

impl std::fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderValue {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_header_value(s)?;
        Ok(Self {
            bytes: Bytes::copy_from_slice(s.as_bytes()),
        })
    }
}

impl PartialEq<str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<HeaderValue> for Bytes {
    #[inline]
    fn from(value: HeaderValue) -> Self {
        value.bytes
    }
}
