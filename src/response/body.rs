use bytes::{BufMut, BytesMut};

use super::error::{ErrorKind, ResponseError};
use crate::log::warning;

const CRLF: &[u8; 2] = b"\r\n";

/// Message body framing chosen when headers are sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coding {
    /// Status code forbids a message body.
    Bodyless,
    /// `Content-Length` with the declared length.
    ContentLength(u64),
    /// `Transfer-Encoding: chunked`.
    Chunked,
    /// No boundary, the body ends when the connection closes.
    CloseDelimited,
}

impl Coding {
    /// Returns the content length as seen by the caller.
    ///
    /// `-1` for chunked, `None` for close delimited.
    pub const fn content_length(&self) -> Option<i64> {
        match self {
            Coding::Bodyless => Some(0),
            // declared length is bounded by i64::MAX on every path that creates it
            Coding::ContentLength(len) => Some(*len as i64),
            Coding::Chunked => Some(-1),
            Coding::CloseDelimited => None,
        }
    }

    /// Returns `true` if the body ends with a known boundary.
    pub const fn has_boundary(&self) -> bool {
        !matches!(self, Coding::CloseDelimited)
    }
}

/// Frames body bytes according to [`Coding`].
#[derive(Debug)]
pub(crate) struct BodyEncoder {
    coding: Coding,
    written: u64,
}

impl BodyEncoder {
    pub(crate) const fn new(coding: Coding) -> Self {
        Self { coding, written: 0 }
    }

    /// Encode a body chunk into `buf`.
    ///
    /// Nothing is written to `buf` on error.
    pub(crate) fn encode(&mut self, chunk: &[u8], buf: &mut BytesMut) -> Result<(), ResponseError> {
        let len = chunk.len() as u64;

        match self.coding {
            Coding::Bodyless => {
                if !chunk.is_empty() {
                    return Err(ErrorKind::ProtocolViolation(
                        "status code does not allow a message body",
                    )
                    .into());
                }
            }
            Coding::ContentLength(declared) => {
                if self.written.saturating_add(len) > declared {
                    return Err(ErrorKind::ProtocolViolation(
                        "bytes to be written exceed the declared content length",
                    )
                    .into());
                }
                buf.put_slice(chunk);
            }
            Coding::Chunked => {
                // an empty chunk would terminate the body
                if !chunk.is_empty() {
                    put_chunk_size(buf, len);
                    buf.put_slice(chunk);
                    buf.put_slice(CRLF);
                }
            }
            Coding::CloseDelimited => buf.put_slice(chunk),
        }

        self.written += len;
        Ok(())
    }

    /// Write the end of the body into `buf`.
    pub(crate) fn finish(&mut self, buf: &mut BytesMut) -> Result<(), ResponseError> {
        match self.coding {
            Coding::Chunked => {
                buf.put_slice(b"0\r\n\r\n");
                Ok(())
            }
            Coding::ContentLength(declared) if self.written < declared => {
                warning!("response closed after {} of {declared} bytes", self.written);
                Err(ErrorKind::ProtocolViolation(
                    "response closed before the declared content length was written",
                )
                .into())
            }
            _ => Ok(()),
        }
    }
}

/// chunk-size = 1*HEXDIG, followed by CRLF
fn put_chunk_size(buf: &mut BytesMut, len: u64) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut digits = [0u8; 16];
    let mut start = digits.len();
    let mut len = len;

    loop {
        start -= 1;
        digits[start] = HEX[(len & 0xF) as usize];
        len >>= 4;
        if len == 0 {
            break;
        }
    }

    buf.reserve(digits.len() - start + CRLF.len());
    buf.put_slice(&digits[start..]);
    buf.put_slice(CRLF);
}
