//! HTTP Response Writer
use bytes::BytesMut;
use std::{
    io,
    ops::{Deref, DerefMut},
};

use crate::http::Version;
use crate::log::{debug, error};

mod state;
mod framing;
mod body;
mod write;
mod config;
mod error;

pub use state::ResponseState;
pub use body::Coding;
pub use config::Config;
pub use error::{Category, ErrorKind, ResponseError};

use body::BodyEncoder;

/// HTTP/1.x response writer over an output sink.
///
/// Status, headers and framing are mutated through [`ResponseState`], which this type
/// dereferences to. The first body write, or [`close`][Self::close] while nothing is written,
/// sends the status line and headers exactly once. Dropping the writer closes it.
///
/// ```rust
/// use reply::{ResponseWriter, http::Version};
///
/// let mut res = ResponseWriter::new(Vec::new(), Version::HTTP_10);
/// res.write_body(b"hello").unwrap();
/// assert!(!res.keep_alive());
/// res.close().unwrap();
///
/// assert_eq!(
///     res.get_ref().as_slice(),
///     b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\nhello"
/// );
/// ```
pub struct ResponseWriter<W: io::Write> {
    state: ResponseState,
    encoder: Option<BodyEncoder>,
    config: Config,
    buf: BytesMut,
    io: W,
}

impl<W: io::Write> ResponseWriter<W> {
    /// Create new [`ResponseWriter`] for a request sent with `peer` protocol version.
    #[inline]
    pub fn new(io: W, peer: Version) -> Self {
        Self::with_config(io, peer, Config::default())
    }

    /// Create new [`ResponseWriter`] with given [`Config`].
    pub fn with_config(io: W, peer: Version, config: Config) -> Self {
        Self {
            state: ResponseState::new(peer),
            encoder: None,
            config,
            buf: BytesMut::new(),
            io,
        }
    }

    /// Returns reference to the underlying sink.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.io
    }

    /// Returns mutable reference to the underlying sink.
    ///
    /// Writing to the sink directly corrupts the response framing.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.io
    }

    /// Write body bytes, sending the headers first if they are not yet sent.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Disposed`] if the response is closed, and
    /// [`ErrorKind::ProtocolViolation`] if the bytes do not fit the committed framing, in which
    /// case none of them are written.
    pub fn write_body(&mut self, chunk: &[u8]) -> Result<(), ResponseError> {
        if self.state.disposed {
            return Err(ErrorKind::Disposed.into());
        }

        let mut encoder = match self.encoder.take() {
            Some(encoder) => encoder,
            None => self.commit(false),
        };
        let result = encoder.encode(chunk, &mut self.buf);
        self.encoder = Some(encoder);

        self.write_buf()?;
        result
    }

    /// Set the content length to the body length if no framing is chosen yet, write the body and
    /// close the response.
    pub fn close_with_body(&mut self, body: &[u8]) -> Result<(), ResponseError> {
        if self.state.disposed {
            return Err(ErrorKind::Disposed.into());
        }
        if !self.state.headers_sent && !self.state.send_chunked() {
            let Ok(len) = i64::try_from(body.len()) else {
                return Err(ErrorKind::OutOfRange("body is too large").into());
            };
            self.state.set_content_length(len)?;
        }
        let written = self.write_body(body);
        let closed = self.close();
        written.and(closed)
    }

    /// Flush the sink.
    ///
    /// This does not send the headers.
    pub fn flush(&mut self) -> Result<(), ResponseError> {
        if self.state.disposed {
            return Err(ErrorKind::Disposed.into());
        }
        self.io.flush()?;
        Ok(())
    }

    /// Close the response.
    ///
    /// Sends the headers if they are not yet sent, ends the body and flushes the sink. The response
    /// is closed even if this returns an error. Closing a closed response does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ProtocolViolation`] if less bytes than the declared content length
    /// were written.
    pub fn close(&mut self) -> Result<(), ResponseError> {
        if self.state.disposed {
            return Ok(());
        }
        let result = self.finish();
        self.state.disposed = true;
        result
    }

    fn finish(&mut self) -> Result<(), ResponseError> {
        let mut encoder = match self.encoder.take() {
            Some(encoder) => encoder,
            None => self.commit(true),
        };
        let result = encoder.finish(&mut self.buf);
        self.encoder = Some(encoder);

        self.write_buf()?;
        self.io.flush()?;
        result
    }

    /// Freeze the state and buffer the head.
    fn commit(&mut self, closing: bool) -> BodyEncoder {
        self.state.headers_sent = true;

        let coding = framing::resolve(&mut self.state, closing);
        self.config.apply(&mut self.state.headers);
        self.state.coding = Some(coding);

        write::write_head(&self.state, &mut self.buf);
        debug!("response head is {} bytes", self.buf.len());

        BodyEncoder::new(coding)
    }

    fn write_buf(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let result = self.io.write_all(&self.buf);
        self.buf.clear();
        result
    }
}

impl<W: io::Write> Deref for ResponseWriter<W> {
    type Target = ResponseState;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<W: io::Write> DerefMut for ResponseWriter<W> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

impl<W: io::Write> io::Write for ResponseWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_body(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        ResponseWriter::flush(self)?;
        Ok(())
    }
}

impl<W: io::Write> Drop for ResponseWriter<W> {
    fn drop(&mut self) {
        if let Err(_err) = self.close() {
            error!("failed to close response: {_err}");
        }
    }
}

impl<W: io::Write> std::fmt::Debug for ResponseWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseWriter")
            .field("state", &self.state)
            .field("buffered", &self.buf.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test;
