use std::io;

use crate::headers::HeaderError;

/// Response writer error.
pub struct ResponseError {
    kind: Box<ErrorKind>,
}

/// The kind of [`ResponseError`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required value was not given.
    MissingArgument(&'static str),
    /// Given value is malformed.
    InvalidArgument(&'static str),
    /// Given value is outside its allowed range.
    OutOfRange(&'static str),
    /// Given value is well formed but violates HTTP/1.x semantics.
    ProtocolViolation(&'static str),
    /// Headers are already sent, framing can no longer change.
    HeadersSent,
    /// Response is closed.
    Disposed,
    /// Header collection replaced with nothing.
    MissingHeaders,
    /// Invalid header name or value.
    InvalidHeader(HeaderError),
    /// Output sink error.
    Io(io::Error),
}

/// Coarse classification of [`ResponseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Bad input to a setter, prior state is untouched.
    Validation,
    /// Operation attempted in the wrong state.
    Lifecycle,
    /// Value violates HTTP/1.x semantics.
    Protocol,
    /// Output sink failure.
    Io,
}

impl ResponseError {
    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the error category.
    pub fn category(&self) -> Category {
        match self.kind.as_ref() {
            ErrorKind::MissingArgument(_)
            | ErrorKind::InvalidArgument(_)
            | ErrorKind::OutOfRange(_)
            | ErrorKind::InvalidHeader(_) => Category::Validation,
            ErrorKind::HeadersSent | ErrorKind::Disposed | ErrorKind::MissingHeaders => {
                Category::Lifecycle
            }
            ErrorKind::ProtocolViolation(_) => Category::Protocol,
            ErrorKind::Io(_) => Category::Io,
        }
    }

    /// Returns `true` if the error is [`ErrorKind::Disposed`].
    #[inline]
    pub fn is_disposed(&self) -> bool {
        matches!(self.kind.as_ref(), ErrorKind::Disposed)
    }
}

impl From<ErrorKind> for ResponseError {
    #[inline]
    fn from(v: ErrorKind) -> Self {
        Self { kind: Box::new(v) }
    }
}

impl From<HeaderError> for ResponseError {
    #[inline]
    fn from(v: HeaderError) -> Self {
        ErrorKind::InvalidHeader(v).into()
    }
}

impl From<io::Error> for ResponseError {
    #[inline]
    fn from(v: io::Error) -> Self {
        ErrorKind::Io(v).into()
    }
}

impl From<ResponseError> for io::Error {
    fn from(v: ResponseError) -> Self {
        match *v.kind {
            ErrorKind::Io(err) => err,
            kind => {
                let err = ResponseError::from(kind);
                let kind = match err.category() {
                    Category::Validation => io::ErrorKind::InvalidInput,
                    Category::Protocol => io::ErrorKind::InvalidData,
                    Category::Lifecycle | Category::Io => io::ErrorKind::Other,
                };
                io::Error::new(kind, err)
            }
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind.as_ref() {
            ErrorKind::InvalidHeader(err) => Some(err),
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind.as_ref() {
            ErrorKind::MissingArgument(name) => write!(f, "{name} cannot be null"),
            ErrorKind::InvalidArgument(msg) => f.write_str(msg),
            ErrorKind::OutOfRange(msg) => f.write_str(msg),
            ErrorKind::ProtocolViolation(msg) => write!(f, "protocol violation: {msg}"),
            ErrorKind::HeadersSent => f.write_str("cannot change framing after headers are sent"),
            ErrorKind::Disposed => f.write_str("response is closed"),
            ErrorKind::MissingHeaders => f.write_str("header collection cannot be null"),
            ErrorKind::InvalidHeader(err) => write!(f, "invalid header: {err}"),
            ErrorKind::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::fmt::Debug for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResponseError").field(&self.kind).finish()
    }
}
