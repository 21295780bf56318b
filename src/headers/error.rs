//! Error types that can occur during header related operation.

/// An error that can occur in header related operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderError {
    /// Header name is empty.
    Empty,
    /// Bytes too long.
    TooLong,
    /// Header name contains a character outside `token`.
    InvalidName,
    /// Header value contains a control character.
    InvalidValue,
}

impl HeaderError {
    pub(crate) const fn invalid_len(len: usize) -> Self {
        match len {
            0 => Self::Empty,
            _ => Self::TooLong,
        }
    }

    pub(crate) const fn message(&self) -> &'static str {
        match self {
            Self::Empty => "header name cannot be empty",
            Self::TooLong => "header too long",
            Self::InvalidName => "header name contains invalid character",
            Self::InvalidValue => "header value contains control character",
        }
    }

    pub(crate) const fn panic_const(self) -> ! {
        panic!("{}", self.message())
    }
}

impl std::error::Error for HeaderError {}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
