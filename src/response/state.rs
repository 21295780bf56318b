use std::{borrow::Cow, cell::OnceCell};

use super::{
    body::Coding,
    error::{ErrorKind, ResponseError},
    framing,
};
use crate::headers::{
    AsHeaderName, HeaderMap, HeaderName, HeaderValue, name_str,
    standard::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION, TRANSFER_ENCODING},
};
use crate::http::{StatusCode, Version, describe};
use crate::matches;

/// Mutable response record.
///
/// Reads are always allowed. Writes are validated while headers are not yet sent, silently ignored
/// after that, and fail with [`ErrorKind::Disposed`] once the response is closed. Writes to the
/// content length and the chunked flag fail with [`ErrorKind::HeadersSent`] instead of being
/// ignored.
///
/// `Content-Length`, `Transfer-Encoding`, `Connection`, `Content-Type` and `Location` live only
/// in the header collection, typed accessors read and write those entries.
#[derive(Debug)]
pub struct ResponseState {
    pub(crate) status: StatusCode,
    /// materialized on first read or on explicit set, never recomputed after
    pub(crate) description: OnceCell<Cow<'static, str>>,
    pub(crate) headers: HeaderMap,
    pub(crate) version: Version,
    pub(crate) peer: Version,
    pub(crate) coding: Option<Coding>,
    pub(crate) headers_sent: bool,
    pub(crate) disposed: bool,
}

impl ResponseState {
    pub(crate) fn new(peer: Version) -> Self {
        Self {
            status: StatusCode::OK,
            description: OnceCell::new(),
            headers: HeaderMap::new(),
            version: Version::HTTP_11,
            peer,
            coding: None,
            headers_sent: false,
            disposed: false,
        }
    }

    /// Returns `Ok(false)` when the write should be ignored.
    fn writable(&self) -> Result<bool, ResponseError> {
        if self.disposed {
            return Err(ErrorKind::Disposed.into());
        }
        Ok(!self.headers_sent)
    }

    fn framing_writable(&self) -> Result<(), ResponseError> {
        if self.disposed {
            return Err(ErrorKind::Disposed.into());
        }
        if self.headers_sent {
            return Err(ErrorKind::HeadersSent.into());
        }
        Ok(())
    }
}

// ===== Status =====

impl ResponseState {
    /// Returns the status code, `200` by default.
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status.get()
    }

    /// Set the status code.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ProtocolViolation`] if `code` is outside `100..=999`.
    pub fn set_status_code(&mut self, code: u16) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        match StatusCode::new(code) {
            Some(status) => {
                self.status = status;
                Ok(())
            }
            None => Err(ErrorKind::ProtocolViolation("status code must be within 100..=999").into()),
        }
    }

    /// Returns the status description.
    ///
    /// The first read caches the canonical phrase of the current status code. Later status code
    /// changes do not affect a cached description.
    pub fn status_description(&self) -> &str {
        self.description
            .get_or_init(|| Cow::Borrowed(describe(self.status.get())))
    }

    /// Set the status description.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingArgument`] for `None`, and [`ErrorKind::InvalidArgument`] if
    /// the description contains control characters.
    pub fn set_status_description(&mut self, description: Option<&str>) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        let Some(description) = description else {
            return Err(ErrorKind::MissingArgument("status description").into());
        };
        if description.chars().any(matches::is_forbidden_char) {
            return Err(ErrorKind::InvalidArgument(
                "status description contains control characters",
            )
            .into());
        }
        self.description = OnceCell::from(Cow::Owned(description.to_owned()));
        Ok(())
    }
}

// ===== Headers =====

impl ResponseState {
    /// Returns the header collection.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Replace the header collection.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingHeaders`] for `None`, the current collection is cleared
    /// regardless.
    pub fn set_headers(&mut self, headers: Option<HeaderMap>) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        self.headers.clear();
        match headers {
            Some(headers) => {
                self.headers = headers;
                Ok(())
            }
            None => Err(ErrorKind::MissingHeaders.into()),
        }
    }

    /// Set a header, replacing every existing value of the same name.
    ///
    /// The value is trimmed of surrounding whitespace.
    pub fn add_header<K: AsHeaderName>(&mut self, name: K, value: &str) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        let (name, value) = parse_header(&name, value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Append a header value, keeping existing values of the same name.
    ///
    /// The value is trimmed of surrounding whitespace.
    pub fn append_header<K: AsHeaderName>(&mut self, name: K, value: &str) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        let (name, value) = parse_header(&name, value)?;
        self.headers.append(name, value);
        Ok(())
    }

    /// Remove every value of a header.
    pub fn remove_header<K: AsHeaderName>(&mut self, name: K) -> Result<(), ResponseError> {
        if self.writable()? {
            self.headers.remove(name);
        }
        Ok(())
    }

    /// Returns the `Content-Type` header value.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).map(HeaderValue::as_str)
    }

    /// Set the `Content-Type` header.
    ///
    /// The value is trimmed. `None` or an empty string removes the header, while a whitespace
    /// only string stores an empty value.
    pub fn set_content_type(&mut self, value: Option<&str>) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        self.set_trimmed(CONTENT_TYPE, value)
    }

    /// Returns the `Location` header value.
    #[inline]
    pub fn redirect_location(&self) -> Option<&str> {
        self.headers.get(LOCATION).map(HeaderValue::as_str)
    }

    /// Set the `Location` header, same rules as [`set_content_type`][Self::set_content_type].
    pub fn set_redirect_location(&mut self, value: Option<&str>) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        self.set_trimmed(LOCATION, value)
    }

    fn set_trimmed(&mut self, name: HeaderName, value: Option<&str>) -> Result<(), ResponseError> {
        match value {
            None | Some("") => {
                self.headers.remove(&name);
            }
            Some(value) => {
                let value = value.trim().parse::<HeaderValue>()?;
                self.headers.insert(name, value);
            }
        }
        Ok(())
    }

    /// Set `Location`, status `302` and description `Found`.
    pub fn redirect(&mut self, url: &str) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        self.set_trimmed(LOCATION, Some(url))?;
        self.status = StatusCode::FOUND;
        self.description = OnceCell::from(Cow::Borrowed(describe(StatusCode::FOUND.get())));
        Ok(())
    }

    /// Copy headers, status code, cached description and protocol version from another response.
    pub fn copy_from(&mut self, template: &ResponseState) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        self.headers = template.headers.clone();
        self.status = template.status;
        self.description = template.description.clone();
        self.version = template.version;
        Ok(())
    }
}

fn parse_header<K: AsHeaderName>(name: &K, value: &str) -> Result<(HeaderName, HeaderValue), ResponseError> {
    let name = HeaderName::from_slice(name_str(name))?;
    let value = value.trim().parse::<HeaderValue>()?;
    Ok((name, value))
}

// ===== Framing =====

impl ResponseState {
    /// Returns the content length.
    ///
    /// `Some(-1)` means chunked. After headers are sent this is the committed framing, where
    /// `None` means the body ends with the connection.
    pub fn content_length(&self) -> Option<i64> {
        if let Some(coding) = self.coding {
            return coding.content_length();
        }
        if framing::is_chunked(&self.headers) {
            return Some(-1);
        }
        framing::declared_length(&self.headers).map(|len| len as i64)
    }

    /// Set an explicit content length, disabling chunked transfer.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::HeadersSent`] after headers are sent, and [`ErrorKind::OutOfRange`]
    /// for a negative length.
    pub fn set_content_length(&mut self, len: i64) -> Result<(), ResponseError> {
        self.framing_writable()?;
        let Ok(len) = u64::try_from(len) else {
            return Err(ErrorKind::OutOfRange("content length must not be negative").into());
        };
        self.headers.remove(TRANSFER_ENCODING);
        self.headers.insert(CONTENT_LENGTH, HeaderValue::from_u64(len));
        Ok(())
    }

    /// Returns `true` if chunked transfer is selected.
    pub fn send_chunked(&self) -> bool {
        match self.coding {
            Some(coding) => coding == Coding::Chunked,
            None => framing::is_chunked(&self.headers),
        }
    }

    /// Enable or disable chunked transfer, enabling removes any explicit content length.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::HeadersSent`] after headers are sent, and
    /// [`ErrorKind::ProtocolViolation`] when enabling for a peer that cannot parse chunked
    /// transfer.
    pub fn set_send_chunked(&mut self, chunked: bool) -> Result<(), ResponseError> {
        self.framing_writable()?;
        if chunked {
            if !self.peer.supports_chunked() {
                return Err(ErrorKind::ProtocolViolation(
                    "chunked transfer is not supported by an HTTP/1.0 peer",
                )
                .into());
            }
            self.headers.remove(CONTENT_LENGTH);
            self.headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        } else if framing::is_chunked(&self.headers) {
            self.headers.remove(TRANSFER_ENCODING);
        }
        Ok(())
    }

    /// Returns `false` if the connection closes after this response.
    pub fn keep_alive(&self) -> bool {
        !self
            .headers
            .get_all(CONNECTION)
            .any(|value| value.contains_token("close"))
    }

    /// Set whether the connection stays open after this response.
    pub fn set_keep_alive(&mut self, keep_alive: bool) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        if !keep_alive {
            self.headers.insert(CONNECTION, HeaderValue::from_static("close"));
        } else if !self.keep_alive() {
            // other connection options stay
            let options = self
                .headers
                .get_all(CONNECTION)
                .flat_map(|value| value.as_str().split(','))
                .map(|option| option.trim_matches([' ', '\t']))
                .filter(|option| !option.is_empty() && !option.eq_ignore_ascii_case("close"))
                .collect::<Vec<_>>()
                .join(", ");
            if options.is_empty() {
                self.headers.remove(CONNECTION);
            } else {
                self.headers.insert(CONNECTION, HeaderValue::from_string(options)?);
            }
        }
        Ok(())
    }

    /// Returns the committed framing, if headers are sent.
    #[inline]
    pub fn coding(&self) -> Option<Coding> {
        self.coding
    }
}

// ===== Version and lifecycle =====

impl ResponseState {
    /// Returns the response protocol version, `HTTP/1.1` by default.
    ///
    /// The status line is always written as `HTTP/1.1`.
    #[inline]
    pub fn protocol_version(&self) -> Version {
        self.version
    }

    /// Set the response protocol version.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingArgument`] for `None`, and [`ErrorKind::InvalidArgument`] for
    /// anything other than `HTTP/1.0` or `HTTP/1.1`.
    pub fn set_protocol_version(&mut self, version: Option<Version>) -> Result<(), ResponseError> {
        if !self.writable()? {
            return Ok(());
        }
        match version {
            None => Err(ErrorKind::MissingArgument("protocol version").into()),
            Some(version) if version.major() == 1 && matches!(version.minor(), 0 | 1) => {
                self.version = version;
                Ok(())
            }
            Some(_) => Err(ErrorKind::InvalidArgument("protocol version must be 1.0 or 1.1").into()),
        }
    }

    /// Returns the request protocol version of the peer.
    #[inline]
    pub fn peer_version(&self) -> Version {
        self.peer
    }

    /// Returns `true` if the status line and headers are written.
    #[inline]
    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    /// Returns `true` if the response is closed.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
