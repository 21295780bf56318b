use bytes::Bytes;

use crate::headers::error::HeaderError;
use crate::matches;

/// HTTP Header name.
///
/// # Case
///
/// The name keeps the case it was created with, that case is what goes on the wire. Comparison
/// between names is ASCII case-insensitive.
#[derive(Clone)]
pub struct HeaderName {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Static(&'static str),
    /// is valid ASCII
    Arbitrary(Bytes),
}

impl HeaderName {
    /// Parse header name from static str.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header name.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        match validate_header_name(name.as_bytes()) {
            Ok(()) => Self {
                repr: Repr::Static(name),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Parse header name by copying from slice of bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header name.
    #[inline]
    pub fn from_slice<A: AsRef<[u8]>>(name: A) -> Result<Self, HeaderError> {
        let bytes = name.as_ref();
        match validate_header_name(bytes) {
            Ok(()) => Ok(Self {
                repr: Repr::Arbitrary(Bytes::copy_from_slice(bytes)),
            }),
            Err(err) => Err(err),
        }
    }

    /// Extracts a string slice of the header name, in the case it was created with.
    #[inline]
    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Static(s) => s,
            // SAFETY: `Arbitrary` is validated as `token`, which is a subset of ASCII
            Repr::Arbitrary(bytes) => unsafe { std::str::from_utf8_unchecked(bytes) },
        }
    }

    /// Checks that two header name are an ASCII case-insensitive match.
    #[inline]
    pub fn eq_ignore_ascii_case(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

// ===== Parser =====

const MAX_HEADER_NAME_LEN: usize = 1024;  // 1KB

/// token       = 1*tchar
/// field-name  = token
const fn validate_header_name(mut bytes: &[u8]) -> Result<(), HeaderError> {
    if !matches!(bytes.len(), 1..=MAX_HEADER_NAME_LEN) {
        return Err(HeaderError::invalid_len(bytes.len()));
    }

    while let [byte, rest @ ..] = bytes {
        if matches::is_token(*byte) {
            bytes = rest;
        } else {
            return Err(HeaderError::InvalidName);
        }
    }

    Ok(())
}

// ===== Traits =====

impl std::fmt::Display for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderName").field(&self.as_str()).finish()
    }
}

impl std::hash::Hash for HeaderName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for byte in self.as_str().bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl PartialEq for HeaderName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for HeaderName {}

impl PartialEq<str> for HeaderName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for HeaderName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl std::str::FromStr for HeaderName {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s)
    }
}

// ===== Lookup Traits =====

/// A type that can be used for [`HeaderMap`][super::HeaderMap] lookup.
#[allow(private_bounds)]
pub trait AsHeaderName: SealedRef { }
trait SealedRef {
    fn as_name_str(&self) -> &str;
}

impl AsHeaderName for str { }
impl SealedRef for str {
    #[inline]
    fn as_name_str(&self) -> &str {
        self
    }
}

impl AsHeaderName for String { }
impl SealedRef for String {
    #[inline]
    fn as_name_str(&self) -> &str {
        self
    }
}

impl AsHeaderName for HeaderName { }
impl SealedRef for HeaderName {
    #[inline]
    fn as_name_str(&self) -> &str {
        self.as_str()
    }
}

// blanket implementation
impl<K: AsHeaderName + ?Sized> AsHeaderName for &K { }
impl<S: SealedRef + ?Sized> SealedRef for &S {
    #[inline]
    fn as_name_str(&self) -> &str {
        S::as_name_str(self)
    }
}

pub(crate) fn name_str<K: AsHeaderName>(name: &K) -> &str {
    name.as_name_str()
}

// ===== Owned Traits =====

/// A type that can be used for name consuming [`HeaderMap`][super::HeaderMap] operation.
#[allow(private_bounds)]
pub trait IntoHeaderName: Sealed {}
trait Sealed: Sized {
    fn into_header_name(self) -> HeaderName;
}

/// # Panics
///
/// Static str must be a valid header name, otherwise it panics.
impl IntoHeaderName for &'static str {}
impl Sealed for &'static str {
    #[inline]
    fn into_header_name(self) -> HeaderName {
        HeaderName::from_static(self)
    }
}

impl IntoHeaderName for HeaderName {}
impl Sealed for HeaderName {
    #[inline]
    fn into_header_name(self) -> HeaderName {
        self
    }
}

impl IntoHeaderName for &HeaderName {}
impl Sealed for &HeaderName {
    #[inline]
    fn into_header_name(self) -> HeaderName {
        self.clone()
    }
}

pub(crate) fn into_name<K: IntoHeaderName>(name: K) -> HeaderName {
    name.into_header_name()
}

// ===== Standard Headers =====

// https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Headers

standard_header! {
    /// HTTP Standard Headers
    mod standard;

    // ===== Caching =====

    /// Directives for caching mechanisms in both requests and responses.
    pub const CACHE_CONTROL: HeaderName = "Cache-Control";

    /// A unique string identifying the version of the resource.
    pub const ETAG: HeaderName = "ETag";

    /// The last modification date of the resource.
    pub const LAST_MODIFIED: HeaderName = "Last-Modified";

    // ===== Connection management =====

    /// Controls whether the network connection stays open after the current transaction finishes.
    pub const CONNECTION: HeaderName = "Connection";

    /// Controls how long a persistent connection should stay open.
    ///
    /// Never written by a response, an entry with this name is dropped when headers are sent.
    pub const KEEP_ALIVE: HeaderName = "Keep-Alive";

    // ===== Cookies =====

    /// Send cookies from the server to the user-agent.
    pub const SET_COOKIE: HeaderName = "Set-Cookie";

    // ===== Message body information =====

    /// The size of the resource, in decimal number of bytes.
    pub const CONTENT_LENGTH: HeaderName = "Content-Length";

    /// Indicates the media type of the resource.
    pub const CONTENT_TYPE: HeaderName = "Content-Type";

    /// Used to specify the compression algorithm.
    pub const CONTENT_ENCODING: HeaderName = "Content-Encoding";

    // ===== Redirects =====

    /// Indicates the URL to redirect a page to.
    pub const LOCATION: HeaderName = "Location";

    // ===== Response context =====

    /// Lists the set of HTTP request methods supported by a resource.
    pub const ALLOW: HeaderName = "Allow";

    /// Contains information about the software used by the origin server to handle the request.
    pub const SERVER: HeaderName = "Server";

    // ===== Transfer coding =====

    /// Specifies the form of encoding used to safely transfer the resource to the user.
    pub const TRANSFER_ENCODING: HeaderName = "Transfer-Encoding";

    /// Allows the sender to include additional fields at the end of chunked message.
    pub const TRAILER: HeaderName = "Trailer";

    // ===== Other =====

    /// Contains the date and time at which the message was originated.
    pub const DATE: HeaderName = "Date";

    /// Indicates how long the user agent should wait before making a follow-up request.
    pub const RETRY_AFTER: HeaderName = "Retry-After";

    /// Used to upgrade an already established client/server connection to a different protocol.
    pub const UPGRADE: HeaderName = "Upgrade";
}

// ===== Macros =====

macro_rules! standard_header {
    (
        $(#[$mod_doc:meta])*
        mod $mod_name:ident;

        $(
            $(#[$doc:meta])*
            $vis:vis const $id:ident: $t:ty = $name:literal;
        )*
    ) => {
        $(#[$mod_doc])*
        pub mod $mod_name {
            use super::*;

            $(
                $(#[$doc])*
                $vis const $id: $t = HeaderName::from_static($name);
            )*
        }
    };
}

use standard_header;
