use crate::headers::{
    HeaderMap, HeaderValue,
    standard::{DATE, SERVER},
};
use crate::http::httpdate_now;

/// Response writer configuration.
///
/// The default configuration adds nothing to the caller's headers.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Add a `Date` header when headers are sent, unless one is present.
    pub date: bool,
    /// Add a `Server` header when headers are sent, unless one is present.
    pub server: Option<HeaderValue>,
}

impl Config {
    /// Create default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the `Date` header.
    #[inline]
    pub fn date(mut self, enabled: bool) -> Self {
        self.date = enabled;
        self
    }

    /// Set the `Server` header value.
    #[inline]
    pub fn server(mut self, value: HeaderValue) -> Self {
        self.server = Some(value);
        self
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) {
        if self.date && !headers.contains_key(DATE) {
            let date = httpdate_now();
            // httpdate is always ASCII
            if let Ok(value) = HeaderValue::from_string(String::from_utf8_lossy(&date).into_owned()) {
                headers.insert(DATE, value);
            }
        }
        if let Some(server) = &self.server {
            if !headers.contains_key(SERVER) {
                headers.insert(SERVER, server.clone());
            }
        }
    }
}
