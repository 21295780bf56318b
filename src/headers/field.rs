use std::mem::replace;

use super::{HeaderName, HeaderValue};

/// Header Field.
///
/// Contains [`HeaderName`] and at least one [`HeaderValue`].
#[derive(Clone)]
pub struct HeaderField {
    name: HeaderName,
    value: HeaderValue,
    extra: Vec<HeaderValue>,
}

impl HeaderField {
    pub(crate) const fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self {
            name,
            value,
            extra: Vec::new(),
        }
    }

    /// Returns reference to [`HeaderName`].
    #[inline]
    pub const fn name(&self) -> &HeaderName {
        &self.name
    }

    /// Returns reference to the first [`HeaderValue`].
    #[inline]
    pub const fn value(&self) -> &HeaderValue {
        &self.value
    }

    /// Returns the number of [`HeaderValue`].
    ///
    /// This function will returns at least `1`.
    #[inline]
    #[allow(
        clippy::len_without_is_empty,
        reason = "Field always have at least 1 value"
    )]
    pub fn len(&self) -> usize {
        1 + self.extra.len()
    }

    /// Returns an iterator over [`HeaderValue`].
    #[inline]
    pub fn iter(&self) -> GetAll<'_> {
        GetAll::new(self)
    }

    /// Push header value.
    pub(crate) fn push(&mut self, value: HeaderValue) {
        self.extra.push(value);
    }

    /// Replace all values with given value, returns the previous first value.
    pub(crate) fn replace(&mut self, value: HeaderValue) -> HeaderValue {
        self.extra.clear();
        replace(&mut self.value, value)
    }

    /// Consume [`HeaderField`] into [`HeaderName`] and the first [`HeaderValue`].
    ///
    /// Extra header value will be dropped.
    #[inline]
    pub fn into_parts(self) -> (HeaderName, HeaderValue) {
        (self.name, self.value)
    }
}

impl std::fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderField")
            .field("name", &self.name)
            .field("values", &GetAll::new(self))
            .finish()
    }
}

// ===== Iterator =====

impl<'a> IntoIterator for &'a HeaderField {
    type Item = &'a HeaderValue;

    type IntoIter = GetAll<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        GetAll::new(self)
    }
}

/// Iterator returned from [`HeaderMap::get_all`][super::HeaderMap::get_all].
#[derive(Clone)]
pub struct GetAll<'a> {
    first: Option<&'a HeaderValue>,
    extra: std::slice::Iter<'a, HeaderValue>,
}

impl<'a> GetAll<'a> {
    pub(crate) fn new(field: &'a HeaderField) -> Self {
        Self {
            first: Some(&field.value),
            extra: field.extra.iter(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            first: None,
            extra: [].iter(),
        }
    }

    /// Returns `true` if there is still remaining value.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.first.is_some() || !self.extra.as_slice().is_empty()
    }
}

impl<'a> Iterator for GetAll<'a> {
    type Item = &'a HeaderValue;

    fn next(&mut self) -> Option<Self::Item> {
        match self.first.take() {
            Some(value) => Some(value),
            None => self.extra.next(),
        }
    }
}

impl std::fmt::Debug for GetAll<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
