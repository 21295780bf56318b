use super::{
    HeaderValue,
    field::{GetAll, HeaderField},
    iter::Iter,
    name::{AsHeaderName, IntoHeaderName, into_name, name_str},
};

/// HTTP Headers Multimap.
///
/// Fields keep the order they were first inserted in. Lookup is ASCII case-insensitive and
/// linear, response header sets are small.
#[derive(Clone, Default)]
pub struct HeaderMap {
    fields: Vec<HeaderField>,
    len: usize,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            len: 0,
        }
    }

    /// Create new empty [`HeaderMap`] with at least the specified capacity of fields.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns headers length, counting every value of duplicate names.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of distinct header names.
    #[inline]
    pub fn fields_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if headers has no element.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|e| e.name().eq_ignore_ascii_case(name))
    }
}

// ===== Lookup =====

impl HeaderMap {
    /// Returns `true` if the map contains a header value for given header name.
    #[inline]
    pub fn contains_key<K: AsHeaderName>(&self, name: K) -> bool {
        self.position(name_str(&name)).is_some()
    }

    /// Returns a reference to the first header value corresponding to the given header name.
    ///
    /// ```rust
    /// use reply::headers::{standard::CONTENT_TYPE, HeaderMap, HeaderValue};
    ///
    /// let mut map = HeaderMap::new();
    /// map.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
    /// assert_eq!(map.get("content-type").unwrap().as_str(), "text/html");
    /// ```
    #[inline]
    pub fn get<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        self.field(name).map(HeaderField::value)
    }

    /// Returns the field corresponding to the given header name.
    #[inline]
    pub fn field<K: AsHeaderName>(&self, name: K) -> Option<&HeaderField> {
        let index = self.position(name_str(&name))?;
        self.fields.get(index)
    }

    /// Returns an iterator to all header values corresponding to the given header name.
    #[inline]
    pub fn get_all<K: AsHeaderName>(&self, name: K) -> GetAll<'_> {
        match self.field(name) {
            Some(field) => field.iter(),
            None => GetAll::empty(),
        }
    }

    /// Returns an iterator over headers as name and value pair.
    ///
    /// Duplicate names yield one pair per value.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    pub(crate) fn fields(&self) -> &[HeaderField] {
        &self.fields
    }
}

// ===== Mutation =====

impl HeaderMap {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did have this key present, all of its values are replaced in place, keeping the
    /// original position and name case, and the old first value is returned.
    ///
    /// If the map did not have this header key present, [`None`] is returned.
    ///
    /// # Panics
    ///
    /// When using static str, it must be valid header name, otherwise it panics.
    pub fn insert<K: IntoHeaderName>(&mut self, name: K, value: HeaderValue) -> Option<HeaderValue> {
        let name = into_name(name);
        match self.position(name.as_str()) {
            Some(index) => {
                let field = &mut self.fields[index];
                self.len -= field.len() - 1;
                Some(field.replace(value))
            }
            None => {
                self.fields.push(HeaderField::new(name, value));
                self.len += 1;
                None
            }
        }
    }

    /// Append a header key and value into the map.
    ///
    /// Unlike [`insert`][HeaderMap::insert], if header key is present, header value is still
    /// appended as extra value.
    ///
    /// # Panics
    ///
    /// When using static str, it must be valid header name, otherwise it panics.
    pub fn append<K: IntoHeaderName>(&mut self, name: K, value: HeaderValue) {
        let name = into_name(name);
        match self.position(name.as_str()) {
            Some(index) => self.fields[index].push(value),
            None => self.fields.push(HeaderField::new(name, value)),
        }
        self.len += 1;
    }

    /// Removes a header from the map, returning the first header value at the key if the key was
    /// previously in the map.
    pub fn remove<K: AsHeaderName>(&mut self, name: K) -> Option<HeaderValue> {
        let index = self.position(name_str(&name))?;
        let field = self.fields.remove(index);
        self.len -= field.len();
        // the rest of duplicate header values are dropped
        Some(field.into_parts().1)
    }

    /// Reserves capacity for at least `additional` more fields.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.fields.reserve(additional);
    }

    /// Clear headers map, removing all the value.
    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
        self.len = 0;
    }
}

impl std::fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: IntoHeaderName> FromIterator<(K, HeaderValue)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (K, HeaderValue)>>(iter: T) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.append(name, value);
        }
        map
    }
}

impl<K: IntoHeaderName> Extend<(K, HeaderValue)> for HeaderMap {
    fn extend<T: IntoIterator<Item = (K, HeaderValue)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}
