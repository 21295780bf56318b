use std::str::FromStr;

/// HTTP Version.
///
/// Only the major and minor components are kept, see [`Version::from_components`].
///
/// [httpwg](https://httpwg.org/specs/rfc9112.html#http.version)
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Version(Inner);

#[derive(PartialEq, PartialOrd, Copy, Clone, Eq, Ord, Hash)]
enum Inner {
    Http09,
    Http10,
    Http11,
    H2,
    H3,
}

impl Version {
    /// `HTTP/0.9`
    pub const HTTP_09: Version = Version(Inner::Http09);

    /// `HTTP/1.0`
    pub const HTTP_10: Version = Version(Inner::Http10);

    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version(Inner::Http11);

    /// `HTTP/2.0`
    pub const HTTP_2: Version = Version(Inner::H2);

    /// `HTTP/3.0`
    pub const HTTP_3: Version = Version(Inner::H3);

    /// Create version from major and minor number.
    ///
    /// Returns `None` for unknown version.
    pub const fn from_parts(major: u32, minor: u32) -> Option<Version> {
        match (major, minor) {
            (0, 9) => Some(Self::HTTP_09),
            (1, 0) => Some(Self::HTTP_10),
            (1, 1) => Some(Self::HTTP_11),
            (2, 0) => Some(Self::HTTP_2),
            (3, 0) => Some(Self::HTTP_3),
            _ => None,
        }
    }

    /// Create version from dotted components, e.g: `[1, 1]` or `[1, 1, 4, 2]`.
    ///
    /// Components after major and minor are discarded. Returns `None` when there are less than
    /// two components or the version is unknown.
    pub fn from_components(components: &[u32]) -> Option<Version> {
        match components {
            [major, minor, ..] => Self::from_parts(*major, *minor),
            _ => None,
        }
    }

    /// Returns the major version number.
    #[inline]
    pub const fn major(&self) -> u32 {
        match self.0 {
            Inner::Http09 => 0,
            Inner::Http10 | Inner::Http11 => 1,
            Inner::H2 => 2,
            Inner::H3 => 3,
        }
    }

    /// Returns the minor version number.
    #[inline]
    pub const fn minor(&self) -> u32 {
        match self.0 {
            Inner::Http09 => 9,
            Inner::Http10 | Inner::H2 | Inner::H3 => 0,
            Inner::Http11 => 1,
        }
    }

    /// Returns `true` if a peer speaking this version can parse chunked transfer coding.
    #[inline]
    pub const fn supports_chunked(&self) -> bool {
        matches!(self.0, Inner::Http11 | Inner::H2 | Inner::H3)
    }

    /// Returns string representation of HTTP version, e.g: `HTTP/1.1`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            Inner::Http09 => "HTTP/0.9",
            Inner::Http10 => "HTTP/1.0",
            Inner::Http11 => "HTTP/1.1",
            Inner::H2 => "HTTP/2.0",
            Inner::H3 => "HTTP/3.0",
        }
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Version {
        Version::HTTP_11
    }
}

// ===== Parsing =====

/// An error returned when parsing unknown [`Version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVersion;

impl std::error::Error for UnknownVersion {}

impl std::fmt::Display for UnknownVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unknown http version")
    }
}

impl FromStr for Version {
    type Err = UnknownVersion;

    /// Parse `HTTP/1.1` or bare dotted components such as `1.1` or `1.1.0.2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("HTTP/").unwrap_or(s);
        let mut components = [0u32; 2];
        let mut len = 0;

        for part in s.split('.') {
            let Ok(value) = part.parse::<u32>() else {
                return Err(UnknownVersion);
            };
            if let Some(slot) = components.get_mut(len) {
                *slot = value;
                len += 1;
            }
        }

        match len {
            2 => Self::from_components(&components).ok_or(UnknownVersion),
            _ => Err(UnknownVersion),
        }
    }
}

// ===== Traits =====

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_version() {
        assert_eq!("HTTP/1.1".parse(), Ok(Version::HTTP_11));
        assert_eq!("HTTP/1.0".parse(), Ok(Version::HTTP_10));
        assert_eq!("1.1".parse(), Ok(Version::HTTP_11));
        assert_eq!("1.0.3.7".parse(), Ok(Version::HTTP_10));
        assert_eq!("2.0".parse(), Ok(Version::HTTP_2));
        assert_eq!("1".parse::<Version>(), Err(UnknownVersion));
        assert_eq!("1.x".parse::<Version>(), Err(UnknownVersion));
        assert_eq!("1.2".parse::<Version>(), Err(UnknownVersion));
        assert_eq!("".parse::<Version>(), Err(UnknownVersion));
    }

    #[test]
    fn components() {
        assert_eq!(Version::from_components(&[1, 1, 9, 9]), Some(Version::HTTP_11));
        assert_eq!(Version::from_components(&[1]), None);
        assert_eq!(Version::HTTP_10.major(), 1);
        assert_eq!(Version::HTTP_10.minor(), 0);
        assert!(!Version::HTTP_10.supports_chunked());
        assert!(!Version::HTTP_09.supports_chunked());
        assert!(Version::HTTP_11.supports_chunked());
        assert!(Version::HTTP_10 < Version::HTTP_11);
    }
}
