//! PacBio BAM format versions.
//!
//! The `@HD pb` tag records which revision of the PacBio BAM conventions a file follows.
//! [`Version`] parses that value and orders it so that version gates can reject files that are
//! too old. Text that does not parse as `MAJOR.MINOR.PATCH` yields an invalid version which
//! sorts below every real version, so a gate never silently passes garbage.

use std::fmt;

/// A `MAJOR.MINOR.PATCH` version, or an invalid sentinel.
///
/// Ordering is field by field (major, then minor, then patch); the invalid sentinel is less than
/// every valid version, including `0.0.0`.
///
/// # Examples
///
/// ```
/// use pbheader_lib::version::Version;
///
/// assert!(Version::parse("1.2.3") < Version::parse("1.3.0"));
/// assert!(Version::parse("garbage") < Version::parse("0.0.1"));
/// assert_eq!(Version::parse("3.0.1").to_string(), "3.0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    // None sorts before Some, which gives the invalid sentinel its ordering
    parts: Option<[u32; 3]>,
}

impl Version {
    /// The oldest PacBio BAM version accepted.
    pub const MINIMUM: Version = Version::new(3, 0, 1);

    /// The version written when a header does not specify one.
    pub const CURRENT: Version = Version::new(3, 0, 7);

    /// The sentinel produced by unparseable input.
    pub const INVALID: Version = Version { parts: None };

    /// Creates a valid version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { parts: Some([major, minor, patch]) }
    }

    /// Parses `MAJOR.MINOR.PATCH`.
    ///
    /// Exactly three dot-separated unsigned integers are required; anything else yields
    /// [`Version::INVALID`]. Fields must be plain decimal digits with no sign and no leading
    /// zero, so that [`Display`](fmt::Display) reproduces any valid input exactly.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut fields = s.split('.');
        let mut parts = [0u32; 3];
        for part in &mut parts {
            match fields.next().and_then(parse_field) {
                Some(value) => *part = value,
                None => return Self::INVALID,
            }
        }
        if fields.next().is_some() {
            return Self::INVALID;
        }
        Self { parts: Some(parts) }
    }

    /// Returns true unless this is the invalid sentinel.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.parts.is_some()
    }

    #[must_use]
    pub fn major(&self) -> u32 {
        self.parts.map_or(0, |p| p[0])
    }

    #[must_use]
    pub fn minor(&self) -> u32 {
        self.parts.map_or(0, |p| p[1])
    }

    #[must_use]
    pub fn patch(&self) -> u32 {
        self.parts.map_or(0, |p| p[2])
    }

    /// Returns true if this version satisfies [`Version::MINIMUM`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        *self >= Self::MINIMUM
    }
}

/// Parses one version field: `0`, or ASCII digits not starting with `0`.
fn parse_field(field: &str) -> Option<u32> {
    let canonical = !field.is_empty()
        && field.bytes().all(|b| b.is_ascii_digit())
        && (field == "0" || !field.starts_with('0'));
    if canonical { field.parse().ok() } else { None }
}

impl Default for Version {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parts {
            Some([major, minor, patch]) => write!(f, "{major}.{minor}.{patch}"),
            None => f.write_str("invalid"),
        }
    }
}
