//! Target language version.
//!
//! Version-conditional rules take a `LanguageVersion` argument instead of
//! consulting global state, so each rule can be exercised per version.

use std::fmt;
use std::str::FromStr;

/// Version of the dynamic language the compiled program targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageVersion {
    pub major: u8,
    pub minor: u8,
}

impl LanguageVersion {
    pub const PY2_6: LanguageVersion = LanguageVersion::new(2, 6);
    pub const PY2_7: LanguageVersion = LanguageVersion::new(2, 7);
    pub const PY3: LanguageVersion = LanguageVersion::new(3, 8);

    #[inline]
    pub const fn new(major: u8, minor: u8) -> Self {
        LanguageVersion { major, minor }
    }

    /// Returns `true` if the language has a distinct eager (list-building)
    /// range builtin next to the lazy one.
    pub const fn has_eager_range(self) -> bool {
        self.major < 3
    }

    /// Range builtins coerce float arguments to integers.
    pub const fn accepts_float_range_arguments(self) -> bool {
        self.major < 3
    }

    /// Float arguments are coerced with an observable deprecation warning.
    pub const fn float_range_arguments_warn(self) -> bool {
        self.major == 2 && self.minor >= 7
    }

    /// Name of the eager builtin.
    pub const fn eager_range_name(self) -> &'static str {
        "range"
    }

    /// Name of the lazy builtin.
    pub const fn lazy_range_name(self) -> &'static str {
        if self.has_eager_range() {
            "xrange"
        } else {
            "range"
        }
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        LanguageVersion::PY2_7
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for LanguageVersion {
    type Err = String;

    /// Parses `"2.7"` or `"3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        let major = major
            .parse::<u8>()
            .map_err(|_| format!("invalid major version in '{s}'"))?;
        let minor = minor
            .parse::<u8>()
            .map_err(|_| format!("invalid minor version in '{s}'"))?;
        Ok(LanguageVersion::new(major, minor))
    }
}
