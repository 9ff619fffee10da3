use std::fmt;

/// Version token read from the manifest.
///
/// `value` holds digits and dots only and may be empty when nothing matched.
/// `prerelease` records whether the pre-release marker appeared in the
/// scanned manifest text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionString {
    value: String,
    prerelease: bool,
}

impl VersionString {
    /// Create a new version string
    pub fn new(value: impl Into<String>, prerelease: bool) -> Self {
        VersionString {
            value: value.into(),
            prerelease,
        }
    }

    /// An empty version, used when no token matched
    pub fn empty() -> Self {
        VersionString::default()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease
    }

    /// Strict semantic-version reading of the token, if it is one.
    ///
    /// `1.2.3` parses; `1.2` and `1.2.3.4` do not.
    pub fn semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.value).ok()
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_accessors() {
        let v = VersionString::new("1.2.3", false);
        assert_eq!(v.as_str(), "1.2.3");
        assert!(!v.is_empty());
        assert!(!v.is_prerelease());
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_empty_version() {
        let v = VersionString::empty();
        assert!(v.is_empty());
        assert!(!v.is_prerelease());
        assert!(v.semver().is_none());
    }

    #[test]
    fn test_semver_strictness() {
        assert_eq!(
            VersionString::new("1.2.3", false).semver(),
            Some(semver::Version::new(1, 2, 3))
        );
        assert!(VersionString::new("1.2", false).semver().is_none());
        assert!(VersionString::new("1.2.3.4", false).semver().is_none());
    }
}
