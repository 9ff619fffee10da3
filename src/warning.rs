use std::fmt;

/// Non-fatal conditions noticed while planning a publish.
/// These never stop the pipeline but are reported to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishWarning {
    /// No version token in the scanned part of the manifest
    VersionNotFound { manifest: String, scan_lines: usize },
    /// Version token is not a full MAJOR.MINOR.PATCH version
    NonSemverVersion { version: String },
    /// Pre-release marker found; the version-pinned tag is skipped
    PrereleaseVersionSkipped { version: String, marker: String },
}

impl fmt::Display for PublishWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishWarning::VersionNotFound {
                manifest,
                scan_lines,
            } => {
                write!(
                    f,
                    "No version found in the first {} lines of '{}'; publishing the unversioned tag only",
                    scan_lines, manifest
                )
            }
            PublishWarning::NonSemverVersion { version } => {
                write!(
                    f,
                    "Version '{}' is not a MAJOR.MINOR.PATCH semantic version",
                    version
                )
            }
            PublishWarning::PrereleaseVersionSkipped { version, marker } => {
                write!(
                    f,
                    "Pre-release marker '{}' found; skipping version tag '{}'",
                    marker, version
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_found_display() {
        let warning = PublishWarning::VersionNotFound {
            manifest: "Cargo.toml".to_string(),
            scan_lines: 5,
        };
        let msg = warning.to_string();
        assert!(msg.contains("first 5 lines"));
        assert!(msg.contains("Cargo.toml"));
    }

    #[test]
    fn test_prerelease_skipped_display() {
        let warning = PublishWarning::PrereleaseVersionSkipped {
            version: "1.0.0".to_string(),
            marker: "beta".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Pre-release marker 'beta' found; skipping version tag '1.0.0'"
        );
    }
}
