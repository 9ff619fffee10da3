use crate::config::ManifestSpec;
use crate::domain::VersionString;
use crate::error::Result;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Digit groups joined by literal dots (at least one dot), then any
/// pre-release or build suffix glued to them.
const VERSION_PATTERN: &str = r"(\d+(?:\.\d+)+)([0-9A-Za-z.+-]*)";

/// Extracts the version token from a manifest excerpt.
///
/// Returns the first substring matching the dotted-version pattern, or an
/// empty version when nothing matches. The pre-release flag is a plain,
/// case-sensitive substring search for `marker` in the matched declaration
/// (token plus suffix), so a marker elsewhere in the excerpt is ignored.
///
/// # Example
/// ```ignore
/// let v = extract_version("version = \"2.0.1-beta\"", "beta");
/// assert_eq!(v.as_str(), "2.0.1");
/// assert!(v.is_prerelease());
/// ```
pub fn extract_version(text: &str, marker: &str) -> VersionString {
    let Some(caps) = Regex::new(VERSION_PATTERN)
        .ok()
        .and_then(|re| re.captures(text))
    else {
        return VersionString::empty();
    };

    let declaration = caps.get(0).map_or("", |m| m.as_str());
    let token = caps.get(1).map_or("", |m| m.as_str());
    let prerelease = !marker.is_empty() && declaration.contains(marker);

    VersionString::new(token, prerelease)
}

/// Reads the first `scan_lines` lines of the manifest.
///
/// Lines are read as bytes and decoded lossily; invalid UTF-8 never fails
/// the read.
pub fn read_manifest_prefix(manifest: &ManifestSpec) -> Result<String> {
    let file = File::open(&manifest.path)?;
    let mut reader = BufReader::new(file);

    let mut excerpt = String::new();
    let mut line = Vec::new();
    for _ in 0..manifest.scan_lines {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        excerpt.push_str(text.trim_end_matches(['\r', '\n']));
        excerpt.push('\n');
    }

    Ok(excerpt)
}

/// Resolves the version declared near the top of the manifest.
///
/// # Returns
/// * `Ok(VersionString)` - The matched token, empty when none matched
/// * `Err` - If the manifest cannot be read
pub fn resolve_version(manifest: &ManifestSpec, marker: &str) -> Result<VersionString> {
    let excerpt = read_manifest_prefix(manifest)?;
    Ok(extract_version(&excerpt, marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn manifest_with(contents: &str, scan_lines: usize) -> (NamedTempFile, ManifestSpec) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let spec = ManifestSpec {
            path: file.path().to_path_buf(),
            scan_lines,
        };
        (file, spec)
    }

    #[test]
    fn test_extract_from_cargo_declaration() {
        let v = extract_version("version = \"1.4.0\"", "beta");
        assert_eq!(v.as_str(), "1.4.0");
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_extract_prerelease_declaration() {
        let v = extract_version("version = \"2.0.1-beta\"", "beta");
        assert_eq!(v.as_str(), "2.0.1");
        assert!(v.is_prerelease());
    }

    #[test]
    fn test_extract_first_match_wins() {
        let v = extract_version("version = \"0.9.1\"\nrust-version = \"1.70\"", "beta");
        assert_eq!(v.as_str(), "0.9.1");
    }

    #[test]
    fn test_extract_ignores_bare_integers() {
        let v = extract_version("name = \"app2\"\nedition = \"2021\"\nversion = \"3.1.0\"", "beta");
        assert_eq!(v.as_str(), "3.1.0");
    }

    #[test]
    fn test_extract_marker_only_counts_in_declaration() {
        let v = extract_version("name = \"alphabeta-indexer\"\nversion = \"2.0.0\"", "beta");
        assert_eq!(v.as_str(), "2.0.0");
        assert!(!v.is_prerelease());

        let v = extract_version("# beta channel\nversion = \"2.0.0\"", "beta");
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_extract_marker_in_build_suffix() {
        let v = extract_version("version = \"3.0.0-rc.1+beta.2\"", "beta");
        assert_eq!(v.as_str(), "3.0.0");
        assert!(v.is_prerelease());
    }

    #[test]
    fn test_extract_marker_is_case_sensitive() {
        let v = extract_version("version = \"1.0.0-BETA\"", "beta");
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_extract_no_match_is_empty() {
        let v = extract_version("[package]\nname = \"electrs\"", "beta");
        assert!(v.is_empty());
    }

    #[test]
    fn test_resolve_reads_only_prefix() {
        let (_file, spec) = manifest_with(
            "[package]\nname = \"electrs\"\n\n\n\n\nversion = \"1.0.0\"\n",
            5,
        );
        let v = resolve_version(&spec, "beta").unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_resolve_cargo_manifest() {
        let (_file, spec) = manifest_with(
            "[package]\nname = \"electrs\"\nversion = \"0.10.5\"\nauthors = []\n",
            5,
        );
        let v = resolve_version(&spec, "beta").unwrap();
        assert_eq!(v.as_str(), "0.10.5");
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_resolve_marker_outside_prefix_is_ignored() {
        let (_file, spec) = manifest_with(
            "[package]\nversion = \"1.0.0\"\n\n# beta features below\n",
            2,
        );
        let v = resolve_version(&spec, "beta").unwrap();
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_resolve_tolerates_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[package]\nversion = \"1.0.0\"\nauthors = [\"Jos\xe9\"]\n")
            .unwrap();
        let spec = ManifestSpec {
            path: file.path().to_path_buf(),
            scan_lines: 5,
        };

        let v = resolve_version(&spec, "beta").unwrap();
        assert_eq!(v.as_str(), "1.0.0");
    }

    #[test]
    fn test_resolve_invalid_utf8_before_version() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"# \xff\xfe\r\nversion = \"0.4.2\"\r\n").unwrap();
        let spec = ManifestSpec {
            path: file.path().to_path_buf(),
            scan_lines: 2,
        };

        let v = resolve_version(&spec, "beta").unwrap();
        assert_eq!(v.as_str(), "0.4.2");
    }

    #[test]
    fn test_resolve_missing_manifest_is_io_error() {
        let spec = ManifestSpec {
            path: "/nonexistent/Cargo.toml".into(),
            scan_lines: 5,
        };
        let err = resolve_version(&spec, "beta").unwrap_err();
        assert!(err.to_string().contains("I/O error"));
    }
}
