//! Version string management for build metadata files
//!
//! The version lives in a line of the form `version = "X.Y.Z"`, optionally
//! suffixed with `-SNAPSHOT` for development builds. The string transforms
//! here are pure; only [`get_version`], [`set_version`] and [`apply`] touch
//! the filesystem.

use regex::{NoExpand, Regex};
use std::num::ParseIntError;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Pre-release marker appended to development versions
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("version not found in {0}")]
    NotFound(String),

    #[error("invalid version component '{component}': {source}")]
    InvalidComponent {
        component: String,
        #[source]
        source: ParseIntError,
    },

    #[error("version component '{0}' cannot be incremented")]
    Overflow(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn version_regex() -> &'static Regex {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    VERSION_RE.get_or_init(|| Regex::new(r#"version\s*=\s*"(.*)""#).expect("valid version pattern"))
}

/// Version found in `content`, if any
pub fn find_version(content: &str) -> Option<&str> {
    version_regex()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrite the first `version = "..."` occurrence, leaving the rest untouched
pub fn replace_version(content: &str, new_version: &str) -> String {
    let replacement = format!("version = \"{}\"", new_version);
    version_regex()
        .replace(content, NoExpand(&replacement))
        .into_owned()
}

/// Read the version from a metadata file
pub fn get_version(path: &Path) -> Result<String, VersionError> {
    let content = std::fs::read_to_string(path)?;
    find_version(&content)
        .map(str::to_string)
        .ok_or_else(|| VersionError::NotFound(path.display().to_string()))
}

/// Write a new version into a metadata file
pub fn set_version(path: &Path, new_version: &str) -> Result<(), VersionError> {
    let content = std::fs::read_to_string(path)?;
    std::fs::write(path, replace_version(&content, new_version))?;
    debug!(path = %path.display(), version = new_version, "wrote version");
    Ok(())
}

/// Remove a trailing `-SNAPSHOT`
pub fn strip_snapshot(version: &str) -> String {
    version
        .strip_suffix(SNAPSHOT_SUFFIX)
        .unwrap_or(version)
        .to_string()
}

/// Increment the patch component.
///
/// Any snapshot suffix is dropped first and missing components are padded
/// with `0`, so `"1"` bumps to `"1.0.1"`.
pub fn bump_patch(version: &str) -> Result<String, VersionError> {
    let base = strip_snapshot(version);
    let mut parts: Vec<String> = base.split('.').map(str::to_string).collect();
    while parts.len() < 3 {
        parts.push("0".to_string());
    }

    if let Some(last) = parts.last_mut() {
        let patch = last
            .parse::<u64>()
            .map_err(|source| VersionError::InvalidComponent {
                component: last.clone(),
                source,
            })?;
        let next = patch
            .checked_add(1)
            .ok_or_else(|| VersionError::Overflow(last.clone()))?;
        *last = next.to_string();
    }

    Ok(parts.join("."))
}

/// Which transforms to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionFlags {
    pub strip_snapshot: bool,
    pub bump_patch: bool,
    pub next_snapshot: bool,
}

/// Apply the requested transforms in their fixed order: strip snapshot,
/// bump patch, then move to the next snapshot without bumping twice.
pub fn next_version(current: &str, flags: VersionFlags) -> Result<String, VersionError> {
    let mut version = current.to_string();

    if flags.strip_snapshot {
        version = strip_snapshot(&version);
    }

    if flags.bump_patch {
        version = bump_patch(&version)?;
    }

    if flags.next_snapshot {
        if !flags.bump_patch {
            version = bump_patch(&version)?;
        }
        if !version.ends_with(SNAPSHOT_SUFFIX) {
            version.push_str(SNAPSHOT_SUFFIX);
        }
    }

    Ok(version)
}

/// Result of running the version command against a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--get`: the current version, nothing written
    Current(String),
    /// The file now holds this version
    Updated(String),
    /// The transforms produced the same version, nothing written
    Unchanged(String),
}

/// Read, transform and (only if changed) write back the version in `path`
pub fn apply(path: &Path, get: bool, flags: VersionFlags) -> Result<Outcome, VersionError> {
    let current = get_version(path)?;
    if get {
        return Ok(Outcome::Current(current));
    }

    let new_version = next_version(&current, flags)?;
    if new_version == current {
        return Ok(Outcome::Unchanged(current));
    }

    set_version(path, &new_version)?;
    Ok(Outcome::Updated(new_version))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = "[project]\nname = \"model-service\"\nversion = \"2.3.4\"\n\n[tool.other]\nversion = \"9.9.9\"\n";

    #[test]
    fn test_bump_patch() {
        assert_eq!(bump_patch("1.2.9").unwrap(), "1.2.10");
        assert_eq!(bump_patch("0.0.0").unwrap(), "0.0.1");
        assert_eq!(bump_patch("1.2.3-SNAPSHOT").unwrap(), "1.2.4");
    }

    #[test]
    fn test_bump_patch_pads_components() {
        assert_eq!(bump_patch("1").unwrap(), "1.0.1");
        assert_eq!(bump_patch("1.2").unwrap(), "1.2.1");
    }

    #[test]
    fn test_bump_patch_rejects_non_numeric() {
        assert!(matches!(
            bump_patch("1.2.x"),
            Err(VersionError::InvalidComponent { .. })
        ));
        assert!(matches!(
            bump_patch("1.2.18446744073709551615"),
            Err(VersionError::Overflow(_))
        ));
    }

    #[test]
    fn test_strip_snapshot_idempotent() {
        assert_eq!(strip_snapshot("1.0.0-SNAPSHOT"), "1.0.0");
        assert_eq!(strip_snapshot("1.0.0"), "1.0.0");
        let once = strip_snapshot("1.0.0-SNAPSHOT");
        assert_eq!(strip_snapshot(&once), once);
    }

    #[test]
    fn test_next_snapshot_bumps_once() {
        let next_only = VersionFlags {
            next_snapshot: true,
            ..Default::default()
        };
        assert_eq!(next_version("2.3.4", next_only).unwrap(), "2.3.5-SNAPSHOT");

        let with_bump = VersionFlags {
            bump_patch: true,
            next_snapshot: true,
            ..Default::default()
        };
        assert_eq!(next_version("2.3.4", with_bump).unwrap(), "2.3.5-SNAPSHOT");
    }

    #[test]
    fn test_release_from_snapshot() {
        let release = VersionFlags {
            strip_snapshot: true,
            ..Default::default()
        };
        assert_eq!(next_version("1.4.0-SNAPSHOT", release).unwrap(), "1.4.0");
        assert_eq!(
            next_version("1.4.0", VersionFlags::default()).unwrap(),
            "1.4.0"
        );
    }

    #[test]
    fn test_find_version_first_match() {
        assert_eq!(find_version(PYPROJECT), Some("2.3.4"));
        assert_eq!(find_version("version=\"0.1\""), Some("0.1"));
        assert_eq!(find_version("name = \"x\""), None);
    }

    #[test]
    fn test_replace_version_only_first() {
        let updated = replace_version(PYPROJECT, "2.3.5");
        assert_eq!(
            updated,
            "[project]\nname = \"model-service\"\nversion = \"2.3.5\"\n\n[tool.other]\nversion = \"9.9.9\"\n"
        );
    }

    #[test]
    fn test_replace_version_literal_dollar() {
        let updated = replace_version("version = \"1\"", "$1");
        assert_eq!(updated, "version = \"$1\"");
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        std::fs::write(&path, PYPROJECT).unwrap();

        let bumped = bump_patch(&get_version(&path).unwrap()).unwrap();
        set_version(&path, &bumped).unwrap();

        assert_eq!(get_version(&path).unwrap(), "2.3.5");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            PYPROJECT.replacen("2.3.4", "2.3.5", 1)
        );
    }

    #[test]
    fn test_apply_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        std::fs::write(&path, "version = \"1.0.0\"\n").unwrap();

        assert_eq!(
            apply(&path, true, VersionFlags::default()).unwrap(),
            Outcome::Current("1.0.0".to_string())
        );
        assert_eq!(
            apply(&path, false, VersionFlags::default()).unwrap(),
            Outcome::Unchanged("1.0.0".to_string())
        );

        let flags = VersionFlags {
            next_snapshot: true,
            ..Default::default()
        };
        assert_eq!(
            apply(&path, false, flags).unwrap(),
            Outcome::Updated("1.0.1-SNAPSHOT".to_string())
        );
        assert_eq!(get_version(&path).unwrap(), "1.0.1-SNAPSHOT");
    }

    #[test]
    fn test_missing_version_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        std::fs::write(&path, "[package]\nname = \"x\"\n").unwrap();

        assert!(matches!(
            get_version(&path),
            Err(VersionError::NotFound(_))
        ));
    }
}
