//! Version comparison logic.
//!
//! Handles checking if setup is needed by comparing the embedded version with
//! the config file version.

use anyhow::anyhow;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

/// Current application version from Cargo.toml
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Represents a semantic version (major.minor.patch)
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl SemanticVersion {
    /// Parse a version string like "0.1.0" into a SemanticVersion
    fn parse(version_str: &str) -> anyhow::Result<Self> {
        let mut parts = version_str.trim().split('.');
        let mut next = |name: &str| -> anyhow::Result<u32> {
            parts
                .next()
                .ok_or_else(|| {
                    anyhow!(
                        "Invalid version format: '{}'. Expected 'major.minor.patch'",
                        version_str
                    )
                })?
                .parse::<u32>()
                .map_err(|_| anyhow!("Invalid {name} version in '{version_str}'"))
        };

        let version = SemanticVersion {
            major: next("major")?,
            minor: next("minor")?,
            patch: next("patch")?,
        };

        if parts.next().is_some() {
            return Err(anyhow!(
                "Invalid version format: '{}'. Expected 'major.minor.patch'",
                version_str
            ));
        }

        Ok(version)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Reads the config version from the first line of the config file.
///
/// Expects the first line to match: `config_version = "X.Y.Z"`
///
/// # Errors
/// Returns an error if the file can't be read.
fn read_config_version_from_file(config_path: &Path) -> anyhow::Result<Option<String>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(config_path)?;
    let first_line = match content.lines().next() {
        Some(line) => line,
        None => return Ok(None),
    };

    let regex = Regex::new(r#"^\s*config_version\s*=\s*"([^"]+)""#)?;
    Ok(regex
        .captures(first_line)
        .map(|caps| caps[1].to_string()))
}

/// Determines if setup is needed by checking version and config file existence.
///
/// Setup is needed if:
/// 1. Config file doesn't exist, OR
/// 2. Config file exists but has no version line (legacy config), OR
/// 3. Config file version is older than current version
///
/// Returns the version that the config file was at (None if the file doesn't
/// exist), or `Ok(None)`-style "no setup needed" via the outer Option when
/// the version already matches.
pub fn check_setup_needed(config_path: &Path) -> anyhow::Result<Option<String>> {
    if !config_path.exists() {
        return Ok(Some("none (no config file)".to_string()));
    }

    let config_version = match read_config_version_from_file(config_path)? {
        Some(version) => version,
        None => return Ok(Some("unknown (legacy config)".to_string())),
    };

    let config_parsed = SemanticVersion::parse(&config_version)?;
    let current_parsed = SemanticVersion::parse(CURRENT_VERSION)?;

    match config_parsed.cmp(&current_parsed) {
        Ordering::Less => Ok(Some(config_version)),
        Ordering::Equal => Ok(None),
        Ordering::Greater => {
            // Config is newer than binary (shouldn't happen in practice).
            // Log a warning but continue - don't block startup.
            tracing::warn!(
                "Config version {} is newer than app version {}",
                config_version,
                CURRENT_VERSION
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_version_parse() {
        let v = SemanticVersion::parse("0.1.0").unwrap();
        assert_eq!(v.major, 0);
        assert_eq!(v.minor, 1);
        assert_eq!(v.patch, 0);
    }

    #[test]
    fn test_semantic_version_comparison() {
        let v1 = SemanticVersion::parse("0.0.4").unwrap();
        let v2 = SemanticVersion::parse("0.0.5").unwrap();
        let v3 = SemanticVersion::parse("0.1.0").unwrap();

        assert!(v1 < v2);
        assert!(v2 < v3);
        assert_eq!(v1, v1.clone());
    }

    #[test]
    fn test_invalid_version_format() {
        assert!(SemanticVersion::parse("0.1").is_err());
        assert!(SemanticVersion::parse("0.1.0.1").is_err());
        assert!(SemanticVersion::parse("invalid").is_err());
    }
}
