//! Versioned module identifiers: `module.name-MAJOR.MINOR.PATCH-BUILD`.
//!
//! The module name is a dot-separated identifier that never contains a dash,
//! so the first `-` always separates the name from the version. Versions are
//! totally ordered by major, then minor, then patch, then build number.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strata_util::errors::{ParseIdentifierError, ParseIdentifierErrorKind};

/// The numeric part of an identifier.
///
/// Field order matters: the derived `Ord` compares major, minor, patch, build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64, build: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}-{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

/// A module name paired with one concrete version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionIdentifier {
    module_name: String,
    version: Version,
}

impl VersionIdentifier {
    pub fn new(module_name: impl Into<String>, version: Version) -> Self {
        Self {
            module_name: module_name.into(),
            version,
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    /// Compare versions only, ignoring the module name.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }

    /// Same module and same major version.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.module_name == other.module_name && self.version.major == other.version.major
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.module_name, self.version)
    }
}

impl FromStr for VersionIdentifier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |kind| ParseIdentifierError::new(s, kind);

        let (name, version) = s
            .split_once('-')
            .ok_or_else(|| fail(ParseIdentifierErrorKind::MissingVersion))?;
        validate_module_name(name).map_err(fail)?;
        let version = parse_version(version).map_err(fail)?;

        Ok(Self::new(name, version))
    }
}

fn validate_module_name(name: &str) -> Result<(), ParseIdentifierErrorKind> {
    if name.is_empty() {
        return Err(ParseIdentifierErrorKind::EmptyModuleName);
    }
    for segment in name.split('.') {
        let valid = !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ParseIdentifierErrorKind::InvalidModuleName(
                segment.to_string(),
            ));
        }
    }
    Ok(())
}

fn parse_version(text: &str) -> Result<Version, ParseIdentifierErrorKind> {
    let (dotted, build) = text
        .split_once('-')
        .ok_or(ParseIdentifierErrorKind::MalformedVersion)?;
    if build.contains('-') {
        return Err(ParseIdentifierErrorKind::MalformedVersion);
    }

    let parts: Vec<&str> = dotted.split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        return Err(ParseIdentifierErrorKind::MalformedVersion);
    };

    Ok(Version {
        major: parse_number(major)?,
        minor: parse_number(minor)?,
        patch: parse_number(patch)?,
        build: parse_number(build)?,
    })
}

fn parse_number(token: &str) -> Result<u64, ParseIdentifierErrorKind> {
    let invalid = || ParseIdentifierErrorKind::InvalidNumber(token.to_string());
    // `u64::from_str` accepts a leading '+', which is not part of the format.
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}

impl Serialize for VersionIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
